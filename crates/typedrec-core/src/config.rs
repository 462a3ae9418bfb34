//! Conversion options for record-to-map and record-to-text output.
//!
//! Defaults match the most common use: drop `null` fields, keep keys as
//! declared, and warn when a record cannot be read back. Override via
//! environment variables or explicit construction.

use serde::{Deserialize, Serialize};

use crate::error::RecordError;
use crate::mapping::{IntoMappingMode, MappingMode};

/// Options accepted by `to_map` / `to_text`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConversionOptions {
    /// Keep top-level fields whose value is `null`.
    pub keep_none: bool,
    /// Key casing of the produced map.
    pub mapping_mode: MappingMode,
    /// Emit a warning when the record type has required construction-only
    /// fields, since the output cannot be turned back into a record.
    pub warn_on_construction_only: bool,
}

impl Default for ConversionOptions {
    fn default() -> Self {
        Self {
            keep_none: false,
            mapping_mode: MappingMode::NoMap,
            warn_on_construction_only: true,
        }
    }
}

impl ConversionOptions {
    /// Load options from environment variables.
    ///
    /// Variables:
    /// - `TYPEDREC_KEEP_NONE` (default: `false`)
    /// - `TYPEDREC_MAPPING_MODE` (default: `no_map`)
    /// - `TYPEDREC_WARN_ON_CONSTRUCTION_ONLY` (default: `true`)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Load options through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let mapping_mode = match lookup("TYPEDREC_MAPPING_MODE") {
            Some(raw) => raw
                .parse()
                .map_err(|_| ConfigError::InvalidMappingMode(raw.clone()))?,
            None => defaults.mapping_mode,
        };
        Ok(Self {
            keep_none: env_flag(&lookup, "TYPEDREC_KEEP_NONE", defaults.keep_none)?,
            mapping_mode,
            warn_on_construction_only: env_flag(
                &lookup,
                "TYPEDREC_WARN_ON_CONSTRUCTION_ONLY",
                defaults.warn_on_construction_only,
            )?,
        })
    }

    /// Keep `null` fields in the output.
    pub fn keep_none(mut self, keep_none: bool) -> Self {
        self.keep_none = keep_none;
        self
    }

    /// Rename keys according to `mode`.
    pub fn mapping_mode(mut self, mode: MappingMode) -> Self {
        self.mapping_mode = mode;
        self
    }

    /// Rename keys according to a mode given as a name or numeric code.
    ///
    /// # Errors
    ///
    /// Returns `RecordError::InvalidMappingMode` if `mode` is not recognized.
    pub fn try_mapping_mode(mut self, mode: impl IntoMappingMode) -> Result<Self, RecordError> {
        self.mapping_mode = mode.into_mapping_mode()?;
        Ok(self)
    }

    /// Enable or suppress the construction-only warning.
    pub fn warn_on_construction_only(mut self, warn: bool) -> Self {
        self.warn_on_construction_only = warn;
        self
    }
}

fn env_flag<F>(lookup: &F, var: &str, default: bool) -> Result<bool, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(var) {
        None => Ok(default),
        Some(raw) => match raw.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Ok(true),
            "0" | "false" | "no" | "off" => Ok(false),
            _ => Err(ConfigError::InvalidFlag(var.to_string(), raw)),
        },
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("TYPEDREC_MAPPING_MODE is not a recognized mapping mode: {0}")]
    InvalidMappingMode(String),
    #[error("invalid boolean for {0}: {1}")]
    InvalidFlag(String, String),
}
