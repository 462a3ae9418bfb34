//! # Mapping Modes
//!
//! A [`MappingMode`] selects the key casing used by the external (map or
//! text) representation of a record. It is an explicit value threaded
//! through every conversion call; there is no process-wide setting.
//!
//! Callers that receive the mode from configuration or user input can
//! pass a string or the numeric code instead. Anything that does not name
//! one of the three modes is rejected with
//! [`RecordError::InvalidMappingMode`].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::case::{to_camel, to_snake, Converter};
use crate::error::RecordError;

/// Key casing policy for map and text conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[repr(u8)]
pub enum MappingMode {
    /// Target representation uses `snake_case` keys.
    SnakeCase = 1,
    /// Target representation uses `camelCase` keys.
    CamelCase = 2,
    /// Keys are left unchanged.
    #[default]
    NoMap = 3,
}

impl MappingMode {
    /// All recognized modes.
    pub const ALL: [MappingMode; 3] = [Self::SnakeCase, Self::CamelCase, Self::NoMap];

    /// The key converter for this mode, or `None` when keys are kept.
    pub fn converter(self) -> Option<Converter> {
        match self {
            Self::SnakeCase => Some(to_snake),
            Self::CamelCase => Some(to_camel),
            Self::NoMap => None,
        }
    }

    /// The mode whose converter maps keys produced by this mode back to
    /// the opposite convention.
    pub fn inverse(self) -> Self {
        match self {
            Self::SnakeCase => Self::CamelCase,
            Self::CamelCase => Self::SnakeCase,
            Self::NoMap => Self::NoMap,
        }
    }

    /// Canonical snake_case name, as accepted by [`FromStr`].
    pub fn as_str(self) -> &'static str {
        match self {
            Self::SnakeCase => "snake_case",
            Self::CamelCase => "camel_case",
            Self::NoMap => "no_map",
        }
    }
}

impl fmt::Display for MappingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MappingMode {
    type Err = RecordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "snake_case" | "SnakeCase" => Ok(Self::SnakeCase),
            "camel_case" | "CamelCase" => Ok(Self::CamelCase),
            "no_map" | "NoMap" => Ok(Self::NoMap),
            other => Err(RecordError::InvalidMappingMode(other.to_string())),
        }
    }
}

impl TryFrom<u8> for MappingMode {
    type Error = RecordError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            1 => Ok(Self::SnakeCase),
            2 => Ok(Self::CamelCase),
            3 => Ok(Self::NoMap),
            other => Err(RecordError::InvalidMappingMode(other.to_string())),
        }
    }
}

/// Anything a conversion call accepts as a mapping mode.
pub trait IntoMappingMode {
    /// Resolve to a recognized mode.
    ///
    /// # Errors
    ///
    /// Returns `RecordError::InvalidMappingMode` for unrecognized values.
    fn into_mapping_mode(self) -> Result<MappingMode, RecordError>;
}

impl IntoMappingMode for MappingMode {
    fn into_mapping_mode(self) -> Result<MappingMode, RecordError> {
        Ok(self)
    }
}

impl IntoMappingMode for &str {
    fn into_mapping_mode(self) -> Result<MappingMode, RecordError> {
        self.parse()
    }
}

impl IntoMappingMode for &String {
    fn into_mapping_mode(self) -> Result<MappingMode, RecordError> {
        self.parse()
    }
}

impl IntoMappingMode for u8 {
    fn into_mapping_mode(self) -> Result<MappingMode, RecordError> {
        MappingMode::try_from(self)
    }
}
