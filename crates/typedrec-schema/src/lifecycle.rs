//! # Record Conversion
//!
//! The four public conversions between records and their external forms,
//! plus YAML variants of the text pair:
//!
//! | From | To | Entry point |
//! |---|---|---|
//! | JSON object map | `Record` | [`SchemaRegistry::from_map`] |
//! | JSON text | `Record` | [`SchemaRegistry::from_text`] |
//! | `Record` | JSON object map | [`SchemaRegistry::to_map`] |
//! | `Record` | JSON text | [`SchemaRegistry::to_text`] |
//!
//! Reading a map back is only possible for record types without required
//! construction-only fields, checked recursively through record-typed
//! fields. Writing such a record is allowed but logs a warning unless the
//! caller suppresses it.
//!
//! Key renaming applies to the whole tree, including records nested in
//! lists.

use std::collections::HashSet;

use serde_json::{Map, Value};
use typedrec_core::case::{recursive_rename, Converter};
use typedrec_core::{text, ConversionOptions, IntoMappingMode, RecordError};

use crate::registry::{FieldDef, SchemaRegistry};
use crate::value::Record;

impl SchemaRegistry {
    /// Whether `record` (or any record type reachable through its
    /// record-typed fields) declares a construction-only field without a
    /// default. Each record type is visited at most once, so recursive
    /// declarations terminate.
    ///
    /// # Errors
    ///
    /// Returns `RecordError::UnknownRecordType` if a visited type is not
    /// registered.
    pub fn has_construction_only_fields(&self, record: &str) -> Result<bool, RecordError> {
        let mut visited = HashSet::new();
        self.has_construction_only_fields_in(record, &mut visited)
    }

    fn has_construction_only_fields_in<'a>(
        &'a self,
        record: &str,
        visited: &mut HashSet<&'a str>,
    ) -> Result<bool, RecordError> {
        let schema = self.schema(record)?;
        visited.insert(schema.name());

        if schema
            .fields()
            .iter()
            .any(FieldDef::is_required_construction_only)
        {
            return Ok(true);
        }

        for field in schema.fields() {
            if let Some(child) = field.ty().record_name() {
                if !visited.contains(child) && self.has_construction_only_fields_in(child, visited)? {
                    return Ok(true);
                }
            }
        }
        Ok(false)
    }

    /// Build a `record` from a raw map, renaming keys per `mapping_mode`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidMappingMode`, `UnconstructibleType`, and any binding
    /// or validation error raised while constructing the record.
    pub fn from_map(
        &self,
        record: &str,
        raw: &Map<String, Value>,
        mapping_mode: impl IntoMappingMode,
    ) -> Result<Record, RecordError> {
        let mode = mapping_mode.into_mapping_mode()?;

        if self.has_construction_only_fields(record)? {
            return Err(RecordError::UnconstructibleType {
                record: record.to_string(),
            });
        }

        tracing::debug!(record, mode = %mode, "constructing record from map");
        match mode.converter() {
            Some(converter) => self.construct_from_map(record, &rename_tree(raw, converter)),
            None => self.construct_from_map(record, raw),
        }
    }

    /// Parse JSON text and build a `record` from it.
    ///
    /// # Errors
    ///
    /// Returns `MalformedInput` for invalid JSON or a non-object document,
    /// then everything [`from_map`](Self::from_map) can return.
    pub fn from_text(
        &self,
        record: &str,
        raw: &str,
        mapping_mode: impl IntoMappingMode,
    ) -> Result<Record, RecordError> {
        let map = text::parse_json(raw)?;
        self.from_map(record, &map, mapping_mode)
    }

    /// Parse YAML text and build a `record` from it.
    ///
    /// # Errors
    ///
    /// Same as [`from_text`](Self::from_text).
    pub fn from_yaml(
        &self,
        record: &str,
        raw: &str,
        mapping_mode: impl IntoMappingMode,
    ) -> Result<Record, RecordError> {
        let map = text::parse_yaml(raw)?;
        self.from_map(record, &map, mapping_mode)
    }

    /// Flatten a record into a map.
    ///
    /// Top-level `null` fields are dropped unless `options.keep_none` is
    /// set. Nested records keep all their fields.
    ///
    /// # Errors
    ///
    /// Returns `UnknownRecordType` if the record's type is not registered
    /// here, and `Serialization` for values JSON cannot hold.
    pub fn to_map(
        &self,
        record: &Record,
        options: &ConversionOptions,
    ) -> Result<Map<String, Value>, RecordError> {
        if options.warn_on_construction_only
            && self.has_construction_only_fields(record.type_name())?
        {
            tracing::warn!(
                record = record.type_name(),
                "records with construction-only fields cannot be re-instantiated from a map or text"
            );
        }

        let mut map = Map::with_capacity(record.len());
        for (name, value) in record.fields() {
            if value.is_null() && !options.keep_none {
                continue;
            }
            map.insert(name.to_string(), value.to_json()?);
        }

        Ok(match options.mapping_mode.converter() {
            Some(converter) => rename_tree(&map, converter),
            None => map,
        })
    }

    /// Render a record as compact JSON, keys in declaration order.
    ///
    /// # Errors
    ///
    /// Same as [`to_map`](Self::to_map).
    pub fn to_text(&self, record: &Record, options: &ConversionOptions) -> Result<String, RecordError> {
        text::render_json(&self.to_map(record, options)?)
    }

    /// Render a record as YAML.
    ///
    /// # Errors
    ///
    /// Same as [`to_map`](Self::to_map).
    pub fn to_yaml(&self, record: &Record, options: &ConversionOptions) -> Result<String, RecordError> {
        text::render_yaml(&self.to_map(record, options)?)
    }
}

/// Rename every key in the tree, including objects held in lists.
fn rename_tree(map: &Map<String, Value>, converter: Converter) -> Map<String, Value> {
    recursive_rename(map, converter)
        .into_iter()
        .map(|(key, value)| (key, rename_within_lists(value, converter)))
        .collect()
}

/// Walk an already-renamed value and rename objects found inside lists.
fn rename_within_lists(value: Value, converter: Converter) -> Value {
    match value {
        Value::Array(items) => Value::Array(
            items
                .into_iter()
                .map(|item| match item {
                    Value::Object(obj) => Value::Object(rename_tree(&obj, converter)),
                    other => rename_within_lists(other, converter),
                })
                .collect(),
        ),
        Value::Object(obj) => Value::Object(
            obj.into_iter()
                .map(|(key, value)| (key, rename_within_lists(value, converter)))
                .collect(),
        ),
        other => other,
    }
}
