//! # Text Codec
//!
//! Parses and renders the structured text encodings of a record map.
//! JSON is the primary encoding; YAML is accepted and produced through
//! the same JSON value model.
//!
//! The top level of every document must be an object. Object key order
//! is preserved in both directions, so rendered output lists keys in the
//! order the map holds them.

use serde_json::{Map, Value};

use crate::error::RecordError;

/// Parse JSON text into an object map.
///
/// # Errors
///
/// Returns `RecordError::MalformedInput` if the text is not valid JSON or
/// its top level is not an object.
pub fn parse_json(text: &str) -> Result<Map<String, Value>, RecordError> {
    let value: Value = serde_json::from_str(text).map_err(|e| {
        tracing::debug!(line = e.line(), column = e.column(), "rejected malformed json input");
        RecordError::MalformedInput {
            format: "json",
            reason: e.to_string(),
        }
    })?;
    expect_object(value, "json")
}

/// Render an object map as compact JSON.
///
/// # Errors
///
/// Returns `RecordError::Serialization` if serialization fails.
pub fn render_json(map: &Map<String, Value>) -> Result<String, RecordError> {
    serde_json::to_string(map).map_err(|e| RecordError::Serialization(e.to_string()))
}

/// Parse YAML text into an object map.
///
/// # Errors
///
/// Returns `RecordError::MalformedInput` if the text is not valid YAML,
/// uses constructs with no JSON equivalent, or its top level is not a
/// mapping.
pub fn parse_yaml(text: &str) -> Result<Map<String, Value>, RecordError> {
    let yaml: serde_yaml::Value =
        serde_yaml::from_str(text).map_err(|e| {
            tracing::debug!(error = %e, "rejected malformed yaml input");
            RecordError::MalformedInput {
                format: "yaml",
                reason: e.to_string(),
            }
        })?;
    let value = yaml_to_json_value(&yaml).map_err(|reason| RecordError::MalformedInput {
        format: "yaml",
        reason,
    })?;
    expect_object(value, "yaml")
}

/// Render an object map as YAML.
///
/// # Errors
///
/// Returns `RecordError::Serialization` if serialization fails.
pub fn render_yaml(map: &Map<String, Value>) -> Result<String, RecordError> {
    serde_yaml::to_string(map).map_err(|e| RecordError::Serialization(e.to_string()))
}

fn expect_object(value: Value, format: &'static str) -> Result<Map<String, Value>, RecordError> {
    match value {
        Value::Object(map) => Ok(map),
        other => {
            let found = json_kind(&other);
            tracing::debug!(format, found, "rejected non-object document");
            Err(RecordError::MalformedInput {
                format,
                reason: format!("expected an object at the top level, found {found}"),
            })
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Convert a `serde_yaml::Value` tree into the equivalent JSON tree.
///
/// Scalar mapping keys are stringified and tags are ignored.
fn yaml_to_json_value(yaml: &serde_yaml::Value) -> Result<Value, String> {
    match yaml {
        serde_yaml::Value::Null => Ok(Value::Null),
        serde_yaml::Value::Bool(b) => Ok(Value::Bool(*b)),
        serde_yaml::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Ok(Value::from(i))
            } else if let Some(u) = n.as_u64() {
                Ok(Value::from(u))
            } else if let Some(f) = n.as_f64() {
                serde_json::Number::from_f64(f)
                    .map(Value::Number)
                    .ok_or_else(|| format!("cannot represent float {f} in JSON"))
            } else {
                Err(format!("unsupported YAML number: {n:?}"))
            }
        }
        serde_yaml::Value::String(s) => Ok(Value::String(s.clone())),
        serde_yaml::Value::Sequence(seq) => seq
            .iter()
            .map(yaml_to_json_value)
            .collect::<Result<Vec<_>, _>>()
            .map(Value::Array),
        serde_yaml::Value::Mapping(mapping) => {
            let mut map = Map::with_capacity(mapping.len());
            for (k, v) in mapping {
                let key = match k {
                    serde_yaml::Value::String(s) => s.clone(),
                    serde_yaml::Value::Number(n) => n.to_string(),
                    serde_yaml::Value::Bool(b) => b.to_string(),
                    other => return Err(format!("unsupported YAML map key: {other:?}")),
                };
                map.insert(key, yaml_to_json_value(v)?);
            }
            Ok(Value::Object(map))
        }
        serde_yaml::Value::Tagged(tagged) => yaml_to_json_value(&tagged.value),
    }
}
