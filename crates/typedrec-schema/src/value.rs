//! # Runtime Values and Records
//!
//! [`FieldValue`] is the runtime value of a record field. Raw JSON objects
//! that have not been coerced into a record yet are kept as
//! [`FieldValue::Map`]; the reconciler replaces them with
//! [`FieldValue::Record`] when the declared type calls for one.
//!
//! A [`Record`] can only be produced by the registry's construction path,
//! so every `Record` in existence has passed validation. There are no
//! public mutators.

use std::fmt;

use serde_json::{Map, Number, Value};
use typedrec_core::RecordError;

/// Runtime value of a record field.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    List(Vec<FieldValue>),
    /// A raw key/value map, not (yet) a record.
    Map(Map<String, Value>),
    Record(Record),
}

impl FieldValue {
    /// Runtime type name, as used in error messages. Records report their
    /// record type name.
    pub fn type_name(&self) -> &str {
        match self {
            Self::Null => "None",
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::Float(_) => "float",
            Self::Str(_) => "str",
            Self::List(_) => "list",
            Self::Map(_) => "dict",
            Self::Record(record) => record.type_name(),
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[FieldValue]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_record(&self) -> Option<&Record> {
        match self {
            Self::Record(record) => Some(record),
            _ => None,
        }
    }

    /// Lift a JSON value. Objects stay raw maps; integers that fit in
    /// `i64` become `Int`, every other number becomes `Float`.
    pub fn from_json(value: Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(b) => Self::Bool(b),
            Value::Number(n) => match n.as_i64() {
                Some(i) => Self::Int(i),
                None => Self::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            Value::String(s) => Self::Str(s),
            Value::Array(items) => Self::List(items.into_iter().map(Self::from_json).collect()),
            Value::Object(map) => Self::Map(map),
        }
    }

    /// Lower to a JSON value. Records become objects holding every field,
    /// `null`s included.
    ///
    /// # Errors
    ///
    /// Returns `RecordError::Serialization` for NaN or infinite floats,
    /// which JSON cannot represent.
    pub fn to_json(&self) -> Result<Value, RecordError> {
        Ok(match self {
            Self::Null => Value::Null,
            Self::Bool(b) => Value::Bool(*b),
            Self::Int(i) => Value::from(*i),
            Self::Float(f) => Number::from_f64(*f).map(Value::Number).ok_or_else(|| {
                RecordError::Serialization(format!("cannot represent float {f} in JSON"))
            })?,
            Self::Str(s) => Value::String(s.clone()),
            Self::List(items) => Value::Array(
                items
                    .iter()
                    .map(FieldValue::to_json)
                    .collect::<Result<_, _>>()?,
            ),
            Self::Map(map) => Value::Object(map.clone()),
            Self::Record(record) => Value::Object(record.to_json_map()?),
        })
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("null"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(i) => write!(f, "{i}"),
            Self::Float(x) => write!(f, "{x:?}"),
            Self::Str(s) => write!(f, "{s:?}"),
            Self::List(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
            Self::Map(map) => {
                let rendered = serde_json::to_string(map).map_err(|_| fmt::Error)?;
                f.write_str(&rendered)
            }
            Self::Record(record) => write!(f, "{record}"),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        Self::Str(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        Self::Str(s)
    }
}

impl From<i64> for FieldValue {
    fn from(i: i64) -> Self {
        Self::Int(i)
    }
}

impl From<i32> for FieldValue {
    fn from(i: i32) -> Self {
        Self::Int(i64::from(i))
    }
}

impl From<f64> for FieldValue {
    fn from(x: f64) -> Self {
        Self::Float(x)
    }
}

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<Record> for FieldValue {
    fn from(record: Record) -> Self {
        Self::Record(record)
    }
}

impl From<Map<String, Value>> for FieldValue {
    fn from(map: Map<String, Value>) -> Self {
        Self::Map(map)
    }
}

impl<T: Into<FieldValue>> From<Vec<T>> for FieldValue {
    fn from(items: Vec<T>) -> Self {
        Self::List(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<FieldValue>> From<Option<T>> for FieldValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

/// A validated record: its type name plus stored field values in
/// declaration order. Construction-only fields are never stored.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    type_name: String,
    fields: Vec<(String, FieldValue)>,
}

impl Record {
    pub(crate) fn new(type_name: impl Into<String>, fields: Vec<(String, FieldValue)>) -> Self {
        Self {
            type_name: type_name.into(),
            fields,
        }
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// Value of a stored field.
    pub fn get(&self, field: &str) -> Option<&FieldValue> {
        self.fields
            .iter()
            .find(|(name, _)| name == field)
            .map(|(_, value)| value)
    }

    /// Stored fields in declaration order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.fields.iter().map(|(name, value)| (name.as_str(), value))
    }

    /// Number of stored fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Every stored field as a JSON object, without filtering or renaming.
    ///
    /// # Errors
    ///
    /// Returns `RecordError::Serialization` if a value has no JSON form.
    pub fn to_json_map(&self) -> Result<Map<String, Value>, RecordError> {
        self.fields
            .iter()
            .map(|(name, value)| Ok((name.clone(), value.to_json()?)))
            .collect()
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.type_name)?;
        for (i, (name, value)) in self.fields.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{name}={value}")?;
        }
        f.write_str(")")
    }
}
