//! # Error Types: Structured Record Errors
//!
//! Every failure raised while constructing, validating or converting a
//! record is a [`RecordError`]. All errors use `thiserror` for derive-based
//! `Display` and `Error` implementations.
//!
//! ## Design
//!
//! - Validation errors name the record type and the field, and carry both
//!   the declared type and the offending runtime value or type.
//! - Errors are immediate: an operation either produces a fully validated
//!   record or fails without partial results.
//! - Nested construction failures keep the underlying error as their
//!   `source()`.

use thiserror::Error;

/// Top-level error type for record construction and conversion.
#[derive(Error, Debug)]
pub enum RecordError {
    /// A scalar, union or self-referential value does not match its
    /// declared type.
    #[error("{record}.{field} is expected to be {expected}, but value {value} with type {actual} was found instead")]
    TypeMismatch {
        /// Record type name.
        record: String,
        /// Field name.
        field: String,
        /// Rendered declared type (for unions, every alternative).
        expected: String,
        /// Runtime type name of the offending value.
        actual: String,
        /// Rendered offending value.
        value: String,
    },

    /// A bare list/mapping/set/tuple type was used where an element-typed
    /// collection or a record type is required.
    #[error("{record}.{field} is declared as {declared}, which uses a bare native collection; only element-typed collections and record types are allowed here")]
    NativeCollectionMisuse {
        /// Record type name.
        record: String,
        /// Field name.
        field: String,
        /// Rendered declared type.
        declared: String,
    },

    /// A collection field has no usable element type.
    #[error("{record}.{field} was defined as {declared}, but is missing information about the type of the elements inside it")]
    MissingElementType {
        /// Record type name.
        record: String,
        /// Field name.
        field: String,
        /// Rendered declared type.
        declared: String,
    },

    /// An empty map was found where a nested record element was expected.
    #[error("{record}.{field} was found to have an empty map; an empty map will not properly instantiate a nested record")]
    EmptyNestedObject {
        /// Record type name.
        record: String,
        /// Field name.
        field: String,
    },

    /// Collection elements still do not match the declared element type
    /// after coercion.
    #[error("{record}.{field} is {value} which does not match {declared}")]
    ListShapeMismatch {
        /// Record type name.
        record: String,
        /// Field name.
        field: String,
        /// Rendered collection value.
        value: String,
        /// Rendered declared type.
        declared: String,
    },

    /// A raw map could not be turned into the declared nested record.
    #[error("{record}.{field} is expected to be {declared}, but value {value} is a map that cannot construct it: {source}")]
    NestedConstructionFailure {
        /// Record type name.
        record: String,
        /// Field name.
        field: String,
        /// Rendered declared type.
        declared: String,
        /// Rendered raw map.
        value: String,
        /// The construction error.
        #[source]
        source: Box<RecordError>,
    },

    /// The record type (or a record type nested in it) has required
    /// construction-only fields and cannot be rebuilt from a map.
    #[error("cannot instantiate {record} from a map: it contains non-default construction-only fields")]
    UnconstructibleType {
        /// Record type name.
        record: String,
    },

    /// The caller passed an unrecognized mapping mode.
    #[error("invalid mapping mode: {0}")]
    InvalidMappingMode(String),

    /// Text input could not be parsed into a map.
    #[error("malformed {format} input: {reason}")]
    MalformedInput {
        /// Text format name (`json` or `yaml`).
        format: &'static str,
        /// Parser diagnostic.
        reason: String,
    },

    /// Construction received a field the record does not declare.
    #[error("{record} got an unexpected field '{field}'")]
    UnexpectedField {
        /// Record type name.
        record: String,
        /// Unknown field name.
        field: String,
    },

    /// Construction did not receive a value for a field without default.
    #[error("{record} is missing a value for required field '{field}'")]
    MissingField {
        /// Record type name.
        record: String,
        /// Missing field name.
        field: String,
    },

    /// A field was supplied (or declared) more than once.
    #[error("{record} got multiple values for field '{field}'")]
    DuplicateField {
        /// Record type name.
        record: String,
        /// Duplicated field name.
        field: String,
    },

    /// Positional construction received more values than declared fields.
    #[error("{record} takes {expected} fields but {found} were given")]
    TooManyArguments {
        /// Record type name.
        record: String,
        /// Number of declared fields.
        expected: usize,
        /// Number of supplied values.
        found: usize,
    },

    /// A record type name was referenced but never registered.
    #[error("unknown record type '{0}'")]
    UnknownRecordType(String),

    /// A value could not be represented in the output encoding.
    #[error("serialization error: {0}")]
    Serialization(String),
}

impl RecordError {
    /// Short machine-readable name of the error kind.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::TypeMismatch { .. } => "type_mismatch",
            Self::NativeCollectionMisuse { .. } => "native_collection_misuse",
            Self::MissingElementType { .. } => "missing_element_type",
            Self::EmptyNestedObject { .. } => "empty_nested_object",
            Self::ListShapeMismatch { .. } => "list_shape_mismatch",
            Self::NestedConstructionFailure { .. } => "nested_construction_failure",
            Self::UnconstructibleType { .. } => "unconstructible_type",
            Self::InvalidMappingMode(_) => "invalid_mapping_mode",
            Self::MalformedInput { .. } => "malformed_input",
            Self::UnexpectedField { .. } => "unexpected_field",
            Self::MissingField { .. } => "missing_field",
            Self::DuplicateField { .. } => "duplicate_field",
            Self::TooManyArguments { .. } => "too_many_arguments",
            Self::UnknownRecordType(_) => "unknown_record_type",
            Self::Serialization(_) => "serialization",
        }
    }
}

/// Result alias used throughout typedrec.
pub type RecordResult<T> = Result<T, RecordError>;
