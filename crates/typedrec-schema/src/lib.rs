//! # typedrec-schema: Typed Records
//!
//! Record schemas, construction-time validation, and conversion between
//! records and plain maps or JSON/YAML text.
//!
//! ## Modules
//!
//! - [`descriptor`]: declared field types ([`TypeDescriptor`]).
//! - [`registry`]: [`SchemaRegistry`], [`RecordSchema`], [`FieldDef`].
//! - [`value`]: runtime [`FieldValue`]s and validated [`Record`]s.
//! - [`record`]: construction: argument binding, defaults, init hooks.
//! - [`reconcile`]: the type reconciler run for every stored field.
//! - [`lifecycle`]: `from_map`, `from_text`, `to_map`, `to_text`.
//!
//! ## Example
//!
//! ```
//! use serde_json::json;
//! use typedrec_core::{ConversionOptions, MappingMode};
//! use typedrec_schema::{FieldDef, RecordSchema, SchemaRegistry, TypeDescriptor};
//!
//! let registry = SchemaRegistry::new()
//!     .with(RecordSchema::new("Author").field(FieldDef::new("name", TypeDescriptor::str())))?
//!     .with(
//!         RecordSchema::new("Book")
//!             .field(FieldDef::new("title", TypeDescriptor::str()))
//!             .field(FieldDef::new("author", TypeDescriptor::record("Author"))),
//!     )?;
//!
//! let book = registry.from_text(
//!     "Book",
//!     r#"{"title": "book", "author": {"name": "George"}}"#,
//!     MappingMode::NoMap,
//! )?;
//! let map = registry.to_map(&book, &ConversionOptions::default())?;
//! assert_eq!(
//!     serde_json::Value::Object(map),
//!     json!({"title": "book", "author": {"name": "George"}})
//! );
//! # Ok::<(), typedrec_core::RecordError>(())
//! ```
//!
//! ## Crate Policy
//!
//! - Depends only on `typedrec-core` internally.
//! - A `Record` exists only if every stored field passed validation.
//! - Recursive record *types* are supported; recursive record *values*
//!   cannot be built because values are owned trees.

pub mod descriptor;
pub mod lifecycle;
pub mod reconcile;
pub mod record;
pub mod registry;
pub mod value;

pub use descriptor::{NativeKind, ScalarKind, TypeDescriptor};
pub use reconcile::conforms;
pub use registry::{FieldDef, InitContext, InitHook, RecordSchema, SchemaRegistry};
pub use value::{FieldValue, Record};
