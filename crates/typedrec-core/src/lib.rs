//! # typedrec-core: Foundational Types for typedrec
//!
//! Leaf crate of the workspace. It holds everything that does not need to
//! know what a record schema looks like:
//!
//! - [`case`]: `snake_case` / `camelCase` key conversion and recursive
//!   key renaming over JSON objects.
//! - [`mapping`]: the [`MappingMode`] conversion policy.
//! - [`error`]: the [`RecordError`] hierarchy shared by every crate.
//! - [`text`]: JSON and YAML parsing/rendering of record maps.
//! - [`config`]: [`ConversionOptions`] for record output.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `typedrec-*` crates.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod case;
pub mod config;
pub mod error;
pub mod mapping;
pub mod text;

pub use case::{recursive_rename, to_camel, to_snake, Converter};
pub use config::{ConfigError, ConversionOptions};
pub use error::{RecordError, RecordResult};
pub use mapping::{IntoMappingMode, MappingMode};
