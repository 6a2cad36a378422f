//! Schema catalog for driftline
//!
//! Holds the named, versioned schema definitions that drive transformation:
//! field mappings, required fields, and nested-aggregation paths. Loaded
//! once per run, immutable afterwards.

mod catalog;
mod errors;
mod select;
mod types;

pub use catalog::SchemaCatalog;
pub use errors::{SchemaError, SchemaErrorCode, SchemaResult};
pub use select::SchemaSelector;
pub use types::SchemaDefinition;
