//! Schema selection policy.
//!
//! The catalog does not decide which schema applies to a file; the caller
//! does, via one of two policies:
//! - fixed: one schema name for the whole run
//! - by-filename: the base name before its first underscore (or the whole
//!   base name when no underscore is present)
//!
//! A selection that resolves to no known schema is a per-file failure; the
//! file is skipped and the run continues.

use std::path::Path;

/// How the pipeline picks a schema name for each input file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaSelector {
    /// One schema name supplied once for the whole run
    Fixed(String),
    /// Derive the schema name from each file's base name
    ByFilename,
}

impl SchemaSelector {
    /// Returns the schema name to look up for the given input file.
    pub fn schema_name_for(&self, file: &Path) -> String {
        match self {
            SchemaSelector::Fixed(name) => name.clone(),
            SchemaSelector::ByFilename => {
                let stem = file
                    .file_stem()
                    .and_then(|stem| stem.to_str())
                    .unwrap_or_default();
                match stem.split_once('_') {
                    Some((head, _)) => head.to_string(),
                    None => stem.to_string(),
                }
            }
        }
    }
}
