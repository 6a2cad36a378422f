//! Schema catalog: loads schema definition files from disk at startup.
//!
//! Loading rules:
//! - Every `*.json` file in the directory is a definition, read in
//!   lexicographic filename order for determinism
//! - A later file with a duplicate `schema_name` overwrites an earlier one
//!   (last-sorted-wins)
//! - Malformed definition files are fatal to the run
//! - The catalog never mutates schema files and is immutable after `load`

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use super::errors::{SchemaError, SchemaResult};
use super::types::SchemaDefinition;

/// In-memory registry of schema definitions, indexed by `schema_name`.
#[derive(Debug, Default)]
pub struct SchemaCatalog {
    schemas: BTreeMap<String, SchemaDefinition>,
}

impl SchemaCatalog {
    /// Creates an empty catalog (for programmatic registration in tests).
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads every schema definition file in `dir`.
    ///
    /// # Errors
    ///
    /// Returns `SchemaError` when the directory cannot be listed or any
    /// definition file cannot be read or parsed.
    pub fn load(dir: &Path) -> SchemaResult<Self> {
        let entries = fs::read_dir(dir)
            .map_err(|e| SchemaError::dir_unreadable(dir.display().to_string(), e.to_string()))?;

        let mut paths: Vec<PathBuf> = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| {
                SchemaError::dir_unreadable(dir.display().to_string(), e.to_string())
            })?;
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) == Some("json") {
                paths.push(path);
            }
        }
        paths.sort();

        let mut catalog = Self::new();
        for path in &paths {
            let content = fs::read_to_string(path).map_err(|e| {
                SchemaError::malformed_schema(path.display().to_string(), e.to_string())
            })?;
            let definition: SchemaDefinition = serde_json::from_str(&content).map_err(|e| {
                SchemaError::malformed_schema(path.display().to_string(), e.to_string())
            })?;
            catalog.register(definition);
        }

        Ok(catalog)
    }

    /// Registers a definition directly, replacing any existing one with the
    /// same name.
    pub fn register(&mut self, definition: SchemaDefinition) {
        self.schemas.insert(definition.schema_name.clone(), definition);
    }

    /// Looks up a schema by name.
    ///
    /// # Errors
    ///
    /// Returns `DRIFT_UNKNOWN_SCHEMA` listing all known names when `name`
    /// is absent.
    pub fn get(&self, name: &str) -> SchemaResult<&SchemaDefinition> {
        self.schemas
            .get(name)
            .ok_or_else(|| SchemaError::unknown_schema(name, &self.names()))
    }

    /// Returns all known schema names, sorted.
    pub fn names(&self) -> Vec<&str> {
        self.schemas.keys().map(String::as_str).collect()
    }

    /// Returns all loaded definitions, sorted by name.
    pub fn definitions(&self) -> impl Iterator<Item = &SchemaDefinition> {
        self.schemas.values()
    }

    /// Returns the number of loaded schemas.
    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    /// Whether the catalog holds no schemas.
    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }
}
