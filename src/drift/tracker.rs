//! Structure tracker: accumulates observed types per structural path.
//!
//! Walk rules:
//! - The root of a record is path `"$"`
//! - Object keys extend the path with `.key`
//! - An array records an extra `path[]` entry typed `"array"` and the walk
//!   recurses into the first element only, with `path[]` as the prefix.
//!   Sampling bounds the cost on large arrays; heterogeneous drift beyond
//!   the first element goes unseen.
//!
//! The tracker stores no per-record detail: only path -> type-name set and
//! the set of distinct source filenames observed.

use std::collections::{BTreeMap, BTreeSet};

use serde_json::Value;

use crate::value::type_name;

/// Deterministic, persistable rendering of an accumulated structure map:
/// sorted path -> sorted type names.
pub type StructureSnapshot = BTreeMap<String, Vec<String>>;

/// Per-run accumulator of observed record structure.
#[derive(Debug, Default)]
pub struct StructureTracker {
    observed: BTreeMap<String, BTreeSet<&'static str>>,
    files_seen: BTreeSet<String>,
}

impl StructureTracker {
    /// Creates an empty tracker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the structural paths and types of one raw record.
    pub fn observe(&mut self, record: &Value, source_file: &str) {
        self.files_seen.insert(source_file.to_string());
        self.walk(record, "");
    }

    fn walk(&mut self, value: &Value, prefix: &str) {
        let path = if prefix.is_empty() { "$" } else { prefix };
        self.observed
            .entry(path.to_string())
            .or_default()
            .insert(type_name(value));

        match value {
            Value::Object(fields) => {
                for (key, child) in fields {
                    let child_path = if prefix.is_empty() {
                        key.clone()
                    } else {
                        format!("{}.{}", prefix, key)
                    };
                    self.walk(child, &child_path);
                }
            }
            Value::Array(items) => {
                let element_path = if prefix.is_empty() {
                    "$[]".to_string()
                } else {
                    format!("{}[]", prefix)
                };
                self.observed
                    .entry(element_path.clone())
                    .or_default()
                    .insert("array");
                if let Some(first) = items.first() {
                    self.walk(first, &element_path);
                }
            }
            _ => {}
        }
    }

    /// Returns the finalized snapshot: sorted by path, types sorted per path.
    pub fn snapshot(&self) -> StructureSnapshot {
        self.observed
            .iter()
            .map(|(path, types)| {
                (
                    path.clone(),
                    types.iter().map(|t| (*t).to_string()).collect(),
                )
            })
            .collect()
    }

    /// Distinct source filenames observed so far.
    pub fn files_seen(&self) -> impl Iterator<Item = &str> {
        self.files_seen.iter().map(String::as_str)
    }

    /// Number of distinct structural paths observed.
    pub fn path_count(&self) -> usize {
        self.observed.len()
    }
}
