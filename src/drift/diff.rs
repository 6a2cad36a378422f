//! Snapshot diffing: reports structural drift between two runs.
//!
//! Pure function over two path -> type-list maps. All output lists are
//! ordered lexicographically by path for reproducibility.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::tracker::StructureSnapshot;

/// One shared path whose observed type-set changed between runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeChange {
    pub path: String,
    pub baseline_types: Vec<String>,
    pub current_types: Vec<String>,
}

/// Drift between a baseline snapshot and the current run's snapshot.
///
/// Derived, never stored: persists only through its serialized form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructureDiff {
    /// Paths in current, absent from baseline
    pub new_paths: Vec<String>,
    /// Paths in baseline, absent from current
    pub missing_paths: Vec<String>,
    /// Shared paths whose type-sets differ
    pub type_changes: Vec<TypeChange>,
}

impl StructureDiff {
    /// Whether the two snapshots describe the same structure.
    pub fn is_empty(&self) -> bool {
        self.new_paths.is_empty() && self.missing_paths.is_empty() && self.type_changes.is_empty()
    }
}

/// Diffs a baseline snapshot against the current one.
pub fn diff(baseline: &StructureSnapshot, current: &StructureSnapshot) -> StructureDiff {
    let mut out = StructureDiff::default();

    for path in current.keys() {
        if !baseline.contains_key(path) {
            out.new_paths.push(path.clone());
        }
    }

    for (path, baseline_types) in baseline {
        match current.get(path) {
            None => out.missing_paths.push(path.clone()),
            Some(current_types) => {
                let before: BTreeSet<&String> = baseline_types.iter().collect();
                let after: BTreeSet<&String> = current_types.iter().collect();
                if before != after {
                    out.type_changes.push(TypeChange {
                        path: path.clone(),
                        baseline_types: before.into_iter().cloned().collect(),
                        current_types: after.into_iter().cloned().collect(),
                    });
                }
            }
        }
    }

    out
}
