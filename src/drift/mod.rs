//! Schema drift tracking for driftline
//!
//! Runs over raw records independently of transformation: infers a
//! structural type signature per record, accumulates it across the run, and
//! diffs the result against a previously captured baseline.

mod diff;
mod tracker;

pub use diff::{diff, StructureDiff, TypeChange};
pub use tracker::{StructureSnapshot, StructureTracker};
