//! Pipeline orchestration for driftline
//!
//! Owns the per-run control flow and the only mutable per-run state: the
//! structure tracker accumulator and the run statistics counters.

mod report;
mod runner;

pub use report::{DriftSummary, RunReport, RunStats};
pub use runner::{quarantine_entry, Pipeline, PipelineError};
