//! Run statistics and the end-of-run report.

use std::path::PathBuf;

use serde::Serialize;
use uuid::Uuid;

/// Counters maintained across one run, updated only from the single
/// processing thread.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunStats {
    pub files_found: u64,
    pub files_processed: u64,
    pub files_failed: u64,
    pub records_seen: u64,
    pub records_clean: u64,
    pub records_bad: u64,
}

/// Drift counts, present only when a baseline was supplied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DriftSummary {
    pub new_paths: usize,
    pub missing_paths: usize,
    pub type_changes: usize,
    pub diff_path: PathBuf,
}

/// Everything a caller needs to know about a finished run.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub run_id: Uuid,
    pub stats: RunStats,
    pub out_path: PathBuf,
    pub bad_path: PathBuf,
    pub snapshot_path: PathBuf,
    pub drift: Option<DriftSummary>,
}
