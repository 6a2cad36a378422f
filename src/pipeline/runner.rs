//! Pipeline orchestration.
//!
//! Single-threaded, synchronous, one pass per file: discover raw files in
//! lexicographic order, resolve a schema per file, decode, pre-check
//! required fields, transform, validate, and route each record to the clean
//! or quarantine stream. Every decoded record also feeds the structure
//! tracker, independent of transformation outcome.
//!
//! Failure policy: schema resolution and read failures are per-file (the
//! file is skipped and counted); a row that is not an object is a per-record
//! quarantine entry; transformation never fails; validation failure is a
//! normal terminal state. Nothing is retried.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::{json, Map, Value};
use thiserror::Error;
use uuid::Uuid;

use crate::config::Config;
use crate::drift::{diff, StructureSnapshot, StructureTracker};
use crate::observability::Logger;
use crate::reader::{read_csv_rows, read_json_array, ReadError};
use crate::schema::{SchemaCatalog, SchemaError, SchemaSelector};
use crate::transform::transform;
use crate::validate::{validate, validate_required_fields};
use crate::writer::{JsonlWriter, WriteError};

use super::report::{DriftSummary, RunReport, RunStats};

/// Errors that abort a whole run. Per-file and per-record failures are
/// downgraded to counted outcomes and never surface here.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error("failed to read raw directory {path}: {source}")]
    RawDirUnreadable {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to create directory {path}: {source}")]
    DirSetup {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Write(#[from] WriteError),

    #[error("failed to write {path}: {source}")]
    SnapshotIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize run output: {0}")]
    Json(#[from] serde_json::Error),
}

/// One run of the canonicalization pipeline.
pub struct Pipeline<'a> {
    config: Config,
    selector: SchemaSelector,
    baseline: Option<StructureSnapshot>,
    logger: &'a Logger,
}

impl<'a> Pipeline<'a> {
    /// Creates a pipeline for one run.
    pub fn new(config: Config, selector: SchemaSelector, logger: &'a Logger) -> Self {
        Self {
            config,
            selector,
            baseline: None,
            logger,
        }
    }

    /// Supplies a baseline snapshot to diff the run's snapshot against.
    pub fn with_baseline(mut self, baseline: StructureSnapshot) -> Self {
        self.baseline = Some(baseline);
        self
    }

    /// Runs the pipeline to completion.
    pub fn run(&self) -> Result<RunReport, PipelineError> {
        let catalog = SchemaCatalog::load(&self.config.schemas_dir)?;

        for dir in [&self.config.out_dir, &self.config.bad_dir] {
            fs::create_dir_all(dir).map_err(|source| PipelineError::DirSetup {
                path: dir.display().to_string(),
                source,
            })?;
        }

        let files = discover_raw_files(&self.config.raw_dir)?;

        let mut stats = RunStats {
            files_found: files.len() as u64,
            ..RunStats::default()
        };
        self.logger.info(
            "RUN_START",
            &[
                ("raw_dir", &self.config.raw_dir.display().to_string()),
                ("files_found", &stats.files_found.to_string()),
                ("schemas", &catalog.len().to_string()),
            ],
        );

        let mut tracker = StructureTracker::new();
        let mut clean = JsonlWriter::create(&self.config.out_path())?;
        let mut bad = JsonlWriter::create(&self.config.bad_path())?;

        for file in &files {
            let file_name = file
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_else(|| file.display().to_string());

            let schema_name = self.selector.schema_name_for(file);
            let schema = match catalog.get(&schema_name) {
                Ok(schema) => schema,
                Err(e) => {
                    stats.files_failed += 1;
                    self.logger.error(
                        "SCHEMA_RESOLUTION_FAILED",
                        &[("file", &file_name), ("error", &e.to_string())],
                    );
                    continue;
                }
            };

            let records = match read_records(file) {
                Ok(records) => records,
                Err(e) => {
                    stats.files_failed += 1;
                    self.logger.error(
                        "FILE_READ_FAILED",
                        &[("file", &file_name), ("error", &e.to_string())],
                    );
                    continue;
                }
            };
            stats.files_processed += 1;
            self.logger.info(
                "FILE_PROCESSING",
                &[
                    ("file", &file_name),
                    ("schema", &schema_name),
                    ("records", &records.len().to_string()),
                ],
            );

            for record in &records {
                stats.records_seen += 1;
                tracker.observe(record, &file_name);

                let raw = match record.as_object() {
                    Some(raw) => raw,
                    None => {
                        stats.records_bad += 1;
                        bad.write(&quarantine_entry(
                            &file_name,
                            Some(schema_name.as_str()),
                            &["record is not an object".to_string()],
                            record,
                            None,
                        ))?;
                        continue;
                    }
                };

                let precheck = validate_required_fields(raw, schema);
                if !precheck.is_valid {
                    stats.records_bad += 1;
                    bad.write(&quarantine_entry(
                        &file_name,
                        Some(schema_name.as_str()),
                        &precheck.errors,
                        record,
                        None,
                    ))?;
                    continue;
                }

                let canonical = transform(raw, schema);
                let verdict = validate(&canonical);
                if verdict.is_valid {
                    stats.records_clean += 1;
                    clean.write(&Value::Object(canonical))?;
                } else {
                    stats.records_bad += 1;
                    bad.write(&quarantine_entry(
                        &file_name,
                        Some(schema_name.as_str()),
                        &verdict.errors,
                        record,
                        Some(canonical),
                    ))?;
                }
            }
        }

        clean.finish()?;
        bad.finish()?;

        let snapshot = tracker.snapshot();
        let snapshot_path = self.config.snapshot_path();
        write_json_file(&snapshot_path, &serde_json::to_value(&snapshot)?)?;
        self.logger.info(
            "SNAPSHOT_WRITTEN",
            &[
                ("path", &snapshot_path.display().to_string()),
                ("paths_observed", &snapshot.len().to_string()),
            ],
        );

        let drift = match &self.baseline {
            Some(baseline) => {
                let changes = diff(baseline, &snapshot);
                let diff_path = self.config.diff_path();
                write_json_file(&diff_path, &serde_json::to_value(&changes)?)?;
                self.logger.info(
                    "DRIFT_DIFF",
                    &[
                        ("new_paths", &changes.new_paths.len().to_string()),
                        ("missing_paths", &changes.missing_paths.len().to_string()),
                        ("type_changes", &changes.type_changes.len().to_string()),
                    ],
                );
                Some(DriftSummary {
                    new_paths: changes.new_paths.len(),
                    missing_paths: changes.missing_paths.len(),
                    type_changes: changes.type_changes.len(),
                    diff_path,
                })
            }
            None => None,
        };

        self.logger.info(
            "RUN_SUMMARY",
            &[
                ("files_found", &stats.files_found.to_string()),
                ("files_processed", &stats.files_processed.to_string()),
                ("files_failed", &stats.files_failed.to_string()),
                ("records_seen", &stats.records_seen.to_string()),
                ("records_clean", &stats.records_clean.to_string()),
                ("records_bad", &stats.records_bad.to_string()),
            ],
        );

        Ok(RunReport {
            run_id: Uuid::new_v4(),
            stats,
            out_path: self.config.out_path(),
            bad_path: self.config.bad_path(),
            snapshot_path,
            drift,
        })
    }
}

/// Builds one quarantine entry.
///
/// `canonical` is attached as a debugging preview when transformation ran
/// before validation failed.
pub fn quarantine_entry(
    source_file: &str,
    schema: Option<&str>,
    errors: &[String],
    record: &Value,
    canonical: Option<Map<String, Value>>,
) -> Value {
    let mut entry = Map::new();
    entry.insert("source_file".to_string(), json!(source_file));
    if let Some(name) = schema {
        entry.insert("schema".to_string(), json!(name));
    }
    entry.insert("errors".to_string(), json!(errors));
    entry.insert("record".to_string(), record.clone());
    if let Some(canonical) = canonical {
        entry.insert("canonical".to_string(), Value::Object(canonical));
    }
    Value::Object(entry)
}

/// Returns raw input files (*.json, *.csv) in lexicographic filename order,
/// so output files are byte-for-byte reproducible given identical inputs.
fn discover_raw_files(dir: &Path) -> Result<Vec<PathBuf>, PipelineError> {
    let entries = fs::read_dir(dir).map_err(|source| PipelineError::RawDirUnreadable {
        path: dir.display().to_string(),
        source,
    })?;

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|source| PipelineError::RawDirUnreadable {
            path: dir.display().to_string(),
            source,
        })?;
        let path = entry.path();
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") | Some("csv") => files.push(path),
            _ => {}
        }
    }
    files.sort();
    Ok(files)
}

/// Dispatches on file extension to the matching reader.
fn read_records(path: &Path) -> Result<Vec<Value>, ReadError> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("csv") => read_csv_rows(path),
        _ => read_json_array(path),
    }
}

fn write_json_file(path: &Path, value: &Value) -> Result<(), PipelineError> {
    let mut content = serde_json::to_string_pretty(value)?;
    content.push('\n');
    fs::write(path, content).map_err(|source| PipelineError::SnapshotIo {
        path: path.display().to_string(),
        source,
    })
}
