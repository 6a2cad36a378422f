//! CLI-specific error types
//!
//! Anything that reaches the CLI boundary is fatal for the process; the
//! per-file and per-record policies live inside the pipeline.

use thiserror::Error;

use crate::config::ConfigError;
use crate::pipeline::PipelineError;
use crate::schema::SchemaError;

/// Errors surfaced to the terminal user.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Pipeline(#[from] PipelineError),

    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error("invalid arguments: {0}")]
    Usage(String),

    #[error("failed to read snapshot {path}: {reason}")]
    Snapshot { path: String, reason: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// CLI result type
pub type CliResult<T> = Result<T, CliError>;
