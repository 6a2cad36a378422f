//! Line-delimited JSON output writer.
//!
//! One record per line, buffered, flushed once on completion. Given
//! identical inputs the byte stream is reproducible: records arrive in
//! deterministic order and serde_json renders object keys sorted.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use serde_json::Value;
use thiserror::Error;

/// Errors raised while writing an output file.
#[derive(Debug, Error)]
pub enum WriteError {
    #[error("failed to write {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize record for {path}: {source}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Streaming `.jsonl` writer.
#[derive(Debug)]
pub struct JsonlWriter {
    path: String,
    inner: BufWriter<File>,
    records_written: u64,
}

impl JsonlWriter {
    /// Creates (or truncates) the output file.
    pub fn create(path: &Path) -> Result<Self, WriteError> {
        let display = path.display().to_string();
        let file = File::create(path).map_err(|source| WriteError::Io {
            path: display.clone(),
            source,
        })?;
        Ok(Self {
            path: display,
            inner: BufWriter::new(file),
            records_written: 0,
        })
    }

    /// Appends one record as a single line.
    pub fn write(&mut self, record: &Value) -> Result<(), WriteError> {
        serde_json::to_writer(&mut self.inner, record).map_err(|source| WriteError::Json {
            path: self.path.clone(),
            source,
        })?;
        self.inner
            .write_all(b"\n")
            .map_err(|source| WriteError::Io {
                path: self.path.clone(),
                source,
            })?;
        self.records_written += 1;
        Ok(())
    }

    /// Flushes and returns the number of records written.
    pub fn finish(mut self) -> Result<u64, WriteError> {
        self.inner.flush().map_err(|source| WriteError::Io {
            path: self.path.clone(),
            source,
        })?;
        Ok(self.records_written)
    }
}
