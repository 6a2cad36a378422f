//! Raw file readers: JSON-array and CSV-row decoders.
//!
//! Readers decode a whole file into a sequence of generic values before any
//! record is processed. A read failure is per-file: the pipeline counts it,
//! logs it, and moves on. Element shape is not checked here; a decoded row
//! that is not an object becomes a per-record quarantine entry downstream.

use std::fs;
use std::path::Path;

use serde_json::{Map, Value};
use thiserror::Error;

/// Errors raised while decoding one raw input file.
#[derive(Debug, Error)]
pub enum ReadError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{path} is not valid JSON: {source}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("{path} must contain a JSON array at the top level")]
    NotAnArray { path: String },

    #[error("{path} has no header row")]
    MissingHeader { path: String },

    #[error("failed to read CSV {path}: {source}")]
    Csv {
        path: String,
        #[source]
        source: csv::Error,
    },
}

/// Reads a file holding a single top-level JSON array of records.
pub fn read_json_array(path: &Path) -> Result<Vec<Value>, ReadError> {
    let display = path.display().to_string();

    let content = fs::read_to_string(path).map_err(|source| ReadError::Io {
        path: display.clone(),
        source,
    })?;

    let data: Value = serde_json::from_str(&content).map_err(|source| ReadError::Json {
        path: display.clone(),
        source,
    })?;

    match data {
        Value::Array(items) => Ok(items),
        _ => Err(ReadError::NotAnArray { path: display }),
    }
}

/// Reads a CSV file into one object per row.
///
/// The header row is required and every cell stays a string; the
/// transformer and validator coerce later. A row whose column count differs
/// from the header fails the whole file.
pub fn read_csv_rows(path: &Path) -> Result<Vec<Value>, ReadError> {
    let display = path.display().to_string();

    let mut reader = csv::Reader::from_path(path).map_err(|source| ReadError::Csv {
        path: display.clone(),
        source,
    })?;

    let headers = reader
        .headers()
        .map_err(|source| ReadError::Csv {
            path: display.clone(),
            source,
        })?
        .clone();
    if headers.is_empty() {
        return Err(ReadError::MissingHeader { path: display });
    }

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result.map_err(|source| ReadError::Csv {
            path: display.clone(),
            source,
        })?;
        let mut row = Map::new();
        for (header, cell) in headers.iter().zip(record.iter()) {
            row.insert(header.to_string(), Value::String(cell.to_string()));
        }
        rows.push(Value::Object(row));
    }
    Ok(rows)
}
