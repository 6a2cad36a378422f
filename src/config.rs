//! Run configuration.
//!
//! Loaded from a JSON file with per-field defaults, validated after load,
//! and passed into the pipeline by value. There is no process-wide config
//! state; CLI flags override individual fields after loading.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration errors. All fatal: a run never starts with a bad config.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Unreadable {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config JSON in {path}: {source}")]
    Invalid {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid config: {0}")]
    Constraint(String),
}

/// Pipeline configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Directory scanned for raw input files (*.json, *.csv)
    #[serde(default = "default_raw_dir")]
    pub raw_dir: PathBuf,

    /// Directory holding schema definition files
    #[serde(default = "default_schemas_dir")]
    pub schemas_dir: PathBuf,

    /// Directory for clean output
    #[serde(default = "default_out_dir")]
    pub out_dir: PathBuf,

    /// Directory for quarantined records
    #[serde(default = "default_bad_dir")]
    pub bad_dir: PathBuf,

    /// Clean output file name, under out_dir
    #[serde(default = "default_out_file")]
    pub out_file: String,

    /// Quarantine file name, under bad_dir
    #[serde(default = "default_bad_file")]
    pub bad_file: String,

    /// Structure snapshot file name, under out_dir
    #[serde(default = "default_snapshot_file")]
    pub snapshot_file: String,

    /// Drift diff file name, under out_dir (written only with a baseline)
    #[serde(default = "default_diff_file")]
    pub diff_file: String,
}

fn default_raw_dir() -> PathBuf {
    PathBuf::from("data/raw")
}
fn default_schemas_dir() -> PathBuf {
    PathBuf::from("schemas")
}
fn default_out_dir() -> PathBuf {
    PathBuf::from("data/out")
}
fn default_bad_dir() -> PathBuf {
    PathBuf::from("data/bad")
}
fn default_out_file() -> String {
    "cleaned.jsonl".to_string()
}
fn default_bad_file() -> String {
    "bad_records.jsonl".to_string()
}
fn default_snapshot_file() -> String {
    "schema_snapshot.json".to_string()
}
fn default_diff_file() -> String {
    "schema_drift.json".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            raw_dir: default_raw_dir(),
            schemas_dir: default_schemas_dir(),
            out_dir: default_out_dir(),
            bad_dir: default_bad_dir(),
            out_file: default_out_file(),
            bad_file: default_bad_file(),
            snapshot_file: default_snapshot_file(),
            diff_file: default_diff_file(),
        }
    }
}

impl Config {
    /// Loads configuration from a JSON file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Unreadable {
            path: path.display().to_string(),
            source,
        })?;

        let config: Config = serde_json::from_str(&content).map_err(|source| ConfigError::Invalid {
            path: path.display().to_string(),
            source,
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Validates field constraints.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (label, name) in [
            ("out_file", &self.out_file),
            ("bad_file", &self.bad_file),
            ("snapshot_file", &self.snapshot_file),
            ("diff_file", &self.diff_file),
        ] {
            if name.trim().is_empty() {
                return Err(ConfigError::Constraint(format!("{} must not be empty", label)));
            }
        }
        if self.out_dir == self.bad_dir && self.out_file == self.bad_file {
            return Err(ConfigError::Constraint(
                "out_file and bad_file resolve to the same path".to_string(),
            ));
        }
        Ok(())
    }

    /// Full path of the clean output file.
    pub fn out_path(&self) -> PathBuf {
        self.out_dir.join(&self.out_file)
    }

    /// Full path of the quarantine file.
    pub fn bad_path(&self) -> PathBuf {
        self.bad_dir.join(&self.bad_file)
    }

    /// Full path of the structure snapshot file.
    pub fn snapshot_path(&self) -> PathBuf {
        self.out_dir.join(&self.snapshot_file)
    }

    /// Full path of the drift diff file.
    pub fn diff_path(&self) -> PathBuf {
        self.out_dir.join(&self.diff_file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.raw_dir, PathBuf::from("data/raw"));
        assert_eq!(config.out_path(), PathBuf::from("data/out/cleaned.jsonl"));
        assert_eq!(config.bad_path(), PathBuf::from("data/bad/bad_records.jsonl"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("driftline.json");
        fs::write(&path, r#"{ "raw_dir": "incoming" }"#).unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.raw_dir, PathBuf::from("incoming"));
        assert_eq!(config.out_file, "cleaned.jsonl");
    }

    #[test]
    fn test_invalid_json_fails() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("driftline.json");
        fs::write(&path, "{ nope").unwrap();
        assert!(matches!(
            Config::load(&path).unwrap_err(),
            ConfigError::Invalid { .. }
        ));
    }

    #[test]
    fn test_empty_file_name_rejected() {
        let config = Config {
            out_file: " ".to_string(),
            ..Config::default()
        };
        assert!(matches!(
            config.validate().unwrap_err(),
            ConfigError::Constraint(_)
        ));
    }

    #[test]
    fn test_colliding_outputs_rejected() {
        let config = Config {
            bad_dir: default_out_dir(),
            bad_file: default_out_file(),
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }
}
