//! CLI command implementations
//!
//! Each command loads configuration, builds the pieces it needs, and prints
//! machine-readable JSON to stdout. Logs go to stdout/stderr as structured
//! events; the final report is the last thing written.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use serde_json::json;

use crate::config::Config;
use crate::drift::{diff, StructureSnapshot};
use crate::observability::{Logger, Severity};
use crate::pipeline::Pipeline;
use crate::schema::{SchemaCatalog, SchemaSelector};

use super::args::{Cli, Command};
use super::errors::{CliError, CliResult};

/// CLI entry point: parse arguments, build the logger, dispatch.
pub fn run() -> CliResult<()> {
    let cli = Cli::parse_args();
    let min_severity = cli
        .log_level
        .parse::<Severity>()
        .map_err(CliError::Usage)?;
    let logger = Logger::new(min_severity);
    run_command(cli.command, &logger)
}

/// Dispatches one parsed command.
pub fn run_command(command: Command, logger: &Logger) -> CliResult<()> {
    match command {
        Command::Run {
            config,
            schema,
            by_filename,
            baseline,
            raw_dir,
            schemas_dir,
            out_dir,
            bad_dir,
        } => {
            let overrides = DirOverrides {
                raw_dir,
                schemas_dir,
                out_dir,
                bad_dir,
            };
            run_pipeline(&config, schema, by_filename, baseline, overrides, logger)
        }
        Command::Diff { baseline, current } => diff_snapshots(&baseline, &current),
        Command::Schemas {
            config,
            schemas_dir,
        } => list_schemas(&config, schemas_dir),
    }
}

/// Directory flags that override the loaded configuration.
struct DirOverrides {
    raw_dir: Option<PathBuf>,
    schemas_dir: Option<PathBuf>,
    out_dir: Option<PathBuf>,
    bad_dir: Option<PathBuf>,
}

fn run_pipeline(
    config_path: &Path,
    schema: Option<String>,
    by_filename: bool,
    baseline: Option<PathBuf>,
    overrides: DirOverrides,
    logger: &Logger,
) -> CliResult<()> {
    let mut config = load_config(config_path)?;
    if let Some(dir) = overrides.raw_dir {
        config.raw_dir = dir;
    }
    if let Some(dir) = overrides.schemas_dir {
        config.schemas_dir = dir;
    }
    if let Some(dir) = overrides.out_dir {
        config.out_dir = dir;
    }
    if let Some(dir) = overrides.bad_dir {
        config.bad_dir = dir;
    }
    config.validate()?;

    let selector = match (schema, by_filename) {
        (Some(name), false) => SchemaSelector::Fixed(name),
        (None, true) => SchemaSelector::ByFilename,
        _ => {
            return Err(CliError::Usage(
                "one of --schema <name> or --by-filename is required".to_string(),
            ))
        }
    };

    let mut pipeline = Pipeline::new(config, selector, logger);
    if let Some(path) = baseline {
        pipeline = pipeline.with_baseline(load_snapshot(&path)?);
    }

    let report = pipeline.run()?;
    write_json_stdout(&serde_json::to_value(&report)?)
}

fn diff_snapshots(baseline_path: &Path, current_path: &Path) -> CliResult<()> {
    let baseline = load_snapshot(baseline_path)?;
    let current = load_snapshot(current_path)?;
    let changes = diff(&baseline, &current);
    write_json_stdout(&serde_json::to_value(&changes)?)
}

fn list_schemas(config_path: &Path, schemas_dir: Option<PathBuf>) -> CliResult<()> {
    let mut config = load_config(config_path)?;
    if let Some(dir) = schemas_dir {
        config.schemas_dir = dir;
    }

    let catalog = SchemaCatalog::load(&config.schemas_dir)?;
    let listing: Vec<serde_json::Value> = catalog
        .definitions()
        .map(|definition| {
            json!({
                "schema_name": definition.schema_name,
                "version": definition.version,
                "mapped_fields": definition.field_map.len(),
            })
        })
        .collect();
    write_json_stdout(&serde_json::Value::Array(listing))
}

/// Loads the config file when it exists; a missing file means defaults.
fn load_config(path: &Path) -> CliResult<Config> {
    if path.exists() {
        Ok(Config::load(path)?)
    } else {
        Ok(Config::default())
    }
}

/// Reads a persisted structure snapshot (path -> sorted type names).
fn load_snapshot(path: &Path) -> CliResult<StructureSnapshot> {
    let content = fs::read_to_string(path).map_err(|e| CliError::Snapshot {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;
    serde_json::from_str(&content).map_err(|e| CliError::Snapshot {
        path: path.display().to_string(),
        reason: e.to_string(),
    })
}

fn write_json_stdout(value: &serde_json::Value) -> CliResult<()> {
    let mut stdout = io::stdout();
    serde_json::to_writer_pretty(&mut stdout, value)?;
    writeln!(stdout)?;
    stdout.flush()?;
    Ok(())
}
