//! CLI argument definitions using clap
//!
//! Commands:
//! - driftline run --config <path> [--schema <name> | --by-filename] [--baseline <path>]
//! - driftline diff <baseline> <current>
//! - driftline schemas --config <path>

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// driftline - deterministic record canonicalization with drift tracking
#[derive(Parser, Debug)]
#[command(name = "driftline")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Minimum log severity (trace, info, warn, error)
    #[arg(long, global = true, default_value = "info")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the pipeline over a directory of raw files
    Run {
        /// Path to configuration file
        #[arg(long, default_value = "./driftline.json")]
        config: PathBuf,

        /// Fixed schema name applied to every file
        #[arg(long, conflicts_with = "by_filename")]
        schema: Option<String>,

        /// Derive each file's schema name from its base name
        /// (substring before the first underscore)
        #[arg(long)]
        by_filename: bool,

        /// Structure snapshot from a previous run to diff against
        #[arg(long)]
        baseline: Option<PathBuf>,

        /// Override the configured raw input directory
        #[arg(long)]
        raw_dir: Option<PathBuf>,

        /// Override the configured schema directory
        #[arg(long)]
        schemas_dir: Option<PathBuf>,

        /// Override the configured clean output directory
        #[arg(long)]
        out_dir: Option<PathBuf>,

        /// Override the configured quarantine directory
        #[arg(long)]
        bad_dir: Option<PathBuf>,
    },

    /// Diff two structure snapshot files and print the result
    Diff {
        /// Baseline snapshot file
        baseline: PathBuf,

        /// Current snapshot file
        current: PathBuf,
    },

    /// List the schemas available in the schema directory
    Schemas {
        /// Path to configuration file
        #[arg(long, default_value = "./driftline.json")]
        config: PathBuf,

        /// Override the configured schema directory
        #[arg(long)]
        schemas_dir: Option<PathBuf>,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
