//! CLI module for driftline
//!
//! Provides the command-line interface:
//! - run: execute the full pipeline over a raw directory
//! - diff: one-shot diff of two structure snapshots
//! - schemas: list the loaded schema catalog

mod args;
mod commands;
mod errors;

pub use args::{Cli, Command};
pub use commands::{run, run_command};
pub use errors::{CliError, CliResult};
