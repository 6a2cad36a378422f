//! Observability for driftline
//!
//! Structured JSON logging only; the pipeline carries no metrics beyond its
//! run statistics.

mod logger;

pub use logger::{Logger, Severity};
