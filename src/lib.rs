//! driftline - a deterministic, schema-driven record canonicalization
//! pipeline with structural drift tracking
//!
//! Heterogeneous record sources (JSON arrays, CSV files) are mapped through
//! declarative schema definitions into one canonical record shape, validated,
//! and routed to clean or quarantine output, while the observed structure of
//! the raw data is accumulated and diffed against a stored baseline.

pub mod cli;
pub mod config;
pub mod drift;
pub mod observability;
pub mod pipeline;
pub mod reader;
pub mod schema;
pub mod transform;
pub mod validate;
pub mod value;
pub mod writer;
