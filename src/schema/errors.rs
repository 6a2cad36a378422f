//! Schema error types.
//!
//! Error codes:
//! - DRIFT_UNKNOWN_SCHEMA (per-file: the file is skipped, the run continues)
//! - DRIFT_MALFORMED_SCHEMA (fatal: propagates to the caller)
//! - DRIFT_SCHEMA_DIR_UNREADABLE (fatal: propagates to the caller)

use std::fmt;

/// Schema-specific error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaErrorCode {
    /// Schema name not present in the catalog
    UnknownSchema,
    /// Schema definition file could not be parsed
    MalformedSchema,
    /// Schema directory could not be listed
    SchemaDirUnreadable,
}

impl SchemaErrorCode {
    /// Returns the stable string code
    pub fn code(&self) -> &'static str {
        match self {
            SchemaErrorCode::UnknownSchema => "DRIFT_UNKNOWN_SCHEMA",
            SchemaErrorCode::MalformedSchema => "DRIFT_MALFORMED_SCHEMA",
            SchemaErrorCode::SchemaDirUnreadable => "DRIFT_SCHEMA_DIR_UNREADABLE",
        }
    }

    /// Whether this error aborts the whole run rather than one file
    pub fn is_fatal(&self) -> bool {
        !matches!(self, SchemaErrorCode::UnknownSchema)
    }
}

impl fmt::Display for SchemaErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Schema error with context
#[derive(Debug, Clone)]
pub struct SchemaError {
    code: SchemaErrorCode,
    message: String,
    schema_name: Option<String>,
}

impl SchemaError {
    /// Create an unknown-schema error listing every known name
    pub fn unknown_schema(schema_name: impl Into<String>, known: &[&str]) -> Self {
        let name = schema_name.into();
        Self {
            code: SchemaErrorCode::UnknownSchema,
            message: format!("Unknown schema '{}'. Known schemas: [{}]", name, known.join(", ")),
            schema_name: Some(name),
        }
    }

    /// Create an error for a schema definition file that failed to parse
    pub fn malformed_schema(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            code: SchemaErrorCode::MalformedSchema,
            message: format!("Malformed schema file '{}': {}", path.into(), reason.into()),
            schema_name: None,
        }
    }

    /// Create an error for an unreadable schema directory
    pub fn dir_unreadable(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            code: SchemaErrorCode::SchemaDirUnreadable,
            message: format!("Failed to read schema directory '{}': {}", path.into(), reason.into()),
            schema_name: None,
        }
    }

    /// Returns the error code
    pub fn code(&self) -> SchemaErrorCode {
        self.code
    }

    /// Returns the error message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the schema name if applicable
    pub fn schema_name(&self) -> Option<&str> {
        self.schema_name.as_deref()
    }

    /// Whether this error aborts the whole run
    pub fn is_fatal(&self) -> bool {
        self.code.is_fatal()
    }
}

impl fmt::Display for SchemaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.code(), self.message)
    }
}

impl std::error::Error for SchemaError {}

/// Result type for schema operations
pub type SchemaResult<T> = Result<T, SchemaError>;
