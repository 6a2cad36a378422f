//! Canonical record validation.
//!
//! Rules run independently, in a fixed order, with no short-circuit: every
//! applicable rule appends its own reason code, so error ordering is
//! deterministic. Validation failure is a normal terminal state for a
//! record, not an error condition.
//!
//! Reason codes:
//! - "missing user_id"
//! - "invalid email"
//! - "invalid signup_date"
//! - "total_order_value not numeric"
//! - "order_count not an integer"
//! - "order_count must be >= 0"

use serde::Serialize;
use serde_json::{Map, Value};

use crate::schema::SchemaDefinition;
use crate::transform::normalize_iso_date;
use crate::value::{coerce_f64, coerce_i64, display_string, resolve_path};

/// Pass/fail verdict with ordered reason codes. One per validated record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub errors: Vec<String>,
}

impl ValidationResult {
    fn from_errors(errors: Vec<String>) -> Self {
        Self {
            is_valid: errors.is_empty(),
            errors,
        }
    }
}

/// Validates a canonical record produced by the transformer.
pub fn validate(canonical: &Map<String, Value>) -> ValidationResult {
    let mut errors = Vec::new();

    // 1) user_id: present and, if textual, non-blank after trimming.
    match canonical.get("user_id") {
        None | Some(Value::Null) => errors.push("missing user_id".to_string()),
        Some(Value::String(s)) if s.trim().is_empty() => {
            errors.push("missing user_id".to_string())
        }
        Some(_) => {}
    }

    // 2) email: present and contains '@'.
    match canonical.get("email") {
        Some(value) if !value.is_null() && display_string(value).contains('@') => {}
        _ => errors.push("invalid email".to_string()),
    }

    // 3) signup_date: present and parseable as a calendar date.
    match canonical.get("signup_date") {
        Some(value)
            if !value.is_null() && normalize_iso_date(&display_string(value)).is_some() => {}
        _ => errors.push("invalid signup_date".to_string()),
    }

    // 4) total_order_value: when present, must be numeric.
    if let Some(value) = canonical.get("total_order_value") {
        if !value.is_null() && coerce_f64(value).is_none() {
            errors.push("total_order_value not numeric".to_string());
        }
    }

    // 5) order_count: when present, must be an integer >= 0.
    if let Some(value) = canonical.get("order_count") {
        if !value.is_null() {
            match coerce_i64(value) {
                Some(count) if count < 0 => {
                    errors.push("order_count must be >= 0".to_string())
                }
                Some(_) => {}
                None => errors.push("order_count not an integer".to_string()),
            }
        }
    }

    ValidationResult::from_errors(errors)
}

/// Validates required fields on the RAW record, before transformation.
///
/// Dot paths are allowed. A missing or blank-string value appends
/// `"missing required field: <path>"` per offending path, in schema order.
pub fn validate_required_fields(
    raw: &Map<String, Value>,
    schema: &SchemaDefinition,
) -> ValidationResult {
    let mut errors = Vec::new();
    for field_path in &schema.required_fields {
        let missing = match resolve_path(raw, field_path) {
            None => true,
            Some(Value::String(s)) => s.trim().is_empty(),
            Some(_) => false,
        };
        if missing {
            errors.push(format!("missing required field: {}", field_path));
        }
    }
    ValidationResult::from_errors(errors)
}
