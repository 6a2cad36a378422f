//! JSON value helpers shared by the transformer, validator, and drift tracker.
//!
//! All functions here are total over `serde_json::Value`: absence and
//! non-convertibility are first-class results, never errors. The pipeline's
//! inner loops do no error handling for normal data variance.

use serde_json::{Map, Value};

/// Resolves a dot-delimited field path against a nested record.
///
/// `path` is either a bare key (`"email"`) or a dotted sequence of keys
/// (`"address.city"`). Traversal fails as soon as the current node is not an
/// object, a segment is missing, or the looked-up value is null.
///
/// The path grammar has no array indices or wildcards.
pub fn resolve_path<'a>(record: &'a Map<String, Value>, path: &str) -> Option<&'a Value> {
    let mut current: Option<&Value> = None;
    for segment in path.split('.') {
        let next = match current {
            None => record.get(segment)?,
            Some(value) => value.as_object()?.get(segment)?,
        };
        if next.is_null() {
            return None;
        }
        current = Some(next);
    }
    current
}

/// Returns the structural type name for a value.
///
/// Integers and floats are distinguished: a JSON number is `"int"` when it
/// fits a 64-bit integer and `"float"` otherwise.
pub fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(n) => {
            if n.is_i64() || n.is_u64() {
                "int"
            } else {
                "float"
            }
        }
        Value::String(_) => "str",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Attempts to read a value as a floating-point number.
///
/// Numbers pass through; strings are trimmed and parsed. Booleans, nulls,
/// and containers are not numbers.
pub fn coerce_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}

/// Attempts to read a value as an integer.
///
/// Integer numbers pass through, floats truncate toward zero, strings are
/// trimmed and parsed as integers (a string holding a float does not count).
pub fn coerce_i64(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => match n.as_i64() {
            Some(i) => Some(i),
            None => n.as_f64().map(|f| f.trunc() as i64),
        },
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    }
}

/// Renders a value the way a substring check sees it: strings verbatim,
/// everything else through its compact JSON form.
pub fn display_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
