//! Record transformer: maps one raw record through one schema definition
//! into the canonical record shape.
//!
//! The canonical record always carries:
//! - every canonical key named by the schema's `field_map` (absent source
//!   values become null)
//! - `total_order_value` (2-decimal float, default 0.0) and `order_count`
//!   (non-negative integer, default 0)
//! - `extras`: every source top-level key not consumed by the field map
//!
//! Transformation never fails. Unparseable dates are left as-is for the
//! validator to flag; non-convertible order amounts are silently skipped.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde_json::{Map, Value};

use crate::schema::SchemaDefinition;
use crate::value::{coerce_f64, display_string, resolve_path};

/// Parses a full ISO-8601 timestamp or bare date into a calendar date.
///
/// A trailing UTC-Zulu marker is rewritten to an explicit zero offset first.
/// Timestamps with an offset yield the date in that offset.
pub fn normalize_iso_date(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    let text = match trimmed.strip_suffix('Z') {
        Some(head) => format!("{}+00:00", head),
        None => trimmed.to_string(),
    };

    if let Ok(date) = NaiveDate::parse_from_str(&text, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(stamp) = DateTime::parse_from_rfc3339(&text) {
        return Some(stamp.date_naive());
    }
    if let Ok(stamp) = NaiveDateTime::parse_from_str(&text, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(stamp.date());
    }
    None
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Transforms one raw record with one schema definition.
///
/// Pure over its inputs; the raw record is read-only.
pub fn transform(raw: &Map<String, Value>, schema: &SchemaDefinition) -> Map<String, Value> {
    let mut out = Map::new();

    // 1) Project the field map; absent resolves to null.
    for (source_path, canonical_key) in &schema.field_map {
        let value = resolve_path(raw, source_path)
            .cloned()
            .unwrap_or(Value::Null);
        out.insert(canonical_key.clone(), value);
    }

    // 2) Extras: every top-level source key minus the non-dotted mapped ones.
    // Dotted mappings leave the original nested structure here untouched,
    // duplicated alongside the canonical field. Downstream consumers depend
    // on seeing both, so this stays best-effort for top-level keys only.
    let mut extras = raw.clone();
    for source_path in schema.field_map.keys() {
        if !source_path.contains('.') {
            extras.remove(source_path);
        }
    }

    // 3) Normalize the signup date to its calendar date portion. Unparseable
    // values stay untouched and surface later as a validation error.
    if let Some(value) = out.get("signup_date") {
        if !value.is_null() {
            if let Some(date) = normalize_iso_date(&display_string(value)) {
                out.insert("signup_date".to_string(), Value::String(date.to_string()));
            }
        }
    }

    // 4) Orders aggregation. A non-list value at orders_path yields the
    // defaults without error; rounding happens once, at output.
    let mut total = 0.0_f64;
    let mut count = 0_u64;
    if let Some(orders_path) = &schema.orders_path {
        if let Some(Value::Array(items)) = resolve_path(raw, orders_path) {
            for item in items {
                let entry = match item.as_object() {
                    Some(entry) => entry,
                    None => continue,
                };
                let amount = match entry.get(schema.amount_path()) {
                    Some(amount) => amount,
                    None => continue,
                };
                if let Some(parsed) = coerce_f64(amount) {
                    total += parsed;
                    count += 1;
                }
            }
        }
    }
    out.insert("total_order_value".to_string(), Value::from(round2(total)));
    out.insert("order_count".to_string(), Value::from(count));

    out.insert("extras".to_string(), Value::Object(extras));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::BTreeMap;

    fn webshop_schema() -> SchemaDefinition {
        SchemaDefinition {
            schema_name: "webshop".to_string(),
            version: 1,
            required_fields: vec!["id".to_string()],
            field_map: BTreeMap::from([
                ("id".to_string(), "user_id".to_string()),
                ("mail".to_string(), "email".to_string()),
                ("created".to_string(), "signup_date".to_string()),
                ("address.city".to_string(), "city".to_string()),
            ]),
            orders_path: Some("orders".to_string()),
            order_amount_path: None,
        }
    }

    fn as_map(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_field_map_projection() {
        let raw = as_map(json!({
            "id": "u1",
            "mail": "a@b.com",
            "created": "2026-01-10",
            "address": { "city": "Porto" }
        }));
        let out = transform(&raw, &webshop_schema());
        assert_eq!(out.get("user_id"), Some(&json!("u1")));
        assert_eq!(out.get("email"), Some(&json!("a@b.com")));
        assert_eq!(out.get("city"), Some(&json!("Porto")));
    }

    #[test]
    fn test_absent_source_path_becomes_null() {
        let raw = as_map(json!({ "id": "u1" }));
        let out = transform(&raw, &webshop_schema());
        assert_eq!(out.get("email"), Some(&Value::Null));
        assert_eq!(out.get("city"), Some(&Value::Null));
    }

    #[test]
    fn test_bare_date_and_zulu_timestamp_normalize_identically() {
        let schema = webshop_schema();
        let bare = as_map(json!({ "created": "2026-01-10" }));
        let zulu = as_map(json!({ "created": "2026-01-10T08:30:00Z" }));
        assert_eq!(
            transform(&bare, &schema).get("signup_date"),
            Some(&json!("2026-01-10"))
        );
        assert_eq!(
            transform(&zulu, &schema).get("signup_date"),
            Some(&json!("2026-01-10"))
        );
    }

    #[test]
    fn test_unparseable_date_left_untouched() {
        let raw = as_map(json!({ "created": "not-a-date" }));
        let out = transform(&raw, &webshop_schema());
        assert_eq!(out.get("signup_date"), Some(&json!("not-a-date")));
    }

    #[test]
    fn test_orders_aggregation_skips_bad_amounts() {
        let raw = as_map(json!({
            "orders": [
                { "amount": "10.5" },
                { "amount": "bad" },
                { "amount": 4 }
            ]
        }));
        let out = transform(&raw, &webshop_schema());
        assert_eq!(out.get("total_order_value"), Some(&json!(14.5)));
        assert_eq!(out.get("order_count"), Some(&json!(2)));
    }

    #[test]
    fn test_missing_orders_yield_defaults() {
        let raw = as_map(json!({ "id": "u1" }));
        let out = transform(&raw, &webshop_schema());
        assert_eq!(out.get("total_order_value"), Some(&json!(0.0)));
        assert_eq!(out.get("order_count"), Some(&json!(0)));
    }

    #[test]
    fn test_non_list_orders_yield_defaults() {
        let raw = as_map(json!({ "orders": "oops" }));
        let out = transform(&raw, &webshop_schema());
        assert_eq!(out.get("total_order_value"), Some(&json!(0.0)));
        assert_eq!(out.get("order_count"), Some(&json!(0)));
    }

    #[test]
    fn test_non_object_order_elements_are_skipped() {
        let raw = as_map(json!({ "orders": [42, { "amount": 3 }, null] }));
        let out = transform(&raw, &webshop_schema());
        assert_eq!(out.get("total_order_value"), Some(&json!(3.0)));
        assert_eq!(out.get("order_count"), Some(&json!(1)));
    }

    #[test]
    fn test_custom_amount_path() {
        let mut schema = webshop_schema();
        schema.orders_path = Some("purchases".to_string());
        schema.order_amount_path = Some("value".to_string());
        let raw = as_map(json!({ "purchases": [{ "value": 7 }, { "amount": 9 }] }));
        let out = transform(&raw, &schema);
        assert_eq!(out.get("total_order_value"), Some(&json!(7.0)));
        assert_eq!(out.get("order_count"), Some(&json!(1)));
    }

    #[test]
    fn test_rounding_applies_once_at_output() {
        let raw = as_map(json!({ "orders": [{ "amount": 0.105 }, { "amount": 0.105 }] }));
        let out = transform(&raw, &webshop_schema());
        assert_eq!(out.get("total_order_value"), Some(&json!(0.21)));
    }

    #[test]
    fn test_extras_exclude_mapped_top_level_keys() {
        let raw = as_map(json!({
            "id": "u1",
            "mail": "a@b.com",
            "loyalty_tier": "gold",
            "address": { "city": "Porto" }
        }));
        let out = transform(&raw, &webshop_schema());
        let extras = out.get("extras").and_then(Value::as_object).unwrap();
        assert!(!extras.contains_key("id"));
        assert!(!extras.contains_key("mail"));
        assert_eq!(extras.get("loyalty_tier"), Some(&json!("gold")));
    }

    #[test]
    fn test_dotted_mappings_leave_nested_structure_in_extras() {
        let raw = as_map(json!({ "address": { "city": "Porto" } }));
        let out = transform(&raw, &webshop_schema());
        assert_eq!(out.get("city"), Some(&json!("Porto")));
        let extras = out.get("extras").and_then(Value::as_object).unwrap();
        assert_eq!(extras.get("address"), Some(&json!({ "city": "Porto" })));
    }

    #[test]
    fn test_normalize_iso_date_variants() {
        let expected = NaiveDate::from_ymd_opt(2026, 1, 10).unwrap();
        assert_eq!(normalize_iso_date("2026-01-10"), Some(expected));
        assert_eq!(normalize_iso_date("2026-01-10T23:59:59Z"), Some(expected));
        assert_eq!(normalize_iso_date("2026-01-10T12:00:00+02:00"), Some(expected));
        assert_eq!(normalize_iso_date("2026-01-10T12:00:00"), Some(expected));
        assert_eq!(normalize_iso_date("2026-01-10T12:00:00.250"), Some(expected));
        assert_eq!(normalize_iso_date("10/01/2026"), None);
        assert_eq!(normalize_iso_date(""), None);
    }
}
