//! Schema definition types.
//!
//! A schema here is a declarative mapping plus a required-field list for one
//! source format, not a structural type system. Definitions are loaded once
//! from disk, never mutated, and held for the life of a run.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// One source format's mapping into the canonical record shape.
///
/// Identified by `(schema_name, version)`. The `field_map` keys are source
/// paths (possibly dotted, e.g. `"address.city"`) and the values are
/// canonical field names. Insertion order is irrelevant; keys are unique.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaDefinition {
    /// Unique schema name, used for selection
    pub schema_name: String,
    /// Schema version, stored but not interpreted
    #[serde(default = "default_version")]
    pub version: u32,
    /// Source paths that must be present and non-blank on the raw record
    #[serde(default)]
    pub required_fields: Vec<String>,
    /// Source path -> canonical field name
    #[serde(default)]
    pub field_map: BTreeMap<String, String>,
    /// Optional source path to a list-valued field to aggregate
    #[serde(default)]
    pub orders_path: Option<String>,
    /// Field name holding the numeric amount within each list element
    #[serde(default)]
    pub order_amount_path: Option<String>,
}

fn default_version() -> u32 {
    1
}

impl SchemaDefinition {
    /// Returns the unique key for this schema (name, version)
    pub fn key(&self) -> (&str, u32) {
        (&self.schema_name, self.version)
    }

    /// Returns the amount field name, defaulting to `"amount"`
    pub fn amount_path(&self) -> &str {
        self.order_amount_path.as_deref().unwrap_or("amount")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_defaults_to_one() {
        let schema: SchemaDefinition = serde_json::from_str(
            r#"{ "schema_name": "shop", "field_map": { "id": "user_id" } }"#,
        )
        .unwrap();
        assert_eq!(schema.key(), ("shop", 1));
        assert!(schema.required_fields.is_empty());
        assert!(schema.orders_path.is_none());
    }

    #[test]
    fn test_amount_path_defaults() {
        let schema: SchemaDefinition =
            serde_json::from_str(r#"{ "schema_name": "shop" }"#).unwrap();
        assert_eq!(schema.amount_path(), "amount");

        let schema: SchemaDefinition = serde_json::from_str(
            r#"{ "schema_name": "shop", "order_amount_path": "total" }"#,
        )
        .unwrap();
        assert_eq!(schema.amount_path(), "total");
    }

    #[test]
    fn test_full_definition_round_trips() {
        let schema: SchemaDefinition = serde_json::from_str(
            r#"{
                "schema_name": "legacy",
                "version": 3,
                "required_fields": ["uid", "contact.email"],
                "field_map": { "uid": "user_id", "contact.email": "email" },
                "orders_path": "purchases",
                "order_amount_path": "value"
            }"#,
        )
        .unwrap();
        assert_eq!(schema.version, 3);
        assert_eq!(schema.field_map.get("uid").map(String::as_str), Some("user_id"));
        assert_eq!(schema.orders_path.as_deref(), Some("purchases"));

        let text = serde_json::to_string(&schema).unwrap();
        let back: SchemaDefinition = serde_json::from_str(&text).unwrap();
        assert_eq!(back, schema);
    }
}
