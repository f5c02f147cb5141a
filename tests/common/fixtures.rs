//! Shared data for the integration tests.
use keypath::{Object, Value};
use serde_json::json;
use std::sync::Arc;

/// A small order document with nested records, arrays and awkward keys.
pub fn order_document() -> serde_json::Value {
    json!({
        "customer": {
            "name": "ACME",
            "address": { "city": "Oslo", "zip": null }
        },
        "orders": [
            { "id": "A", "total": 0 },
            { "id": "B", "total": 12.5, "tags": ["rush"] }
        ],
        "meta.version": 2,
        "": { "blank": true }
    })
}

/// A `Value` object whose `defaults` child delegates to a shared prototype.
pub fn inherited_document() -> Value {
    let prototype: Object = [("currency", Value::from("EUR")), ("rate", Value::from(1))]
        .into_iter()
        .collect();
    let mut defaults = Object::with_prototype(Arc::new(prototype));
    defaults.insert("rate", 0);
    let root: Object = [("defaults", Value::Object(defaults))].into_iter().collect();
    Value::Object(root)
}
