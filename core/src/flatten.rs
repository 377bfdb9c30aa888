//! Converts a nested partial-update object into the flat, dot-joined form the
//! store transaction consumes, rewriting the protocol's `null`-means-delete
//! sentinel into an explicit [`FieldUpdate::Delete`].

use serde_json::Value;
use std::collections::BTreeMap;

use easel_proto::{Fields, FieldUpdate, FlatUpdate};

/// Depth-first flatten of a nested object into dot-joined leaf paths. Arrays
/// and empty objects are leaves; `null` leaves pass through unchanged here.
pub fn flatten(nested: &Fields) -> BTreeMap<String, Value> {
    let mut flat = BTreeMap::new();
    for (key, value) in nested {
        flatten_into(&mut flat, key.clone(), value);
    }
    flat
}

fn flatten_into(flat: &mut BTreeMap<String, Value>, path: String, value: &Value) {
    match value {
        Value::Object(map) if !map.is_empty() => {
            for (key, child) in map {
                flatten_into(flat, format!("{path}.{key}"), child);
            }
        }
        leaf => {
            flat.insert(path, leaf.clone());
        }
    }
}

/// Flatten a nested partial update and rewrite the deletion sentinel: every
/// entry of the flat map that is exactly `null` becomes `Delete`, everything
/// else an absolute `Assign`. Only `null` triggers deletion - a key that is
/// simply absent is left alone, preserving the wire protocol's asymmetry.
pub fn flatten_update(nested: &Fields) -> FlatUpdate {
    flatten(nested)
        .into_iter()
        .map(|(path, value)| match value {
            Value::Null => (path, FieldUpdate::Delete),
            value => (path, FieldUpdate::Assign(value)),
        })
        .collect()
}
