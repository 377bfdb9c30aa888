use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

use crate::document::Fields;

/// Instruction for a single dot-joined field path. The wire protocol encodes
/// deletion as a literal `null` in the nested update object; by the time an
/// update reaches the store that sentinel has been rewritten to `Delete`, so
/// `null` is never stored as a field value by the sync pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FieldUpdate {
    /// Assign the absolute value at this path, creating intermediate objects as needed.
    Assign(Value),
    /// Remove the field at this path entirely.
    Delete,
}

/// Flat, tombstone-rewritten form of a partial update: dot-joined field paths
/// mapped to instructions, ready to hand to a store transaction.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FlatUpdate(pub BTreeMap<String, FieldUpdate>);

impl FlatUpdate {
    pub fn is_empty(&self) -> bool { self.0.is_empty() }

    /// Merge this update into a document's field map. Assigning through a
    /// missing or non-object intermediate materializes/replaces it with an
    /// object; deleting through one is a no-op. Sibling fields of a touched
    /// path are never disturbed.
    pub fn apply_to(&self, fields: &mut Fields) {
        for (path, instruction) in &self.0 {
            match instruction {
                FieldUpdate::Assign(value) => assign_path(fields, path, value.clone()),
                FieldUpdate::Delete => delete_path(fields, path),
            }
        }
    }
}

impl FromIterator<(String, FieldUpdate)> for FlatUpdate {
    fn from_iter<T: IntoIterator<Item = (String, FieldUpdate)>>(iter: T) -> Self { FlatUpdate(iter.into_iter().collect()) }
}

fn assign_path(fields: &mut Fields, path: &str, value: Value) {
    let mut current = fields;
    let mut segments = path.split('.').peekable();
    while let Some(segment) = segments.next() {
        if segments.peek().is_none() {
            current.insert(segment.to_string(), value);
            return;
        }
        // descend, replacing any non-object intermediate with a fresh object
        let entry = current.entry(segment.to_string()).or_insert_with(|| Value::Object(Fields::new()));
        if !entry.is_object() {
            *entry = Value::Object(Fields::new());
        }
        match entry {
            Value::Object(map) => current = map,
            _ => return,
        }
    }
}

fn delete_path(fields: &mut Fields, path: &str) {
    let mut current = fields;
    let mut segments = path.split('.').peekable();
    while let Some(segment) = segments.next() {
        if segments.peek().is_none() {
            current.remove(segment);
            return;
        }
        match current.get_mut(segment) {
            Some(Value::Object(map)) => current = map,
            // missing or non-object intermediate: nothing to delete
            _ => return,
        }
    }
}
