use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{id::DocumentId, identity::Identity};

/// Field map of a stored document. Documents are JSON objects; the id lives in
/// the document key, not in the field map.
pub type Fields = serde_json::Map<String, Value>;

/// A document paired with its id, as read from or written to a collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub id: DocumentId,
    pub fields: Fields,
}

impl Document {
    pub fn new(id: impl Into<DocumentId>, fields: Fields) -> Self { Document { id: id.into(), fields } }

    /// Deserialize the field map into a typed view of the document.
    pub fn parse<T: serde::de::DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_value(Value::Object(self.fields.clone()))
    }
}

/// Typed view of a `Projects` document - the fields the sync backend cares
/// about. Other fields (title, canvas settings, ...) pass through untouched in
/// the raw field map.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    pub owner: Identity,
    #[serde(default)]
    pub editors: Vec<String>,
}
