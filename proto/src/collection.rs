use serde::{Deserialize, Serialize};

use crate::id::DocumentId;

/// Slash-joined path to a collection, e.g. `Projects` or
/// `ChangeRequests/01H.../Payload/01J.../Sets`. Sub-collections hang off a
/// document, never off another collection directly.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CollectionPath(String);

impl CollectionPath {
    // Top-level collections have fixed names; everything else is derived via child()
    pub fn fixed_name(name: &str) -> Self { CollectionPath(name.to_string()) }

    /// Path of a sub-collection under one of this collection's documents.
    pub fn child(&self, doc: &DocumentId, name: &str) -> Self { CollectionPath(format!("{}/{}/{}", self.0, doc, name)) }

    pub fn as_str(&self) -> &str { &self.0 }
}

impl From<&str> for CollectionPath {
    fn from(val: &str) -> Self { CollectionPath(val.to_string()) }
}

impl From<CollectionPath> for String {
    fn from(path: CollectionPath) -> Self { path.0 }
}

impl AsRef<str> for CollectionPath {
    fn as_ref(&self) -> &str { &self.0 }
}

impl std::fmt::Display for CollectionPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result { write!(f, "{}", self.0) }
}
