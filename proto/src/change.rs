use serde::{Deserialize, Serialize};

use crate::{
    collection::CollectionPath,
    document::{Document, Fields},
    id::DocumentId,
    identity::Identity,
};

/// Which target collection a payload item mutates. Closed on purpose: adding a
/// kind means deciding its routing here, checked at compile time.
/// Comment entities are not yet routable through this enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntityKind {
    Project,
    ProjectContent,
}

impl EntityKind {
    /// Canonical collection path for documents of this kind.
    pub fn collection(&self) -> CollectionPath {
        match self {
            EntityKind::Project => CollectionPath::fixed_name("Projects"),
            EntityKind::ProjectContent => CollectionPath::fixed_name("ProjectContents"),
        }
    }
}

/// Token intended to order/de-duplicate changes against a target document.
/// Carried through the pipeline but not consulted when applying - kept so the
/// staged wire format round-trips.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CausalityToken(String);

impl CausalityToken {
    pub fn as_str(&self) -> &str { &self.0 }
}

impl From<&str> for CausalityToken {
    fn from(val: &str) -> Self { CausalityToken(val.to_string()) }
}

impl std::fmt::Display for CausalityToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result { write!(f, "{}", self.0) }
}

/// One partial update within a payload item: assign/delete fields of the
/// document at `id`. `update` is the nested wire form; flattening happens at
/// apply time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentUpdate {
    pub id: DocumentId,
    pub update: Fields,
}

/// One typed group of mutations within a change request. Staged as its own
/// sub-record (with `sets` and `updates` as child collections) because a single
/// store document cannot hold an arbitrarily large batch.
#[derive(Debug, Clone, PartialEq)]
pub struct PayloadItem {
    pub entity_kind: EntityKind,
    pub sets: Vec<Document>,
    pub updates: Vec<DocumentUpdate>,
    pub deletes: Vec<DocumentId>,
}

/// Fully materialized change request: header plus every payload item with its
/// sets/updates fetched from the staging tree.
#[derive(Debug, Clone)]
pub struct ChangeRequest {
    pub id: DocumentId,
    pub submitter: Identity,
    pub project_id: DocumentId,
    pub change_marker: Option<CausalityToken>,
    pub payload: Vec<PayloadItem>,
}
