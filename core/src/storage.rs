use async_trait::async_trait;

use crate::error::StorageError;
use easel_proto::{CollectionPath, Document, DocumentId, FlatUpdate};

/// Interface to the shared document store. All mutation of target collections
/// funnels through [`StoreTransaction`]; the direct methods here exist for the
/// staging tree (reads for the loader, deletes for cleanup).
#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn get(&self, path: &CollectionPath, id: &DocumentId) -> Result<Option<Document>, StorageError>;

    /// List every document in a collection. Order must be stable for a given
    /// collection state; the loader relies on it for payload-item ordering.
    async fn list(&self, path: &CollectionPath) -> Result<Vec<Document>, StorageError>;

    /// Delete a document. Deleting a missing document is a no-op, and a
    /// document's sub-collections survive its deletion (store semantics -
    /// cleanup deletes leaves explicitly).
    async fn delete(&self, path: &CollectionPath, id: &DocumentId) -> Result<(), StorageError>;

    /// Open a transaction. Writes are buffered and land atomically at commit,
    /// or not at all.
    async fn begin(&self) -> Result<Box<dyn StoreTransaction>, StorageError>;
}

/// One atomic unit of reads and buffered writes. Reads record a version;
/// commit fails with [`StorageError::Conflict`] if any read document changed
/// underneath the transaction. Issue all reads before the first write.
#[async_trait]
pub trait StoreTransaction: Send {
    async fn get(&mut self, path: &CollectionPath, id: &DocumentId) -> Result<Option<Document>, StorageError>;

    /// Wholesale create-or-replace of the document at `path/{doc.id}`.
    fn set(&mut self, path: &CollectionPath, doc: Document);

    /// Partial update of the document at `path/{id}`. A missing document is
    /// created from the assigned paths; `Delete` entries on missing fields are
    /// no-ops.
    fn update(&mut self, path: &CollectionPath, id: &DocumentId, update: FlatUpdate);

    fn delete(&mut self, path: &CollectionPath, id: &DocumentId);

    async fn commit(self: Box<Self>) -> Result<(), StorageError>;
}
