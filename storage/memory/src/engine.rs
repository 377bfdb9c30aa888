use std::collections::BTreeMap;
use std::sync::{
    atomic::{AtomicU64, AtomicUsize, Ordering},
    Arc, Mutex,
};

use async_trait::async_trait;

use easel_core::{
    error::StorageError,
    storage::{DocumentStore, StoreTransaction},
};
use easel_proto::{CollectionPath, Document, DocumentId, Fields};

use crate::transaction::MemoryTransaction;

#[derive(Clone)]
pub(crate) struct Versioned {
    pub version: u64,
    pub fields: Fields,
}

/// BTreeMaps keep collection listing in stable document-id order, which the
/// loader depends on for payload-item ordering.
pub(crate) type Collections = BTreeMap<CollectionPath, BTreeMap<DocumentId, Versioned>>;

pub(crate) struct Inner {
    pub collections: Mutex<Collections>,
    /// Versions are globally monotonic so a delete-then-recreate can never
    /// look unchanged to a concurrent transaction.
    pub next_version: AtomicU64,
    pub fail_commits: AtomicUsize,
}

impl Inner {
    pub fn stamp(&self) -> u64 { self.next_version.fetch_add(1, Ordering::Relaxed) }
}

/// In-memory [`DocumentStore`] with optimistic, version-checked transactions.
/// Stands in for the hosted document store in tests and local development.
#[derive(Clone)]
pub struct MemoryStore {
    inner: Arc<Inner>,
}

impl Default for MemoryStore {
    fn default() -> Self { Self::new() }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Inner {
                collections: Mutex::new(BTreeMap::new()),
                next_version: AtomicU64::new(1),
                fail_commits: AtomicUsize::new(0),
            }),
        }
    }

    /// Direct non-transactional write, for seeding fixtures and staging
    /// records the way a client SDK would.
    pub fn insert(&self, path: &CollectionPath, doc: Document) {
        let version = self.inner.stamp();
        let mut collections = self.inner.collections.lock().unwrap();
        collections.entry(path.clone()).or_default().insert(doc.id, Versioned { version, fields: doc.fields });
    }

    /// Force the next `n` commits to fail with a backend error, for testing
    /// that a failed transaction applies nothing.
    pub fn fail_commits(&self, n: usize) { self.inner.fail_commits.store(n, Ordering::SeqCst); }

    pub(crate) fn inner(&self) -> Arc<Inner> { self.inner.clone() }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn get(&self, path: &CollectionPath, id: &DocumentId) -> Result<Option<Document>, StorageError> {
        let collections = self.inner.collections.lock().unwrap();
        Ok(collections.get(path).and_then(|docs| docs.get(id)).map(|v| Document { id: id.clone(), fields: v.fields.clone() }))
    }

    async fn list(&self, path: &CollectionPath) -> Result<Vec<Document>, StorageError> {
        let collections = self.inner.collections.lock().unwrap();
        Ok(collections
            .get(path)
            .map(|docs| docs.iter().map(|(id, v)| Document { id: id.clone(), fields: v.fields.clone() }).collect())
            .unwrap_or_default())
    }

    async fn delete(&self, path: &CollectionPath, id: &DocumentId) -> Result<(), StorageError> {
        let mut collections = self.inner.collections.lock().unwrap();
        if let Some(docs) = collections.get_mut(path) {
            docs.remove(id);
        }
        Ok(())
    }

    async fn begin(&self) -> Result<Box<dyn StoreTransaction>, StorageError> {
        Ok(Box::new(MemoryTransaction::new(self.inner())))
    }
}
