use std::collections::HashMap;
use std::io;
use std::sync::{atomic::Ordering, Arc};

use async_trait::async_trait;

use easel_core::{error::StorageError, storage::StoreTransaction};
use easel_proto::{CollectionPath, Document, DocumentId, Fields, FlatUpdate};

use crate::engine::{Inner, Versioned};

enum BufferedWrite {
    Set { path: CollectionPath, doc: Document },
    Update { path: CollectionPath, id: DocumentId, update: FlatUpdate },
    Delete { path: CollectionPath, id: DocumentId },
}

/// Buffers writes and records the version of every document read (0 for
/// absent). Commit re-checks those versions under the store lock and applies
/// the buffer only if none changed; otherwise [`StorageError::Conflict`].
pub struct MemoryTransaction {
    inner: Arc<Inner>,
    reads: HashMap<(CollectionPath, DocumentId), u64>,
    writes: Vec<BufferedWrite>,
}

impl MemoryTransaction {
    pub(crate) fn new(inner: Arc<Inner>) -> Self { Self { inner, reads: HashMap::new(), writes: Vec::new() } }
}

#[async_trait]
impl StoreTransaction for MemoryTransaction {
    async fn get(&mut self, path: &CollectionPath, id: &DocumentId) -> Result<Option<Document>, StorageError> {
        let collections = self.inner.collections.lock().unwrap();
        let existing = collections.get(path).and_then(|docs| docs.get(id));
        // first read of a document pins its version for the commit check
        self.reads.entry((path.clone(), id.clone())).or_insert(existing.map(|v| v.version).unwrap_or(0));
        Ok(existing.map(|v| Document { id: id.clone(), fields: v.fields.clone() }))
    }

    fn set(&mut self, path: &CollectionPath, doc: Document) {
        self.writes.push(BufferedWrite::Set { path: path.clone(), doc });
    }

    fn update(&mut self, path: &CollectionPath, id: &DocumentId, update: FlatUpdate) {
        self.writes.push(BufferedWrite::Update { path: path.clone(), id: id.clone(), update });
    }

    fn delete(&mut self, path: &CollectionPath, id: &DocumentId) {
        self.writes.push(BufferedWrite::Delete { path: path.clone(), id: id.clone() });
    }

    async fn commit(self: Box<Self>) -> Result<(), StorageError> {
        let MemoryTransaction { inner, reads, writes } = *self;

        let injected = inner.fail_commits.load(Ordering::SeqCst);
        if injected > 0 && inner.fail_commits.compare_exchange(injected, injected - 1, Ordering::SeqCst, Ordering::SeqCst).is_ok() {
            return Err(StorageError::backend(io::Error::other("injected commit failure")));
        }

        let mut collections = inner.collections.lock().unwrap();

        for ((path, id), read_version) in &reads {
            let current = collections.get(path).and_then(|docs| docs.get(id)).map(|v| v.version).unwrap_or(0);
            if current != *read_version {
                tracing::debug!("commit conflict on {path}/{id}: read v{read_version}, now v{current}");
                return Err(StorageError::Conflict);
            }
        }

        for write in writes {
            match write {
                BufferedWrite::Set { path, doc } => {
                    let version = inner.stamp();
                    collections.entry(path).or_default().insert(doc.id, Versioned { version, fields: doc.fields });
                }
                BufferedWrite::Update { path, id, update } => {
                    let version = inner.stamp();
                    let docs = collections.entry(path).or_default();
                    // a missing document materializes from the assigned paths
                    let mut fields = docs.get(&id).map(|v| v.fields.clone()).unwrap_or_else(Fields::new);
                    update.apply_to(&mut fields);
                    docs.insert(id, Versioned { version, fields });
                }
                BufferedWrite::Delete { path, id } => {
                    if let Some(docs) = collections.get_mut(&path) {
                        docs.remove(&id);
                    }
                }
            }
        }

        Ok(())
    }
}
