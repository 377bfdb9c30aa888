//! Reclaims the staging tree of a processed change request. Runs after the
//! applier's commit and outside its transaction; a crash in between leaves an
//! applied-but-staged request behind, which is safe to reprocess because every
//! mutation is idempotent under replay.

use futures::future::try_join_all;
use tracing::debug;

use crate::{error::StorageError, staging, storage::DocumentStore};
use easel_proto::{CollectionPath, DocumentId};

pub async fn cleanup_change_request<S: DocumentStore + ?Sized>(store: &S, id: &DocumentId) -> Result<(), StorageError> {
    let payload_path = staging::payload(id);
    let items = store.list(&payload_path).await?;

    let mut targets: Vec<(CollectionPath, DocumentId)> = Vec::new();
    for item in &items {
        let sets = staging::sets(id, &item.id);
        for doc in store.list(&sets).await? {
            targets.push((sets.clone(), doc.id));
        }
        let updates = staging::updates(id, &item.id);
        for doc in store.list(&updates).await? {
            targets.push((updates.clone(), doc.id));
        }
        targets.push((payload_path.clone(), item.id.clone()));
    }

    debug!("cleaning up change request {}: {} staging records", id, targets.len() + 1);

    // leaves and payload items in one concurrent wave, header last
    try_join_all(targets.iter().map(|(path, doc)| store.delete(path, doc))).await?;
    store.delete(&staging::change_requests(), id).await?;

    Ok(())
}
