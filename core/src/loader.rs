//! Reconstructs a full [`ChangeRequest`] aggregate from its staging tree
//! before any mutation is attempted. Sibling fetches fan out concurrently;
//! any read failure aborts the whole load.

use futures::future::try_join_all;
use serde::Deserialize;
use tracing::debug;

use crate::{error::RetrievalError, staging, storage::DocumentStore};
use easel_proto::{CausalityToken, ChangeRequest, Document, DocumentId, DocumentUpdate, EntityKind, Fields, Identity, PayloadItem};

/// Wire shape of the header document.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct StagedHeader {
    submitter: Identity,
    project_id: DocumentId,
    #[serde(default)]
    change_marker: Option<CausalityToken>,
}

/// Wire shape of a payload-item document. `sets` and `updates` live in child
/// collections, not here.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct StagedItem {
    entity_kind: EntityKind,
    #[serde(default)]
    deletes: Vec<DocumentId>,
}

/// Wire shape of an `Updates` child document.
#[derive(Deserialize)]
struct StagedUpdate {
    update: Fields,
}

pub async fn load_change_request<S: DocumentStore + ?Sized>(store: &S, id: &DocumentId) -> Result<ChangeRequest, RetrievalError> {
    let header_doc = store.get(&staging::change_requests(), id).await?.ok_or_else(|| RetrievalError::NotFound(id.clone()))?;
    let header: StagedHeader = header_doc.parse()?;

    let item_docs = store.list(&staging::payload(id)).await?;
    debug!("loading change request {} with {} payload items", id, item_docs.len());

    // fan out per payload item; try_join_all preserves store order
    let payload = try_join_all(item_docs.into_iter().map(|doc| load_payload_item(store, id, doc))).await?;

    Ok(ChangeRequest {
        id: id.clone(),
        submitter: header.submitter,
        project_id: header.project_id,
        change_marker: header.change_marker,
        payload,
    })
}

async fn load_payload_item<S: DocumentStore + ?Sized>(
    store: &S,
    request: &DocumentId,
    doc: Document,
) -> Result<PayloadItem, RetrievalError> {
    let staged: StagedItem = doc.parse()?;

    let sets_path = staging::sets(request, &doc.id);
    let updates_path = staging::updates(request, &doc.id);
    let (sets, update_docs) = futures::try_join!(store.list(&sets_path), store.list(&updates_path))?;

    let updates = update_docs
        .into_iter()
        .map(|doc| {
            let staged: StagedUpdate = doc.parse()?;
            Ok(DocumentUpdate { id: doc.id, update: staged.update })
        })
        .collect::<Result<Vec<_>, serde_json::Error>>()?;

    Ok(PayloadItem { entity_kind: staged.entity_kind, sets, updates, deletes: staged.deletes })
}
