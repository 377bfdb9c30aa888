use common::*;

use anyhow::Result;
use easel_core::{applier, loader, ApplyOutcome, ProjectAclAgent};
use easel_proto::{EntityKind, Identity};
use easel_storage_memory::MemoryStore;
use serde_json::json;

fn replayable_items() -> Vec<ItemSpec> {
    vec![ItemSpec::new(EntityKind::ProjectContent)
        .set("frame1", json!({ "projectId": "p1", "name": "one", "meta": { "z": 9 } }))
        .update("frame2", json!({ "name": "renamed", "stale": null }))
        .delete("frame3")]
}

/// Simulates at-least-once redelivery at the applier level: the same loaded
/// aggregate applied twice must produce the same target state as once.
#[tokio::test]
async fn double_apply_equals_single_apply() -> Result<()> {
    let store = MemoryStore::new();
    let owner = Identity::new("u1", Some("owner@x"));
    seed_project(&store, "p1", &owner, &[]);
    let contents = EntityKind::ProjectContent.collection();
    store.insert(&contents, easel_proto::Document::new("frame2", fields(json!({ "projectId": "p1", "stale": true }))));
    store.insert(&contents, easel_proto::Document::new("frame3", fields(json!({ "projectId": "p1" }))));

    let id = stage_change_request(&store, &owner, "p1", Some("m1"), &replayable_items());
    let request = loader::load_change_request(&store, &id).await?;
    let policy = ProjectAclAgent::new();

    assert_eq!(applier::apply(&store, &policy, &request).await?, ApplyOutcome::Applied);
    let after_first = (
        target_fields(&store, EntityKind::ProjectContent, "frame1").await,
        target_fields(&store, EntityKind::ProjectContent, "frame2").await,
    );

    assert_eq!(applier::apply(&store, &policy, &request).await?, ApplyOutcome::Applied);
    let after_second = (
        target_fields(&store, EntityKind::ProjectContent, "frame1").await,
        target_fields(&store, EntityKind::ProjectContent, "frame2").await,
    );

    assert_eq!(after_first, after_second);

    use easel_core::storage::DocumentStore;
    assert!(store.get(&contents, &"frame3".into()).await?.is_none());
    Ok(())
}

/// Full-pipeline redelivery: the trigger fires again for an identically staged
/// request after the first invocation already applied and cleaned it up.
#[tokio::test]
async fn redelivered_invocation_converges_to_same_state() -> Result<()> {
    let store = MemoryStore::new();
    let owner = Identity::new("u1", Some("owner@x"));
    seed_project(&store, "p1", &owner, &[]);
    let contents = EntityKind::ProjectContent.collection();
    store.insert(&contents, easel_proto::Document::new("frame2", fields(json!({ "projectId": "p1", "stale": true }))));
    store.insert(&contents, easel_proto::Document::new("frame3", fields(json!({ "projectId": "p1" }))));

    let id = stage_change_request(&store, &owner, "p1", Some("m1"), &replayable_items());
    pipeline(&store).handle_change_request(&id).await?;
    let first = target_fields(&store, EntityKind::ProjectContent, "frame1").await;

    // the identical batch is staged and delivered a second time
    let id = stage_change_request(&store, &owner, "p1", Some("m1"), &replayable_items());
    pipeline(&store).handle_change_request(&id).await?;
    let second = target_fields(&store, EntityKind::ProjectContent, "frame1").await;

    assert_eq!(first, second);
    assert_eq!(staging_record_count(&store, &id).await, 0);
    Ok(())
}
