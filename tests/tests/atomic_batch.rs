use common::*;

use anyhow::Result;
use easel_core::{error::PipelineError, ApplyOutcome};
use easel_proto::{EntityKind, Identity};
use easel_storage_memory::MemoryStore;
use serde_json::json;

#[tokio::test]
async fn batch_applies_fully_or_not_at_all() -> Result<()> {
    let store = MemoryStore::new();
    let owner = Identity::new("u1", Some("owner@x"));
    seed_project(&store, "p1", &owner, &[]);
    store.insert(
        &EntityKind::ProjectContent.collection(),
        easel_proto::Document::new("doomed", fields(json!({ "projectId": "p1" }))),
    );

    // two sets and one delete in a single payload item
    let item = ItemSpec::new(EntityKind::ProjectContent)
        .set("frame1", json!({ "projectId": "p1", "name": "one" }))
        .set("frame2", json!({ "projectId": "p1", "name": "two" }))
        .delete("doomed");
    let id = stage_change_request(&store, &owner, "p1", None, &[item]);
    let staged = staging_record_count(&store, &id).await;

    store.fail_commits(1);
    let err = pipeline(&store).handle_change_request(&id).await.unwrap_err();
    assert!(matches!(err, PipelineError::Apply(_)));

    // none of the three effects landed, and cleanup was skipped
    use easel_core::storage::DocumentStore;
    let contents = EntityKind::ProjectContent.collection();
    assert!(store.get(&contents, &"frame1".into()).await?.is_none());
    assert!(store.get(&contents, &"frame2".into()).await?.is_none());
    assert!(store.get(&contents, &"doomed".into()).await?.is_some());
    assert_eq!(staging_record_count(&store, &id).await, staged);

    // the retried invocation produces all three effects
    let outcome = pipeline(&store).handle_change_request(&id).await?;
    assert_eq!(outcome, ApplyOutcome::Applied);
    assert!(store.get(&contents, &"frame1".into()).await?.is_some());
    assert!(store.get(&contents, &"frame2".into()).await?.is_some());
    assert!(store.get(&contents, &"doomed".into()).await?.is_none());
    assert_eq!(staging_record_count(&store, &id).await, 0);
    Ok(())
}
