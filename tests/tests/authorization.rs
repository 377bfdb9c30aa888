use common::*;

use anyhow::Result;
use easel_core::{ApplyOutcome, SkipReason};
use easel_proto::{EntityKind, Identity};
use easel_storage_memory::MemoryStore;
use serde_json::json;

#[tokio::test]
async fn stranger_submission_is_silently_dropped_and_cleaned_up() -> Result<()> {
    let store = MemoryStore::new();
    let owner = Identity::new("u1", Some("owner@x"));
    seed_project(&store, "p1", &owner, &["e2@x"]);

    let stranger = Identity::new("u3", Some("u3@elsewhere"));
    let item = ItemSpec::new(EntityKind::ProjectContent)
        .set("intruder", json!({ "projectId": "p1", "name": "not yours" }))
        .update("intruder", json!({ "name": "still not yours" }));
    let id = stage_change_request(&store, &stranger, "p1", None, &[item]);
    assert!(staging_record_count(&store, &id).await > 0);

    // not an error: observably identical to success except nothing changed
    let outcome = pipeline(&store).handle_change_request(&id).await?;
    assert_eq!(outcome, ApplyOutcome::Skipped(SkipReason::AccessDenied));

    use easel_core::storage::DocumentStore;
    assert!(store.get(&EntityKind::ProjectContent.collection(), &"intruder".into()).await?.is_none());
    assert_eq!(staging_record_count(&store, &id).await, 0);
    Ok(())
}

#[tokio::test]
async fn editor_email_submission_is_applied() -> Result<()> {
    let store = MemoryStore::new();
    let owner = Identity::new("u1", Some("owner@x"));
    seed_project(&store, "p1", &owner, &["e2@x"]);

    let editor = Identity::new("u2", Some("e2@x"));
    let item = ItemSpec::new(EntityKind::ProjectContent).set("frame1", json!({ "projectId": "p1", "name": "hello" }));
    let id = stage_change_request(&store, &editor, "p1", None, &[item]);

    let outcome = pipeline(&store).handle_change_request(&id).await?;
    assert_eq!(outcome, ApplyOutcome::Applied);

    let doc = target_fields(&store, EntityKind::ProjectContent, "frame1").await;
    assert_eq!(doc.get("name"), Some(&json!("hello")));
    assert_eq!(staging_record_count(&store, &id).await, 0);
    Ok(())
}
