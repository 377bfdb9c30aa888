use common::*;

use anyhow::Result;
use easel_core::ApplyOutcome;
use easel_proto::{EntityKind, Identity};
use easel_storage_memory::MemoryStore;
use serde_json::json;

#[tokio::test]
async fn payload_items_route_by_entity_kind() -> Result<()> {
    let store = MemoryStore::new();
    let owner = Identity::new("u1", Some("owner@x"));
    seed_project(&store, "p1", &owner, &[]);

    let items = [
        ItemSpec::new(EntityKind::Project).update("p1", json!({ "title": "Renamed" })),
        ItemSpec::new(EntityKind::ProjectContent).set("frame1", json!({ "projectId": "p1", "name": "frame" })),
    ];
    let id = stage_change_request(&store, &owner, "p1", None, &items);

    let outcome = pipeline(&store).handle_change_request(&id).await?;
    assert_eq!(outcome, ApplyOutcome::Applied);

    // Project-kind mutation landed under Projects, content under ProjectContents
    let project = target_fields(&store, EntityKind::Project, "p1").await;
    assert_eq!(project.get("title"), Some(&json!("Renamed")));
    let content = target_fields(&store, EntityKind::ProjectContent, "frame1").await;
    assert_eq!(content.get("name"), Some(&json!("frame")));

    use easel_core::storage::DocumentStore;
    assert!(store.get(&EntityKind::Project.collection(), &"frame1".into()).await?.is_none());
    assert!(store.get(&EntityKind::ProjectContent.collection(), &"p1".into()).await?.is_none());
    Ok(())
}
