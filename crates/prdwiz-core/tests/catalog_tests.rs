mod common;

use std::{collections::HashSet, fs, time::Duration};

use common::{create_test_catalog, new_document};
use prdwiz_core::{DocumentId, PrdError, StageStatus, ToggleSubTask};

#[tokio::test]
async fn test_acme_round_trip() {
    let (_temp_dir, catalog) = create_test_catalog().await;

    let created = catalog
        .create_document(new_document("Acme"))
        .await
        .expect("Failed to create document");

    let fetched = catalog
        .get_document(&DocumentId::from(created.id.as_str()))
        .await
        .expect("Failed to read document")
        .expect("Document should exist");
    assert_eq!(fetched.project_name, "Acme");
    assert_eq!(fetched.id, created.id);
}

#[tokio::test]
async fn test_empty_user_stories_are_never_written() {
    let (temp_dir, catalog) = create_test_catalog().await;
    let mut document = new_document("Acme");
    document.user_stories = vec![];

    let err = catalog.create_document(document).await.unwrap_err();
    match err {
        PrdError::Validation { errors } => {
            assert!(errors.iter().any(|e| e.contains("user story")));
        }
        other => panic!("Expected Validation error, got {other:?}"),
    }

    let written = fs::read_dir(temp_dir.path().join("documents")).unwrap().count();
    assert_eq!(written, 0);
    assert!(catalog.list_documents().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_same_name_at_distinct_times_gets_distinct_ids() {
    let (temp_dir, catalog) = create_test_catalog().await;

    let first = catalog.create_document(new_document("Acme")).await.unwrap();
    tokio::time::sleep(Duration::from_millis(5)).await;
    let second = catalog.create_document(new_document("Acme")).await.unwrap();

    assert_ne!(first.id, second.id);
    for document in [&first, &second] {
        assert!(temp_dir
            .path()
            .join("documents")
            .join(format!("{}.json", document.id))
            .is_file());
    }
}

#[tokio::test]
async fn test_listing_fails_on_corrupt_blob() {
    let (temp_dir, catalog) = create_test_catalog().await;
    catalog.create_document(new_document("Acme")).await.unwrap();
    fs::write(temp_dir.path().join("documents").join("bad.json"), "[").unwrap();

    let err = catalog.list_documents().await.unwrap_err();
    assert!(matches!(err, PrdError::MalformedBlob { .. }));

    // Single reads of other documents are unaffected.
    assert!(catalog
        .get_document(&DocumentId::from("absent"))
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn test_tracker_synthesised_for_two_databases() {
    let (_temp_dir, catalog) = create_test_catalog().await;
    let document = catalog.create_document(new_document("Acme")).await.unwrap();

    let tracker = catalog.load_or_init_tracker(&document).await.unwrap();
    let stage = tracker.stage("database-setup").unwrap();
    assert_eq!(stage.sub_tasks.len(), 4);
    assert_eq!(stage.status, StageStatus::NotStarted);
}

#[tokio::test]
async fn test_double_toggle_restores_tracker() {
    let (_temp_dir, catalog) = create_test_catalog().await;
    let document = catalog.create_document(new_document("Acme")).await.unwrap();
    let original = catalog.load_or_init_tracker(&document).await.unwrap();

    let params = ToggleSubTask {
        prd_id: document.id.clone(),
        stage_id: "frontend-setup".to_string(),
        task_id: "create-frontend".to_string(),
    };
    catalog.toggle_subtask(&params).await.unwrap();
    let restored = catalog.toggle_subtask(&params).await.unwrap();

    assert_eq!(restored.stages, original.stages);
}

#[tokio::test]
async fn test_many_documents_listed_once_each() {
    let (_temp_dir, catalog) = create_test_catalog().await;
    for name in ["Alpha", "Beta", "Gamma"] {
        catalog.create_document(new_document(name)).await.unwrap();
    }

    let documents = catalog.list_documents().await.unwrap();
    let ids: HashSet<_> = documents.iter().map(|d| d.id.as_str()).collect();
    assert_eq!(ids.len(), 3);
}
