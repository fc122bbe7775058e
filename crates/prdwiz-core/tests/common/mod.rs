#![allow(dead_code)]

use prdwiz_core::{Catalog, CatalogBuilder, NewDocument, PrdDraft};
use serde_json::json;
use tempfile::TempDir;

/// Helper function to create a catalog in a fresh temporary data directory
pub async fn create_test_catalog() -> (TempDir, Catalog) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let catalog = CatalogBuilder::new()
        .with_data_dir(Some(temp_dir.path()))
        .build()
        .await
        .expect("Failed to create catalog");
    (temp_dir, catalog)
}

/// A complete document body as a client would POST it.
pub fn document_json(project_name: &str) -> serde_json::Value {
    json!({
        "project_name": project_name,
        "vision": "One place for every requirement",
        "reference_links": [{ "link": "https://x.com", "features": ["f1"] }],
        "tech_stack": {
            "domain": "acme.dev",
            "repo_name": "acme-app",
            "frontend_framework": "React",
            "backend_framework": "FastAPI",
            "databases": ["Postgres", "Redis"],
            "team_members": ["Dana"],
            "deployment_option": "Docker"
        },
        "database_schema": {
            "tables": [{
                "name": "users",
                "fields": [{ "name": "id", "type": "uuid", "required": true, "description": "" }],
                "relationships": []
            }]
        },
        "user_stories": ["As a PM I can write a PRD"]
    })
}

pub fn new_document(project_name: &str) -> NewDocument {
    serde_json::from_value(document_json(project_name)).expect("valid document fixture")
}

pub fn draft(project_name: &str) -> PrdDraft {
    new_document(project_name).into()
}
