//! Shared sample data for unit tests.

use crate::models::{
    DatabaseSchema, Field, FieldType, NewDocument, PrdDraft, ReferenceLink, Table, TechStack,
};

pub(crate) fn sample_tech_stack() -> TechStack {
    TechStack {
        domain: "acme.dev".to_string(),
        repo_name: "acme-app".to_string(),
        frontend_framework: "React".to_string(),
        custom_frontend_framework: None,
        backend_framework: "FastAPI".to_string(),
        custom_backend_framework: None,
        databases: vec!["Postgres".to_string(), "Redis".to_string()],
        team_members: vec!["Dana".to_string()],
        deployment_option: "Docker".to_string(),
        custom_deployment_option: None,
    }
}

pub(crate) fn sample_document(project_name: &str) -> NewDocument {
    NewDocument {
        project_name: project_name.to_string(),
        vision: "Make requirements boring again".to_string(),
        reference_links: vec![ReferenceLink {
            link: "https://x.com".to_string(),
            features: vec!["f1".to_string()],
        }],
        tech_stack: sample_tech_stack(),
        database_schema: DatabaseSchema {
            tables: vec![Table {
                name: "users".to_string(),
                fields: vec![Field {
                    name: "id".to_string(),
                    field_type: Some(FieldType::Uuid),
                    required: true,
                    description: "Primary key".to_string(),
                }],
                relationships: vec![],
            }],
        },
        user_stories: vec!["As a PM I can write a PRD".to_string()],
    }
}

pub(crate) fn sample_draft(project_name: &str) -> PrdDraft {
    sample_document(project_name).into()
}
