//! Document summary types for listings.

use serde::{Deserialize, Serialize};

use super::PrdDocument;

/// Compact view of a document used by listings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DocumentSummary {
    pub id: String,
    pub project_name: String,
    pub vision: String,
    /// Effective frontend framework
    pub frontend: String,
    /// Effective backend framework
    pub backend: String,
    pub story_count: usize,
}

impl From<&PrdDocument> for DocumentSummary {
    fn from(document: &PrdDocument) -> Self {
        Self {
            id: document.id.clone(),
            project_name: document.project_name.clone(),
            vision: document.vision.clone(),
            frontend: document.tech_stack.effective_frontend().to_string(),
            backend: document.tech_stack.effective_backend().to_string(),
            story_count: document
                .user_stories
                .iter()
                .filter(|story| !story.trim().is_empty())
                .count(),
        }
    }
}
