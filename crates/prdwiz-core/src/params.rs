//! Parameter structures shared by the command line and HTTP layers.
//!
//! Interface crates wrap these with their own derives (clap arguments, axum
//! extractors) and convert into them with `From`, so the catalog API stays
//! free of framework types.

#[cfg(feature = "schema")]
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::models::{NewDocument, ProofKind};

/// Identifies one PRD document (and the tracker keyed by the same id).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct DocumentId {
    pub id: String,
}

impl From<String> for DocumentId {
    fn from(id: String) -> Self {
        Self { id }
    }
}

impl From<&str> for DocumentId {
    fn from(id: &str) -> Self {
        Self { id: id.to_string() }
    }
}

/// Replace the contents of a stored document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct UpdateDocument {
    pub id: String,
    pub document: NewDocument,
}

/// Flip one subtask of a document's tracker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct ToggleSubTask {
    pub prd_id: String,
    pub stage_id: String,
    pub task_id: String,
}

/// Attach proof to one stage of a document's tracker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct SubmitProof {
    pub prd_id: String,
    pub stage_id: String,
    pub kind: ProofKind,
    /// URL for links, `data:` URL for screenshots
    pub content: String,
}
