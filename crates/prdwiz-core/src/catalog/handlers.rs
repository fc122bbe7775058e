//! Catalog operations that return formatted wrapper types.

use super::Catalog;
use crate::{
    display::{DocumentSummaries, OperationStatus},
    error::Result,
    models::DocumentSummary,
    params::DocumentId,
};

impl Catalog {
    /// Handle listing documents as summaries.
    pub async fn list_document_summaries(&self) -> Result<DocumentSummaries> {
        let documents = self.list_documents().await?;
        Ok(DocumentSummaries(
            documents.iter().map(DocumentSummary::from).collect(),
        ))
    }

    /// Handle deleting a document and its tracker.
    pub async fn delete_document_with_confirmation(
        &self,
        params: &DocumentId,
    ) -> Result<OperationStatus> {
        let removed = self.delete_document(params).await?;
        Ok(if removed {
            OperationStatus::success(format!("Deleted PRD {}", params.id))
        } else {
            OperationStatus::failure(format!("PRD with ID {} not found", params.id))
        })
    }
}
