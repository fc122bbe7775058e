//! Document operations for the Catalog.

use jiff::Timestamp;

use super::{run_blocking, Catalog};
use crate::{
    error::Result,
    models::{DocumentExport, NewDocument, PrdDocument},
    params::{DocumentId, UpdateDocument},
    wizard::DocumentSink,
};

impl Catalog {
    /// Validates and persists a new document under a generated id.
    pub async fn create_document(&self, document: NewDocument) -> Result<PrdDocument> {
        let store = self.layout.document_store();
        let now = Timestamp::now();

        run_blocking(move || store.create(document, now)).await
    }

    /// All documents, ordered by id. Fails as a whole on any unreadable blob.
    pub async fn list_documents(&self) -> Result<Vec<PrdDocument>> {
        let store = self.layout.document_store();

        run_blocking(move || store.get_all()).await
    }

    /// Retrieves a document by its id.
    pub async fn get_document(&self, params: &DocumentId) -> Result<Option<PrdDocument>> {
        let store = self.layout.document_store();
        let id = params.id.clone();

        run_blocking(move || store.get_by_id(&id)).await
    }

    /// Replaces a document's contents in place; the id never changes.
    ///
    /// Returns `Ok(None)` when no document with this id exists.
    pub async fn update_document(&self, params: UpdateDocument) -> Result<Option<PrdDocument>> {
        let store = self.layout.document_store();
        let UpdateDocument { id, document } = params;

        run_blocking(move || store.update(&id, document)).await
    }

    /// The document stamped with the export time.
    pub async fn export_document(&self, params: &DocumentId) -> Result<Option<DocumentExport>> {
        Ok(self
            .get_document(params)
            .await?
            .map(|document| DocumentExport {
                document,
                exported_at: Timestamp::now(),
            }))
    }

    /// Removes a document together with its tracker.
    ///
    /// Returns false when no document with this id exists.
    pub async fn delete_document(&self, params: &DocumentId) -> Result<bool> {
        let documents = self.layout.document_store();
        let trackers = self.layout.tracker_store();
        let id = params.id.clone();

        run_blocking(move || {
            let removed = documents.delete(&id)?;
            if removed {
                trackers.delete(&id)?;
            }
            Ok(removed)
        })
        .await
    }
}

impl DocumentSink for Catalog {
    async fn create_document(&self, document: NewDocument) -> Result<PrdDocument> {
        Catalog::create_document(self, document).await
    }
}
