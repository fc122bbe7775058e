//! Tracker operations for the Catalog.

use jiff::Timestamp;
use log::{info, warn};

use super::{run_blocking, Catalog};
use crate::{
    error::{PrdError, Result},
    models::{PrdDocument, Tracker},
    params::{DocumentId, SubmitProof, ToggleSubTask},
    tracker::{initial_tracker, ImplementationTracker},
};

impl Catalog {
    /// The stored tracker for a document.
    ///
    /// # Errors
    ///
    /// Returns `PrdError::TrackerNotFound` when none has been stored.
    pub async fn require_tracker(&self, params: &DocumentId) -> Result<Tracker> {
        self.get_tracker(params)
            .await?
            .ok_or_else(|| PrdError::TrackerNotFound {
                id: params.id.clone(),
            })
    }

    /// The stored tracker for a document, if one exists.
    pub async fn get_tracker(&self, params: &DocumentId) -> Result<Option<Tracker>> {
        let store = self.layout.tracker_store();
        let id = params.id.clone();

        run_blocking(move || store.get(&id)).await
    }

    /// Overwrites the tracker for a document with one supplied from outside.
    ///
    /// Stage statuses are re-derived from their subtasks and `prd_id` is set
    /// to the id the tracker is stored under.
    pub async fn put_tracker(&self, params: &DocumentId, mut tracker: Tracker) -> Result<Tracker> {
        if tracker.prd_id != params.id {
            warn!(
                "Tracker for {} uploaded with prdId {}, storing under {}",
                params.id, tracker.prd_id, params.id
            );
            tracker.prd_id = params.id.clone();
        }
        tracker.normalize();
        self.save_tracker(&params.id, tracker.clone()).await?;
        Ok(tracker)
    }

    /// Returns the document's tracker, synthesising and persisting the
    /// initial checklist on a miss. An existing tracker is never modified.
    pub async fn load_or_init_tracker(&self, document: &PrdDocument) -> Result<Tracker> {
        let store = self.layout.tracker_store();
        let id = document.id.clone();
        let fresh = initial_tracker(document, Timestamp::now());

        run_blocking(move || match store.get(&id)? {
            Some(existing) => Ok(existing),
            None => {
                store.put(&id, &fresh)?;
                info!("Initialised tracker for {id}");
                Ok(fresh)
            }
        })
        .await
    }

    pub(crate) async fn save_tracker(&self, prd_id: &str, tracker: Tracker) -> Result<()> {
        let store = self.layout.tracker_store();
        let id = prd_id.to_string();

        run_blocking(move || store.put(&id, &tracker)).await
    }

    /// Opens the tracker session for a stored document.
    ///
    /// # Errors
    ///
    /// Returns `PrdError::DocumentNotFound` when the document does not exist.
    pub async fn open_tracker(&self, params: &DocumentId) -> Result<ImplementationTracker> {
        let document = self
            .get_document(params)
            .await?
            .ok_or_else(|| PrdError::DocumentNotFound {
                id: params.id.clone(),
            })?;
        ImplementationTracker::load_or_init(self.clone(), &document).await
    }

    /// Flips one subtask and returns the updated tracker.
    pub async fn toggle_subtask(&self, params: &ToggleSubTask) -> Result<Tracker> {
        let mut session = self.open_tracker(&DocumentId::from(params.prd_id.as_str())).await?;
        session
            .toggle_subtask(&params.stage_id, &params.task_id)
            .await?;
        Ok(session.into_tracker())
    }

    /// Attaches stage proof and returns the updated tracker.
    pub async fn submit_proof(&self, params: &SubmitProof) -> Result<Tracker> {
        let mut session = self.open_tracker(&DocumentId::from(params.prd_id.as_str())).await?;
        session
            .submit_proof(&params.stage_id, params.kind, params.content.clone())
            .await?;
        Ok(session.into_tracker())
    }
}
