//! Implementation tracking for persisted PRD documents.
//!
//! A tracker is created lazily the first time a document's checklist is
//! requested and is written back in full after every mutation.

use jiff::Timestamp;
use log::error;

use crate::{
    catalog::Catalog,
    error::Result,
    models::{PrdDocument, Proof, ProofKind, Tracker},
};

pub mod checklist;

pub use checklist::initial_tracker;

/// An open tracker bound to the catalog it persists to.
///
/// Mutations are applied in memory first. When persisting fails the error is
/// logged and returned, but the in-memory change is kept, so
/// [`tracker`](Self::tracker) may show state the store does not have.
#[derive(Debug)]
pub struct ImplementationTracker {
    catalog: Catalog,
    prd_id: String,
    tracker: Tracker,
}

impl ImplementationTracker {
    /// Load the document's tracker, creating and persisting the initial
    /// checklist if none exists yet.
    pub async fn load_or_init(catalog: Catalog, document: &PrdDocument) -> Result<Self> {
        let tracker = catalog.load_or_init_tracker(document).await?;
        Ok(Self {
            catalog,
            prd_id: document.id.clone(),
            tracker,
        })
    }

    pub fn tracker(&self) -> &Tracker {
        &self.tracker
    }

    pub fn into_tracker(self) -> Tracker {
        self.tracker
    }

    /// Flip one subtask and persist. Returns the new completion flag.
    pub async fn toggle_subtask(&mut self, stage_id: &str, task_id: &str) -> Result<bool> {
        let completed = self
            .tracker
            .toggle_subtask(stage_id, task_id, Timestamp::now())?;
        self.persist().await?;
        Ok(completed)
    }

    /// Attach stage-level proof and persist.
    pub async fn submit_proof(
        &mut self,
        stage_id: &str,
        kind: ProofKind,
        content: String,
    ) -> Result<Proof> {
        let proof = self
            .tracker
            .attach_proof(stage_id, kind, content, Timestamp::now())?
            .clone();
        self.persist().await?;
        Ok(proof)
    }

    async fn persist(&self) -> Result<()> {
        self.catalog
            .save_tracker(&self.prd_id, self.tracker.clone())
            .await
            .map_err(|e| {
                error!("Failed to save tracker for {}: {e}", self.prd_id);
                e
            })
    }
}
