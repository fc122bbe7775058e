//! Core library for the PRD wizard.
//!
//! The crate covers the whole life of a Product Requirements Document: the
//! five-step authoring wizard with its validators, flat-file persistence of
//! finished documents, and the implementation tracker derived from each
//! document's tech stack.
//!
//! - [`validation`]: pure per-step and whole-document validators
//! - [`wizard`]: the action-driven wizard state and the step sequencer
//! - [`catalog`]: async access to stored documents and trackers
//! - [`tracker`]: checklist synthesis and tracker sessions
//! - [`notify`]: the notification channel the wizard reports through
//! - [`display`]: markdown rendering of models and results
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use prdwiz_core::{notify::NotificationCenter, wizard::Sequencer, CatalogBuilder, PrdDraft};
//!
//! # async fn example(draft: PrdDraft) -> Result<(), Box<dyn std::error::Error>> {
//! let catalog = CatalogBuilder::new()
//!     .with_data_dir(Some("prd-data"))
//!     .build()
//!     .await?;
//!
//! let center = NotificationCenter::default();
//! let mut wizard = Sequencer::new(catalog.clone(), center.notifier());
//! wizard.update(draft);
//! while let prdwiz_core::wizard::StepOutcome::Advanced(step) = wizard.go_next() {
//!     println!("{step}");
//! }
//! let outcome = wizard.submit().await?;
//! println!("{outcome:?}");
//!
//! println!("{}", catalog.list_document_summaries().await?);
//! # Ok(())
//! # }
//! ```

pub mod catalog;
pub mod display;
pub mod error;
pub mod models;
pub mod notify;
pub mod params;
pub mod storage;
pub mod tracker;
pub mod validation;
pub mod wizard;

#[cfg(test)]
mod fixtures;

pub use catalog::{Catalog, CatalogBuilder};
pub use display::{CreateResult, DocumentSummaries, LocalDateTime, OperationStatus};
pub use error::{PrdError, Result};
pub use models::{
    DocumentExport, DocumentSummary, NewDocument, PrdDocument, PrdDraft, Proof, ProofKind, Stage,
    StageStatus, SubTask, Tracker,
};
pub use params::{DocumentId, SubmitProof, ToggleSubTask, UpdateDocument};
pub use tracker::ImplementationTracker;
pub use validation::{validate_document, ValidationResult};
