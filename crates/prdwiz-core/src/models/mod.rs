//! Data models for PRD documents, wizard drafts and implementation trackers.
//!
//! This module contains the core domain models of the PRD wizard. Display
//! implementations for these models live in [`crate::display::models`] to keep
//! data structures separate from presentation logic.
//!
//! # Model Families
//!
//! - **Documents** ([`PrdDocument`], [`NewDocument`]): the persisted unit. A
//!   `NewDocument` is what callers submit; the store assigns the id and hands
//!   back a `PrdDocument`.
//! - **Drafts** ([`PrdDraft`]): the structurally optional variant held by the
//!   wizard while a document is being authored. Top-level groups fill in
//!   incrementally and are replaced wholesale, never deep-merged.
//! - **Trackers** ([`Tracker`], [`Stage`], [`SubTask`], [`Proof`]): the
//!   implementation checklist derived from a persisted document.
//!
//! # Examples
//!
//! ```rust
//! use prdwiz_core::models::{PrdDraft, StageStatus};
//!
//! let mut draft = PrdDraft::default();
//! draft.merge(PrdDraft {
//!     project_name: Some("Acme".to_string()),
//!     ..Default::default()
//! });
//! assert_eq!(draft.project_name.as_deref(), Some("Acme"));
//!
//! assert_eq!(StageStatus::from_completion(1, 2), StageStatus::InProgress);
//! ```

pub mod document;
pub mod draft;
pub mod status;
pub mod summary;
pub mod tracker;

mod serde_helpers;


pub use document::{
    DatabaseSchema, DocumentExport, Field, FieldType, NewDocument, PrdDocument, ReferenceLink,
    Relationship, RelationshipType, Table, TechStack, BACKEND_FRAMEWORKS, DEPLOYMENT_OPTIONS,
    FRONTEND_FRAMEWORKS, OTHER,
};
pub use draft::PrdDraft;
pub use status::{ProofKind, StageStatus};
pub use summary::DocumentSummary;
pub use tracker::{Proof, Stage, SubTask, Tracker};
