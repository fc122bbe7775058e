//! Error types for the PRD wizard library.

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Comprehensive error type for all catalog, storage and tracker operations.
#[derive(Error, Debug)]
pub enum PrdError {
    /// I/O level failure while touching the blob namespace
    #[error("Storage error at path '{path}': {source}")]
    Storage {
        path: PathBuf,
        source: std::io::Error,
    },
    /// A stored blob exists but is not valid JSON for its entity
    #[error("Malformed blob '{key}': {source}")]
    MalformedBlob {
        key: String,
        #[source]
        source: serde_json::Error,
    },
    /// PRD document not found for the given ID
    #[error("PRD with ID {id} not found")]
    DocumentNotFound { id: String },
    /// Implementation tracker not found for the given ID
    #[error("Implementation tracker for PRD {id} not found")]
    TrackerNotFound { id: String },
    /// Stage not found within a tracker
    #[error("Stage '{id}' not found")]
    StageNotFound { id: String },
    /// Subtask not found within a stage
    #[error("Subtask '{task_id}' not found in stage '{stage_id}'")]
    SubTaskNotFound { stage_id: String, task_id: String },
    /// Invalid input validation errors
    #[error("Invalid input for field '{field}': {reason}")]
    InvalidInput { field: String, reason: String },
    /// Whole-document validation failed at a persistence boundary
    #[error("Validation failed: {}", errors.join("; "))]
    Validation { errors: Vec<String> },
    /// Serialization/deserialization errors
    #[error("Serialization error: {source}")]
    Serialization {
        #[from]
        source: serde_json::Error,
    },
    /// XDG directory specification errors
    #[error("XDG directory error: {0}")]
    XdgDirectory(String),
    /// Configuration errors
    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

/// Builder for creating storage errors with a path.
pub struct StorageErrorBuilder {
    path: PathBuf,
}

impl StorageErrorBuilder {
    /// Create a new storage error builder for a path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Build the error with the given source.
    pub fn with_source(self, source: std::io::Error) -> PrdError {
        PrdError::Storage {
            path: self.path,
            source,
        }
    }
}

/// Builder for creating input validation errors.
pub struct InvalidInputBuilder {
    field: String,
}

impl InvalidInputBuilder {
    /// Create a new invalid input error builder for a field.
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
        }
    }

    /// Build the error with the given reason.
    pub fn with_reason(self, reason: impl Into<String>) -> PrdError {
        PrdError::InvalidInput {
            field: self.field,
            reason: reason.into(),
        }
    }
}

impl PrdError {
    /// Creates a builder for storage errors.
    pub fn storage(path: impl Into<PathBuf>) -> StorageErrorBuilder {
        StorageErrorBuilder::new(path)
    }

    /// Creates a builder for input validation errors.
    pub fn invalid_input(field: impl Into<String>) -> InvalidInputBuilder {
        InvalidInputBuilder::new(field)
    }

    /// Whether the error means "the thing asked for does not exist".
    ///
    /// Transport layers map this family to a 404-style response; everything
    /// else is a hard failure.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            PrdError::DocumentNotFound { .. }
                | PrdError::TrackerNotFound { .. }
                | PrdError::StageNotFound { .. }
                | PrdError::SubTaskNotFound { .. }
        )
    }

    /// Whether the error is user-correctable input rather than a storage
    /// failure.
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            PrdError::InvalidInput { .. } | PrdError::Validation { .. }
        )
    }
}

/// Specialized extension trait for I/O Results touching the blob store.
pub trait StorageResultExt<T> {
    /// Map I/O errors to [`PrdError::Storage`] at the given path.
    fn storage_context(self, path: &Path) -> Result<T>;
}

impl<T> StorageResultExt<T> for std::result::Result<T, std::io::Error> {
    fn storage_context(self, path: &Path) -> Result<T> {
        self.map_err(|e| PrdError::storage(path).with_source(e))
    }
}

/// Result type alias for PRD operations
pub type Result<T> = std::result::Result<T, PrdError>;
