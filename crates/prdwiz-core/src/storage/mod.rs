//! Flat-file JSON persistence for documents and trackers.
//!
//! Storage is two independent flat namespaces of JSON blobs addressed by id:
//! one for PRD documents and one for implementation trackers. Each blob is the
//! pretty-printed serialization of its entity, stored as `{id}.json`.
//!
//! There are no secondary indices, no transactions and no concurrency tokens.
//! Every write replaces a whole blob, so concurrent writers to the same id
//! race and the last one to finish wins.
//!
//! ```text
//! <data dir>/
//! ├── documents/{id}.json
//! └── trackers/{id}.json
//! ```

use std::path::{Path, PathBuf};

use crate::error::Result;

pub mod blob;
pub mod documents;
pub mod ids;
pub mod trackers;

pub use blob::FileBlobStore;
pub use documents::DocumentStore;
pub use trackers::TrackerStore;

/// Directory name of the document namespace inside the data directory.
pub const DOCUMENTS_DIR: &str = "documents";

/// Directory name of the tracker namespace inside the data directory.
pub const TRACKERS_DIR: &str = "trackers";

/// Key-value blob namespace.
///
/// Keys are opaque ids; values are whole JSON documents. Implementations must
/// make `read` return `Ok(None)` for an absent key and reserve errors for
/// I/O-level failures.
pub trait BlobStore: Send + Sync {
    /// Read the blob stored under `key`.
    fn read(&self, key: &str) -> Result<Option<String>>;

    /// Replace the blob stored under `key`.
    fn write(&self, key: &str, contents: &str) -> Result<()>;

    /// Remove the blob stored under `key`, returning whether it existed.
    fn remove(&self, key: &str) -> Result<bool>;

    /// Every key currently stored, in no particular order.
    fn keys(&self) -> Result<Vec<String>>;

    /// Whether a blob exists under `key`.
    fn contains(&self, key: &str) -> Result<bool> {
        Ok(self.read(key)?.is_some())
    }
}

/// Paths of both namespaces below one data directory.
#[derive(Debug, Clone)]
pub struct StorageLayout {
    root: PathBuf,
}

impl StorageLayout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn documents_dir(&self) -> PathBuf {
        self.root.join(DOCUMENTS_DIR)
    }

    pub fn trackers_dir(&self) -> PathBuf {
        self.root.join(TRACKERS_DIR)
    }

    /// Open the document namespace.
    pub fn document_store(&self) -> DocumentStore<FileBlobStore> {
        DocumentStore::new(FileBlobStore::new(self.documents_dir()))
    }

    /// Open the tracker namespace.
    pub fn tracker_store(&self) -> TrackerStore<FileBlobStore> {
        TrackerStore::new(FileBlobStore::new(self.trackers_dir()))
    }
}
