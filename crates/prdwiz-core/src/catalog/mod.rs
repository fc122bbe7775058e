//! Async catalog API over the document and tracker stores.
//!
//! [`Catalog`] is the entry point used by the command line and the HTTP
//! server. Storage work is synchronous file I/O, so every operation runs it on
//! the blocking thread pool and awaits the result.
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │    Handlers     │    │   Operations    │    │     Storage     │
//! │  (handlers)     │───▶│ (document_ops,  │───▶│  (storage/)     │
//! │                 │    │  tracker_ops)   │    │                 │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```
//!
//! # Example
//!
//! ```rust,no_run
//! use prdwiz_core::{params::DocumentId, CatalogBuilder};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let catalog = CatalogBuilder::new()
//!     .with_data_dir(Some("/tmp/prdwiz"))
//!     .build()
//!     .await?;
//!
//! for summary in &catalog.list_document_summaries().await? {
//!     println!("{} {}", summary.id, summary.project_name);
//! }
//!
//! let document = catalog.get_document(&DocumentId::from("1700000000000-acme")).await?;
//! # let _ = document;
//! # Ok(())
//! # }
//! ```

use std::path::{Path, PathBuf};

use tokio::task;

use crate::{
    error::{PrdError, Result},
    storage::StorageLayout,
};

pub mod builder;
pub mod document_ops;
pub mod handlers;
pub mod tracker_ops;


pub use builder::CatalogBuilder;

/// Handle to one data directory. Cheap to clone.
#[derive(Debug, Clone)]
pub struct Catalog {
    pub(crate) layout: StorageLayout,
}

impl Catalog {
    pub(crate) fn new(data_dir: PathBuf) -> Self {
        Self {
            layout: StorageLayout::new(data_dir),
        }
    }

    /// Root of the data directory.
    pub fn data_dir(&self) -> &Path {
        self.layout.root()
    }
}

/// Run storage work on the blocking pool.
pub(crate) async fn run_blocking<T, F>(work: F) -> Result<T>
where
    F: FnOnce() -> Result<T> + Send + 'static,
    T: Send + 'static,
{
    task::spawn_blocking(work)
        .await
        .map_err(|e| PrdError::Configuration {
            message: format!("Task join error: {e}"),
        })?
}
