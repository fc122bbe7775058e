//! Builder for creating and configuring Catalog instances.

use std::{
    fs,
    path::{Path, PathBuf},
};

use log::debug;

use super::{run_blocking, Catalog};
use crate::{
    error::{PrdError, Result, StorageResultExt},
    storage::StorageLayout,
};

#[derive(Debug, Clone, Default)]
pub struct CatalogBuilder {
    data_dir: Option<PathBuf>,
}

impl CatalogBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a custom data directory.
    ///
    /// If not specified, uses the XDG Base Directory specification:
    /// `$XDG_DATA_HOME/prdwiz/` or `~/.local/share/prdwiz/`
    #[must_use]
    pub fn with_data_dir<P: AsRef<Path>>(mut self, path: Option<P>) -> Self {
        if let Some(path) = path {
            self.data_dir = Some(path.as_ref().to_path_buf());
        }
        self
    }

    /// Builds the catalog, creating both namespaces if needed.
    ///
    /// # Errors
    ///
    /// Returns `PrdError::XdgDirectory` if no default location can be found
    /// and `PrdError::Storage` if the directories cannot be created.
    pub async fn build(self) -> Result<Catalog> {
        let data_dir = match self.data_dir {
            Some(path) => path,
            None => Self::default_data_dir()?,
        };
        debug!("Using data directory {}", data_dir.display());

        let layout = StorageLayout::new(data_dir.clone());
        run_blocking(move || {
            for dir in [layout.documents_dir(), layout.trackers_dir()] {
                fs::create_dir_all(&dir).storage_context(&dir)?;
            }
            Ok(())
        })
        .await?;

        Ok(Catalog::new(data_dir))
    }

    fn default_data_dir() -> Result<PathBuf> {
        xdg::BaseDirectories::with_prefix("prdwiz")
            .create_data_directory("")
            .map_err(|e| PrdError::XdgDirectory(e.to_string()))
    }
}
