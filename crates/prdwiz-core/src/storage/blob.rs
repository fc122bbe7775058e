//! Directory-backed blob store.

use std::{
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use log::debug;

use super::BlobStore;
use crate::error::{PrdError, Result, StorageResultExt};

const EXTENSION: &str = "json";

/// Stores each blob as `{key}.json` inside one directory.
///
/// The directory is created on demand before listing or writing, so a fresh
/// data directory behaves like an empty namespace.
#[derive(Debug, Clone)]
pub struct FileBlobStore {
    dir: PathBuf,
}

impl FileBlobStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn ensure_dir(&self) -> Result<()> {
        fs::create_dir_all(&self.dir).storage_context(&self.dir)
    }

    fn path_for(&self, key: &str) -> Result<PathBuf> {
        validate_key(key)?;
        Ok(self.dir.join(format!("{key}.{EXTENSION}")))
    }
}

/// Reject keys that would escape the namespace directory.
fn validate_key(key: &str) -> Result<()> {
    let reason = if key.is_empty() {
        Some("Id cannot be empty")
    } else if key == "." || key == ".." {
        Some("Id cannot be a relative path component")
    } else if key.contains(['/', '\\', '\0']) {
        Some("Id cannot contain path separators")
    } else {
        None
    };

    match reason {
        Some(reason) => Err(PrdError::invalid_input("id").with_reason(reason)),
        None => Ok(()),
    }
}

impl BlobStore for FileBlobStore {
    fn read(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key)?;
        debug!("read blob {}", path.display());

        match fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(PrdError::storage(path).with_source(e)),
        }
    }

    fn write(&self, key: &str, contents: &str) -> Result<()> {
        let path = self.path_for(key)?;
        self.ensure_dir()?;
        debug!("write blob {}", path.display());

        // Readers never observe a half-written blob.
        let staging = path.with_extension(format!("{EXTENSION}.tmp"));
        fs::write(&staging, contents).storage_context(&staging)?;
        fs::rename(&staging, &path).storage_context(&path)
    }

    fn remove(&self, key: &str) -> Result<bool> {
        let path = self.path_for(key)?;
        debug!("remove blob {}", path.display());

        match fs::remove_file(&path) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(PrdError::storage(path).with_source(e)),
        }
    }

    fn keys(&self) -> Result<Vec<String>> {
        self.ensure_dir()?;

        let mut keys = Vec::new();
        for entry in fs::read_dir(&self.dir).storage_context(&self.dir)? {
            let path = entry.storage_context(&self.dir)?.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some(EXTENSION) {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|stem| stem.to_str()) {
                keys.push(stem.to_string());
            }
        }
        Ok(keys)
    }

    fn contains(&self, key: &str) -> Result<bool> {
        Ok(self.path_for(key)?.is_file())
    }
}
