//! Implementation tracker namespace, keyed by the owning document id.

use log::debug;

use super::{BlobStore, FileBlobStore};
use crate::{
    error::{PrdError, Result},
    models::Tracker,
};

#[derive(Debug, Clone)]
pub struct TrackerStore<B = FileBlobStore> {
    blobs: B,
}

impl<B: BlobStore> TrackerStore<B> {
    pub fn new(blobs: B) -> Self {
        Self { blobs }
    }

    /// The tracker stored for `prd_id`, if any.
    pub fn get(&self, prd_id: &str) -> Result<Option<Tracker>> {
        let Some(contents) = self.blobs.read(prd_id)? else {
            return Ok(None);
        };
        serde_json::from_str(&contents)
            .map(Some)
            .map_err(|source| PrdError::MalformedBlob {
                key: prd_id.to_string(),
                source,
            })
    }

    /// Replace the whole tracker blob for `prd_id`.
    pub fn put(&self, prd_id: &str, tracker: &Tracker) -> Result<()> {
        let json = serde_json::to_string_pretty(tracker)?;
        self.blobs.write(prd_id, &json)?;
        debug!("Saved tracker for {prd_id}");
        Ok(())
    }

    pub fn delete(&self, prd_id: &str) -> Result<bool> {
        self.blobs.remove(prd_id)
    }
}
