//! PRD document namespace.

use jiff::Timestamp;
use log::{debug, info, warn};

use super::{
    ids::{document_id, with_suffix},
    BlobStore, FileBlobStore,
};
use crate::{
    error::{PrdError, Result},
    models::{NewDocument, PrdDocument, PrdDraft},
};

/// Create, list, fetch, update and delete PRD documents on top of a blob namespace.
#[derive(Debug, Clone)]
pub struct DocumentStore<B = FileBlobStore> {
    blobs: B,
}

impl<B: BlobStore> DocumentStore<B> {
    pub fn new(blobs: B) -> Self {
        Self { blobs }
    }

    /// Persist a new document under a freshly generated id.
    ///
    /// The whole document is validated first; an invalid document is never
    /// written. Ids are never reused: when the generated id is taken, a
    /// numeric suffix is appended.
    pub fn create(&self, document: NewDocument, created_at: Timestamp) -> Result<PrdDocument> {
        let document = NewDocument::try_from(PrdDraft::from(document))?;

        let id = self.unused_id(&document_id(created_at, &document.project_name))?;
        let stored = document.with_id(id);
        let json = serde_json::to_string_pretty(&stored)?;
        self.blobs.write(&stored.id, &json)?;

        info!("Created PRD document {}", stored.id);
        Ok(stored)
    }

    fn unused_id(&self, base: &str) -> Result<String> {
        if !self.blobs.contains(base)? {
            return Ok(base.to_string());
        }

        let mut n = 2;
        loop {
            let candidate = with_suffix(base, n);
            if !self.blobs.contains(&candidate)? {
                warn!("Document id {base} already taken, using {candidate}");
                return Ok(candidate);
            }
            n += 1;
        }
    }

    /// Every stored document, ordered by id.
    ///
    /// Ids start with the creation time in milliseconds, so this is creation
    /// order for ids of equal width. A blob that fails to parse aborts the
    /// whole listing.
    pub fn get_all(&self) -> Result<Vec<PrdDocument>> {
        let mut keys = self.blobs.keys()?;
        keys.sort();

        let mut documents = Vec::with_capacity(keys.len());
        for key in keys {
            // Removed between listing and reading.
            let Some(contents) = self.blobs.read(&key)? else {
                continue;
            };
            documents.push(parse_document(&key, &contents)?);
        }

        debug!("Loaded {} PRD documents", documents.len());
        Ok(documents)
    }

    /// Fetch a document by id; `Ok(None)` when it does not exist.
    pub fn get_by_id(&self, id: &str) -> Result<Option<PrdDocument>> {
        self.blobs
            .read(id)?
            .map(|contents| parse_document(id, &contents))
            .transpose()
    }

    /// Replace the contents of an existing document, keeping its id.
    ///
    /// The document is validated like on `create`. Returns `Ok(None)` when no
    /// document has this id; nothing is written in that case.
    pub fn update(&self, id: &str, document: NewDocument) -> Result<Option<PrdDocument>> {
        let document = NewDocument::try_from(PrdDraft::from(document))?;
        if !self.blobs.contains(id)? {
            debug!("Update of missing PRD document {id}");
            return Ok(None);
        }

        let stored = document.with_id(id.to_string());
        let json = serde_json::to_string_pretty(&stored)?;
        self.blobs.write(id, &json)?;

        info!("Updated PRD document {id}");
        Ok(Some(stored))
    }

    /// Remove a document, returning whether it existed.
    pub fn delete(&self, id: &str) -> Result<bool> {
        let removed = self.blobs.remove(id)?;
        if removed {
            info!("Deleted PRD document {id}");
        }
        Ok(removed)
    }
}

fn parse_document(key: &str, contents: &str) -> Result<PrdDocument> {
    serde_json::from_str(contents).map_err(|source| PrdError::MalformedBlob {
        key: key.to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;
    use crate::fixtures::sample_document;

    fn store() -> (TempDir, DocumentStore) {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let store = DocumentStore::new(FileBlobStore::new(temp_dir.path().join("documents")));
        (temp_dir, store)
    }

    fn at(millis: i64) -> Timestamp {
        Timestamp::from_millisecond(millis).unwrap()
    }

    #[test]
    fn test_create_and_get_by_id() {
        let (_temp_dir, store) = store();
        let created = store.create(sample_document("Acme"), at(1_000)).unwrap();
        assert_eq!(created.id, "1000-acme");

        let fetched = store.get_by_id(&created.id).unwrap().unwrap();
        assert_eq!(fetched, created);
        assert_eq!(store.get_by_id("missing").unwrap(), None);
    }

    #[test]
    fn test_create_rejects_invalid_document() {
        let (temp_dir, store) = store();
        let mut document = sample_document("Acme");
        document.user_stories.clear();

        match store.create(document, at(1_000)) {
            Err(PrdError::Validation { errors }) => {
                assert_eq!(errors, vec!["At least one user story is required"]);
            }
            other => panic!("Expected Validation error, got {other:?}"),
        }
        assert!(!temp_dir.path().join("documents").join("1000-acme.json").exists());
    }

    #[test]
    fn test_create_never_overwrites() {
        let (_temp_dir, store) = store();
        let first = store.create(sample_document("Acme"), at(5)).unwrap();
        let second = store.create(sample_document("Acme"), at(5)).unwrap();
        let third = store.create(sample_document("Acme"), at(5)).unwrap();

        assert_eq!(first.id, "5-acme");
        assert_eq!(second.id, "5-acme-2");
        assert_eq!(third.id, "5-acme-3");
        assert_eq!(store.get_all().unwrap().len(), 3);
    }

    #[test]
    fn test_get_all_sorted_and_strict() {
        let (temp_dir, store) = store();
        store.create(sample_document("Beta"), at(2_000)).unwrap();
        store.create(sample_document("Alpha"), at(1_000)).unwrap();

        let ids: Vec<_> = store.get_all().unwrap().into_iter().map(|d| d.id).collect();
        assert_eq!(ids, vec!["1000-alpha", "2000-beta"]);

        fs::write(temp_dir.path().join("documents").join("broken.json"), "{not json").unwrap();
        match store.get_all() {
            Err(PrdError::MalformedBlob { key, .. }) => assert_eq!(key, "broken"),
            other => panic!("Expected MalformedBlob, got {other:?}"),
        }
    }

    #[test]
    fn test_update_keeps_id() {
        let (_temp_dir, store) = store();
        let created = store.create(sample_document("Acme"), at(1_000)).unwrap();

        let mut changed = sample_document("Acme Renamed");
        changed.vision = "A sharper vision".to_string();
        let updated = store.update(&created.id, changed).unwrap().unwrap();
        assert_eq!(updated.id, "1000-acme");
        assert_eq!(updated.project_name, "Acme Renamed");

        let fetched = store.get_by_id("1000-acme").unwrap().unwrap();
        assert_eq!(fetched.vision, "A sharper vision");
        assert_eq!(store.get_all().unwrap().len(), 1);
    }

    #[test]
    fn test_update_missing_or_invalid() {
        let (temp_dir, store) = store();
        assert_eq!(store.update("1-missing", sample_document("Acme")).unwrap(), None);
        assert!(!temp_dir.path().join("documents").join("1-missing.json").exists());

        let created = store.create(sample_document("Acme"), at(1)).unwrap();
        let mut invalid = sample_document("Acme");
        invalid.reference_links.clear();
        assert!(matches!(
            store.update(&created.id, invalid),
            Err(PrdError::Validation { .. })
        ));
        let fetched = store.get_by_id(&created.id).unwrap().unwrap();
        assert_eq!(fetched.reference_links.len(), 1);
    }

    #[test]
    fn test_delete() {
        let (_temp_dir, store) = store();
        let created = store.create(sample_document("Acme"), at(1)).unwrap();
        assert!(store.delete(&created.id).unwrap());
        assert!(!store.delete(&created.id).unwrap());
        assert!(store.get_all().unwrap().is_empty());
    }
}
