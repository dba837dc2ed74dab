//! Durable proposal collection, persisted as one JSON document.

use crate::error::StorageError;
use std::fs;
use std::path::{Path, PathBuf};
use votary_types::Proposal;

/// Proposal store backed by a single JSON file.
///
/// The store keeps no in-memory cache: every governance operation is a
/// full load-modify-save cycle, so each observes the latest durable state
/// at its own start. Saves replace the whole document.
pub struct ProposalStore {
    path: PathBuf,
}

impl ProposalStore {
    /// Create a store over the given file path. Parent directories are
    /// created eagerly; the file itself appears on first save.
    pub fn new(path: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let path = path.into();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| StorageError::Io(e.to_string()))?;
        }
        Ok(Self { path })
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the full proposal collection, empty when nothing was saved yet.
    pub fn load_all(&self) -> Result<Vec<Proposal>, StorageError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let content =
            fs::read_to_string(&self.path).map_err(|e| StorageError::Io(e.to_string()))?;
        serde_json::from_str(&content).map_err(|e| StorageError::Corrupt(e.to_string()))
    }

    /// Replace the stored collection with the given one.
    pub fn save_all(&self, proposals: &[Proposal]) -> Result<(), StorageError> {
        let content = serde_json::to_string_pretty(proposals)
            .map_err(|e| StorageError::Serialization(e.to_string()))?;

        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, content).map_err(|e| StorageError::Io(e.to_string()))?;
        fs::rename(&tmp, &self.path).map_err(|e| StorageError::Io(e.to_string()))?;

        tracing::debug!(count = proposals.len(), path = %self.path.display(), "proposals saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;
    use votary_types::VoterId;

    fn voter(s: &str) -> VoterId {
        s.parse().unwrap()
    }

    fn store(dir: &TempDir) -> ProposalStore {
        ProposalStore::new(dir.path().join("proposals.json")).unwrap()
    }

    #[test]
    fn test_load_before_first_save_is_empty() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);
        assert!(store.load_all().unwrap().is_empty());
    }

    #[test]
    fn test_save_load_roundtrip() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);

        let mut p = Proposal::new(1, voter("123456789012"), "Fund the library".to_string());
        p.votes_for.push(voter("111111111111"));
        store.save_all(&[p.clone()]).unwrap();

        let loaded = store.load_all().unwrap();
        assert_eq!(loaded, vec![p]);
    }

    #[test]
    fn test_save_of_loaded_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);

        let proposals = vec![
            Proposal::new(1, voter("123456789012"), "One".to_string()),
            Proposal::new(2, voter("210987654321"), "Two".to_string()),
        ];
        store.save_all(&proposals).unwrap();

        let loaded = store.load_all().unwrap();
        store.save_all(&loaded).unwrap();
        assert_eq!(store.load_all().unwrap(), proposals);
    }

    #[test]
    fn test_save_replaces_whole_document() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);

        store
            .save_all(&[Proposal::new(1, voter("123456789012"), "Old".to_string())])
            .unwrap();
        store
            .save_all(&[Proposal::new(1, voter("123456789012"), "New".to_string())])
            .unwrap();

        let loaded = store.load_all().unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].text, "New");
    }

    #[test]
    fn test_corrupt_document_is_reported() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("proposals.json");
        fs::write(&path, "{ not json").unwrap();

        let store = ProposalStore::new(&path).unwrap();
        assert!(matches!(store.load_all(), Err(StorageError::Corrupt(_))));
    }

    #[test]
    fn test_no_temp_file_left_behind() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);
        store
            .save_all(&[Proposal::new(1, voter("123456789012"), "Test".to_string())])
            .unwrap();

        assert!(store.path().exists());
        assert!(!dir.path().join("proposals.json.tmp").exists());
    }
}
