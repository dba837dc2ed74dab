//! Identity enrollment registry.
//!
//! Maps voter ids to opaque enrollment templates produced by the external
//! capture pipeline. The registry stores the template bytes without
//! interpreting them; matching a live sample against a template is the
//! verifier's job, outside this crate.

use crate::error::StorageError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use votary_types::VoterId;

/// One enrolled identity.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrollmentRecord {
    /// The enrolled identity token
    pub voter: VoterId,
    /// Opaque template blob, hex-encoded on disk
    #[serde(with = "hex_bytes")]
    pub template: Vec<u8>,
    /// Enrollment time, unix milliseconds
    pub enrolled_at: u64,
}

/// Registry persisted as a single JSON document of enrollment records.
///
/// Same whole-document replace discipline as the proposal store.
pub struct IdentityRegistry {
    path: PathBuf,
}

impl IdentityRegistry {
    /// Create a registry over the given file path.
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

    /// All enrollment records in enrollment order.
    pub fn load_all(&self) -> Result<Vec<EnrollmentRecord>, StorageError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let content =
            fs::read_to_string(&self.path).map_err(|e| StorageError::Io(e.to_string()))?;
        serde_json::from_str(&content).map_err(|e| StorageError::Corrupt(e.to_string()))
    }

    /// Check whether an identity is enrolled.
    pub fn contains(&self, voter: &VoterId) -> Result<bool, StorageError> {
        Ok(self.load_all()?.iter().any(|r| &r.voter == voter))
    }

    /// Enroll a new identity with its template blob.
    pub fn enroll(
        &self,
        voter: VoterId,
        template: Vec<u8>,
        enrolled_at: u64,
    ) -> Result<EnrollmentRecord, StorageError> {
        let mut records = self.load_all()?;
        if records.iter().any(|r| r.voter == voter) {
            return Err(StorageError::AlreadyEnrolled(voter.to_string()));
        }

        let record = EnrollmentRecord {
            voter,
            template,
            enrolled_at,
        };
        records.push(record.clone());
        self.save_all(&records)?;

        tracing::info!(voter = %record.voter, "identity enrolled");
        Ok(record)
    }

    /// Remove an enrolled identity.
    pub fn remove(&self, voter: &VoterId) -> Result<(), StorageError> {
        let mut records = self.load_all()?;
        let before = records.len();
        records.retain(|r| &r.voter != voter);
        if records.len() == before {
            return Err(StorageError::NotEnrolled(voter.to_string()));
        }

        self.save_all(&records)?;
        tracing::info!(voter = %voter, "identity removed");
        Ok(())
    }

    fn save_all(&self, records: &[EnrollmentRecord]) -> Result<(), StorageError> {
        let content = serde_json::to_string_pretty(records)
            .map_err(|e| StorageError::Serialization(e.to_string()))?;

        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, content).map_err(|e| StorageError::Io(e.to_string()))?;
        fs::rename(&tmp, &self.path).map_err(|e| StorageError::Io(e.to_string()))?;
        Ok(())
    }
}

mod hex_bytes {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&hex::encode(bytes))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec<u8>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        hex::decode(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn voter(s: &str) -> VoterId {
        s.parse().unwrap()
    }

    fn registry(dir: &TempDir) -> IdentityRegistry {
        IdentityRegistry::new(dir.path().join("registry.json")).unwrap()
    }

    #[test]
    fn test_fresh_registry_is_empty() {
        let dir = TempDir::new().unwrap();
        let registry = registry(&dir);
        assert!(registry.load_all().unwrap().is_empty());
        assert!(!registry.contains(&voter("123456789012")).unwrap());
    }

    #[test]
    fn test_enroll_and_lookup() {
        let dir = TempDir::new().unwrap();
        let registry = registry(&dir);

        let record = registry
            .enroll(voter("123456789012"), vec![1, 2, 3], 1000)
            .unwrap();
        assert_eq!(record.template, vec![1, 2, 3]);
        assert!(registry.contains(&voter("123456789012")).unwrap());
    }

    #[test]
    fn test_double_enrollment_rejected() {
        let dir = TempDir::new().unwrap();
        let registry = registry(&dir);

        registry.enroll(voter("123456789012"), vec![], 1000).unwrap();
        let err = registry.enroll(voter("123456789012"), vec![], 2000);
        assert!(matches!(err, Err(StorageError::AlreadyEnrolled(_))));
    }

    #[test]
    fn test_remove() {
        let dir = TempDir::new().unwrap();
        let registry = registry(&dir);

        registry.enroll(voter("123456789012"), vec![], 1000).unwrap();
        registry.remove(&voter("123456789012")).unwrap();
        assert!(!registry.contains(&voter("123456789012")).unwrap());

        let err = registry.remove(&voter("123456789012"));
        assert!(matches!(err, Err(StorageError::NotEnrolled(_))));
    }

    #[test]
    fn test_registry_survives_reopen() {
        let dir = TempDir::new().unwrap();
        {
            let registry = registry(&dir);
            registry
                .enroll(voter("123456789012"), vec![0xab, 0xcd], 1000)
                .unwrap();
        }
        {
            let registry = IdentityRegistry::new(dir.path().join("registry.json")).unwrap();
            let records = registry.load_all().unwrap();
            assert_eq!(records.len(), 1);
            assert_eq!(records[0].template, vec![0xab, 0xcd]);
        }
    }

    #[test]
    fn test_template_hex_encoded_on_disk() {
        let dir = TempDir::new().unwrap();
        let registry = registry(&dir);
        registry
            .enroll(voter("123456789012"), vec![0xde, 0xad], 1000)
            .unwrap();

        let raw = fs::read_to_string(registry.path()).unwrap();
        assert!(raw.contains("dead"));
    }
}
