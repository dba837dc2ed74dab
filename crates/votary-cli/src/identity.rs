//! Identity verification seam.
//!
//! The core consumes resolved identity tokens; producing one from a live
//! sample is the job of an external verifier. The implementation shipped
//! here treats the sample as a claimed token and resolves it only when the
//! identity is enrolled; matching the live capture against the stored
//! template belongs to the pipeline that produced it.

use anyhow::Result;
use votary_storage::IdentityRegistry;
use votary_types::VoterId;

/// Resolves a live sample to an enrolled identity, or no match.
pub trait IdentityVerifier {
    fn resolve(&self, sample: &[u8]) -> Result<Option<VoterId>>;
}

/// Verifier that accepts a claimed token iff it is enrolled.
pub struct RegistryVerifier<'a> {
    registry: &'a IdentityRegistry,
}

impl<'a> RegistryVerifier<'a> {
    pub fn new(registry: &'a IdentityRegistry) -> Self {
        Self { registry }
    }
}

impl IdentityVerifier for RegistryVerifier<'_> {
    fn resolve(&self, sample: &[u8]) -> Result<Option<VoterId>> {
        let claim = std::str::from_utf8(sample)
            .ok()
            .and_then(|s| s.trim().parse::<VoterId>().ok());

        let Some(voter) = claim else {
            return Ok(None);
        };

        if self.registry.contains(&voter)? {
            Ok(Some(voter))
        } else {
            Ok(None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn registry(dir: &TempDir) -> IdentityRegistry {
        IdentityRegistry::new(dir.path().join("registry.json")).unwrap()
    }

    #[test]
    fn test_resolves_enrolled_identity() {
        let dir = TempDir::new().unwrap();
        let registry = registry(&dir);
        registry
            .enroll("123456789012".parse().unwrap(), vec![], 1000)
            .unwrap();

        let verifier = RegistryVerifier::new(&registry);
        let resolved = verifier.resolve(b"123456789012").unwrap();
        assert_eq!(resolved, Some("123456789012".parse().unwrap()));
    }

    #[test]
    fn test_unenrolled_identity_is_no_match() {
        let dir = TempDir::new().unwrap();
        let registry = registry(&dir);

        let verifier = RegistryVerifier::new(&registry);
        assert_eq!(verifier.resolve(b"123456789012").unwrap(), None);
    }

    #[test]
    fn test_malformed_sample_is_no_match() {
        let dir = TempDir::new().unwrap();
        let registry = registry(&dir);

        let verifier = RegistryVerifier::new(&registry);
        assert_eq!(verifier.resolve(b"not a token").unwrap(), None);
        assert_eq!(verifier.resolve(&[0xff, 0xfe]).unwrap(), None);
    }
}
