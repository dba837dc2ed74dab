use thiserror::Error;
use votary_storage::StorageError;
use votary_types::ProposalStatus;

/// Errors that can occur in governance operations.
#[derive(Debug, Error)]
pub enum GovernanceError {
    #[error("Proposal text cannot be empty")]
    EmptyProposalText,

    #[error("Proposal not found: {0}")]
    ProposalNotFound(u64),

    #[error("Proposal {id} is {status}; voting is closed")]
    ProposalClosed { id: u64, status: ProposalStatus },

    #[error("Already voted on proposal {0}")]
    AlreadyVoted(u64),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = GovernanceError::ProposalClosed {
            id: 4,
            status: ProposalStatus::Accepted,
        };
        assert!(err.to_string().contains("4"));
        assert!(err.to_string().contains("accepted"));
    }
}
