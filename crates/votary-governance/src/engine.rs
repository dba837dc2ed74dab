//! Proposal creation, voting and threshold resolution.

use crate::error::GovernanceError;
use parking_lot::Mutex;
use votary_storage::ProposalStore;
use votary_types::{Proposal, ProposalStatus, VoteChoice, VoterId};

/// Vote counts at which an open proposal auto-resolves.
///
/// Plain values rather than engine constants; no quorum or tie-break
/// semantics are attached to them.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GovernanceConfig {
    /// Distinct For votes required to accept
    pub approval_threshold: usize,
    /// Distinct Against votes required to reject
    pub rejection_threshold: usize,
}

impl Default for GovernanceConfig {
    fn default() -> Self {
        Self {
            approval_threshold: 3,
            rejection_threshold: 3,
        }
    }
}

/// Governance engine over a durable proposal store.
///
/// Every operation runs a full load-modify-save cycle against the store.
/// The internal mutex serializes those cycles within the process, closing
/// the check-then-act window; writers in other processes are outside the
/// design's single-writer assumption.
pub struct Governance {
    store: ProposalStore,
    config: GovernanceConfig,
    write_lock: Mutex<()>,
}

impl Governance {
    /// Create an engine with default thresholds.
    pub fn new(store: ProposalStore) -> Self {
        Self::with_config(store, GovernanceConfig::default())
    }

    /// Create an engine with explicit thresholds.
    pub fn with_config(store: ProposalStore, config: GovernanceConfig) -> Self {
        Self {
            store,
            config,
            write_lock: Mutex::new(()),
        }
    }

    /// The thresholds in effect.
    pub fn config(&self) -> GovernanceConfig {
        self.config
    }

    /// Submit a new proposal. Ids are assigned in creation order from 1.
    pub fn create_proposal(
        &self,
        proposer: VoterId,
        text: &str,
    ) -> Result<Proposal, GovernanceError> {
        if text.trim().is_empty() {
            return Err(GovernanceError::EmptyProposalText);
        }

        let _guard = self.write_lock.lock();
        let mut proposals = self.store.load_all()?;
        let proposal = Proposal::new(proposals.len() as u64 + 1, proposer, text.to_string());
        proposals.push(proposal.clone());
        self.store.save_all(&proposals)?;

        tracing::info!(id = proposal.id, proposer = %proposal.proposer, "proposal created");
        Ok(proposal)
    }

    /// Cast a For/Against vote on an open proposal.
    ///
    /// After the vote lands, the threshold rule runs with the approval
    /// check strictly before the rejection check, so resolution order is
    /// reproducible.
    pub fn cast_vote(
        &self,
        voter: VoterId,
        proposal_id: u64,
        choice: VoteChoice,
    ) -> Result<Proposal, GovernanceError> {
        let _guard = self.write_lock.lock();
        let mut proposals = self.store.load_all()?;

        let proposal = proposals
            .iter_mut()
            .find(|p| p.id == proposal_id)
            .ok_or(GovernanceError::ProposalNotFound(proposal_id))?;

        if !proposal.status.is_open() {
            return Err(GovernanceError::ProposalClosed {
                id: proposal.id,
                status: proposal.status,
            });
        }
        if proposal.has_voted(&voter) {
            return Err(GovernanceError::AlreadyVoted(proposal.id));
        }

        match choice {
            VoteChoice::For => proposal.votes_for.push(voter),
            VoteChoice::Against => proposal.votes_against.push(voter),
        }

        if proposal.votes_for.len() >= self.config.approval_threshold {
            proposal.status = ProposalStatus::Accepted;
        } else if proposal.votes_against.len() >= self.config.rejection_threshold {
            proposal.status = ProposalStatus::Rejected;
        }

        if proposal.status.is_terminal() {
            tracing::info!(id = proposal.id, status = %proposal.status, "proposal resolved");
        }

        let updated = proposal.clone();
        self.store.save_all(&proposals)?;
        Ok(updated)
    }

    /// Open proposals in creation order.
    pub fn list_open(&self) -> Result<Vec<Proposal>, GovernanceError> {
        let proposals = self.store.load_all()?;
        Ok(proposals.into_iter().filter(|p| p.status.is_open()).collect())
    }

    /// The full collection in creation order.
    pub fn list_all(&self) -> Result<Vec<Proposal>, GovernanceError> {
        Ok(self.store.load_all()?)
    }
}
