use crate::error::TypesError;
use crate::identity::VoterId;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Proposal status in its lifecycle.
///
/// `Accepted` and `Rejected` are terminal: a proposal never reopens and
/// never flips between them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProposalStatus {
    /// Open for voting
    Open,
    /// Reached the approval threshold
    Accepted,
    /// Reached the rejection threshold
    Rejected,
}

impl ProposalStatus {
    /// Check if voting is still possible.
    pub fn is_open(&self) -> bool {
        matches!(self, ProposalStatus::Open)
    }

    /// Check if the status is terminal.
    pub fn is_terminal(&self) -> bool {
        !self.is_open()
    }
}

impl fmt::Display for ProposalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Matches the persisted lowercase form
        let s = match self {
            ProposalStatus::Open => "open",
            ProposalStatus::Accepted => "accepted",
            ProposalStatus::Rejected => "rejected",
        };
        f.write_str(s)
    }
}

/// A ballot position on a proposal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VoteChoice {
    /// Vote in favor
    For,
    /// Vote against
    Against,
}

impl fmt::Display for VoteChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            VoteChoice::For => "for",
            VoteChoice::Against => "against",
        })
    }
}

impl FromStr for VoteChoice {
    type Err = TypesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // "yes"/"no" accepted as spoken-form aliases
        match s.to_ascii_lowercase().as_str() {
            "for" | "yes" => Ok(VoteChoice::For),
            "against" | "no" => Ok(VoteChoice::Against),
            other => Err(TypesError::InvalidVoteChoice(other.to_string())),
        }
    }
}

/// A governance item subject to For/Against voting with automatic
/// threshold-based resolution.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Proposal {
    /// Unique id, assigned in creation order starting at 1
    pub id: u64,
    /// Who submitted the proposal
    pub proposer: VoterId,
    /// Free-text body
    pub text: String,
    /// Voters in favor, in voting order
    pub votes_for: Vec<VoterId>,
    /// Voters against, in voting order
    pub votes_against: Vec<VoterId>,
    /// Current lifecycle status
    pub status: ProposalStatus,
}

impl Proposal {
    /// Create a new open proposal with empty vote lists.
    pub fn new(id: u64, proposer: VoterId, text: String) -> Self {
        Self {
            id,
            proposer,
            text,
            votes_for: Vec::new(),
            votes_against: Vec::new(),
            status: ProposalStatus::Open,
        }
    }

    /// Check if a voter is already counted on either side.
    pub fn has_voted(&self, voter: &VoterId) -> bool {
        self.votes_for.contains(voter) || self.votes_against.contains(voter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn voter(s: &str) -> VoterId {
        s.parse().unwrap()
    }

    #[test]
    fn test_new_proposal_is_open_and_empty() {
        let p = Proposal::new(1, voter("123456789012"), "Fund the library".to_string());
        assert_eq!(p.id, 1);
        assert!(p.status.is_open());
        assert!(p.votes_for.is_empty());
        assert!(p.votes_against.is_empty());
    }

    #[test]
    fn test_has_voted_checks_both_sides() {
        let mut p = Proposal::new(1, voter("123456789012"), "Test".to_string());
        let a = voter("111111111111");
        let b = voter("222222222222");

        assert!(!p.has_voted(&a));
        p.votes_for.push(a);
        p.votes_against.push(b);
        assert!(p.has_voted(&a));
        assert!(p.has_voted(&b));
        assert!(!p.has_voted(&voter("333333333333")));
    }

    #[test]
    fn test_vote_choice_parsing() {
        assert_eq!("for".parse::<VoteChoice>().unwrap(), VoteChoice::For);
        assert_eq!("YES".parse::<VoteChoice>().unwrap(), VoteChoice::For);
        assert_eq!("against".parse::<VoteChoice>().unwrap(), VoteChoice::Against);
        assert_eq!("no".parse::<VoteChoice>().unwrap(), VoteChoice::Against);
        assert!("maybe".parse::<VoteChoice>().is_err());
    }

    #[test]
    fn test_status_serialized_lowercase() {
        let json = serde_json::to_string(&ProposalStatus::Accepted).unwrap();
        assert_eq!(json, "\"accepted\"");

        let back: ProposalStatus = serde_json::from_str("\"open\"").unwrap();
        assert_eq!(back, ProposalStatus::Open);
    }

    #[test]
    fn test_proposal_serde_layout() {
        let mut p = Proposal::new(2, voter("123456789012"), "Pave the road".to_string());
        p.votes_for.push(voter("111111111111"));

        let json = serde_json::to_value(&p).unwrap();
        assert_eq!(json["id"], 2);
        assert_eq!(json["proposer"], "123456789012");
        assert_eq!(json["votes_for"][0], "111111111111");
        assert_eq!(json["status"], "open");
    }
}
