//! End-to-end governance flow against durable storage.

use tempfile::TempDir;
use votary_governance::{Governance, GovernanceError};
use votary_storage::ProposalStore;
use votary_types::{ProposalStatus, VoteChoice, VoterId};

fn voter(s: &str) -> VoterId {
    s.parse().unwrap()
}

fn open_engine(dir: &TempDir) -> Governance {
    let store = ProposalStore::new(dir.path().join("proposals.json")).unwrap();
    Governance::new(store)
}

#[test]
fn test_full_proposal_lifecycle_survives_reopen() {
    let dir = TempDir::new().unwrap();

    // First session: create two proposals, resolve one each way
    {
        let gov = open_engine(&dir);
        let accepted = gov.create_proposal(voter("999999999999"), "Build a park").unwrap();
        let rejected = gov.create_proposal(voter("999999999999"), "Raise fees").unwrap();

        for v in ["111111111111", "222222222222", "333333333333"] {
            gov.cast_vote(voter(v), accepted.id, VoteChoice::For).unwrap();
        }
        for v in ["444444444444", "555555555555", "666666666666"] {
            gov.cast_vote(voter(v), rejected.id, VoteChoice::Against).unwrap();
        }
    }

    // Second session over the same directory observes the resolved state
    {
        let gov = open_engine(&dir);
        let all = gov.list_all().unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].status, ProposalStatus::Accepted);
        assert_eq!(all[0].votes_for.len(), 3);
        assert_eq!(all[1].status, ProposalStatus::Rejected);
        assert_eq!(all[1].votes_against.len(), 3);
        assert!(gov.list_open().unwrap().is_empty());

        // Terminal proposals stay closed across sessions
        let err = gov.cast_vote(voter("777777777777"), 1, VoteChoice::For);
        assert!(matches!(err, Err(GovernanceError::ProposalClosed { .. })));
    }
}

#[test]
fn test_ids_continue_across_sessions() {
    let dir = TempDir::new().unwrap();

    {
        let gov = open_engine(&dir);
        assert_eq!(gov.create_proposal(voter("999999999999"), "One").unwrap().id, 1);
    }
    {
        let gov = open_engine(&dir);
        assert_eq!(gov.create_proposal(voter("999999999999"), "Two").unwrap().id, 2);
    }
}

#[test]
fn test_votes_accumulate_across_sessions() {
    let dir = TempDir::new().unwrap();

    {
        let gov = open_engine(&dir);
        let p = gov.create_proposal(voter("999999999999"), "Slow burn").unwrap();
        gov.cast_vote(voter("111111111111"), p.id, VoteChoice::For).unwrap();
        gov.cast_vote(voter("222222222222"), p.id, VoteChoice::For).unwrap();
    }
    {
        let gov = open_engine(&dir);

        // A voter from the earlier session is still deduplicated
        let err = gov.cast_vote(voter("111111111111"), 1, VoteChoice::Against);
        assert!(matches!(err, Err(GovernanceError::AlreadyVoted(1))));

        let p = gov.cast_vote(voter("333333333333"), 1, VoteChoice::For).unwrap();
        assert_eq!(p.status, ProposalStatus::Accepted);
    }
}
