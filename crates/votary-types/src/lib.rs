//! Votary Types - Core type definitions for the Votary voting system.
//!
//! This crate provides the fundamental types used throughout Votary:
//! - Voter identity tokens (validated 12-digit numeric strings)
//! - Hashes (32-byte, blake3 digests)
//! - Ledger blocks, payloads and vote records
//! - Governance proposals, statuses and vote choices

pub mod block;
pub mod error;
pub mod hash;
pub mod identity;
pub mod proposal;

pub use block::{Block, BlockPayload, VoteRecord};
pub use error::TypesError;
pub use hash::Hash;
pub use identity::VoterId;
pub use proposal::{Proposal, ProposalStatus, VoteChoice};
