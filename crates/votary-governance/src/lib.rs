//! Votary Governance - Proposal lifecycle over durable storage.
//!
//! This crate provides:
//! - Proposal creation with ids assigned in creation order
//! - For/Against vote casting with duplicate-vote protection
//! - Automatic threshold-based resolution (Open -> Accepted/Rejected)
//! - Open and full proposal listings

pub mod engine;
pub mod error;

pub use engine::{Governance, GovernanceConfig};
pub use error::GovernanceError;
