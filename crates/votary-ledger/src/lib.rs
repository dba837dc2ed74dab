//! Votary Ledger - The append-only, hash-linked vote ledger.
//!
//! The ledger records each cast vote in a block linked to its predecessor
//! by content hash, making after-the-fact tampering evident. It lives in
//! process memory for the lifetime of a session and only ever grows.

pub mod ledger;

pub use ledger::Ledger;
