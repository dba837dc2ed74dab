//! Chain state for recorded votes.

use std::time::{SystemTime, UNIX_EPOCH};
use votary_types::{Block, BlockPayload, VoteRecord, VoterId};

/// The append-only sequence of blocks recording cast votes.
///
/// Constructed with its genesis block; the only transition is `append`,
/// which is monotone and irreversible. The ledger exclusively owns its
/// block sequence.
pub struct Ledger {
    chain: Vec<Block>,
}

impl Ledger {
    /// Create a ledger holding only the genesis block.
    pub fn new() -> Self {
        let genesis = Block::genesis(unix_timestamp_ms());
        Self {
            chain: vec![genesis],
        }
    }

    /// Record a vote in a new block at the tail of the chain.
    ///
    /// The block takes the next index, the current time, and the tail's
    /// hash as its parent link. Appending cannot fail; callers supply
    /// well-formed records.
    pub fn append(&mut self, record: VoteRecord) -> Block {
        let block = Block::new(
            self.chain.len() as u64,
            BlockPayload::Vote(record),
            unix_timestamp_ms(),
            self.tail().hash,
        );
        tracing::debug!(index = block.index, hash = %block.hash, "vote appended");
        self.chain.push(block.clone());
        block
    }

    /// Check whether an identity has already cast a vote.
    ///
    /// Linear scan over all non-genesis blocks; no voter index is kept at
    /// this scale.
    pub fn has_voted(&self, voter: &VoterId) -> bool {
        self.votes().any(|record| &record.voter == voter)
    }

    /// All recorded votes in chain order, oldest first.
    pub fn history(&self) -> Vec<&VoteRecord> {
        self.votes().collect()
    }

    /// The most recent block.
    pub fn tail(&self) -> &Block {
        // The chain always holds at least the genesis block
        self.chain.last().expect("ledger chain is never empty")
    }

    /// The full block sequence, genesis first.
    pub fn blocks(&self) -> &[Block] {
        &self.chain
    }

    /// Number of blocks, genesis included.
    pub fn len(&self) -> usize {
        self.chain.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chain.is_empty()
    }

    fn votes(&self) -> impl Iterator<Item = &VoteRecord> {
        self.chain.iter().skip(1).filter_map(Block::vote)
    }
}

impl Default for Ledger {
    fn default() -> Self {
        Self::new()
    }
}

fn unix_timestamp_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or_default()
}
