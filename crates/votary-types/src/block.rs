use crate::hash::Hash;
use crate::identity::VoterId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Domain tag mixed into every block hash input.
const HASH_DOMAIN: &[u8] = b"votary.block.v1";

/// A single recorded vote: who cast it and the ballot choice made.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteRecord {
    /// The voter's identity token
    pub voter: VoterId,
    /// Free-text ballot choice
    pub choice: String,
}

/// Payload carried by a ledger block.
///
/// The genesis sentinel is never treated as a vote by ledger queries.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum BlockPayload {
    Genesis,
    Vote(VoteRecord),
}

impl BlockPayload {
    /// The vote record, if this payload carries one.
    pub fn as_vote(&self) -> Option<&VoteRecord> {
        match self {
            BlockPayload::Vote(record) => Some(record),
            BlockPayload::Genesis => None,
        }
    }
}

/// An immutable, hash-linked entry in the vote ledger.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    /// Position in the chain, 0 for genesis
    pub index: u64,
    /// What this block records
    pub payload: BlockPayload,
    /// Creation time, unix milliseconds
    pub timestamp: u64,
    /// Hash of the preceding block, zero for genesis
    pub previous_hash: Hash,
    /// Content hash over all other fields
    pub hash: Hash,
}

impl Block {
    /// Create a block, computing its content hash from the other fields.
    pub fn new(index: u64, payload: BlockPayload, timestamp: u64, previous_hash: Hash) -> Self {
        let hash = Self::compute_hash(index, &payload, timestamp, &previous_hash);
        Self {
            index,
            payload,
            timestamp,
            previous_hash,
            hash,
        }
    }

    /// The fixed genesis block at index 0, parented on the zero hash.
    pub fn genesis(timestamp: u64) -> Self {
        Self::new(0, BlockPayload::Genesis, timestamp, Hash::ZERO)
    }

    /// Compute the content hash for a block with the given fields.
    ///
    /// Fields enter the hash through a canonical encoding: a domain tag,
    /// fixed-width little-endian integers, a payload kind byte and a length
    /// prefix on every variable-size field. Distinct field tuples therefore
    /// never share a hash input.
    pub fn compute_hash(
        index: u64,
        payload: &BlockPayload,
        timestamp: u64,
        previous_hash: &Hash,
    ) -> Hash {
        let mut data = Vec::with_capacity(96);
        data.extend_from_slice(HASH_DOMAIN);
        data.extend_from_slice(&index.to_le_bytes());
        data.extend_from_slice(&timestamp.to_le_bytes());
        match payload {
            BlockPayload::Genesis => data.push(0),
            BlockPayload::Vote(record) => {
                data.push(1);
                data.extend_from_slice(record.voter.as_bytes());
                let choice = record.choice.as_bytes();
                data.extend_from_slice(&(choice.len() as u32).to_le_bytes());
                data.extend_from_slice(choice);
            }
        }
        data.extend_from_slice(previous_hash.as_bytes());
        Hash::compute(&data)
    }

    /// Check if this is the genesis block
    pub fn is_genesis(&self) -> bool {
        self.index == 0
    }

    /// The vote this block records, if any.
    pub fn vote(&self) -> Option<&VoteRecord> {
        self.payload.as_vote()
    }
}

impl fmt::Display for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Block {{ index: {}, hash: {}, previous: {} }}",
            self.index, self.hash, self.previous_hash
        )
    }
}
