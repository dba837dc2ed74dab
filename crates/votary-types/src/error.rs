use thiserror::Error;

/// Errors that can occur in type operations.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum TypesError {
    #[error("Invalid voter id length: expected 12 digits, got {0}")]
    InvalidVoterIdLength(usize),

    #[error("Invalid voter id: non-digit character {0:?}")]
    InvalidVoterIdDigit(char),

    #[error("Invalid hash length: expected 32, got {0}")]
    InvalidHashLength(usize),

    #[error("Invalid hex: {0}")]
    InvalidHex(String),

    #[error("Invalid vote choice: {0:?} (expected \"for\" or \"against\")")]
    InvalidVoteChoice(String),
}

impl From<hex::FromHexError> for TypesError {
    fn from(e: hex::FromHexError) -> Self {
        TypesError::InvalidHex(e.to_string())
    }
}
