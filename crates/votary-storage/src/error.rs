use thiserror::Error;

/// Errors that can occur in storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Stored state is corrupt: {0}")]
    Corrupt(String),

    #[error("Identity already enrolled: {0}")]
    AlreadyEnrolled(String),

    #[error("Identity not enrolled: {0}")]
    NotEnrolled(String),
}
