use thiserror::Error;

/// Error type for secret hashing operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PasswordError {
    #[error("Secret hashing failed: {0}")]
    HashingFailed(String),

    #[error("Stored hash is unusable: {0}")]
    InvalidHash(String),
}
