use thiserror::Error;

/// Error for expert directory operations
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ExpertError {
    #[error("No experts found matching your criteria.")]
    NoMatch,

    #[error("Database error: {0}")]
    DatabaseError(String),
}
