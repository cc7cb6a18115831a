use thiserror::Error;

/// Error for ItemId parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ItemIdError {
    #[error("Invalid inventory ID format: {0}")]
    InvalidFormat(String),
}

/// Top-level error for inventory operations
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum InventoryError {
    #[error("{0}")]
    InvalidItemId(#[from] ItemIdError),

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("No update fields provided.")]
    EmptyUpdate,

    #[error("Inventory item not found: {0}")]
    NotFound(String),

    #[error("Inventory item with this name already exists: {0}")]
    DuplicateName(String),

    #[error("Database error: {0}")]
    DatabaseError(String),
}
