use thiserror::Error;

/// Error for IdentityId parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum IdentityIdError {
    #[error("Invalid UUID format: {0}")]
    InvalidFormat(String),
}

/// Error for EmailAddress validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EmailError {
    #[error("Invalid email format: {0}")]
    InvalidFormat(String),
}

/// Error for PhoneNumber validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PhoneError {
    #[error("Invalid phone number: {0}")]
    InvalidFormat(String),
}

/// Top-level error for authentication and identity operations
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum IdentityError {
    // Input validation errors
    #[error("All fields are required (missing: {})", .0.join(", "))]
    MissingFields(Vec<&'static str>),

    #[error("Invalid identity ID: {0}")]
    InvalidIdentityId(#[from] IdentityIdError),

    #[error("{0}")]
    InvalidEmail(#[from] EmailError),

    #[error("{0}")]
    InvalidPhone(#[from] PhoneError),

    // Store-level uniqueness violation
    #[error("Contact address already registered: {0}")]
    DuplicateContact(String),

    // Domain-level errors
    #[error("User already exists: {0}")]
    AlreadyExists(String),

    #[error("User not found: {0}")]
    NotFound(String),

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("{0}")]
    WrongRole(String),

    // Infrastructure errors
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Unknown error: {0}")]
    Unknown(String),
}
