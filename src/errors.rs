use thiserror::Error;

use crate::goals::GoalError;

// Create a type alias for Result using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for the budget application
#[derive(Error, Debug)]
pub enum Error {
    #[error("Store operation failed: {0}")]
    Store(#[from] StoreError),

    #[error("Input validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("Goal error: {0}")]
    Goal(#[from] GoalError),
}

impl Error {
    /// Whether the error belongs to the retryable class (network/timeout
    /// against the ledger store). Background jobs retry these with backoff.
    pub fn is_transient(&self) -> bool {
        matches!(self, Error::Store(StoreError::Transient(_)))
    }
}

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("No document at '{0}'")]
    NotFound(String),

    #[error("Transient store failure: {0}")]
    Transient(String),

    #[error("Failed to serialize document: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Malformed document at '{path}': {reason}")]
    Malformed { path: String, reason: String },
}

#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Required field '{0}' is missing")]
    MissingField(String),

    #[error("Amount must be positive, got {0}")]
    NonPositiveAmount(rust_decimal::Decimal),

    #[error("Failed to parse decimal number: {0}")]
    DecimalParse(#[from] rust_decimal::Error),
}

// Implement From for serde_json::Error to Error directly
impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Store(StoreError::Serialization(err))
    }
}

// Add From implementation for rust_decimal::Error
impl From<rust_decimal::Error> for Error {
    fn from(err: rust_decimal::Error) -> Self {
        Error::Validation(ValidationError::DecimalParse(err))
    }
}
