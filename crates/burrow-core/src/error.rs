use thiserror::Error;

/// Errors related to the core types of the short-code store.
pub type Result<T> = std::result::Result<T, CoreError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    #[error("invalid short code: {0}")]
    InvalidShortCode(String),
}

/// Errors raised while reading or computing expiry dates.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExpiryError {
    #[error("malformed expiry '{input}': {reason}")]
    Format { input: String, reason: String },
    #[error("expiry '{input}' cannot be shifted by {days} days: {reason}")]
    OutOfRange {
        input: String,
        days: i32,
        reason: String,
    },
    #[error("invalid expiry calendar: {0}")]
    Calendar(String),
}

/// Errors raised by a [`RecordGateway`](crate::gateway::RecordGateway).
#[derive(Debug, Clone, Error)]
pub enum StorageError {
    #[error("failed to load records: {0}")]
    Load(String),
    #[error("failed to write records: {0}")]
    Write(String),
    #[error("stored data is invalid: {0}")]
    InvalidData(String),
}
