use burrow_core::{CoreError, ExpiryError, StorageError};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, StoreError>;

#[derive(Debug, Clone, Error)]
pub enum StoreError {
    #[error("short code not found: {0}")]
    NotFound(String),
    #[error("short code {code} expired on {expiry}")]
    Expired { code: String, expiry: String },
    #[error("alias already exists: {0}")]
    AliasConflict(String),
    #[error("invalid short code: {0}")]
    InvalidShortCode(String),
    #[error("invalid target: {0}")]
    InvalidTarget(String),
    #[error("no unused short code found after {attempts} attempts")]
    CodeSpaceExhausted { attempts: usize },
    #[error("invalid store settings: {0}")]
    InvalidSettings(String),
    #[error(transparent)]
    DateFormat(#[from] ExpiryError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl From<CoreError> for StoreError {
    fn from(value: CoreError) -> Self {
        match value {
            CoreError::InvalidShortCode(message) => Self::InvalidShortCode(message),
        }
    }
}
