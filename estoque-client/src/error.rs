//! Client error types

use thiserror::Error;

use crate::store::StoreError;

/// Client error type
#[derive(Debug, Error)]
pub enum ClientError {
    /// Transport failure (connection refused, reset, aborted)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Response could not be read as the expected shape
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Caller input rejected before any request was made
    #[error("Validation error: {0}")]
    Validation(String),

    /// Bad client configuration (e.g. unusable base URL)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Local persistence failure
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;
