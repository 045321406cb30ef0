//! Service error types.

use thiserror::Error;

/// Result type for service operations.
pub type ServiceResult<T> = Result<T, ServiceError>;

/// Errors that can occur in the async envelope service.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("crypto error: {0}")]
    Crypto(#[from] lockbox_crypto::CryptoError),

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("key generation timed out after {millis} ms")]
    Timeout { millis: u64 },

    #[error("background task failed: {0}")]
    TaskFailed(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
