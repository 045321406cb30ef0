//! Error types for envelope encryption.

use thiserror::Error;

/// Result type for crypto operations.
pub type CryptoResult<T> = Result<T, CryptoError>;

/// Errors that can occur while generating keys or sealing/opening envelopes.
///
/// `KeyUnwrap` and `AuthenticationFailure` render the same message so a
/// caller that surfaces errors verbatim never tells an attacker which
/// step rejected the envelope.
#[derive(Debug, Error)]
pub enum CryptoError {
    #[error("key generation failed: {0}")]
    KeyGeneration(String),

    #[error("encryption failed: {0}")]
    Encryption(String),

    #[error("decryption failed")]
    KeyUnwrap,

    #[error("decryption failed")]
    AuthenticationFailure,

    #[error("malformed envelope: {0}")]
    MalformedEnvelope(String),

    #[error("key encoding error: {0}")]
    KeyEncoding(String),

    #[error("plaintext encoding error: {0}")]
    Encoding(String),
}

impl CryptoError {
    /// True for the two opaque decryption failures (wrong key or tampering).
    pub fn is_decryption_failure(&self) -> bool {
        matches!(self, Self::KeyUnwrap | Self::AuthenticationFailure)
    }
}
