//! Ephemeral symmetric key material.

use crate::error::{CryptoError, CryptoResult};
use rand::rngs::OsRng;
use rand::RngCore;
use std::fmt;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Size of an AES-256 key in bytes.
pub const KEY_SIZE: usize = 32;

/// A single-use AES-256 key.
///
/// Generated fresh for every envelope, wrapped under the recipient's public
/// key and dropped. The bytes are wiped on drop.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct SymmetricKey([u8; KEY_SIZE]);

impl SymmetricKey {
    /// Draws a new key from the operating system CSPRNG.
    pub fn generate() -> CryptoResult<Self> {
        let mut bytes = [0u8; KEY_SIZE];
        OsRng
            .try_fill_bytes(&mut bytes)
            .map_err(|e| CryptoError::Encryption(format!("random source unavailable: {e}")))?;
        Ok(Self(bytes))
    }

    /// Rebuilds a key from unwrapped bytes. Returns `None` on a length mismatch.
    pub(crate) fn from_slice(bytes: &[u8]) -> Option<Self> {
        let bytes: [u8; KEY_SIZE] = bytes.try_into().ok()?;
        Some(Self(bytes))
    }

    pub fn as_bytes(&self) -> &[u8; KEY_SIZE] {
        &self.0
    }
}

impl fmt::Debug for SymmetricKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SymmetricKey([REDACTED])")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_keys_differ() {
        let a = SymmetricKey::generate().unwrap();
        let b = SymmetricKey::generate().unwrap();
        assert_ne!(a.as_bytes(), b.as_bytes());
    }

    #[test]
    fn from_slice_rejects_wrong_length() {
        assert!(SymmetricKey::from_slice(&[0u8; 16]).is_none());
        assert!(SymmetricKey::from_slice(&[0u8; 33]).is_none());
        assert!(SymmetricKey::from_slice(&[7u8; KEY_SIZE]).is_some());
    }

    #[test]
    fn debug_does_not_leak_bytes() {
        let key = SymmetricKey::from_slice(&[0xAB; KEY_SIZE]).unwrap();
        let rendered = format!("{key:?}");
        assert_eq!(rendered, "SymmetricKey([REDACTED])");
    }
}
