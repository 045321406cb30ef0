//! AES-256-GCM with a detached authentication tag.
//!
//! No associated data is bound. The tag is carried separately so the
//! envelope can expose it as its own field.

use crate::error::{CryptoError, CryptoResult};
use crate::key::SymmetricKey;
use aes_gcm::aead::generic_array::GenericArray;
use aes_gcm::aead::{AeadInPlace, KeyInit};
use aes_gcm::{Aes256Gcm, Key, Nonce};
use rand::rngs::OsRng;
use rand::RngCore;
use zeroize::Zeroize;

/// AES-GCM nonce size in bytes (96 bits).
pub const NONCE_SIZE: usize = 12;

/// AES-GCM authentication tag size in bytes.
pub const TAG_SIZE: usize = 16;

/// Output of one AEAD encryption.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SealedPayload {
    pub nonce: [u8; NONCE_SIZE],
    pub ciphertext: Vec<u8>,
    pub tag: [u8; TAG_SIZE],
}

/// Encrypts `plaintext` under `key` with a freshly drawn random nonce.
pub fn seal(key: &SymmetricKey, plaintext: &[u8]) -> CryptoResult<SealedPayload> {
    let mut nonce = [0u8; NONCE_SIZE];
    OsRng
        .try_fill_bytes(&mut nonce)
        .map_err(|e| CryptoError::Encryption(format!("random source unavailable: {e}")))?;

    let cipher = Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(key.as_bytes()));
    let mut buffer = plaintext.to_vec();
    let tag = cipher
        .encrypt_in_place_detached(Nonce::from_slice(&nonce), b"", &mut buffer)
        .map_err(|_| CryptoError::Encryption("AES-GCM encryption failed".to_string()))?;

    let mut tag_bytes = [0u8; TAG_SIZE];
    tag_bytes.copy_from_slice(tag.as_slice());

    Ok(SealedPayload {
        nonce,
        ciphertext: buffer,
        tag: tag_bytes,
    })
}

/// Verifies `tag` and decrypts `ciphertext`.
///
/// The tag is checked before the keystream is applied; on mismatch no
/// plaintext bytes leave this function.
pub fn open(
    key: &SymmetricKey,
    nonce: &[u8; NONCE_SIZE],
    ciphertext: &[u8],
    tag: &[u8; TAG_SIZE],
) -> CryptoResult<Vec<u8>> {
    let cipher = Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(key.as_bytes()));
    let mut buffer = ciphertext.to_vec();

    match cipher.decrypt_in_place_detached(
        Nonce::from_slice(nonce),
        b"",
        &mut buffer,
        GenericArray::from_slice(tag),
    ) {
        Ok(()) => Ok(buffer),
        Err(_) => {
            buffer.zeroize();
            Err(CryptoError::AuthenticationFailure)
        }
    }
}
