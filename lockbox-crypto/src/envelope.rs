//! Hybrid envelope encryption.
//!
//! Each call to [`encrypt`] draws a fresh AES-256 key and nonce, encrypts
//! the payload with AES-256-GCM, then wraps the AES key under the
//! recipient's RSA public key with OAEP (SHA-256). [`decrypt`] reverses the
//! steps and releases plaintext only after the GCM tag verifies.

use crate::cipher::{self, SealedPayload, NONCE_SIZE, TAG_SIZE};
use crate::error::{CryptoError, CryptoResult};
use crate::key::SymmetricKey;
use crate::keypair::{PrivateKey, PublicKey, MIN_MODULUS_BITS};
use crate::wire::EncodedEnvelope;
use rand::rngs::OsRng;
use rsa::Oaep;
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use zeroize::Zeroizing;

/// A self-contained encrypted message for one recipient.
///
/// Serializes as a JSON object of four base64 strings; see [`crate::wire`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "EncodedEnvelope", into = "EncodedEnvelope")]
pub struct Envelope {
    /// AES key encrypted under the recipient's RSA public key (RSA-OAEP).
    pub wrapped_key: Vec<u8>,
    /// AES-GCM nonce, unique per envelope.
    pub nonce: [u8; NONCE_SIZE],
    /// AES-GCM ciphertext, same length as the plaintext.
    pub ciphertext: Vec<u8>,
    /// AES-GCM authentication tag.
    pub auth_tag: [u8; TAG_SIZE],
}

impl Envelope {
    /// Structural checks that need no key material.
    pub fn validate(&self) -> CryptoResult<()> {
        if self.wrapped_key.is_empty() {
            return Err(CryptoError::MalformedEnvelope(
                "wrappedKey is empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// Encrypts `plaintext` for the holder of `public_key`.
pub fn encrypt(public_key: &PublicKey, plaintext: &[u8]) -> CryptoResult<Envelope> {
    let bits = public_key.modulus_bits();
    if bits < MIN_MODULUS_BITS {
        return Err(CryptoError::Encryption(format!(
            "public key modulus of {bits} bits is below the {MIN_MODULUS_BITS}-bit minimum"
        )));
    }

    let key = SymmetricKey::generate()?;
    let SealedPayload {
        nonce,
        ciphertext,
        tag,
    } = cipher::seal(&key, plaintext)?;

    let wrapped_key = public_key
        .as_rsa()
        .encrypt(&mut OsRng, Oaep::new::<Sha256>(), key.as_bytes())
        .map_err(|e| CryptoError::Encryption(format!("key wrapping failed: {e}")))?;

    Ok(Envelope {
        wrapped_key,
        nonce,
        ciphertext,
        auth_tag: tag,
    })
}

/// Decrypts an envelope addressed to `private_key`.
///
/// All-or-nothing: any failure returns an error and no plaintext.
pub fn decrypt(private_key: &PrivateKey, envelope: &Envelope) -> CryptoResult<Vec<u8>> {
    envelope.validate()?;

    let key = unwrap_key(private_key, &envelope.wrapped_key)?;
    cipher::open(
        &key,
        &envelope.nonce,
        &envelope.ciphertext,
        &envelope.auth_tag,
    )
}

fn unwrap_key(private_key: &PrivateKey, wrapped_key: &[u8]) -> CryptoResult<SymmetricKey> {
    // Only the OAEP padding check inside `rsa` is constant time. Its modular
    // exponentiation has a known timing side channel (Marvin); blinding
    // narrows it but does not remove it. Every failure collapses to the
    // same variant.
    let unwrapped = Zeroizing::new(
        private_key
            .as_rsa()
            .decrypt_blinded(&mut OsRng, Oaep::new::<Sha256>(), wrapped_key)
            .map_err(|_| CryptoError::KeyUnwrap)?,
    );
    SymmetricKey::from_slice(&unwrapped).ok_or(CryptoError::KeyUnwrap)
}

/// Parses `public_key_pem` and encrypts `plaintext` for it.
pub fn encrypt_with_pem(public_key_pem: &str, plaintext: &[u8]) -> CryptoResult<Envelope> {
    let public_key = PublicKey::from_pem(public_key_pem)?;
    encrypt(&public_key, plaintext)
}

/// Parses `private_key_pem` and decrypts `envelope` with it.
pub fn decrypt_with_pem(private_key_pem: &str, envelope: &Envelope) -> CryptoResult<Vec<u8>> {
    let private_key = PrivateKey::from_pem(private_key_pem)?;
    decrypt(&private_key, envelope)
}

/// Encrypts a UTF-8 text message.
pub fn encrypt_string(public_key: &PublicKey, message: &str) -> CryptoResult<Envelope> {
    encrypt(public_key, message.as_bytes())
}

/// Decrypts an envelope whose payload is UTF-8 text.
pub fn decrypt_string(private_key: &PrivateKey, envelope: &Envelope) -> CryptoResult<String> {
    let plaintext = decrypt(private_key, envelope)?;
    String::from_utf8(plaintext)
        .map_err(|_| CryptoError::Encoding("plaintext is not valid UTF-8".to_string()))
}

/// Decodes an envelope from its JSON wire form and decrypts it.
pub fn decrypt_json(private_key: &PrivateKey, json: &str) -> CryptoResult<Vec<u8>> {
    let envelope = Envelope::from_json(json)?;
    decrypt(private_key, &envelope)
}
