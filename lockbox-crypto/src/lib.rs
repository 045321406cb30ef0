//! Envelope encryption for Lockbox.
//!
//! Implements one fixed hybrid construction:
//! - RSA (2048-bit by default) key pairs, exportable as PKCS#1 or PKCS#8 PEM
//! - AES-256-GCM for the payload, with a fresh key and nonce per envelope
//! - RSA-OAEP (SHA-256) to wrap the per-envelope AES key
//!
//! # Architecture
//!
//! Three independent pieces that share only data types:
//!
//! 1. **Key generation**: [`generate_keypair`] produces a [`KeyPair`]. This is
//!    the only expensive operation; async callers should run it on a
//!    blocking worker (see `lockbox-service`).
//!
//! 2. **Encryption**: [`encrypt`] takes a [`PublicKey`] and plaintext and
//!    returns an [`Envelope`] holding the wrapped key, nonce, ciphertext and
//!    tag.
//!
//! 3. **Decryption**: [`decrypt`] takes a [`PrivateKey`] and an envelope and
//!    returns the plaintext, or an error with no partial output.
//!
//! Nothing here holds state between calls, so every function is safe to
//! call concurrently from any number of threads.

mod cipher;
pub mod envelope;
mod error;
mod key;
pub mod keypair;
pub mod wire;

pub use cipher::{NONCE_SIZE, TAG_SIZE};
pub use envelope::{
    decrypt, decrypt_json, decrypt_string, decrypt_with_pem, encrypt, encrypt_string,
    encrypt_with_pem, Envelope,
};
pub use error::{CryptoError, CryptoResult};
pub use key::KEY_SIZE;
pub use keypair::{
    generate_keypair, KeyPair, PemFormat, PrivateKey, PublicKey, DEFAULT_MODULUS_BITS,
    MAX_MODULUS_BITS, MIN_MODULUS_BITS,
};
pub use wire::EncodedEnvelope;
