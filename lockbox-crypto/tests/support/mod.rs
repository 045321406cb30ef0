//! Shared key pairs for integration tests.
//!
//! RSA generation dominates test time, so each test binary generates two
//! pairs once and reuses them.

#![allow(dead_code)]

use lockbox_crypto::{generate_keypair, KeyPair, DEFAULT_MODULUS_BITS};
use std::sync::OnceLock;

/// The intended recipient in most tests.
pub fn recipient() -> &'static KeyPair {
    static PAIR: OnceLock<KeyPair> = OnceLock::new();
    PAIR.get_or_init(|| generate_keypair(DEFAULT_MODULUS_BITS).expect("keygen must succeed"))
}

/// A second, unrelated identity.
pub fn stranger() -> &'static KeyPair {
    static PAIR: OnceLock<KeyPair> = OnceLock::new();
    PAIR.get_or_init(|| generate_keypair(DEFAULT_MODULUS_BITS).expect("keygen must succeed"))
}
