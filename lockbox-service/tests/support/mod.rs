//! Shared helpers for service integration tests.

#![allow(dead_code)]

use lockbox_crypto::{generate_keypair, KeyPair, DEFAULT_MODULUS_BITS};
use lockbox_service::{EnvelopeService, ServiceConfig};
use std::sync::OnceLock;

/// One key pair per test binary; RSA generation is the slow part.
pub fn recipient() -> &'static KeyPair {
    static PAIR: OnceLock<KeyPair> = OnceLock::new();
    PAIR.get_or_init(|| generate_keypair(DEFAULT_MODULUS_BITS).expect("keygen must succeed"))
}

pub fn stranger() -> &'static KeyPair {
    static PAIR: OnceLock<KeyPair> = OnceLock::new();
    PAIR.get_or_init(|| generate_keypair(DEFAULT_MODULUS_BITS).expect("keygen must succeed"))
}

/// A service allowing `max` concurrent operations.
pub fn service_with_limit(max: usize) -> EnvelopeService {
    EnvelopeService::new(ServiceConfig {
        max_concurrent_operations: max,
        ..ServiceConfig::default()
    })
    .expect("valid config")
}
