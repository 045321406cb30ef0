//! Envelope service configuration.

use crate::error::{ServiceError, ServiceResult};
use lockbox_crypto::{DEFAULT_MODULUS_BITS, MAX_MODULUS_BITS, MIN_MODULUS_BITS};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for [`crate::EnvelopeService`] and [`crate::KeyPairGenerator`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// RSA modulus size for generated key pairs.
    pub modulus_bits: usize,

    /// Upper bound on encrypt/decrypt/keygen jobs running at once on the
    /// blocking pool.
    pub max_concurrent_operations: usize,

    /// Optional deadline for key generation, in milliseconds.
    pub keygen_timeout_ms: Option<u64>,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            modulus_bits: DEFAULT_MODULUS_BITS,
            max_concurrent_operations: 8,
            keygen_timeout_ms: None,
        }
    }
}

impl ServiceConfig {
    /// Parses a JSON config. Missing fields take their defaults.
    pub fn from_json(json: &str) -> ServiceResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that every field is usable.
    pub fn validate(&self) -> ServiceResult<()> {
        if !(MIN_MODULUS_BITS..=MAX_MODULUS_BITS).contains(&self.modulus_bits)
            || self.modulus_bits % 8 != 0
        {
            return Err(ServiceError::Config(format!(
                "modulus_bits must be a multiple of 8 in {MIN_MODULUS_BITS}..={MAX_MODULUS_BITS}, got {}",
                self.modulus_bits
            )));
        }
        if self.max_concurrent_operations == 0 {
            return Err(ServiceError::Config(
                "max_concurrent_operations must be at least 1".to_string(),
            ));
        }
        if self.keygen_timeout_ms == Some(0) {
            return Err(ServiceError::Config(
                "keygen_timeout_ms must be positive when set".to_string(),
            ));
        }
        Ok(())
    }

    pub fn keygen_timeout(&self) -> Option<Duration> {
        self.keygen_timeout_ms.map(Duration::from_millis)
    }
}
