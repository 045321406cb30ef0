//! Non-blocking RSA key pair generation.

use crate::config::ServiceConfig;
use crate::error::{ServiceError, ServiceResult};
use lockbox_crypto::{generate_keypair, KeyPair};
use std::time::{Duration, Instant};
use tokio::sync::OwnedSemaphorePermit;
use tracing::{info, warn};

/// Generates key pairs on tokio's blocking pool so the calling task's
/// executor thread stays free.
#[derive(Clone, Debug)]
pub struct KeyPairGenerator {
    modulus_bits: usize,
    timeout: Option<Duration>,
}

impl KeyPairGenerator {
    pub fn new(modulus_bits: usize) -> Self {
        Self {
            modulus_bits,
            timeout: None,
        }
    }

    pub fn from_config(config: &ServiceConfig) -> Self {
        Self {
            modulus_bits: config.modulus_bits,
            timeout: config.keygen_timeout(),
        }
    }

    /// Gives up waiting after `timeout`.
    ///
    /// The blocking thread cannot be interrupted; it finishes in the
    /// background and its result is discarded. When run through
    /// `EnvelopeService`, its permit stays taken until then.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn modulus_bits(&self) -> usize {
        self.modulus_bits
    }

    /// Generates one key pair.
    pub async fn generate(&self) -> ServiceResult<KeyPair> {
        self.generate_holding(None).await
    }

    /// Generates one key pair, keeping `permit` until the blocking job
    /// itself returns, even if the caller stopped waiting on a timeout.
    pub(crate) async fn generate_holding(
        &self,
        permit: Option<OwnedSemaphorePermit>,
    ) -> ServiceResult<KeyPair> {
        let bits = self.modulus_bits;
        let started = Instant::now();
        let task = tokio::task::spawn_blocking(move || {
            let _permit = permit;
            generate_keypair(bits)
        });

        let joined = match self.timeout {
            Some(limit) => tokio::time::timeout(limit, task).await.map_err(|_| {
                warn!("RSA-{bits} key generation exceeded {} ms", limit.as_millis());
                ServiceError::Timeout {
                    millis: whole_millis(limit),
                }
            })?,
            None => task.await,
        };

        let keypair = joined
            .map_err(|e| ServiceError::TaskFailed(format!("key generation task failed: {e}")))??;

        info!(
            "generated RSA-{bits} key pair in {} ms",
            started.elapsed().as_millis()
        );
        Ok(keypair)
    }
}

impl Default for KeyPairGenerator {
    fn default() -> Self {
        Self::from_config(&ServiceConfig::default())
    }
}

// Saturates instead of truncating durations past u64::MAX milliseconds.
fn whole_millis(limit: Duration) -> u64 {
    u64::try_from(limit.as_millis()).unwrap_or(u64::MAX)
}
