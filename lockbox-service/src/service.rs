//! Async envelope orchestration.
//!
//! Wraps the synchronous `lockbox-crypto` primitives so async servers can
//! seal and open many envelopes in parallel without stalling their
//! executor. Each operation runs on the blocking pool; a semaphore caps how
//! many run at once. A job's permit is released when the job finishes, not
//! when its caller stops waiting. The service holds no key material and no per-call
//! state.

use crate::config::ServiceConfig;
use crate::error::{ServiceError, ServiceResult};
use crate::keygen::KeyPairGenerator;
use lockbox_crypto::{self as crypto, CryptoResult, Envelope, KeyPair, PrivateKey, PublicKey};
use std::sync::Arc;
use tokio::sync::{OwnedSemaphorePermit, Semaphore};
use tracing::debug;

/// Stateless, cloneable front end for key generation, encryption and
/// decryption.
#[derive(Clone, Debug)]
pub struct EnvelopeService {
    keygen: KeyPairGenerator,
    permits: Arc<Semaphore>,
    max_concurrent: usize,
}

impl EnvelopeService {
    pub fn new(config: ServiceConfig) -> ServiceResult<Self> {
        config.validate()?;
        Ok(Self::build(&config))
    }

    fn build(config: &ServiceConfig) -> Self {
        Self {
            keygen: KeyPairGenerator::from_config(config),
            permits: Arc::new(Semaphore::new(config.max_concurrent_operations)),
            max_concurrent: config.max_concurrent_operations,
        }
    }

    /// Number of operations that could start right now without waiting.
    pub fn available_permits(&self) -> usize {
        self.permits.available_permits()
    }

    pub fn max_concurrent_operations(&self) -> usize {
        self.max_concurrent
    }

    /// Generates a key pair for a new identity.
    pub async fn generate_keypair(&self) -> ServiceResult<KeyPair> {
        let permit = self.acquire().await?;
        self.keygen.generate_holding(Some(permit)).await
    }

    /// Seals `plaintext` for the holder of `public_key`.
    pub async fn encrypt(
        &self,
        public_key: &PublicKey,
        plaintext: Vec<u8>,
    ) -> ServiceResult<Envelope> {
        let public_key = public_key.clone();
        let len = plaintext.len();
        let envelope = self
            .run_blocking("encrypt", move || crypto::encrypt(&public_key, &plaintext))
            .await?;
        debug!("sealed envelope for {len} plaintext bytes");
        Ok(envelope)
    }

    /// Opens `envelope` with `private_key`.
    pub async fn decrypt(
        &self,
        private_key: &PrivateKey,
        envelope: Envelope,
    ) -> ServiceResult<Vec<u8>> {
        let private_key = private_key.clone();
        let result = self
            .run_blocking("decrypt", move || crypto::decrypt(&private_key, &envelope))
            .await;
        match &result {
            Ok(plaintext) => debug!("opened envelope with {} plaintext bytes", plaintext.len()),
            // Which step failed stays out of the logs too.
            Err(ServiceError::Crypto(e)) if e.is_decryption_failure() => {
                debug!("envelope rejected")
            }
            Err(e) => debug!("envelope decrypt error: {e}"),
        }
        result
    }

    /// Seals `plaintext` and returns the JSON wire form.
    pub async fn encrypt_to_json(
        &self,
        public_key: &PublicKey,
        plaintext: Vec<u8>,
    ) -> ServiceResult<String> {
        let envelope = self.encrypt(public_key, plaintext).await?;
        Ok(envelope.to_json()?)
    }

    /// Decodes a JSON envelope and opens it. Malformed input is rejected
    /// before any work reaches the blocking pool.
    pub async fn decrypt_from_json(
        &self,
        private_key: &PrivateKey,
        json: &str,
    ) -> ServiceResult<Vec<u8>> {
        let envelope = Envelope::from_json(json)?;
        self.decrypt(private_key, envelope).await
    }

    // Owned so the permit can travel into the blocking job and outlive a
    // cancelled or timed-out caller.
    async fn acquire(&self) -> ServiceResult<OwnedSemaphorePermit> {
        Arc::clone(&self.permits)
            .acquire_owned()
            .await
            .map_err(|_| ServiceError::TaskFailed("operation pool closed".to_string()))
    }

    async fn run_blocking<T, F>(&self, op: &'static str, f: F) -> ServiceResult<T>
    where
        F: FnOnce() -> CryptoResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let permit = self.acquire().await?;
        let result = tokio::task::spawn_blocking(move || {
            let _permit = permit;
            f()
        })
        .await
        .map_err(|e| ServiceError::TaskFailed(format!("{op} task failed: {e}")))?;
        Ok(result?)
    }
}

impl Default for EnvelopeService {
    fn default() -> Self {
        Self::build(&ServiceConfig::default())
    }
}
