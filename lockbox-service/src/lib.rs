//! Async envelope encryption service for Lockbox.
//!
//! Provides, on top of `lockbox-crypto`:
//! - RSA key generation on tokio's blocking pool, with an optional deadline
//! - Concurrent encrypt/decrypt bounded by a semaphore
//! - JSON configuration and wire-format helpers
//! - `tracing` subscriber setup

pub mod config;
pub mod error;
pub mod keygen;
pub mod service;
pub mod telemetry;

pub use config::ServiceConfig;
pub use error::{ServiceError, ServiceResult};
pub use keygen::KeyPairGenerator;
pub use service::EnvelopeService;
