//! Textual wire format for envelopes.
//!
//! ```json
//! {"wrappedKey":"<b64>","nonce":"<b64>","ciphertext":"<b64>","authTag":"<b64>"}
//! ```
//!
//! Standard base64 with padding. Every field is mandatory on decode; field
//! order does not matter and unknown fields are ignored.
//!
//! `encryptedKey`, `iv`, `encryptedData` and `tag` are accepted as field-name
//! aliases only. Envelopes from the older producer that used those names
//! carry a 16-byte IV and a PKCS#1 v1.5 wrapped key; they decode no further
//! than the nonce length check and are not decryptable.

use crate::cipher::{NONCE_SIZE, TAG_SIZE};
use crate::envelope::Envelope;
use crate::error::{CryptoError, CryptoResult};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::{Deserialize, Serialize};

/// An envelope with every field as an optional base64 string.
///
/// This is the raw record collaborators move across transports. Convert it
/// with `Envelope::try_from` to validate it.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EncodedEnvelope {
    #[serde(alias = "encryptedKey")]
    pub wrapped_key: Option<String>,
    #[serde(alias = "iv")]
    pub nonce: Option<String>,
    #[serde(alias = "encryptedData")]
    pub ciphertext: Option<String>,
    #[serde(alias = "tag")]
    pub auth_tag: Option<String>,
}

impl From<&Envelope> for EncodedEnvelope {
    fn from(envelope: &Envelope) -> Self {
        Self {
            wrapped_key: Some(STANDARD.encode(&envelope.wrapped_key)),
            nonce: Some(STANDARD.encode(envelope.nonce)),
            ciphertext: Some(STANDARD.encode(&envelope.ciphertext)),
            auth_tag: Some(STANDARD.encode(envelope.auth_tag)),
        }
    }
}

impl From<Envelope> for EncodedEnvelope {
    fn from(envelope: Envelope) -> Self {
        Self::from(&envelope)
    }
}

impl TryFrom<EncodedEnvelope> for Envelope {
    type Error = CryptoError;

    fn try_from(encoded: EncodedEnvelope) -> CryptoResult<Self> {
        // Presence first, so a missing field is reported even when another
        // field is also undecodable.
        let wrapped_key = require("wrappedKey", encoded.wrapped_key)?;
        let nonce = require("nonce", encoded.nonce)?;
        let ciphertext = require("ciphertext", encoded.ciphertext)?;
        let auth_tag = require("authTag", encoded.auth_tag)?;

        let envelope = Envelope {
            wrapped_key: decode("wrappedKey", &wrapped_key)?,
            nonce: fixed("nonce", decode("nonce", &nonce)?)?,
            ciphertext: decode("ciphertext", &ciphertext)?,
            auth_tag: fixed("authTag", decode("authTag", &auth_tag)?)?,
        };
        envelope.validate()?;
        Ok(envelope)
    }
}

fn require(field: &str, value: Option<String>) -> CryptoResult<String> {
    value.ok_or_else(|| CryptoError::MalformedEnvelope(format!("missing field `{field}`")))
}

fn decode(field: &str, value: &str) -> CryptoResult<Vec<u8>> {
    STANDARD.decode(value).map_err(|e| {
        CryptoError::MalformedEnvelope(format!("field `{field}` is not valid base64: {e}"))
    })
}

fn fixed<const N: usize>(field: &str, bytes: Vec<u8>) -> CryptoResult<[u8; N]> {
    let len = bytes.len();
    bytes.try_into().map_err(|_| {
        CryptoError::MalformedEnvelope(format!("field `{field}` must be {N} bytes, got {len}"))
    })
}

impl Envelope {
    /// Serializes to the JSON wire form.
    pub fn to_json(&self) -> CryptoResult<String> {
        serde_json::to_string(&EncodedEnvelope::from(self))
            .map_err(|e| CryptoError::MalformedEnvelope(format!("envelope serialization failed: {e}")))
    }

    /// Parses the JSON wire form. Every failure is `MalformedEnvelope`.
    pub fn from_json(json: &str) -> CryptoResult<Self> {
        let encoded: EncodedEnvelope = serde_json::from_str(json)
            .map_err(|e| CryptoError::MalformedEnvelope(format!("invalid envelope JSON: {e}")))?;
        Self::try_from(encoded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Envelope {
        Envelope {
            wrapped_key: vec![1, 2, 3, 4],
            nonce: [9u8; NONCE_SIZE],
            ciphertext: b"opaque".to_vec(),
            auth_tag: [7u8; TAG_SIZE],
        }
    }

    #[test]
    fn encoded_fields_are_standard_base64() {
        let encoded = EncodedEnvelope::from(&sample());
        assert_eq!(encoded.wrapped_key.as_deref(), Some("AQIDBA=="));
        assert_eq!(encoded.ciphertext.as_deref(), Some("b3BhcXVl"));
    }

    #[test]
    fn fixed_rejects_short_nonce() {
        let err = fixed::<NONCE_SIZE>("nonce", vec![0u8; 16]).unwrap_err();
        assert_eq!(
            err.to_string(),
            "malformed envelope: field `nonce` must be 12 bytes, got 16"
        );
    }

    #[test]
    fn empty_ciphertext_is_allowed() {
        let mut env = sample();
        env.ciphertext.clear();
        let decoded = Envelope::try_from(EncodedEnvelope::from(&env)).unwrap();
        assert!(decoded.ciphertext.is_empty());
    }
}
