use lockbox_crypto::CryptoError;

#[test]
fn key_generation_display() {
    let err = CryptoError::KeyGeneration("entropy exhausted".into());
    assert_eq!(err.to_string(), "key generation failed: entropy exhausted");
}

#[test]
fn encryption_display() {
    let err = CryptoError::Encryption("key wrapping failed".into());
    assert_eq!(err.to_string(), "encryption failed: key wrapping failed");
}

#[test]
fn decryption_failures_share_one_message() {
    assert_eq!(CryptoError::KeyUnwrap.to_string(), "decryption failed");
    assert_eq!(CryptoError::AuthenticationFailure.to_string(), "decryption failed");
}

#[test]
fn malformed_envelope_display() {
    let err = CryptoError::MalformedEnvelope("missing field `nonce`".into());
    assert_eq!(err.to_string(), "malformed envelope: missing field `nonce`");
}

#[test]
fn key_encoding_display() {
    let err = CryptoError::KeyEncoding("invalid PKCS#8 private key".into());
    assert_eq!(err.to_string(), "key encoding error: invalid PKCS#8 private key");
}

#[test]
fn is_decryption_failure_only_for_opaque_variants() {
    assert!(CryptoError::KeyUnwrap.is_decryption_failure());
    assert!(CryptoError::AuthenticationFailure.is_decryption_failure());
    assert!(!CryptoError::MalformedEnvelope("x".into()).is_decryption_failure());
    assert!(!CryptoError::Encryption("x".into()).is_decryption_failure());
    assert!(!CryptoError::Encoding("x".into()).is_decryption_failure());
}
