use pretty_assertions::assert_eq;
use textflow_crypto::{decrypt, encrypt, hash, Cipher, CryptoConfig, CryptoError};
use textflow_test_utils::init_test_tracing;

#[test]
fn test_round_trip_with_default_config() {
    init_test_tracing();
    let token = encrypt("Grüße, 世界!", "s3cret").unwrap();
    assert_eq!(decrypt(&token, "s3cret").unwrap(), "Grüße, 世界!");
}

#[test]
fn test_each_encryption_is_fresh() {
    let cipher = Cipher::default();
    let first = cipher.encrypt("same text", "pw").unwrap();
    let second = cipher.encrypt("same text", "pw").unwrap();
    assert_ne!(first, second);
}

#[test]
fn test_wrong_secret_fails() {
    let cipher = Cipher::default();
    let token = cipher.encrypt("hello", "right").unwrap();
    let err = cipher.decrypt(&token, "wrong").unwrap_err();
    assert_eq!(err, CryptoError::DecryptionFailed);
    assert_eq!(
        err.to_string(),
        "Decryption failed. This is often caused by an incorrect secret phrase or corrupted data."
    );
}

#[test]
fn test_empty_arguments() {
    assert_eq!(
        encrypt("", "pw").unwrap_err().to_string(),
        "Input text cannot be empty."
    );
    assert_eq!(
        encrypt("text", "").unwrap_err().to_string(),
        "Secret phrase cannot be empty."
    );
    assert_eq!(
        decrypt("", "pw").unwrap_err().to_string(),
        "Encrypted data cannot be empty."
    );
    assert_eq!(
        decrypt("a:b:c", "").unwrap_err().to_string(),
        "Secret phrase cannot be empty."
    );
    assert_eq!(
        hash("").unwrap_err().to_string(),
        "Input text cannot be empty."
    );
}

#[test]
fn test_malformed_tokens() {
    let cipher = Cipher::new(CryptoConfig {
        pbkdf2_iterations: 1_000,
        ..CryptoConfig::default()
    });

    for token in ["no-separators", "a:b", "a:b:c:d"] {
        let err = cipher.decrypt(token, "pw").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid encrypted data format. Expected salt:iv:ciphertext."
        );
        assert_eq!(err.error_code(), "ERR_CRYPTO_INVALID_FORMAT");
    }

    assert_eq!(
        cipher.decrypt("!!:??:**", "pw"),
        Err(CryptoError::DecryptionFailed)
    );
}

#[test]
fn test_tampered_ciphertext_fails() {
    let cipher = Cipher::default();
    let token = cipher.encrypt("hello world", "pw").unwrap();
    let mut parts: Vec<String> = token.split(':').map(str::to_string).collect();

    let mut bytes = base64::decode(&parts[2]).unwrap();
    bytes[0] ^= 0x01;
    parts[2] = base64::encode(&bytes);

    assert_eq!(
        cipher.decrypt(&parts.join(":"), "pw"),
        Err(CryptoError::DecryptionFailed)
    );
}

#[test]
fn test_hash_is_hex_sha256() {
    assert_eq!(
        hash("hello").unwrap(),
        "2cf24dba5fb0a30e26e83b2ac5b9e29e1b161e5c1fa7425e73043362938b9824"
    );
}
