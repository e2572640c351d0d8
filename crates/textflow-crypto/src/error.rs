use thiserror::Error;

/// Errors raised by the crypto helpers.
///
/// Messages are shown to users as-is, so they never include key material.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CryptoError {
    #[error("Input text cannot be empty.")]
    EmptyInput,

    #[error("Secret phrase cannot be empty.")]
    EmptySecret,

    #[error("Encrypted data cannot be empty.")]
    EmptyToken,

    #[error("Invalid encrypted data format. Expected salt:iv:ciphertext.")]
    InvalidFormat,

    #[error("Decryption failed. This is often caused by an incorrect secret phrase or corrupted data.")]
    DecryptionFailed,

    /// Encryption itself failed; only reachable with a broken cipher setup
    #[error("Encryption failed.")]
    EncryptionFailed,

    #[error("Key size must be a positive multiple of 8 no larger than {max} bits, got {bits}.")]
    InvalidKeySize { bits: usize, max: usize },
}

impl CryptoError {
    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            CryptoError::EmptyInput => "ERR_CRYPTO_EMPTY_INPUT",
            CryptoError::EmptySecret => "ERR_CRYPTO_EMPTY_SECRET",
            CryptoError::EmptyToken => "ERR_CRYPTO_EMPTY_TOKEN",
            CryptoError::InvalidFormat => "ERR_CRYPTO_INVALID_FORMAT",
            CryptoError::DecryptionFailed => "ERR_CRYPTO_DECRYPTION_FAILED",
            CryptoError::EncryptionFailed => "ERR_CRYPTO_ENCRYPTION_FAILED",
            CryptoError::InvalidKeySize { .. } => "ERR_CRYPTO_INVALID_KEY_SIZE",
        }
    }
}

/// Result type for crypto operations
pub type CryptoResult<T> = Result<T, CryptoError>;
