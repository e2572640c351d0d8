use aes_gcm::aead::{Aead, KeyInit};
use aes_gcm::{Aes256Gcm, Nonce};
use pbkdf2::pbkdf2_hmac;
use sha2::Sha256;
use tracing::{debug, info};

use crate::config::CryptoConfig;
use crate::error::{CryptoError, CryptoResult};
use crate::keys::random_bytes;

/// AES-GCM nonce length in bytes
pub const NONCE_LEN: usize = 12;

const KEY_LEN: usize = 32;
const SEPARATOR: char = ':';

/// Passphrase-based AES-256-GCM.
///
/// Tokens have the shape `base64(salt):base64(nonce):base64(ciphertext)`,
/// with the GCM tag appended to the ciphertext.
#[derive(Debug, Clone, Default)]
pub struct Cipher {
    config: CryptoConfig,
}

impl Cipher {
    /// Create a cipher with an explicit configuration
    pub fn new(config: CryptoConfig) -> Self {
        Self { config }
    }

    /// Create a cipher configured from the environment
    pub fn from_env() -> Self {
        Self::new(CryptoConfig::load())
    }

    pub fn config(&self) -> &CryptoConfig {
        &self.config
    }

    fn derive_cipher(&self, secret: &str, salt: &[u8]) -> Result<Aes256Gcm, CryptoError> {
        let mut key = [0u8; KEY_LEN];
        pbkdf2_hmac::<Sha256>(
            secret.as_bytes(),
            salt,
            self.config.pbkdf2_iterations,
            &mut key,
        );
        Aes256Gcm::new_from_slice(&key).map_err(|_| CryptoError::EncryptionFailed)
    }

    /// Encrypt `text` under a key derived from `secret` and a fresh salt
    pub fn encrypt(&self, text: &str, secret: &str) -> CryptoResult<String> {
        if text.is_empty() {
            return Err(CryptoError::EmptyInput);
        }
        if secret.is_empty() {
            return Err(CryptoError::EmptySecret);
        }

        let salt = random_bytes(self.config.salt_len);
        let nonce = random_bytes(NONCE_LEN);
        let cipher = self.derive_cipher(secret, &salt)?;
        let ciphertext = cipher
            .encrypt(Nonce::from_slice(&nonce), text.as_bytes())
            .map_err(|_| CryptoError::EncryptionFailed)?;

        info!(bytes = text.len(), "Encrypted text");
        Ok(format!(
            "{}{sep}{}{sep}{}",
            base64::encode(&salt),
            base64::encode(&nonce),
            base64::encode(&ciphertext),
            sep = SEPARATOR
        ))
    }

    /// Decrypt a token produced by `encrypt`
    pub fn decrypt(&self, token: &str, secret: &str) -> CryptoResult<String> {
        if token.is_empty() {
            return Err(CryptoError::EmptyToken);
        }
        if secret.is_empty() {
            return Err(CryptoError::EmptySecret);
        }

        let parts: Vec<&str> = token.split(SEPARATOR).collect();
        let [salt, nonce, ciphertext] = parts.as_slice() else {
            return Err(CryptoError::InvalidFormat);
        };

        let salt = decode_part(salt)?;
        let nonce = decode_part(nonce)?;
        let ciphertext = decode_part(ciphertext)?;
        if nonce.len() != NONCE_LEN {
            debug!(len = nonce.len(), "Rejected nonce with unexpected length");
            return Err(CryptoError::DecryptionFailed);
        }

        let plaintext = self
            .derive_cipher(secret, &salt)?
            .decrypt(Nonce::from_slice(&nonce), ciphertext.as_slice())
            .map_err(|_| CryptoError::DecryptionFailed)?;

        let text = String::from_utf8(plaintext).map_err(|_| CryptoError::DecryptionFailed)?;
        info!(bytes = text.len(), "Decrypted text");
        Ok(text)
    }
}

fn decode_part(part: &str) -> CryptoResult<Vec<u8>> {
    base64::decode(part).map_err(|_| CryptoError::DecryptionFailed)
}
