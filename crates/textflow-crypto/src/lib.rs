//! # Textflow Crypto
//!
//! Hashing, passphrase encryption and key generation helpers that sit next
//! to the pipeline transforms. Everything here is synchronous and stateless.
//!
//! ```
//! let token = textflow_crypto::encrypt("meet at noon", "correct horse").unwrap();
//! let text = textflow_crypto::decrypt(&token, "correct horse").unwrap();
//! assert_eq!(text, "meet at noon");
//! ```

#![forbid(unsafe_code)]

mod cipher;
mod error;
mod hash;
mod keys;

pub mod config;

pub use cipher::{Cipher, NONCE_LEN};
pub use config::CryptoConfig;
pub use error::{CryptoError, CryptoResult};
pub use hash::hash;
pub use keys::{random_key, MAX_KEY_BITS};

/// Encrypt with the environment-derived configuration
pub fn encrypt(text: &str, secret: &str) -> CryptoResult<String> {
    Cipher::from_env().encrypt(text, secret)
}

/// Decrypt with the environment-derived configuration
pub fn decrypt(token: &str, secret: &str) -> CryptoResult<String> {
    Cipher::from_env().decrypt(token, secret)
}
