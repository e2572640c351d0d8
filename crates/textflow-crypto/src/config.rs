//! Key derivation settings
//!
//! Defaults match tokens produced by earlier releases; changing them only
//! affects tokens created afterwards, since salt is stored in the token but
//! the iteration count is not.

use serde::{Deserialize, Serialize};
use std::env;
use tracing::warn;

/// Environment variable overriding the PBKDF2 iteration count
pub const ITERATIONS_ENV: &str = "TEXTFLOW_PBKDF2_ITERATIONS";

/// Environment variable overriding the salt length in bytes
pub const SALT_LEN_ENV: &str = "TEXTFLOW_SALT_LEN";

/// Crypto configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CryptoConfig {
    /// PBKDF2-HMAC-SHA256 rounds
    #[serde(default = "default_iterations")]
    pub pbkdf2_iterations: u32,

    /// Random salt bytes generated per encryption
    #[serde(default = "default_salt_len")]
    pub salt_len: usize,
}

fn default_iterations() -> u32 {
    100_000
}

fn default_salt_len() -> usize {
    16
}

impl Default for CryptoConfig {
    fn default() -> Self {
        Self {
            pbkdf2_iterations: default_iterations(),
            salt_len: default_salt_len(),
        }
    }
}

impl CryptoConfig {
    /// Load configuration from environment variables
    pub fn load() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(iterations) = lookup(ITERATIONS_ENV) {
            match iterations.parse::<u32>() {
                Ok(rounds) if rounds > 0 => config.pbkdf2_iterations = rounds,
                _ => warn!("Invalid {} value: {}", ITERATIONS_ENV, iterations),
            }
        }

        if let Some(salt_len) = lookup(SALT_LEN_ENV) {
            match salt_len.parse::<usize>() {
                Ok(len) if len > 0 => config.salt_len = len,
                _ => warn!("Invalid {} value: {}", SALT_LEN_ENV, salt_len),
            }
        }

        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = CryptoConfig::from_lookup(|_| None);
        assert_eq!(config, CryptoConfig::default());
        assert_eq!(config.pbkdf2_iterations, 100_000);
        assert_eq!(config.salt_len, 16);
    }

    #[test]
    fn test_overrides() {
        let config = CryptoConfig::from_lookup(lookup_from(&[
            (ITERATIONS_ENV, "1000"),
            (SALT_LEN_ENV, "32"),
        ]));
        assert_eq!(config.pbkdf2_iterations, 1000);
        assert_eq!(config.salt_len, 32);
    }

    #[test]
    fn test_invalid_values_are_ignored() {
        let config = CryptoConfig::from_lookup(lookup_from(&[
            (ITERATIONS_ENV, "lots"),
            (SALT_LEN_ENV, "0"),
        ]));
        assert_eq!(config, CryptoConfig::default());
    }
}
