use sha2::{Digest, Sha256};

use crate::error::{CryptoError, CryptoResult};

/// SHA-256 of the UTF-8 text as lowercase hex
pub fn hash(text: &str) -> CryptoResult<String> {
    if text.is_empty() {
        return Err(CryptoError::EmptyInput);
    }
    let mut hasher = Sha256::new();
    hasher.update(text.as_bytes());
    Ok(hex::encode(hasher.finalize()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_digest() {
        assert_eq!(
            hash("abc").unwrap(),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(hash(""), Err(CryptoError::EmptyInput));
    }
}
