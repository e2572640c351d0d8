use rand::RngCore;

use crate::error::{CryptoError, CryptoResult};

/// Largest key accepted by `random_key`
pub const MAX_KEY_BITS: usize = 4096;

/// Fill a buffer of `len` bytes from the thread-local CSPRNG
pub(crate) fn random_bytes(len: usize) -> Vec<u8> {
    let mut bytes = vec![0u8; len];
    rand::thread_rng().fill_bytes(&mut bytes);
    bytes
}

/// Generate `bits` of random key material, base64 encoded
pub fn random_key(bits: usize) -> CryptoResult<String> {
    if bits == 0 || bits % 8 != 0 || bits > MAX_KEY_BITS {
        return Err(CryptoError::InvalidKeySize {
            bits,
            max: MAX_KEY_BITS,
        });
    }
    Ok(base64::encode(random_bytes(bits / 8)))
}
