//! Random key material and RSA key pairs.

use std::sync::{Arc, OnceLock};

use openssl::rsa::Rsa;

use crate::encoding::{bytes_to_base64, bytes_to_hex};
use crate::error::{CryptoError, Result};
use crate::models::RsaKeyPair;
use crate::validation::AES_BLOCK_SIZE;

/// Bounds for Blowfish key sizes, in bits. Keys grow in whole bytes.
pub const MIN_BLOWFISH_KEY_BITS: u32 = 32;
pub const MAX_BLOWFISH_KEY_BITS: u32 = 448;

/// Smallest modulus accepted for generated key pairs.
pub const MIN_RSA_KEY_BITS: u32 = 512;

/// Source of cryptographically secure randomness. Implementations must be usable from many
/// threads at once.
pub trait SecureRandom: Send + Sync {
    fn fill(&self, buf: &mut [u8]) -> Result<()>;
}

/// OpenSSL's CSPRNG.
#[derive(Debug, Default, Clone, Copy)]
pub struct OsRandom;

impl SecureRandom for OsRandom {
    fn fill(&self, buf: &mut [u8]) -> Result<()> {
        openssl::rand::rand_bytes(buf)?;
        Ok(())
    }
}

static SHARED_RANDOM: OnceLock<Arc<dyn SecureRandom>> = OnceLock::new();

/// Process-wide handle, created on first use and reused afterwards.
pub fn shared_random() -> Arc<dyn SecureRandom> {
    SHARED_RANDOM
        .get_or_init(|| Arc::new(OsRandom) as Arc<dyn SecureRandom>)
        .clone()
}

#[derive(Clone)]
pub struct KeyGenerator {
    rng: Arc<dyn SecureRandom>,
}

impl Default for KeyGenerator {
    fn default() -> Self {
        Self::new(shared_random())
    }
}

impl std::fmt::Debug for KeyGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyGenerator").finish_non_exhaustive()
    }
}

impl KeyGenerator {
    pub fn new(rng: Arc<dyn SecureRandom>) -> Self {
        Self { rng }
    }

    pub fn random_bytes(&self, length: usize) -> Result<Vec<u8>> {
        if length == 0 {
            return Err(CryptoError::InvalidArgument(
                "random byte length must be positive".to_string(),
            ));
        }
        let mut buf = vec![0u8; length];
        self.rng.fill(&mut buf)?;
        Ok(buf)
    }

    pub fn generate_aes_key(&self, bits: u32) -> Result<Vec<u8>> {
        match bits {
            128 | 192 | 256 => self.random_bytes(bits as usize / 8),
            other => Err(CryptoError::InvalidArgument(format!(
                "unsupported AES key size {other} (expected 128, 192 or 256)"
            ))),
        }
    }

    /// Base64 rendering of a fresh AES key.
    pub fn generate_aes_secret_key(&self, bits: u32) -> Result<String> {
        Ok(bytes_to_base64(&self.generate_aes_key(bits)?))
    }

    pub fn generate_blowfish_key(&self, bits: u32) -> Result<Vec<u8>> {
        if !(MIN_BLOWFISH_KEY_BITS..=MAX_BLOWFISH_KEY_BITS).contains(&bits) || bits % 8 != 0 {
            return Err(CryptoError::InvalidArgument(format!(
                "unsupported Blowfish key size {bits} (expected a multiple of 8 from \
                 {MIN_BLOWFISH_KEY_BITS} to {MAX_BLOWFISH_KEY_BITS})"
            )));
        }
        self.random_bytes(bits as usize / 8)
    }

    /// Base64 rendering of a fresh Blowfish key, as taken by [`crate::Blowfish::encrypt`].
    pub fn generate_blowfish_secret_key(&self, bits: u32) -> Result<String> {
        Ok(bytes_to_base64(&self.generate_blowfish_key(bits)?))
    }

    pub fn generate_iv(&self) -> Result<Vec<u8>> {
        self.random_bytes(AES_BLOCK_SIZE)
    }

    pub fn generate_hex_iv(&self) -> Result<String> {
        Ok(bytes_to_hex(&self.generate_iv()?))
    }

    pub fn generate_base64_iv(&self) -> Result<String> {
        Ok(bytes_to_base64(&self.generate_iv()?))
    }
}

/// Generates a PEM encoded key pair. CPU-bound; async callers should go through
/// [`crate::rsa::Rsa::generate_key_pair`].
pub fn generate_rsa_key_pair(modulus_bits: u32) -> Result<RsaKeyPair> {
    if modulus_bits < MIN_RSA_KEY_BITS {
        return Err(CryptoError::InvalidArgument(format!(
            "RSA modulus of {modulus_bits} bits is below the {MIN_RSA_KEY_BITS}-bit minimum"
        )));
    }

    let rsa = Rsa::generate(modulus_bits)?;
    let public_key = String::from_utf8(rsa.public_key_to_pem()?)?;
    let private_key = String::from_utf8(rsa.private_key_to_pem()?)?;

    Ok(RsaKeyPair {
        public_key,
        private_key,
    })
}
