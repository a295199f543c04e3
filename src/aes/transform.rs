use openssl::symm::{self, Cipher};
use tracing::debug;

use crate::error::{CryptoError, Result};
use crate::validation::{AES_BLOCK_SIZE, is_valid_aes_key_size};

/// AES in CBC mode with PKCS#7 padding. The only code that touches the block cipher.
#[derive(Debug, Default, Clone, Copy)]
pub struct AesTransform;

impl AesTransform {
    pub fn encrypt(plaintext: &[u8], key: &[u8], iv: &[u8]) -> Result<Vec<u8>> {
        let cipher = cipher_for(key, iv)?;
        debug!(plaintext_len = plaintext.len(), key_bits = key.len() * 8, "aes-cbc encrypt");
        Ok(symm::encrypt(cipher, key, Some(iv), plaintext)?)
    }

    pub fn decrypt(ciphertext: &[u8], key: &[u8], iv: &[u8]) -> Result<Vec<u8>> {
        let cipher = cipher_for(key, iv)?;
        if ciphertext.is_empty() || ciphertext.len() % AES_BLOCK_SIZE != 0 {
            return Err(CryptoError::Cryptographic(format!(
                "ciphertext length {} is not a positive multiple of {AES_BLOCK_SIZE}",
                ciphertext.len()
            )));
        }
        debug!(ciphertext_len = ciphertext.len(), key_bits = key.len() * 8, "aes-cbc decrypt");
        symm::decrypt(cipher, key, Some(iv), ciphertext).map_err(|e| {
            CryptoError::Cryptographic(format!("padding is invalid or the key/IV is wrong ({e})"))
        })
    }

    /// Same as [`AesTransform::encrypt`], run on the blocking pool.
    pub async fn encrypt_async(plaintext: Vec<u8>, key: Vec<u8>, iv: Vec<u8>) -> Result<Vec<u8>> {
        tokio::task::spawn_blocking(move || Self::encrypt(&plaintext, &key, &iv)).await?
    }

    /// Same as [`AesTransform::decrypt`], run on the blocking pool.
    pub async fn decrypt_async(ciphertext: Vec<u8>, key: Vec<u8>, iv: Vec<u8>) -> Result<Vec<u8>> {
        tokio::task::spawn_blocking(move || Self::decrypt(&ciphertext, &key, &iv)).await?
    }
}

fn cipher_for(key: &[u8], iv: &[u8]) -> Result<Cipher> {
    if iv.len() != AES_BLOCK_SIZE {
        return Err(CryptoError::InvalidBlockSize(iv.len()));
    }
    if !is_valid_aes_key_size(key.len()) {
        return Err(CryptoError::InvalidArgument(format!(
            "AES key must be 16, 24 or 32 bytes, got {}",
            key.len()
        )));
    }
    Ok(match key.len() {
        16 => Cipher::aes_128_cbc(),
        24 => Cipher::aes_192_cbc(),
        _ => Cipher::aes_256_cbc(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoding::{bytes_to_hex, hex_to_bytes};

    // NIST SP 800-38A F.2.1, first block
    const KEY: &str = "2b7e151628aed2a6abf7158809cf4f3c";
    const IV: &str = "000102030405060708090a0b0c0d0e0f";
    const PLAIN: &str = "6bc1bee22e409f96e93d7e117393172a";
    const CIPHER_BLOCK: &str = "7649abac8119b246cee98e9b12e9197d";

    #[test]
    fn matches_known_answer_for_first_block() {
        let key = hex_to_bytes(KEY).unwrap();
        let iv = hex_to_bytes(IV).unwrap();
        let ciphertext = AesTransform::encrypt(&hex_to_bytes(PLAIN).unwrap(), &key, &iv).unwrap();
        // one full padding block follows the data block
        assert_eq!(ciphertext.len(), 32);
        assert_eq!(bytes_to_hex(&ciphertext[..16]), CIPHER_BLOCK);
    }

    #[test]
    fn is_deterministic_and_reversible() {
        let key = [7u8; 24];
        let iv = [9u8; 16];
        let a = AesTransform::encrypt(b"same input", &key, &iv).unwrap();
        let b = AesTransform::encrypt(b"same input", &key, &iv).unwrap();
        assert_eq!(a, b);
        assert_eq!(AesTransform::decrypt(&a, &key, &iv).unwrap(), b"same input");
    }

    #[test]
    fn rejects_bad_key_and_iv_lengths() {
        assert!(matches!(
            AesTransform::encrypt(b"x", &[0u8; 20], &[0u8; 16]),
            Err(CryptoError::InvalidArgument(_))
        ));
        assert!(matches!(
            AesTransform::encrypt(b"x", &[0u8; 16], &[0u8; 15]),
            Err(CryptoError::InvalidBlockSize(15))
        ));
        assert!(matches!(
            AesTransform::decrypt(&[0u8; 16], &[0u8; 16], &[0u8; 32]),
            Err(CryptoError::InvalidBlockSize(32))
        ));
    }

    #[test]
    fn truncated_ciphertext_is_a_cryptographic_error() {
        let key = [1u8; 16];
        let iv = [2u8; 16];
        let ciphertext = AesTransform::encrypt(b"hello world", &key, &iv).unwrap();
        assert!(matches!(
            AesTransform::decrypt(&ciphertext[..15], &key, &iv),
            Err(CryptoError::Cryptographic(_))
        ));
        assert!(matches!(
            AesTransform::decrypt(&[], &key, &iv),
            Err(CryptoError::Cryptographic(_))
        ));
    }

    #[tokio::test]
    async fn async_variant_matches_sync() {
        let key = vec![3u8; 32];
        let iv = vec![4u8; 16];
        let sync = AesTransform::encrypt(b"offloaded", &key, &iv).unwrap();
        let offloaded = AesTransform::encrypt_async(b"offloaded".to_vec(), key.clone(), iv.clone())
            .await
            .unwrap();
        assert_eq!(sync, offloaded);
        let plain = AesTransform::decrypt_async(offloaded, key, iv).await.unwrap();
        assert_eq!(plain, b"offloaded");
    }
}
