use blowfish::Blowfish as BlowfishCipher;
use ecb::cipher::block_padding::Pkcs7;
use ecb::cipher::{BlockDecryptMut, BlockEncryptMut, KeyInit};
use tracing::debug;

use crate::error::{CryptoError, Result};

/// Blowfish block size in bytes.
pub const BLOWFISH_BLOCK_SIZE: usize = 8;

/// Shortest and longest keys the key schedule accepts (32 and 448 bits).
pub const MIN_BLOWFISH_KEY_BYTES: usize = 4;
pub const MAX_BLOWFISH_KEY_BYTES: usize = 56;

type Encryptor = ecb::Encryptor<BlowfishCipher>;
type Decryptor = ecb::Decryptor<BlowfishCipher>;

/// Blowfish in ECB mode with PKCS#7 padding, big-endian block layout.
#[derive(Debug, Default, Clone, Copy)]
pub struct BlowfishTransform;

impl BlowfishTransform {
    pub fn encrypt(plaintext: &[u8], key: &[u8]) -> Result<Vec<u8>> {
        check_key(key)?;
        let encryptor = Encryptor::new_from_slice(key).map_err(|_| key_error(key))?;
        debug!(plaintext_len = plaintext.len(), key_bits = key.len() * 8, "blowfish encrypt");
        Ok(encryptor.encrypt_padded_vec_mut::<Pkcs7>(plaintext))
    }

    pub fn decrypt(ciphertext: &[u8], key: &[u8]) -> Result<Vec<u8>> {
        check_key(key)?;
        if ciphertext.is_empty() || ciphertext.len() % BLOWFISH_BLOCK_SIZE != 0 {
            return Err(CryptoError::Cryptographic(format!(
                "ciphertext length {} is not a positive multiple of {BLOWFISH_BLOCK_SIZE}",
                ciphertext.len()
            )));
        }
        let decryptor = Decryptor::new_from_slice(key).map_err(|_| key_error(key))?;
        debug!(ciphertext_len = ciphertext.len(), key_bits = key.len() * 8, "blowfish decrypt");
        decryptor
            .decrypt_padded_vec_mut::<Pkcs7>(ciphertext)
            .map_err(|_| {
                CryptoError::Cryptographic("padding is invalid or the key is wrong".to_string())
            })
    }
}

pub fn is_valid_blowfish_key_size(byte_length: usize) -> bool {
    (MIN_BLOWFISH_KEY_BYTES..=MAX_BLOWFISH_KEY_BYTES).contains(&byte_length)
}

fn check_key(key: &[u8]) -> Result<()> {
    if is_valid_blowfish_key_size(key.len()) {
        Ok(())
    } else {
        Err(key_error(key))
    }
}

fn key_error(key: &[u8]) -> CryptoError {
    CryptoError::InvalidArgument(format!(
        "Blowfish key must be {MIN_BLOWFISH_KEY_BYTES} to {MAX_BLOWFISH_KEY_BYTES} bytes, got {}",
        key.len()
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoding::bytes_to_hex;

    #[test]
    fn matches_known_answer_for_zero_key() {
        // Eric Young's reference vector: all-zero key and block
        let ciphertext = BlowfishTransform::encrypt(&[0; 8], &[0; 8]).unwrap();
        assert_eq!(ciphertext.len(), 16);
        assert_eq!(bytes_to_hex(&ciphertext[..8]), "4ef997456198dd78");
    }

    #[test]
    fn matches_known_answer_for_all_ones_key() {
        let ciphertext = BlowfishTransform::encrypt(&[0xff; 8], &[0xff; 8]).unwrap();
        assert_eq!(bytes_to_hex(&ciphertext[..8]), "51866fd5b85ecb8a");
    }

    #[test]
    fn padding_always_adds_bytes() {
        let key = [7u8; 16];
        assert_eq!(BlowfishTransform::encrypt(b"", &key).unwrap().len(), 8);
        assert_eq!(BlowfishTransform::encrypt(b"1234567", &key).unwrap().len(), 8);
        assert_eq!(BlowfishTransform::encrypt(b"12345678", &key).unwrap().len(), 16);
    }

    #[test]
    fn round_trip_at_key_size_bounds() {
        for len in [MIN_BLOWFISH_KEY_BYTES, 16, MAX_BLOWFISH_KEY_BYTES] {
            let key = vec![0x3c; len];
            let ciphertext = BlowfishTransform::encrypt(b"Hello, Blowfish!", &key).unwrap();
            let plain = BlowfishTransform::decrypt(&ciphertext, &key).unwrap();
            assert_eq!(plain, b"Hello, Blowfish!");
        }
    }

    #[test]
    fn key_outside_range_is_an_argument_error() {
        for len in [0, 3, 57, 64] {
            assert!(matches!(
                BlowfishTransform::encrypt(b"data", &vec![1; len]),
                Err(CryptoError::InvalidArgument(_))
            ));
        }
    }

    #[test]
    fn ragged_ciphertext_is_rejected() {
        let key = [1u8; 16];
        for len in [0, 7, 9] {
            assert!(matches!(
                BlowfishTransform::decrypt(&vec![0; len], &key),
                Err(CryptoError::Cryptographic(_))
            ));
        }
    }
}
