//! Blowfish entry points: UTF-8 text in, Base64 ciphertext out.
//!
//! Mirrors the two AES families. `encrypt_str`/`decrypt_str` take raw key bytes and propagate
//! errors; `encrypt`/`decrypt` take a Base64 secret and collect problems in the result.

use tracing::{debug, warn};

use super::transform::{BlowfishTransform, is_valid_blowfish_key_size};
use crate::encoding::{base64_to_bytes, bytes_to_base64, bytes_to_utf8, utf8_to_bytes};
use crate::error::Result;
use crate::models::{BlowfishParameters, DecryptionData, EncryptionData, ErrorReport};
use crate::validation::{is_valid_base64, require_non_empty};

#[derive(Debug, Default, Clone, Copy)]
pub struct Blowfish;

impl Blowfish {
    pub fn encrypt_str(&self, plain_text: &str, key: &[u8]) -> Result<String> {
        require_non_empty("Data", plain_text)?;
        let ciphertext = BlowfishTransform::encrypt(&utf8_to_bytes(plain_text), key)?;
        Ok(bytes_to_base64(&ciphertext))
    }

    /// `cipher_text` is the Base64 output of [`Blowfish::encrypt_str`].
    pub fn decrypt_str(&self, cipher_text: &str, key: &[u8]) -> Result<String> {
        require_non_empty("Data", cipher_text)?;
        let plain = BlowfishTransform::decrypt(&base64_to_bytes(cipher_text)?, key)?;
        bytes_to_utf8(&plain)
    }

    pub fn encrypt(&self, params: &BlowfishParameters) -> EncryptionData {
        let mut result = EncryptionData::default();

        if let Err(e) = require_non_empty("Data", &params.data) {
            result.add_error(e.to_string());
        }
        let key = decode_key(&mut result, &params.secret_key);
        if result.has_error {
            warn!(errors = result.errors.len(), "blowfish encrypt rejected");
            return result;
        }
        let Some(key) = key else {
            return result;
        };

        debug!(data_len = params.data.len(), "blowfish structured encrypt");
        match BlowfishTransform::encrypt(&utf8_to_bytes(&params.data), &key) {
            Ok(ciphertext) => {
                result.encrypted_data = Some(bytes_to_base64(&ciphertext));
                result.secret_key = Some(params.secret_key.clone());
            }
            Err(e) => result.add_error(format!("Encryption error: {e}")),
        }
        result
    }

    pub fn decrypt(&self, params: &BlowfishParameters) -> DecryptionData {
        let mut result = DecryptionData::default();

        let ciphertext = if let Err(e) = require_non_empty("Data", &params.data) {
            result.add_error(e.to_string());
            None
        } else if is_valid_base64(&params.data) {
            base64_to_bytes(&params.data).ok()
        } else {
            result.add_error("Data is not a valid Base64 string");
            None
        };
        let key = decode_key(&mut result, &params.secret_key);
        if result.has_error {
            warn!(errors = result.errors.len(), "blowfish decrypt rejected");
            return result;
        }
        let (Some(ciphertext), Some(key)) = (ciphertext, key) else {
            return result;
        };

        let plain = match BlowfishTransform::decrypt(&ciphertext, &key) {
            Ok(plain) => plain,
            Err(e) => {
                result.add_error(format!("Decryption error: {e}"));
                return result;
            }
        };
        match bytes_to_utf8(&plain) {
            Ok(text) => {
                result.decrypted_data = Some(text);
                result.secret_key = Some(params.secret_key.clone());
            }
            Err(_) => result.add_error("Decrypted data is not valid UTF-8"),
        }
        result
    }
}

fn decode_key<R: ErrorReport>(result: &mut R, secret_key: &str) -> Option<Vec<u8>> {
    if let Err(e) = require_non_empty("SecretKey", secret_key) {
        result.add_error(e.to_string());
        return None;
    }
    let Ok(key) = base64_to_bytes(secret_key) else {
        result.add_error("SecretKey is not a valid Base64 string");
        return None;
    };
    if !is_valid_blowfish_key_size(key.len()) {
        result.add_error(format!("SecretKey must decode to 4 to 56 bytes, got {}", key.len()));
        return None;
    }
    Some(key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CryptoError;

    fn params(data: &str, key: &[u8]) -> BlowfishParameters {
        BlowfishParameters::new(data, bytes_to_base64(key))
    }

    #[test]
    fn strict_round_trip_is_base64() {
        let blowfish = Blowfish;
        let key = [0x5a; 16];
        let encrypted = blowfish.encrypt_str("Hello, Blowfish!", &key).unwrap();
        assert_eq!(base64_to_bytes(&encrypted).unwrap().len(), 24);
        assert_eq!(blowfish.decrypt_str(&encrypted, &key).unwrap(), "Hello, Blowfish!");
    }

    #[test]
    fn strict_calls_reject_empty_text_and_bad_keys() {
        let blowfish = Blowfish;
        assert!(matches!(
            blowfish.encrypt_str("", &[1; 16]),
            Err(CryptoError::MissingField("Data"))
        ));
        assert!(matches!(
            blowfish.encrypt_str("hi", &[1; 2]),
            Err(CryptoError::InvalidArgument(_))
        ));
        assert!(matches!(
            blowfish.decrypt_str("not base64!", &[1; 16]),
            Err(CryptoError::Format(_))
        ));
    }

    #[test]
    fn structured_round_trip_keeps_whitespace() {
        let blowfish = Blowfish;
        let key = [0x11; 56];
        let encrypted = blowfish.encrypt(&params("  \n", &key));
        assert!(!encrypted.has_error, "{:?}", encrypted.errors);
        assert!(encrypted.iv.is_none());

        let decrypted = blowfish.decrypt(&params(&encrypted.encrypted_data.unwrap(), &key));
        assert!(!decrypted.has_error, "{:?}", decrypted.errors);
        assert_eq!(decrypted.decrypted_data.as_deref(), Some("  \n"));
    }

    #[test]
    fn structured_encrypt_collects_every_problem() {
        let result = Blowfish.encrypt(&BlowfishParameters::new("", "%%%"));
        assert!(result.encrypted_data.is_none());
        assert_eq!(
            result.errors,
            vec![
                "Data cannot be null or empty",
                "SecretKey is not a valid Base64 string"
            ]
        );
    }

    #[test]
    fn empty_ciphertext_is_missing_not_malformed() {
        let result = Blowfish.decrypt(&params("", &[1; 16]));
        assert_eq!(result.errors, vec!["Data cannot be null or empty"]);
    }

    #[test]
    fn oversized_key_is_reported_without_echoing_it() {
        let secret = bytes_to_base64(&[9; 57]);
        let result = Blowfish.encrypt(&BlowfishParameters::new("data", secret.clone()));
        assert_eq!(result.errors, vec!["SecretKey must decode to 4 to 56 bytes, got 57"]);
        assert!(result.errors.iter().all(|e| !e.contains(&secret)));
    }

    #[test]
    fn wrong_key_never_returns_the_plaintext() {
        let blowfish = Blowfish;
        let encrypted = blowfish.encrypt(&params("attack at dawn", &[1; 16]));
        let decrypted = blowfish.decrypt(&params(&encrypted.encrypted_data.unwrap(), &[2; 16]));
        assert_ne!(decrypted.decrypted_data.as_deref(), Some("attack at dawn"));
    }

    #[test]
    fn truncated_ciphertext_is_a_decryption_error() {
        let ciphertext = bytes_to_base64(&[0u8; 12]);
        let result = Blowfish.decrypt(&params(&ciphertext, &[1; 16]));
        assert!(result.has_error);
        assert!(result.errors[0].starts_with("Decryption error"));
    }
}
