use serde::{Deserialize, Serialize};

use crate::encoding::TextEncoding;

// Parameter and result models for AES and RSA operations

// Results that collect errors instead of failing
pub trait ErrorReport {
    fn errors(&self) -> &[String];

    fn errors_mut(&mut self) -> &mut Vec<String>;

    fn set_has_error(&mut self);

    fn add_error(&mut self, error: impl Into<String>) {
        self.set_has_error();
        self.errors_mut().push(error.into());
    }

    fn has_errors(&self) -> bool {
        !self.errors().is_empty()
    }
}

macro_rules! impl_error_report {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl ErrorReport for $ty {
                fn errors(&self) -> &[String] {
                    &self.errors
                }

                fn errors_mut(&mut self) -> &mut Vec<String> {
                    &mut self.errors
                }

                fn set_has_error(&mut self) {
                    self.has_error = true;
                }
            }
        )+
    };
}

// Where the IV for an encryption comes from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IvSource {
    Supplied(String),
    Generated,
}

// Model for AES encryption request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EncryptionParameters {
    pub data: String,
    pub secret_key: String,
    pub iv: IvSource,
}

impl EncryptionParameters {
    pub fn new(
        data: impl Into<String>,
        secret_key: impl Into<String>,
        iv: impl Into<String>,
    ) -> Self {
        Self {
            data: data.into(),
            secret_key: secret_key.into(),
            iv: IvSource::Supplied(iv.into()),
        }
    }

    pub fn with_generated_iv(data: impl Into<String>, secret_key: impl Into<String>) -> Self {
        Self {
            data: data.into(),
            secret_key: secret_key.into(),
            iv: IvSource::Generated,
        }
    }
}

// Model for AES decryption request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecryptionParameters {
    pub data: String,
    pub secret_key: String,
    pub iv: String,
}

impl DecryptionParameters {
    pub fn new(
        data: impl Into<String>,
        secret_key: impl Into<String>,
        iv: impl Into<String>,
    ) -> Self {
        Self {
            data: data.into(),
            secret_key: secret_key.into(),
            iv: iv.into(),
        }
    }
}

// Model for Blowfish requests: UTF-8 text to encrypt or Base64 ciphertext to decrypt, and a
// Base64 secret key
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlowfishParameters {
    pub data: String,
    pub secret_key: String,
}

impl BlowfishParameters {
    pub fn new(data: impl Into<String>, secret_key: impl Into<String>) -> Self {
        Self {
            data: data.into(),
            secret_key: secret_key.into(),
        }
    }
}

/// How the textual fields of an AES call are encoded.
///
/// `data_encoding` is the rendering of the ciphertext: the output of an encryption and the
/// input of a decryption. Plaintext is always UTF-8 text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AesOptions {
    pub key_encoding: TextEncoding,
    pub iv_encoding: TextEncoding,
    pub data_encoding: TextEncoding,
}

impl AesOptions {
    pub fn hex() -> Self {
        Self {
            key_encoding: TextEncoding::Base64,
            iv_encoding: TextEncoding::Hex,
            data_encoding: TextEncoding::Hex,
        }
    }

    pub fn base64() -> Self {
        Self {
            key_encoding: TextEncoding::Base64,
            iv_encoding: TextEncoding::Base64,
            data_encoding: TextEncoding::Base64,
        }
    }

    /// The secret is reinterpreted as raw UTF-8 key bytes; no key derivation takes place.
    pub fn generated_iv() -> Self {
        Self {
            key_encoding: TextEncoding::Utf8,
            iv_encoding: TextEncoding::Base64,
            data_encoding: TextEncoding::Base64,
        }
    }

    pub fn with_key_encoding(mut self, encoding: TextEncoding) -> Self {
        self.key_encoding = encoding;
        self
    }

    pub fn with_iv_encoding(mut self, encoding: TextEncoding) -> Self {
        self.iv_encoding = encoding;
        self
    }

    pub fn with_data_encoding(mut self, encoding: TextEncoding) -> Self {
        self.data_encoding = encoding;
        self
    }
}

impl Default for AesOptions {
    fn default() -> Self {
        Self::base64()
    }
}

// Model for AES and Blowfish encryption response; `iv` stays empty for Blowfish
#[derive(Debug, Clone, Default, Serialize)]
pub struct EncryptionData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub encrypted_data: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iv: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secret_key: Option<String>,
    pub has_error: bool,
    pub errors: Vec<String>,
}

// Model for AES and Blowfish decryption response
#[derive(Debug, Clone, Default, Serialize)]
pub struct DecryptionData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub decrypted_data: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iv: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secret_key: Option<String>,
    pub has_error: bool,
    pub errors: Vec<String>,
}

// Ciphertext plus the IV generated for it, returned by the strict generated-IV path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AesData {
    pub data: Vec<u8>,
    pub iv: Vec<u8>,
}

// Model for a generated RSA key pair, both halves PEM encoded
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RsaKeyPair {
    pub public_key: String,
    pub private_key: String,
}

// Model for RSA encryption request
#[derive(Debug, Clone, Deserialize)]
pub struct RsaEncryptionParameters {
    pub data_to_encrypt: String,
    pub public_key: String,
}

// Model for RSA decryption request
#[derive(Debug, Clone, Deserialize)]
pub struct RsaDecryptionParameters {
    pub data_to_decrypt: Vec<u8>,
    pub private_key: String,
}

// Model for RSA encryption response
#[derive(Debug, Clone, Default, Serialize)]
pub struct RsaEncryptionResult {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub encrypted_data: Option<Vec<u8>>,
    pub has_error: bool,
    pub errors: Vec<String>,
}

// Model for RSA decryption response
#[derive(Debug, Clone, Default, Serialize)]
pub struct RsaDecryptionResult {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub decrypted_data: Option<String>,
    pub has_error: bool,
    pub errors: Vec<String>,
}

impl_error_report!(
    EncryptionData,
    DecryptionData,
    RsaEncryptionResult,
    RsaDecryptionResult,
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_error_sets_flag_and_keeps_order() {
        let mut result = EncryptionData::default();
        assert!(!result.has_error);
        result.add_error("first");
        result.add_error("second");
        assert!(result.has_error);
        assert!(result.has_errors());
        assert_eq!(result.errors, vec!["first", "second"]);
    }

    #[test]
    fn failed_results_serialize_without_payload() {
        let mut result = DecryptionData::default();
        result.add_error("IV: not a valid base64 string");
        let json = serde_json::to_value(&result).unwrap();
        assert!(json.get("decrypted_data").is_none());
        assert_eq!(json["has_error"], true);
    }

    #[test]
    fn presets_pick_expected_encodings() {
        assert_eq!(AesOptions::hex().data_encoding, TextEncoding::Hex);
        assert_eq!(AesOptions::base64().iv_encoding, TextEncoding::Base64);
        assert_eq!(AesOptions::generated_iv().key_encoding, TextEncoding::Utf8);
        let custom = AesOptions::hex().with_key_encoding(TextEncoding::Hex);
        assert_eq!(custom.key_encoding, TextEncoding::Hex);
    }
}
