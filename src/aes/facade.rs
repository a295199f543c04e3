//! Public AES entry points.
//!
//! Two families share the single [`AesTransform`] core:
//!
//! * strict: byte and string overloads returning [`Result`], propagating `MissingField`,
//!   `Format` and `Cryptographic` errors to the caller;
//! * structured: parameter-object calls returning [`EncryptionData`] / [`DecryptionData`] that
//!   never fail, collecting every detected problem in `errors` instead.

use tracing::{debug, warn};

use super::transform::AesTransform;
use crate::encoding::{
    TextEncoding, bytes_to_base64, bytes_to_hex, bytes_to_utf8, hex_to_bytes, utf8_to_bytes,
};
use crate::error::{CryptoError, Result};
use crate::keys::KeyGenerator;
use crate::models::{
    AesData, AesOptions, DecryptionData, DecryptionParameters, EncryptionData,
    EncryptionParameters, ErrorReport, IvSource,
};
use crate::validation::{
    is_valid_aes_block_size, is_valid_aes_key_size, is_valid_encoding, require_non_empty,
};

#[derive(Debug, Clone, Default)]
pub struct Aes {
    keys: KeyGenerator,
}

impl Aes {
    pub fn new(keys: KeyGenerator) -> Self {
        Self { keys }
    }

    // ---- strict family ----

    /// Raw pass-through, no validation.
    pub fn encrypt_bytes(&self, data: &[u8], key: &[u8], iv: &[u8]) -> Result<Vec<u8>> {
        AesTransform::encrypt(data, key, iv)
    }

    pub fn decrypt_bytes(&self, data: &[u8], key: &[u8], iv: &[u8]) -> Result<Vec<u8>> {
        AesTransform::decrypt(data, key, iv)
    }

    pub fn encrypt_bytes_to_hex(&self, data: &[u8], key: &[u8], iv: &[u8]) -> Result<String> {
        Ok(bytes_to_hex(&self.encrypt_bytes(data, key, iv)?))
    }

    pub fn encrypt_bytes_to_base64(&self, data: &[u8], key: &[u8], iv: &[u8]) -> Result<String> {
        Ok(bytes_to_base64(&self.encrypt_bytes(data, key, iv)?))
    }

    /// Fails with `Format` whenever the ciphertext is not valid UTF-8, which is the common case.
    pub fn encrypt_bytes_to_string(&self, data: &[u8], key: &[u8], iv: &[u8]) -> Result<String> {
        bytes_to_utf8(&self.encrypt_bytes(data, key, iv)?)
    }

    /// `data` is hex; `secret_key` and `iv` are taken as raw UTF-8 bytes.
    pub fn encrypt_str(&self, data: &str, secret_key: &str, iv: &str) -> Result<Vec<u8>> {
        require_non_empty("Data", data)?;
        require_non_empty("SecretKey", secret_key)?;
        require_non_empty("IV", iv)?;

        AesTransform::encrypt(
            &hex_to_bytes(data)?,
            &utf8_to_bytes(secret_key),
            &utf8_to_bytes(iv),
        )
    }

    /// Inverse of [`Aes::encrypt_str`]; `data` is the hex rendering of the ciphertext.
    pub fn decrypt_str(&self, data: &str, secret_key: &str, iv: &str) -> Result<Vec<u8>> {
        require_non_empty("Data", data)?;
        require_non_empty("SecretKey", secret_key)?;
        require_non_empty("IV", iv)?;

        AesTransform::decrypt(
            &hex_to_bytes(data)?,
            &utf8_to_bytes(secret_key),
            &utf8_to_bytes(iv),
        )
    }

    /// Like [`Aes::encrypt_str`] with a fresh 16-byte IV, returned alongside the ciphertext.
    pub fn encrypt_str_with_generated_iv(&self, data: &str, secret_key: &str) -> Result<AesData> {
        require_non_empty("Data", data)?;
        require_non_empty("SecretKey", secret_key)?;

        let iv = self.keys.generate_iv()?;
        let data = AesTransform::encrypt(&hex_to_bytes(data)?, &utf8_to_bytes(secret_key), &iv)?;
        Ok(AesData { data, iv })
    }

    // ---- structured family ----

    pub fn encrypt(&self, params: &EncryptionParameters, options: &AesOptions) -> EncryptionData {
        let mut result = EncryptionData::default();

        if let Err(e) = require_non_empty("Data", &params.data) {
            result.add_error(e.to_string());
        }
        let key = decode_field(&mut result, "SecretKey", &params.secret_key, options.key_encoding);
        check_key_size(&mut result, key.as_deref());
        let supplied_iv = match &params.iv {
            IvSource::Supplied(iv) => decode_iv(&mut result, iv, options.iv_encoding),
            IvSource::Generated => None,
        };

        if result.has_error {
            warn!(errors = result.errors.len(), "aes encrypt rejected");
            return result;
        }
        let Some(key) = key else {
            return result;
        };

        let iv = match supplied_iv {
            Some(iv) => iv,
            None => match self.keys.generate_iv() {
                Ok(iv) => iv,
                Err(e) => return fail(result, format!("IV generation error: {e}")),
            },
        };

        debug!(
            data_len = params.data.len(),
            output = %options.data_encoding,
            generated_iv = matches!(params.iv, IvSource::Generated),
            "aes encrypt"
        );

        let ciphertext = match AesTransform::encrypt(params.data.as_bytes(), &key, &iv) {
            Ok(ciphertext) => ciphertext,
            Err(e) => return fail(result, format!("Encryption error: {e}")),
        };
        let encrypted = match options.data_encoding.encode(&ciphertext) {
            Ok(encrypted) => encrypted,
            Err(e) => return fail(result, format!("EncryptedData: {e}")),
        };
        let iv_text = match &params.iv {
            IvSource::Supplied(iv) => iv.clone(),
            IvSource::Generated => match options.iv_encoding.encode(&iv) {
                Ok(iv) => iv,
                Err(e) => return fail(result, format!("IV: {e}")),
            },
        };

        result.encrypted_data = Some(encrypted);
        result.iv = Some(iv_text);
        result.secret_key = Some(params.secret_key.clone());
        result
    }

    pub fn decrypt(&self, params: &DecryptionParameters, options: &AesOptions) -> DecryptionData {
        let mut result = DecryptionData::default();

        let data = decode_field(&mut result, "Data", &params.data, options.data_encoding);
        let key = decode_field(&mut result, "SecretKey", &params.secret_key, options.key_encoding);
        check_key_size(&mut result, key.as_deref());
        let iv = decode_iv(&mut result, &params.iv, options.iv_encoding);

        if result.has_error {
            warn!(errors = result.errors.len(), "aes decrypt rejected");
            return result;
        }
        let (Some(data), Some(key), Some(iv)) = (data, key, iv) else {
            return result;
        };

        debug!(ciphertext_len = data.len(), input = %options.data_encoding, "aes decrypt");

        let plaintext = match AesTransform::decrypt(&data, &key, &iv) {
            Ok(plaintext) => plaintext,
            Err(e) => return fail(result, format!("Decryption error: {e}")),
        };
        let decrypted = match bytes_to_utf8(&plaintext) {
            Ok(text) => text,
            Err(_) => return fail(result, "Decrypted data is not valid UTF-8"),
        };

        result.decrypted_data = Some(decrypted);
        result.iv = Some(params.iv.clone());
        result.secret_key = Some(params.secret_key.clone());
        result
    }

    pub fn encrypt_to_hex_string(&self, params: &EncryptionParameters) -> EncryptionData {
        self.encrypt(params, &AesOptions::hex())
    }

    pub fn decrypt_from_hex_string(&self, params: &DecryptionParameters) -> DecryptionData {
        self.decrypt(params, &AesOptions::hex())
    }

    pub fn encrypt_to_base64_string(&self, params: &EncryptionParameters) -> EncryptionData {
        self.encrypt(params, &AesOptions::base64())
    }

    pub fn decrypt_from_base64_string(&self, params: &DecryptionParameters) -> DecryptionData {
        self.decrypt(params, &AesOptions::base64())
    }

    /// Encrypts with a fresh IV, using the UTF-8 bytes of `secret` directly as the key.
    /// The returned `iv` must be kept for decryption.
    pub fn encrypt_with_generated_iv(&self, data: &str, secret: &str) -> EncryptionData {
        self.encrypt(
            &EncryptionParameters::with_generated_iv(data, secret),
            &AesOptions::generated_iv(),
        )
    }

    /// Counterpart of [`Aes::encrypt_with_generated_iv`].
    pub fn decrypt_with_generated_iv(&self, data: &str, secret: &str, iv: &str) -> DecryptionData {
        self.decrypt(
            &DecryptionParameters::new(data, secret, iv),
            &AesOptions::generated_iv(),
        )
    }

    /// [`Aes::encrypt`] on the blocking pool.
    pub async fn encrypt_async(
        &self,
        params: EncryptionParameters,
        options: AesOptions,
    ) -> EncryptionData {
        let aes = self.clone();
        match tokio::task::spawn_blocking(move || aes.encrypt(&params, &options)).await {
            Ok(result) => result,
            Err(e) => fail(EncryptionData::default(), CryptoError::from(e).to_string()),
        }
    }

    /// [`Aes::decrypt`] on the blocking pool.
    pub async fn decrypt_async(
        &self,
        params: DecryptionParameters,
        options: AesOptions,
    ) -> DecryptionData {
        let aes = self.clone();
        match tokio::task::spawn_blocking(move || aes.decrypt(&params, &options)).await {
            Ok(result) => result,
            Err(e) => fail(DecryptionData::default(), CryptoError::from(e).to_string()),
        }
    }
}

fn fail<R: ErrorReport>(mut result: R, error: impl Into<String>) -> R {
    result.add_error(error);
    warn!(errors = result.errors().len(), "aes operation failed");
    result
}

// Empty and undecodable values are reported under the field name; secret material is never
// echoed into the message.
fn decode_field<R: ErrorReport>(
    result: &mut R,
    field: &'static str,
    value: &str,
    encoding: TextEncoding,
) -> Option<Vec<u8>> {
    if let Err(e) = require_non_empty(field, value) {
        result.add_error(e.to_string());
        return None;
    }
    if !is_valid_encoding(value, encoding) {
        result.add_error(format!("{field} is not a valid {encoding} string"));
        return None;
    }
    encoding.decode(value).ok()
}

fn decode_iv<R: ErrorReport>(result: &mut R, iv: &str, encoding: TextEncoding) -> Option<Vec<u8>> {
    let bytes = decode_field(result, "IV", iv, encoding)?;
    if !is_valid_aes_block_size(bytes.len()) {
        result.add_error(format!(
            "IV is not a valid block size for this algorithm ({} bytes)",
            bytes.len()
        ));
        return None;
    }
    Some(bytes)
}

fn check_key_size<R: ErrorReport>(result: &mut R, key: Option<&[u8]>) {
    if let Some(key) = key {
        if !is_valid_aes_key_size(key.len()) {
            result.add_error(format!(
                "SecretKey must decode to 16, 24 or 32 bytes, got {}",
                key.len()
            ));
        }
    }
}
