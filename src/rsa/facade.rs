use tracing::{debug, warn};

use super::transform::{RsaDispatcher, RsaTransform};
use crate::encoding::bytes_to_utf8;
use crate::error::Result;
use crate::keys::generate_rsa_key_pair;
use crate::models::{
    ErrorReport, RsaDecryptionParameters, RsaDecryptionResult, RsaEncryptionParameters,
    RsaEncryptionResult, RsaKeyPair,
};
use crate::validation::{require_non_blank, require_non_empty_bytes};

/// Async RSA entry points. Every transform and key generation runs through the dispatcher.
#[derive(Debug, Clone, Default)]
pub struct Rsa {
    dispatcher: RsaDispatcher,
}

impl Rsa {
    pub fn new(dispatcher: RsaDispatcher) -> Self {
        Self { dispatcher }
    }

    pub fn with_max_concurrency(max_concurrency: usize) -> Self {
        Self::new(RsaDispatcher::new(max_concurrency))
    }

    pub async fn generate_key_pair(&self, modulus_bits: u32) -> Result<RsaKeyPair> {
        debug!(modulus_bits, "rsa key generation");
        self.dispatcher
            .run(move || generate_rsa_key_pair(modulus_bits))
            .await
    }

    /// Strict byte-level encryption; errors propagate.
    pub async fn encrypt_bytes(&self, data: Vec<u8>, public_key: String) -> Result<Vec<u8>> {
        self.dispatcher
            .run(move || RsaTransform::encrypt(&data, &public_key))
            .await
    }

    /// Strict byte-level decryption; errors propagate.
    pub async fn decrypt_bytes(&self, data: Vec<u8>, private_key: String) -> Result<Vec<u8>> {
        self.dispatcher
            .run(move || RsaTransform::decrypt(&data, &private_key))
            .await
    }

    pub async fn encrypt(&self, params: &RsaEncryptionParameters) -> RsaEncryptionResult {
        let mut result = RsaEncryptionResult::default();

        if let Err(e) = require_non_blank("DataToEncrypt", &params.data_to_encrypt) {
            result.add_error(e.to_string());
        }
        if let Err(e) = require_non_blank("PublicKey", &params.public_key) {
            result.add_error(e.to_string());
        }
        if result.has_error {
            warn!(errors = result.errors.len(), "rsa encrypt rejected");
            return result;
        }

        let data = params.data_to_encrypt.as_bytes().to_vec();
        match self.encrypt_bytes(data, params.public_key.clone()).await {
            Ok(encrypted) => result.encrypted_data = Some(encrypted),
            Err(e) => {
                result.add_error(format!("Encryption failed: {e}"));
                warn!(error = %e, "rsa encrypt failed");
            }
        }

        result
    }

    pub async fn decrypt(&self, params: &RsaDecryptionParameters) -> RsaDecryptionResult {
        let mut result = RsaDecryptionResult::default();

        if let Err(e) = require_non_empty_bytes("DataToDecrypt", &params.data_to_decrypt) {
            result.add_error(e.to_string());
        }
        if let Err(e) = require_non_blank("PrivateKey", &params.private_key) {
            result.add_error(e.to_string());
        }
        if result.has_error {
            warn!(errors = result.errors.len(), "rsa decrypt rejected");
            return result;
        }

        let decrypted = match self
            .decrypt_bytes(params.data_to_decrypt.clone(), params.private_key.clone())
            .await
        {
            Ok(decrypted) => decrypted,
            Err(e) => {
                warn!(error = %e, "rsa decrypt failed");
                result.add_error(format!("Decryption failed: {e}"));
                return result;
            }
        };

        match bytes_to_utf8(&decrypted) {
            Ok(text) => result.decrypted_data = Some(text),
            Err(_) => result.add_error("Decrypted data is not valid UTF-8"),
        }

        result
    }
}
