use std::sync::Arc;

use openssl::pkey::{Private, Public};
use openssl::rsa::{Padding, Rsa};
use tokio::sync::Semaphore;
use tracing::debug;

use crate::error::{CryptoError, Result};

// PKCS#1 v1.5 encryption padding takes at least 11 bytes of the modulus
pub const PKCS1_PADDING_OVERHEAD: usize = 11;

/// RSA PKCS#1 v1.5 over PEM encoded keys. Blocking; see [`RsaDispatcher`] for the async path.
#[derive(Debug, Default, Clone, Copy)]
pub struct RsaTransform;

impl RsaTransform {
    pub fn encrypt(data: &[u8], public_key_pem: &str) -> Result<Vec<u8>> {
        let rsa = parse_public_key(public_key_pem)?;

        let max = max_payload(rsa.size() as usize);
        if data.len() > max {
            return Err(CryptoError::PayloadTooLarge {
                size: data.len(),
                max,
            });
        }

        debug!(data_len = data.len(), modulus_bits = rsa.size() * 8, "rsa encrypt");
        let mut buf = vec![0; rsa.size() as usize];
        let encrypted_len = rsa.public_encrypt(data, &mut buf, Padding::PKCS1)?;
        buf.truncate(encrypted_len);

        Ok(buf)
    }

    pub fn decrypt(data: &[u8], private_key_pem: &str) -> Result<Vec<u8>> {
        let rsa = parse_private_key(private_key_pem)?;

        debug!(data_len = data.len(), modulus_bits = rsa.size() * 8, "rsa decrypt");
        let mut buf = vec![0; rsa.size() as usize];
        let decrypted_len = rsa
            .private_decrypt(data, &mut buf, Padding::PKCS1)
            .map_err(|e| CryptoError::Cryptographic(format!("RSA decryption failed ({e})")))?;
        buf.truncate(decrypted_len);

        Ok(buf)
    }

    /// Largest plaintext the given public key accepts.
    pub fn max_payload_for(public_key_pem: &str) -> Result<usize> {
        Ok(max_payload(parse_public_key(public_key_pem)?.size() as usize))
    }
}

fn max_payload(modulus_bytes: usize) -> usize {
    modulus_bytes.saturating_sub(PKCS1_PADDING_OVERHEAD)
}

fn parse_public_key(pem: &str) -> Result<Rsa<Public>> {
    Rsa::public_key_from_pem(pem.as_bytes())
        .map_err(|e| CryptoError::Format(format!("public key is not a PEM RSA key ({e})")))
}

fn parse_private_key(pem: &str) -> Result<Rsa<Private>> {
    Rsa::private_key_from_pem(pem.as_bytes())
        .map_err(|e| CryptoError::Format(format!("private key is not a PEM RSA key ({e})")))
}

/// Runs CPU-bound RSA jobs on tokio's blocking pool, at most `max_concurrency` at a time.
///
/// A job that has started always runs to completion; dropping the future while it waits for a
/// permit abandons it.
#[derive(Debug, Clone)]
pub struct RsaDispatcher {
    permits: Arc<Semaphore>,
}

impl Default for RsaDispatcher {
    fn default() -> Self {
        let workers = std::thread::available_parallelism().map_or(1, |n| n.get());
        Self::new(workers)
    }
}

impl RsaDispatcher {
    pub fn new(max_concurrency: usize) -> Self {
        Self {
            permits: Arc::new(Semaphore::new(max_concurrency.max(1))),
        }
    }

    pub fn available_permits(&self) -> usize {
        self.permits.available_permits()
    }

    pub async fn run<T, F>(&self, job: F) -> Result<T>
    where
        F: FnOnce() -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let permit = self
            .permits
            .clone()
            .acquire_owned()
            .await
            .map_err(|e| CryptoError::Worker(e.to_string()))?;

        tokio::task::spawn_blocking(move || {
            let _permit = permit;
            job()
        })
        .await?
    }
}
