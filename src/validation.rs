//! Input checks run before any transform.
//!
//! The predicates never fail; structured entry points use them to collect error messages.
//! `require_non_empty` is the strict variant and propagates `MissingField`. Whitespace is content
//! there; `require_non_blank` additionally rejects whitespace-only text and is used by the RSA
//! entry points.

use crate::encoding::{TextEncoding, base64_to_bytes};
use crate::error::{CryptoError, Result};

/// AES block size in bytes.
pub const AES_BLOCK_SIZE: usize = 16;

pub fn require_non_empty(field: &'static str, value: &str) -> Result<()> {
    if value.is_empty() {
        return Err(CryptoError::MissingField(field));
    }
    Ok(())
}

pub fn require_non_blank(field: &'static str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(CryptoError::MissingField(field));
    }
    Ok(())
}

pub fn require_non_empty_bytes(field: &'static str, value: &[u8]) -> Result<()> {
    if value.is_empty() {
        return Err(CryptoError::MissingField(field));
    }
    Ok(())
}

pub fn is_valid_base64(value: &str) -> bool {
    !value.is_empty() && base64_to_bytes(value).is_ok()
}

/// True when `value` decodes under `encoding`. Empty input never counts as valid.
pub fn is_valid_encoding(value: &str, encoding: TextEncoding) -> bool {
    !value.is_empty() && encoding.decode(value).is_ok()
}

pub fn is_valid_aes_block_size(byte_length: usize) -> bool {
    byte_length > 0 && byte_length % AES_BLOCK_SIZE == 0
}

pub fn is_valid_aes_key_size(byte_length: usize) -> bool {
    matches!(byte_length, 16 | 24 | 32)
}
