//! Conversions between raw bytes and the textual forms accepted at the API boundary.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Lower-case hex, two characters per byte.
pub fn bytes_to_hex(bytes: &[u8]) -> String {
    hex::encode(bytes)
}

/// Accepts upper- and lower-case digits. Odd lengths and non-hex characters are rejected.
pub fn hex_to_bytes(input: &str) -> Result<Vec<u8>> {
    Ok(hex::decode(input)?)
}

pub fn bytes_to_utf8(bytes: &[u8]) -> Result<String> {
    Ok(String::from_utf8(bytes.to_vec())?)
}

pub fn utf8_to_bytes(input: &str) -> Vec<u8> {
    input.as_bytes().to_vec()
}

/// Standard alphabet with padding.
pub fn bytes_to_base64(bytes: &[u8]) -> String {
    STANDARD.encode(bytes)
}

pub fn base64_to_bytes(input: &str) -> Result<Vec<u8>> {
    Ok(STANDARD.decode(input)?)
}

/// Textual representation of key, IV or payload material.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextEncoding {
    Hex,
    Base64,
    Utf8,
}

impl TextEncoding {
    pub fn encode(self, bytes: &[u8]) -> Result<String> {
        match self {
            TextEncoding::Hex => Ok(bytes_to_hex(bytes)),
            TextEncoding::Base64 => Ok(bytes_to_base64(bytes)),
            TextEncoding::Utf8 => bytes_to_utf8(bytes),
        }
    }

    pub fn decode(self, input: &str) -> Result<Vec<u8>> {
        match self {
            TextEncoding::Hex => hex_to_bytes(input),
            TextEncoding::Base64 => base64_to_bytes(input),
            TextEncoding::Utf8 => Ok(utf8_to_bytes(input)),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            TextEncoding::Hex => "hex",
            TextEncoding::Base64 => "base64",
            TextEncoding::Utf8 => "utf-8",
        }
    }
}

impl std::fmt::Display for TextEncoding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
