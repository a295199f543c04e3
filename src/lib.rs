//! Validated AES-CBC, Blowfish and RSA operations over hex, Base64 and UTF-8 encoded inputs.
//!
//! Structured entry points return result models carrying an ordered `errors` list instead of
//! failing; strict entry points return [`error::Result`].
pub mod aes;
pub mod blowfish;
pub mod config;
pub mod encoding;
pub mod error;
pub mod keys;
pub mod models;
pub mod rsa;
pub mod validation;

// Re-export important types for easier use
pub use aes::{Aes, AesTransform};
pub use blowfish::{Blowfish, BlowfishTransform};
pub use config::{Config, ConfigError};
pub use encoding::TextEncoding;
pub use error::{CryptoError, Result};
pub use keys::{KeyGenerator, OsRandom, SecureRandom};
pub use models::{
    AesData, AesOptions, BlowfishParameters, DecryptionData, DecryptionParameters, EncryptionData,
    EncryptionParameters, ErrorReport, IvSource, RsaDecryptionParameters, RsaDecryptionResult,
    RsaEncryptionParameters, RsaEncryptionResult, RsaKeyPair,
};
pub use rsa::{Rsa, RsaDispatcher, RsaTransform};
