//! Runtime configuration, read from TOML with built-in defaults.
//!
//! The file is located through `CIPHERKIT_CONFIG` (default `cipherkit.toml`). A missing file is
//! not an error; an unreadable or invalid one is.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;
use tracing::info;

use crate::keys::{MAX_BLOWFISH_KEY_BITS, MIN_BLOWFISH_KEY_BITS};

pub const CONFIG_ENV: &str = "CIPHERKIT_CONFIG";
pub const DEFAULT_CONFIG_PATH: &str = "cipherkit.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid TOML: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("invalid setting {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub log_filter: String,
    pub aes: AesConfig,
    pub blowfish: BlowfishConfig,
    pub rsa: RsaConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AesConfig {
    pub key_size: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct BlowfishConfig {
    pub key_size: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RsaConfig {
    pub key_size: u32,
    pub max_concurrency: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_filter: "info".to_string(),
            aes: AesConfig::default(),
            blowfish: BlowfishConfig::default(),
            rsa: RsaConfig::default(),
        }
    }
}

impl Default for AesConfig {
    fn default() -> Self {
        Self { key_size: 256 }
    }
}

impl Default for BlowfishConfig {
    fn default() -> Self {
        Self { key_size: 128 }
    }
}

impl Default for RsaConfig {
    fn default() -> Self {
        Self {
            key_size: 2048,
            max_concurrency: std::thread::available_parallelism().map_or(1, |n| n.get()),
        }
    }
}

impl Config {
    /// Loads from `$CIPHERKIT_CONFIG`, or `cipherkit.toml` in the working directory.
    pub fn load() -> Result<Self, ConfigError> {
        let path = std::env::var(CONFIG_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
        Self::load_from(path)
    }

    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            info!(path = %path.display(), "config file not found, using defaults");
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !matches!(self.aes.key_size, 128 | 192 | 256) {
            return Err(ConfigError::Invalid {
                field: "aes.key_size",
                reason: format!("{} is not 128, 192 or 256", self.aes.key_size),
            });
        }
        let blowfish_bits = MIN_BLOWFISH_KEY_BITS..=MAX_BLOWFISH_KEY_BITS;
        if !blowfish_bits.contains(&self.blowfish.key_size) || self.blowfish.key_size % 8 != 0 {
            return Err(ConfigError::Invalid {
                field: "blowfish.key_size",
                reason: format!(
                    "{} is not a multiple of 8 between {MIN_BLOWFISH_KEY_BITS} and \
                     {MAX_BLOWFISH_KEY_BITS}",
                    self.blowfish.key_size
                ),
            });
        }
        if self.rsa.key_size < crate::keys::MIN_RSA_KEY_BITS {
            return Err(ConfigError::Invalid {
                field: "rsa.key_size",
                reason: format!("{} is below {}", self.rsa.key_size, crate::keys::MIN_RSA_KEY_BITS),
            });
        }
        if self.rsa.max_concurrency == 0 {
            return Err(ConfigError::Invalid {
                field: "rsa.max_concurrency",
                reason: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}
