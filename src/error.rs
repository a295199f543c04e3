use thiserror::Error;

// Error taxonomy shared by the strict entry points and the transforms
#[derive(Debug, Error)]
pub enum CryptoError {
    #[error("{0} cannot be null or empty")]
    MissingField(&'static str),

    #[error("Invalid format: {0}")]
    Format(String),

    #[error("Invalid block size: {0} bytes")]
    InvalidBlockSize(usize),

    #[error("Cryptographic failure: {0}")]
    Cryptographic(String),

    #[error("Data too large: {size} bytes (max: {max} bytes)")]
    PayloadTooLarge { size: usize, max: usize },

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Worker failure: {0}")]
    Worker(String),
}

impl From<openssl::error::ErrorStack> for CryptoError {
    fn from(err: openssl::error::ErrorStack) -> Self {
        CryptoError::Cryptographic(err.to_string())
    }
}

impl From<hex::FromHexError> for CryptoError {
    fn from(err: hex::FromHexError) -> Self {
        CryptoError::Format(format!("hex: {err}"))
    }
}

impl From<base64::DecodeError> for CryptoError {
    fn from(err: base64::DecodeError) -> Self {
        CryptoError::Format(format!("base64: {err}"))
    }
}

impl From<std::string::FromUtf8Error> for CryptoError {
    fn from(err: std::string::FromUtf8Error) -> Self {
        CryptoError::Format(format!("utf-8: {err}"))
    }
}

impl From<tokio::task::JoinError> for CryptoError {
    fn from(err: tokio::task::JoinError) -> Self {
        CryptoError::Worker(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, CryptoError>;
