//! Error types for affil.

use thiserror::Error;

/// Result type for affil operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for affil operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// Model inference failed.
    #[error("Inference failed: {0}")]
    Inference(String),

    /// Invalid input provided.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Reference table missing or unusable.
    #[error("Reference error: {0}")]
    Reference(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create an inference error.
    pub fn inference(msg: impl Into<String>) -> Self {
        Error::Inference(msg.into())
    }

    /// Create an invalid input error.
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Error::InvalidInput(msg.into())
    }

    /// Create a reference error.
    pub fn reference(msg: impl Into<String>) -> Self {
        Error::Reference(msg.into())
    }
}
