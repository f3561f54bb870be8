//! Error types for the feature highlighter.

use thiserror::Error;

/// Result type alias for feature highlighter operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur in the feature highlighter
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid input data (size mismatch, malformed frame)
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// Node execution error
    #[error("Execution error: {0}")]
    Execution(String),

    /// Dispatcher/transport error
    #[error("Transport error: {0}")]
    Transport(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Self {
        Error::Other(err.to_string())
    }
}
