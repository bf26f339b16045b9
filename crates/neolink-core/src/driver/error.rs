//! Driver errors

use thiserror::Error;

use crate::packstream::PackError;

/// Errors that can occur while talking to the server
#[derive(Debug, Error)]
pub enum DriverError {
    #[error("Protocol error: {0}")]
    Protocol(String),

    /// The server rejected a statement
    #[error("{code}: {message}")]
    Failure { code: String, message: String },

    #[error("Unsupported URL scheme: {0}")]
    UnsupportedScheme(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Server did not agree on a protocol version")]
    NoAgreedVersion,

    #[error("Unsupported: {0}")]
    Unsupported(String),

    #[error("Pack error: {0}")]
    Pack(#[from] PackError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl DriverError {
    pub(crate) fn protocol(message: impl Into<String>) -> Self {
        Self::Protocol(message.into())
    }
}
