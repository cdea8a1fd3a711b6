//! Client error types.

use reqwest::StatusCode;

/// Result type for client operations.
pub type Result<T> = std::result::Result<T, ClientError>;

/// Error types for the client.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The HTTP layer failed, including non-2xx responses.
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The server answered but the envelope was not a success.
    #[error("{0}")]
    Failed(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl ClientError {
    /// HTTP status of a rejected request, if the server answered.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ClientError::Transport(err) => err.status(),
            _ => None,
        }
    }
}
