//! Error types for the omnichannel client.

use thiserror::Error;

/// Errors that can occur when talking to the chat platform.
#[derive(Debug, Error)]
pub enum OmniError {
    /// HTTP request failed before a response was received.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The platform answered with a non-2xx status.
    #[error("upstream returned status {status} for {operation}")]
    Status { operation: &'static str, status: u16 },

    /// A required field was missing from an otherwise valid response.
    #[error("missing field in upstream response: {0}")]
    MissingField(&'static str),
}

/// Result type for client operations.
pub type Result<T> = std::result::Result<T, OmniError>;
