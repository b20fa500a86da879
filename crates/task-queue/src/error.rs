//! Queue error types.

use thiserror::Error;

/// Errors that can occur in the task queue.
#[derive(Debug, Error)]
pub enum QueueError {
    /// Underlying Redis error.
    #[error("queue backend error: {0}")]
    Redis(#[from] redis::RedisError),

    /// A queued record could not be encoded or decoded.
    #[error("task codec error: {0}")]
    Codec(#[from] serde_json::Error),
}

/// Result type for queue operations.
pub type Result<T> = std::result::Result<T, QueueError>;
