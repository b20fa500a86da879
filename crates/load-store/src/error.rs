//! Load-store error types.

use thiserror::Error;

/// Errors that can occur against the cache.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Underlying cache error.
    #[error("cache error: {0}")]
    Redis(#[from] redis::RedisError),

    /// A stored value could not be interpreted.
    #[error("invalid value at {key}: {value}")]
    InvalidValue { key: String, value: String },
}

/// Result type for load-store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
