//! Pipeline error types.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

/// Errors that can occur in the allocation pipeline.
#[derive(Debug, Error)]
pub enum AllocError {
    /// Chat-platform call failed.
    #[error("upstream error: {0}")]
    Upstream(#[from] omni_client::OmniError),

    /// Load-store operation failed.
    #[error("load store error: {0}")]
    Store(#[from] load_store::StoreError),

    /// Audit-store operation failed.
    #[error("audit store error: {0}")]
    Audit(#[from] audit_store::AuditError),

    /// Queue operation failed.
    #[error("queue error: {0}")]
    Queue(#[from] task_queue::QueueError),

    /// A task payload or cached value could not be decoded.
    #[error("payload error: {0}")]
    Payload(#[from] serde_json::Error),

    /// Listener or server I/O failure.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// The selected agent id was not numeric.
    #[error("invalid agent id: {0}")]
    InvalidAgentId(String),

    /// The selector exhausted its wait budget without a cap-eligible agent.
    #[error("no available agent for room {room_id}")]
    NoAgentAvailable { room_id: String },
}

impl IntoResponse for AllocError {
    fn into_response(self) -> Response {
        tracing::error!("request failed: {}", self);

        let body = serde_json::json!({
            "error": self.to_string()
        });

        (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
    }
}

/// Result type for pipeline operations.
pub type Result<T> = std::result::Result<T, AllocError>;
