//! Audit-store error types.

use thiserror::Error;

/// Errors that can occur during audit operations.
#[derive(Debug, Error)]
pub enum AuditError {
    /// SQLx error (connection, query, transaction).
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    /// Migration error.
    #[error("migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// Update targeted a room that has no row.
    #[error("room not found: {0}")]
    RoomNotFound(String),
}

/// Result type for audit operations.
pub type Result<T> = std::result::Result<T, AuditError>;
