//! Seam traits for the audit store.

use async_trait::async_trait;
use serde_json::Value;

use crate::error::Result;

/// Handle to the audit store; the only way in is through a transaction.
#[async_trait]
pub trait AuditStore: Send + Sync {
    /// Begin a transaction covering one task's audit operations.
    async fn begin(&self) -> Result<Box<dyn AuditTx>>;
}

/// One open audit transaction. Dropping it without calling
/// [`commit`](AuditTx::commit) must discard all staged writes.
#[async_trait]
pub trait AuditTx: Send {
    /// Whether a row exists for this room.
    async fn room_exists(&mut self, room_id: &str) -> Result<bool>;

    /// Insert the room with its raw event payload and no status.
    async fn insert_room(&mut self, room_id: &str, data: &Value) -> Result<()>;

    /// Update the room's lifecycle status.
    async fn set_status(&mut self, room_id: &str, status: &str) -> Result<()>;

    /// Commit every staged write.
    async fn commit(self: Box<Self>) -> Result<()>;

    /// Discard every staged write.
    async fn rollback(self: Box<Self>) -> Result<()>;
}
