//! Relational audit store for the allocation pipeline.
//!
//! Records that a room has been seen and tracks its lifecycle status. The
//! row's existence doubles as the pipeline's idempotency check: a second
//! incoming-message for the same room finds the row and is dropped.
//!
//! All operations for one task run inside a single transaction obtained from
//! [`AuditStore::begin`]; either all of them commit or none do. Rows are
//! never deleted.
//!
//! # Example
//!
//! ```no_run
//! use audit_store::{AuditStore, PgAuditStore};
//!
//! # async fn example() -> Result<(), audit_store::AuditError> {
//! let store = PgAuditStore::connect("postgres://localhost/allocator").await?;
//! store.migrate().await?;
//!
//! let mut tx = store.begin().await?;
//! if !tx.room_exists("R1").await? {
//!     tx.insert_room("R1", &serde_json::json!({"room_id": "R1"})).await?;
//!     tx.set_status("R1", "SERVED").await?;
//! }
//! tx.commit().await?;
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod memory;
pub mod pg;
pub mod store;

pub use error::{AuditError, Result};
pub use memory::MemoryAuditStore;
pub use pg::PgAuditStore;
pub use store::{AuditStore, AuditTx};

/// Status written once an agent has been assigned to the room.
pub const STATUS_SERVED: &str = "SERVED";
