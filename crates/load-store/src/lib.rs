//! Key-value load store for the allocation pipeline.
//!
//! Holds the agent roster set, per-agent presence flags and open-conversation
//! counters, room-to-agent bindings, and the cached upstream auth token. The
//! cache is the single source of truth for selection decisions; there is no
//! in-memory layer above it.
//!
//! Counters use `-1` as the "unknown" sentinel, which is distinct from the
//! key being absent: [`LoadStore::customer_count`] returns `Ok(None)` for an
//! absent key and `Ok(Some(-1))` for the sentinel. Selection must treat both
//! as stale.
//!
//! Coordination relies on single-key atomic operations only; no transactions
//! span multiple keys.

pub mod error;
pub mod keys;
pub mod memory;
pub mod redis_store;
pub mod store;

pub use error::{Result, StoreError};
pub use memory::MemoryLoadStore;
pub use redis_store::RedisLoadStore;
pub use store::LoadStore;

/// Sentinel counter value meaning "unknown, refresh from upstream before use".
pub const UNKNOWN_CUSTOMER_COUNT: i64 = -1;

/// TTL applied to the cached upstream auth token, in seconds.
pub const TOKEN_TTL_SECS: u64 = 3600;
