//! Seam trait for the load store.

use async_trait::async_trait;

use crate::error::Result;

/// Typed operations over the cache key layout in [`keys`](crate::keys).
///
/// Implementations must preserve single-key atomicity for the counter
/// read-modify-write operations; nothing here is transactional across keys.
#[async_trait]
pub trait LoadStore: Send + Sync {
    /// Members of the roster set, in the cache's own iteration order.
    async fn agent_ids(&self) -> Result<Vec<String>>;

    /// Add an agent id to the roster set.
    async fn add_agent_id(&self, agent_id: &str) -> Result<()>;

    /// Remove an agent id from the roster set.
    async fn remove_agent_id(&self, agent_id: &str) -> Result<()>;

    /// Presence flag; `None` when the key is absent.
    async fn is_online(&self, agent_id: &str) -> Result<Option<bool>>;

    /// Write the presence flag.
    async fn set_online(&self, agent_id: &str, online: bool) -> Result<()>;

    /// Delete the presence flag.
    async fn clear_online(&self, agent_id: &str) -> Result<()>;

    /// Open-conversation counter; `None` when the key is absent, `Some(-1)`
    /// when the sentinel is stored.
    async fn customer_count(&self, agent_id: &str) -> Result<Option<i64>>;

    /// Write the counter to an absolute value.
    async fn set_customer_count(&self, agent_id: &str, count: i64) -> Result<()>;

    /// Atomically increment the counter, returning the new value. An absent
    /// key is treated as zero.
    async fn incr_customer_count(&self, agent_id: &str) -> Result<i64>;

    /// Atomically decrement the counter, returning the new value. There is
    /// no floor; callers own the consequences of driving it negative.
    async fn decr_customer_count(&self, agent_id: &str) -> Result<i64>;

    /// Agent currently bound to a room, if any.
    async fn room_agent(&self, room_id: &str) -> Result<Option<String>>;

    /// Bind a room to an agent.
    async fn bind_room(&self, room_id: &str, agent_id: &str) -> Result<()>;

    /// Drop a room binding.
    async fn unbind_room(&self, room_id: &str) -> Result<()>;

    /// Cached upstream auth token, if present and unexpired.
    async fn cached_token(&self) -> Result<Option<String>>;

    /// Cache the upstream auth token with a TTL in seconds.
    async fn cache_token(&self, token: &str, ttl_secs: u64) -> Result<()>;
}
