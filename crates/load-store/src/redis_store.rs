//! Redis-backed load store.

use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::AsyncCommands;
use tracing::info;

use crate::error::Result;
use crate::keys::{customer_count_key, online_key, room_agent_key, AGENT_IDS_KEY, TOKEN_KEY};
use crate::store::LoadStore;

/// Load store over a Redis connection manager.
///
/// The manager multiplexes one connection and reconnects on failure; clones
/// are cheap and share the underlying connection.
#[derive(Clone)]
pub struct RedisLoadStore {
    conn: ConnectionManager,
}

impl RedisLoadStore {
    /// Connect to the cache at the given URL (e.g. `redis://127.0.0.1:6379`).
    pub async fn connect(url: &str) -> Result<Self> {
        let client = redis::Client::open(url)?;
        let conn = client.get_connection_manager().await?;
        info!(url, "connected to load store");
        Ok(Self { conn })
    }

    /// Wrap an existing connection manager.
    pub fn new(conn: ConnectionManager) -> Self {
        Self { conn }
    }

    fn conn(&self) -> ConnectionManager {
        self.conn.clone()
    }
}

#[async_trait]
impl LoadStore for RedisLoadStore {
    async fn agent_ids(&self) -> Result<Vec<String>> {
        let ids: Vec<String> = self.conn().smembers(AGENT_IDS_KEY).await?;
        Ok(ids)
    }

    async fn add_agent_id(&self, agent_id: &str) -> Result<()> {
        let _: () = self.conn().sadd(AGENT_IDS_KEY, agent_id).await?;
        Ok(())
    }

    async fn remove_agent_id(&self, agent_id: &str) -> Result<()> {
        let _: () = self.conn().srem(AGENT_IDS_KEY, agent_id).await?;
        Ok(())
    }

    async fn is_online(&self, agent_id: &str) -> Result<Option<bool>> {
        let value: Option<i64> = self.conn().get(online_key(agent_id)).await?;
        Ok(value.map(|n| n != 0))
    }

    async fn set_online(&self, agent_id: &str, online: bool) -> Result<()> {
        let _: () = self
            .conn()
            .set(online_key(agent_id), i64::from(online))
            .await?;
        Ok(())
    }

    async fn clear_online(&self, agent_id: &str) -> Result<()> {
        let _: () = self.conn().del(online_key(agent_id)).await?;
        Ok(())
    }

    async fn customer_count(&self, agent_id: &str) -> Result<Option<i64>> {
        let count: Option<i64> = self.conn().get(customer_count_key(agent_id)).await?;
        Ok(count)
    }

    async fn set_customer_count(&self, agent_id: &str, count: i64) -> Result<()> {
        let _: () = self.conn().set(customer_count_key(agent_id), count).await?;
        Ok(())
    }

    async fn incr_customer_count(&self, agent_id: &str) -> Result<i64> {
        let count: i64 = self.conn().incr(customer_count_key(agent_id), 1).await?;
        Ok(count)
    }

    async fn decr_customer_count(&self, agent_id: &str) -> Result<i64> {
        let count: i64 = self.conn().decr(customer_count_key(agent_id), 1).await?;
        Ok(count)
    }

    async fn room_agent(&self, room_id: &str) -> Result<Option<String>> {
        let agent: Option<String> = self.conn().get(room_agent_key(room_id)).await?;
        Ok(agent)
    }

    async fn bind_room(&self, room_id: &str, agent_id: &str) -> Result<()> {
        let _: () = self.conn().set(room_agent_key(room_id), agent_id).await?;
        Ok(())
    }

    async fn unbind_room(&self, room_id: &str) -> Result<()> {
        let _: () = self.conn().del(room_agent_key(room_id)).await?;
        Ok(())
    }

    async fn cached_token(&self) -> Result<Option<String>> {
        let token: Option<String> = self.conn().get(TOKEN_KEY).await?;
        Ok(token.filter(|t| !t.is_empty()))
    }

    async fn cache_token(&self, token: &str, ttl_secs: u64) -> Result<()> {
        let _: () = self.conn().set_ex(TOKEN_KEY, token, ttl_secs).await?;
        Ok(())
    }
}
