//! In-memory load store for tests.

use std::collections::{BTreeSet, HashMap};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::Result;
use crate::store::LoadStore;

#[derive(Debug, Default)]
struct Inner {
    agent_ids: BTreeSet<String>,
    online: HashMap<String, bool>,
    counts: HashMap<String, i64>,
    rooms: HashMap<String, String>,
    token: Option<String>,
}

/// Mutexed map with the same contract as the Redis store: absent keys stay
/// distinct from stored values, and counter mutations are atomic.
///
/// The roster iterates in sorted order, which satisfies the "deterministic
/// within one scan" requirement without promising anything the cache doesn't.
#[derive(Debug, Default)]
pub struct MemoryLoadStore {
    inner: Mutex<Inner>,
}

impl MemoryLoadStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl LoadStore for MemoryLoadStore {
    async fn agent_ids(&self) -> Result<Vec<String>> {
        let inner = self.inner.lock().unwrap();
        Ok(inner.agent_ids.iter().cloned().collect())
    }

    async fn add_agent_id(&self, agent_id: &str) -> Result<()> {
        let mut inner = self.inner.lock().unwrap();
        inner.agent_ids.insert(agent_id.to_string());
        Ok(())
    }

    async fn remove_agent_id(&self, agent_id: &str) -> Result<()> {
        let mut inner = self.inner.lock().unwrap();
        inner.agent_ids.remove(agent_id);
        Ok(())
    }

    async fn is_online(&self, agent_id: &str) -> Result<Option<bool>> {
        let inner = self.inner.lock().unwrap();
        Ok(inner.online.get(agent_id).copied())
    }

    async fn set_online(&self, agent_id: &str, online: bool) -> Result<()> {
        let mut inner = self.inner.lock().unwrap();
        inner.online.insert(agent_id.to_string(), online);
        Ok(())
    }

    async fn clear_online(&self, agent_id: &str) -> Result<()> {
        let mut inner = self.inner.lock().unwrap();
        inner.online.remove(agent_id);
        Ok(())
    }

    async fn customer_count(&self, agent_id: &str) -> Result<Option<i64>> {
        let inner = self.inner.lock().unwrap();
        Ok(inner.counts.get(agent_id).copied())
    }

    async fn set_customer_count(&self, agent_id: &str, count: i64) -> Result<()> {
        let mut inner = self.inner.lock().unwrap();
        inner.counts.insert(agent_id.to_string(), count);
        Ok(())
    }

    async fn incr_customer_count(&self, agent_id: &str) -> Result<i64> {
        let mut inner = self.inner.lock().unwrap();
        let count = inner.counts.entry(agent_id.to_string()).or_insert(0);
        *count += 1;
        Ok(*count)
    }

    async fn decr_customer_count(&self, agent_id: &str) -> Result<i64> {
        let mut inner = self.inner.lock().unwrap();
        let count = inner.counts.entry(agent_id.to_string()).or_insert(0);
        *count -= 1;
        Ok(*count)
    }

    async fn room_agent(&self, room_id: &str) -> Result<Option<String>> {
        let inner = self.inner.lock().unwrap();
        Ok(inner.rooms.get(room_id).cloned())
    }

    async fn bind_room(&self, room_id: &str, agent_id: &str) -> Result<()> {
        let mut inner = self.inner.lock().unwrap();
        inner.rooms.insert(room_id.to_string(), agent_id.to_string());
        Ok(())
    }

    async fn unbind_room(&self, room_id: &str) -> Result<()> {
        let mut inner = self.inner.lock().unwrap();
        inner.rooms.remove(room_id);
        Ok(())
    }

    async fn cached_token(&self) -> Result<Option<String>> {
        let inner = self.inner.lock().unwrap();
        Ok(inner.token.clone())
    }

    async fn cache_token(&self, token: &str, _ttl_secs: u64) -> Result<()> {
        let mut inner = self.inner.lock().unwrap();
        inner.token = Some(token.to_string());
        Ok(())
    }
}
