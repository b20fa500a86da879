//! Shared service handles.

use std::sync::Arc;

use audit_store::{AuditStore, PgAuditStore};
use load_store::{LoadStore, RedisLoadStore};
use omni_client::{OmniClient, OmniConfig, Upstream};
use task_queue::{QueueProducer, RedisQueue};

use crate::config::Config;
use crate::error::Result;

/// Every external collaborator the pipeline touches, bundled so handlers and
/// the worker take one value and tests can substitute each piece.
#[derive(Clone)]
pub struct Services {
    pub upstream: Arc<dyn Upstream>,
    pub load: Arc<dyn LoadStore>,
    pub audit: Arc<dyn AuditStore>,
    pub queue: Arc<dyn QueueProducer>,
}

impl Services {
    /// Build production services from configuration: the platform client,
    /// the Redis load store, the Postgres audit store (migrated), and the
    /// queue producer.
    pub async fn connect(config: &Config) -> Result<Self> {
        let omni_config = OmniConfig::new(&config.qiscus.base_url)
            .with_app_credentials(&config.qiscus.app_id, &config.qiscus.secret_key)
            .with_login(&config.qiscus.email, &config.qiscus.password);
        let upstream = OmniClient::new(omni_config)?;

        let load = RedisLoadStore::connect(&config.redis.url).await?;

        let audit = PgAuditStore::connect(&config.db.connection_string).await?;
        audit.migrate().await?;

        let queue = RedisQueue::connect(&config.redis.url).await?;

        Ok(Self {
            upstream: Arc::new(upstream),
            load: Arc::new(load),
            audit: Arc::new(audit),
            queue: Arc::new(queue),
        })
    }

    /// Assemble services from parts; the test suite's entry point.
    pub fn new(
        upstream: Arc<dyn Upstream>,
        load: Arc<dyn LoadStore>,
        audit: Arc<dyn AuditStore>,
        queue: Arc<dyn QueueProducer>,
    ) -> Self {
        Self {
            upstream,
            load,
            audit,
            queue,
        }
    }
}
