//! Redis-backed queue implementation.

use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::AsyncCommands;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

use crate::error::Result;
use crate::task::{Task, TaskInfo};
use crate::{QueueProducer, TaskHandler};

const QUEUE_NAME: &str = "default";

/// Consumer tuning.
#[derive(Debug, Clone)]
pub struct ConsumerConfig {
    /// Redeliveries allowed before a task is dropped.
    pub max_retries: u32,
    /// Blocking-pop timeout in seconds; bounds how long shutdown waits.
    pub poll_timeout_secs: f64,
}

impl Default for ConsumerConfig {
    fn default() -> Self {
        Self {
            max_retries: 25,
            poll_timeout_secs: 1.0,
        }
    }
}

/// Durable FIFO over two Redis lists.
///
/// Pending tasks live in `queue:<name>:pending`; a dequeue atomically moves
/// the oldest one to `queue:<name>:processing`, where it stays until acked
/// or nacked. That window is what makes delivery at-least-once.
#[derive(Clone)]
pub struct RedisQueue {
    conn: ConnectionManager,
    config: ConsumerConfig,
}

impl RedisQueue {
    /// Connect to the queue backend at the given URL.
    pub async fn connect(url: &str) -> Result<Self> {
        let client = redis::Client::open(url)?;
        let conn = client.get_connection_manager().await?;
        info!(url, "connected to task queue");
        Ok(Self {
            conn,
            config: ConsumerConfig::default(),
        })
    }

    /// Override the consumer configuration.
    pub fn with_config(mut self, config: ConsumerConfig) -> Self {
        self.config = config;
        self
    }

    fn pending_key(&self) -> String {
        format!("queue:{QUEUE_NAME}:pending")
    }

    fn processing_key(&self) -> String {
        format!("queue:{QUEUE_NAME}:processing")
    }

    fn conn(&self) -> ConnectionManager {
        self.conn.clone()
    }

    /// Push tasks stranded in the processing list back onto pending.
    ///
    /// Call once at consumer startup, before the run loop.
    pub async fn recover(&self) -> Result<u64> {
        let mut conn = self.conn();
        let mut recovered = 0u64;

        loop {
            let raw: Option<String> = conn
                .rpoplpush(self.processing_key(), self.pending_key())
                .await?;
            if raw.is_none() {
                break;
            }
            recovered += 1;
        }

        if recovered > 0 {
            warn!(recovered, "requeued in-flight tasks from previous run");
        }
        Ok(recovered)
    }

    /// Run the single-consumer loop until the token is cancelled.
    ///
    /// Tasks are processed one at a time; the next dequeue does not happen
    /// until the handler returns and the task is acked or nacked.
    pub async fn run(&self, handler: &dyn TaskHandler, cancel: CancellationToken) -> Result<()> {
        info!(queue = QUEUE_NAME, "task consumer started");

        loop {
            if cancel.is_cancelled() {
                info!("task consumer stopping");
                return Ok(());
            }

            let raw: Option<String> = {
                let mut conn = self.conn();
                conn.brpoplpush(
                    self.pending_key(),
                    self.processing_key(),
                    self.config.poll_timeout_secs,
                )
                .await?
            };

            let Some(raw) = raw else {
                continue;
            };

            let task: Task = match serde_json::from_str(&raw) {
                Ok(task) => task,
                Err(e) => {
                    error!(error = %e, "dropping undecodable task record");
                    self.forget(&raw).await?;
                    continue;
                }
            };

            match handler.handle(&task).await {
                Ok(()) => {
                    self.forget(&raw).await?;
                }
                Err(e) => {
                    error!(
                        task_id = %task.id,
                        kind = %task.kind,
                        retried = task.retried,
                        error = %e,
                        "task handler failed"
                    );
                    self.nack(&raw, task).await?;
                }
            }
        }
    }

    /// Remove a raw record from the processing list.
    async fn forget(&self, raw: &str) -> Result<()> {
        let mut conn = self.conn();
        let _: () = conn.lrem(self.processing_key(), 1, raw).await?;
        Ok(())
    }

    /// Drop the in-flight record and redeliver unless retries are exhausted.
    async fn nack(&self, raw: &str, mut task: Task) -> Result<()> {
        self.forget(raw).await?;

        task.retried += 1;
        if task.retried > self.config.max_retries {
            error!(
                task_id = %task.id,
                kind = %task.kind,
                retries = task.retried - 1,
                "task exhausted retries, dropping"
            );
            return Ok(());
        }

        let record = serde_json::to_string(&task)?;
        let mut conn = self.conn();
        let _: () = conn.lpush(self.pending_key(), record).await?;
        Ok(())
    }
}

#[async_trait]
impl QueueProducer for RedisQueue {
    async fn enqueue(&self, task: Task) -> Result<TaskInfo> {
        let record = serde_json::to_string(&task)?;
        let mut conn = self.conn();
        let _: () = conn.lpush(self.pending_key(), record).await?;

        Ok(TaskInfo {
            id: task.id,
            queue: QUEUE_NAME.to_string(),
        })
    }
}
