//! Durable task queue over Redis lists.
//!
//! The webhook path produces [`Task`]s; a single-consumer worker loop pops
//! them and runs a [`TaskHandler`]. Delivery is at-least-once: a task moves
//! from the pending list to a processing list while in flight, is removed on
//! success (ack), and is re-enqueued with an incremented retry count on
//! handler error (nack) until `max_retries` is exhausted. Tasks stranded in
//! the processing list by a crash are pushed back to pending by
//! [`RedisQueue::recover`] at consumer startup.

pub mod error;
pub mod memory;
pub mod redis_queue;
pub mod task;

pub use error::{QueueError, Result};
pub use memory::MemoryQueue;
pub use redis_queue::{ConsumerConfig, RedisQueue};
pub use task::{Task, TaskInfo, TYPE_CHAT_ASSIGN_AGENT};

use async_trait::async_trait;

/// Producer side of the queue; the webhook path only ever enqueues.
#[async_trait]
pub trait QueueProducer: Send + Sync {
    /// Append a task to the queue and return where it landed.
    async fn enqueue(&self, task: Task) -> Result<TaskInfo>;
}

/// Handler invoked for each dequeued task.
///
/// Returning `Ok` acks the task; returning `Err` nacks it and the queue's
/// retry policy takes over.
#[async_trait]
pub trait TaskHandler: Send + Sync {
    async fn handle(
        &self,
        task: &Task,
    ) -> std::result::Result<(), Box<dyn std::error::Error + Send + Sync>>;
}
