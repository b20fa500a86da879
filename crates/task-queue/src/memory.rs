//! In-memory queue for tests.

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::Result;
use crate::task::{Task, TaskInfo};
use crate::QueueProducer;

#[derive(Debug, Default)]
struct Inner {
    pending: VecDeque<Task>,
    processing: HashMap<String, Task>,
}

/// Queue with the same ack/nack contract as the Redis implementation, minus
/// blocking: [`dequeue`](MemoryQueue::dequeue) returns `None` when pending
/// is empty.
#[derive(Debug)]
pub struct MemoryQueue {
    inner: Mutex<Inner>,
    max_retries: u32,
}

impl Default for MemoryQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryQueue {
    pub fn new() -> Self {
        Self {
            inner: Mutex::default(),
            max_retries: 25,
        }
    }

    pub fn with_max_retries(max_retries: u32) -> Self {
        Self {
            inner: Mutex::default(),
            max_retries,
        }
    }

    /// Move the oldest pending task into processing.
    pub fn dequeue(&self) -> Option<Task> {
        let mut inner = self.inner.lock().unwrap();
        let task = inner.pending.pop_front()?;
        inner.processing.insert(task.id.clone(), task.clone());
        Some(task)
    }

    /// Acknowledge a task, removing it from processing.
    pub fn ack(&self, task_id: &str) {
        let mut inner = self.inner.lock().unwrap();
        inner.processing.remove(task_id);
    }

    /// Negative-acknowledge a task: redeliver at the back of the queue with
    /// an incremented retry count, or drop once retries are exhausted.
    ///
    /// Returns whether the task was redelivered.
    pub fn nack(&self, task_id: &str) -> bool {
        let mut inner = self.inner.lock().unwrap();
        let Some(mut task) = inner.processing.remove(task_id) else {
            return false;
        };

        task.retried += 1;
        if task.retried > self.max_retries {
            return false;
        }

        inner.pending.push_back(task);
        true
    }

    /// Number of pending tasks.
    pub fn pending_len(&self) -> usize {
        self.inner.lock().unwrap().pending.len()
    }

    /// Number of in-flight tasks.
    pub fn processing_len(&self) -> usize {
        self.inner.lock().unwrap().processing.len()
    }
}

#[async_trait]
impl QueueProducer for MemoryQueue {
    async fn enqueue(&self, task: Task) -> Result<TaskInfo> {
        let id = task.id.clone();
        let mut inner = self.inner.lock().unwrap();
        inner.pending.push_back(task);

        Ok(TaskInfo {
            id,
            queue: "memory".to_string(),
        })
    }
}
