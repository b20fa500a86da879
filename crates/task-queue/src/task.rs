//! Task type and kinds.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// Task kind for assigning an agent to a new conversation. The payload is
/// the JSON-encoded incoming-message event.
pub const TYPE_CHAT_ASSIGN_AGENT: &str = "chat:assign_agent";

/// A unit of queued work.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    /// Unique task id, assigned at creation.
    pub id: String,
    /// Task kind; consumers dispatch on this.
    pub kind: String,
    /// Kind-specific payload.
    pub payload: Value,
    /// How many times this task has been redelivered after a handler error.
    #[serde(default)]
    pub retried: u32,
}

impl Task {
    /// Create a task with a fresh id.
    pub fn new(kind: impl Into<String>, payload: Value) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            kind: kind.into(),
            payload,
            retried: 0,
        }
    }
}

/// Where an enqueued task landed, for logging.
#[derive(Debug, Clone)]
pub struct TaskInfo {
    pub id: String,
    pub queue: String,
}
