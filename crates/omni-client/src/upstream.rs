//! Seam trait for the chat platform.
//!
//! The pipeline talks to the platform through this trait so the test suite
//! can substitute a scripted implementation for [`OmniClient`].
//!
//! [`OmniClient`]: crate::client::OmniClient

use async_trait::async_trait;

use crate::error::Result;
use crate::types::{Agent, AssignedAgent, WebhookEndpoint, WebhookTarget};

/// Operations the allocation pipeline needs from the chat platform.
///
/// Every call is stateless: build a request, send it, decode the response.
/// Non-2xx responses surface as errors; retry policy lives with the caller.
#[async_trait]
pub trait Upstream: Send + Sync {
    /// Fetch the full agent roster (single page, limit 1000).
    async fn list_all_agents(&self) -> Result<Vec<Agent>>;

    /// Fetch the platform's own candidate agents for a room, with their
    /// authoritative open-conversation counts.
    async fn list_available_agents(&self, room_id: &str) -> Result<Vec<Agent>>;

    /// Assign an agent to a room on the platform side.
    async fn assign_agent(&self, room_id: &str, agent_id: i64) -> Result<AssignedAgent>;

    /// Mark a room resolved on the platform side.
    async fn mark_resolved(
        &self,
        room_id: &str,
        notes: &str,
        last_comment_id: &str,
    ) -> Result<()>;

    /// Authenticate with the configured email/password and return the
    /// bearer token. Callers are expected to cache it.
    async fn login(&self) -> Result<String>;

    /// Register the incoming-message (agent allocation) webhook URL.
    async fn set_incoming_webhook(&self, url: &str) -> Result<WebhookTarget>;

    /// Register the mark-as-resolved webhook URL.
    async fn set_resolved_webhook(&self, url: &str) -> Result<WebhookTarget>;

    /// Read the current webhook registration. Requires a bearer token from
    /// [`login`](Upstream::login).
    async fn webhook_config(&self, token: &str) -> Result<Vec<WebhookEndpoint>>;
}
