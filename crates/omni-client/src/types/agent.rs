//! Agent and webhook-registration types.

use serde::{Deserialize, Serialize};

/// A human agent as reported by the platform roster endpoints.
///
/// Many upstream fields are documented as possibly absent; those are modeled
/// as `Option` so a missing value is never confused with an empty or zero one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Agent {
    /// Platform-wide agent id.
    pub id: i64,

    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub email: Option<String>,

    /// Presence flag; offline agents are never selected.
    #[serde(default)]
    pub is_available: bool,

    /// Number of rooms currently held by this agent, when the platform
    /// reports it.
    #[serde(default)]
    pub current_customer_count: Option<i64>,

    #[serde(default)]
    pub force_offline: bool,

    #[serde(default)]
    pub avatar_url: Option<String>,

    #[serde(default)]
    pub sdk_email: Option<String>,

    #[serde(default)]
    pub last_login: Option<String>,

    #[serde(default)]
    pub type_as_string: Option<String>,
}

/// The agent the platform reports as added after an assignment call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssignedAgent {
    pub id: i64,

    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub email: Option<String>,

    #[serde(default)]
    pub is_available: bool,
}

/// Webhook registration state returned by the set-webhook endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebhookTarget {
    #[serde(default)]
    pub allocate_agent_webhook_url: Option<String>,

    #[serde(default)]
    pub is_allocate_agent_webhook_enabled: bool,

    #[serde(default)]
    pub mark_as_resolved_webhook_url: Option<String>,

    #[serde(default)]
    pub is_mark_as_resolved_webhook_enabled: bool,
}

/// One entry of the platform's webhook-config listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebhookEndpoint {
    #[serde(default)]
    pub id: i64,

    #[serde(default)]
    pub r#type: Option<String>,

    #[serde(default)]
    pub url: Option<String>,

    #[serde(default)]
    pub is_active: bool,
}
