//! Configuration for the omnichannel client.

/// Connection settings for the chat platform.
///
/// Admin endpoints authenticate with the app-id/secret-key header pair;
/// webhook-config reads use a bearer token obtained from [`login`].
///
/// [`login`]: crate::upstream::Upstream::login
#[derive(Debug, Clone)]
pub struct OmniConfig {
    /// Base URL of the platform (e.g. "https://omnichannel.qiscus.com").
    pub base_url: String,
    /// Application id sent as the `Qiscus-App-Id` header.
    pub app_id: String,
    /// Secret key sent as the `Qiscus-Secret-Key` header.
    pub secret_key: String,
    /// Admin account email used by the login flow.
    pub email: String,
    /// Admin account password used by the login flow.
    pub password: String,
}

impl OmniConfig {
    /// Create a configuration with the given base URL and empty credentials.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            app_id: String::new(),
            secret_key: String::new(),
            email: String::new(),
            password: String::new(),
        }
    }

    /// Set the app-id/secret-key pair used by admin endpoints.
    pub fn with_app_credentials(
        mut self,
        app_id: impl Into<String>,
        secret_key: impl Into<String>,
    ) -> Self {
        self.app_id = app_id.into();
        self.secret_key = secret_key.into();
        self
    }

    /// Set the email/password pair used by the login flow.
    pub fn with_login(mut self, email: impl Into<String>, password: impl Into<String>) -> Self {
        self.email = email.into();
        self.password = password.into();
        self
    }

    /// Login endpoint.
    pub fn auth_url(&self) -> String {
        format!("{}/api/v1/auth", self.base_url)
    }

    /// Full roster listing, single page of up to 1000 agents.
    pub fn all_agents_url(&self) -> String {
        format!("{}/api/v2/admin/agents?limit=1000", self.base_url)
    }

    /// Platform-side candidates for a given room.
    pub fn available_agents_url(&self, room_id: &str) -> String {
        format!(
            "{}/api/v2/admin/service/available_agents?room_id={}",
            self.base_url, room_id
        )
    }

    /// Agent assignment endpoint.
    pub fn assign_agent_url(&self) -> String {
        format!("{}/api/v1/admin/service/assign_agent", self.base_url)
    }

    /// Room resolution endpoint.
    pub fn mark_resolved_url(&self) -> String {
        format!("{}/api/v1/admin/service/mark_as_resolved", self.base_url)
    }

    /// Current webhook registration, bearer-token authenticated.
    pub fn webhook_config_url(&self) -> String {
        format!("{}/api/v2/admin/webhook_config", self.base_url)
    }

    /// Registration endpoint for the incoming-message (agent allocation) webhook.
    pub fn set_incoming_webhook_url(&self) -> String {
        format!("{}/api/v1/app/webhook/agent_allocation", self.base_url)
    }

    /// Registration endpoint for the mark-as-resolved webhook.
    pub fn set_resolved_webhook_url(&self) -> String {
        format!("{}/api/v1/app/webhook/mark_as_resolved", self.base_url)
    }
}
