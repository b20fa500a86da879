//! HTTP client for the chat platform admin API.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::config::OmniConfig;
use crate::error::{OmniError, Result};
use crate::types::{Agent, AssignedAgent, WebhookEndpoint, WebhookTarget};
use crate::upstream::Upstream;

const APP_ID_HEADER: &str = "Qiscus-App-Id";
const SECRET_KEY_HEADER: &str = "Qiscus-Secret-Key";

/// Envelope for responses that carry an agent list.
#[derive(Debug, Deserialize)]
struct AgentListResponse {
    data: AgentListData,
}

#[derive(Debug, Deserialize)]
struct AgentListData {
    #[serde(default)]
    agents: Vec<Agent>,
}

#[derive(Debug, Deserialize)]
struct AssignAgentResponse {
    data: AssignAgentData,
}

#[derive(Debug, Deserialize)]
struct AssignAgentData {
    added_agent: AssignedAgent,
}

#[derive(Debug, Deserialize)]
struct LoginResponse {
    data: LoginData,
}

#[derive(Debug, Deserialize)]
struct LoginData {
    user: LoginUser,
}

#[derive(Debug, Deserialize)]
struct LoginUser {
    #[serde(default)]
    authentication_token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SetWebhookResponse {
    data: WebhookTarget,
}

#[derive(Debug, Deserialize)]
struct WebhookConfigResponse {
    data: WebhookConfigData,
}

#[derive(Debug, Deserialize)]
struct WebhookConfigData {
    #[serde(default)]
    webhook_configs: Vec<WebhookEndpoint>,
}

/// Client for the omnichannel platform.
#[derive(Debug, Clone)]
pub struct OmniClient {
    http: Client,
    config: OmniConfig,
}

impl OmniClient {
    /// Build a client with a 30-second request timeout.
    pub fn new(config: OmniConfig) -> Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(OmniError::Http)?;

        Ok(Self { http, config })
    }

    /// Get the configuration.
    pub fn config(&self) -> &OmniConfig {
        &self.config
    }

    /// GET an admin endpoint with app-id/secret-key auth and decode the body.
    async fn admin_get<T: for<'de> Deserialize<'de>>(
        &self,
        operation: &'static str,
        url: &str,
    ) -> Result<T> {
        debug!(operation, url, "upstream GET");

        let response = self
            .http
            .get(url)
            .header(APP_ID_HEADER, &self.config.app_id)
            .header(SECRET_KEY_HEADER, &self.config.secret_key)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(OmniError::Status {
                operation,
                status: status.as_u16(),
            });
        }

        Ok(response.json().await?)
    }

    /// POST a form to an admin endpoint with app-id/secret-key auth.
    async fn admin_post_form<T: for<'de> Deserialize<'de>>(
        &self,
        operation: &'static str,
        url: &str,
        params: &[(&str, &str)],
    ) -> Result<T> {
        debug!(operation, url, "upstream POST");

        let response = self
            .http
            .post(url)
            .header(APP_ID_HEADER, &self.config.app_id)
            .header(SECRET_KEY_HEADER, &self.config.secret_key)
            .form(params)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(OmniError::Status {
                operation,
                status: status.as_u16(),
            });
        }

        Ok(response.json().await?)
    }
}

#[async_trait]
impl Upstream for OmniClient {
    async fn list_all_agents(&self) -> Result<Vec<Agent>> {
        let response: AgentListResponse = self
            .admin_get("list_all_agents", &self.config.all_agents_url())
            .await?;
        Ok(response.data.agents)
    }

    async fn list_available_agents(&self, room_id: &str) -> Result<Vec<Agent>> {
        let response: AgentListResponse = self
            .admin_get(
                "list_available_agents",
                &self.config.available_agents_url(room_id),
            )
            .await?;
        Ok(response.data.agents)
    }

    async fn assign_agent(&self, room_id: &str, agent_id: i64) -> Result<AssignedAgent> {
        let agent_id = agent_id.to_string();
        let response: AssignAgentResponse = self
            .admin_post_form(
                "assign_agent",
                &self.config.assign_agent_url(),
                &[
                    ("room_id", room_id),
                    ("agent_id", agent_id.as_str()),
                    ("max_agent", "1"),
                ],
            )
            .await?;
        Ok(response.data.added_agent)
    }

    async fn mark_resolved(
        &self,
        room_id: &str,
        notes: &str,
        last_comment_id: &str,
    ) -> Result<()> {
        let response = self
            .http
            .post(self.config.mark_resolved_url())
            .header(APP_ID_HEADER, &self.config.app_id)
            .header(SECRET_KEY_HEADER, &self.config.secret_key)
            .form(&[
                ("room_id", room_id),
                ("notes", notes),
                ("last_comment_id", last_comment_id),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(OmniError::Status {
                operation: "mark_resolved",
                status: status.as_u16(),
            });
        }

        Ok(())
    }

    async fn login(&self) -> Result<String> {
        let response = self
            .http
            .post(self.config.auth_url())
            .form(&[
                ("email", self.config.email.as_str()),
                ("password", self.config.password.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(OmniError::Status {
                operation: "login",
                status: status.as_u16(),
            });
        }

        let login: LoginResponse = response.json().await?;
        login
            .data
            .user
            .authentication_token
            .ok_or(OmniError::MissingField("authentication_token"))
    }

    async fn set_incoming_webhook(&self, url: &str) -> Result<WebhookTarget> {
        let response: SetWebhookResponse = self
            .admin_post_form(
                "set_incoming_webhook",
                &self.config.set_incoming_webhook_url(),
                &[("webhook_url", url), ("is_webhook_enabled", "true")],
            )
            .await?;
        Ok(response.data)
    }

    async fn set_resolved_webhook(&self, url: &str) -> Result<WebhookTarget> {
        let response: SetWebhookResponse = self
            .admin_post_form(
                "set_resolved_webhook",
                &self.config.set_resolved_webhook_url(),
                &[("webhook_url", url), ("is_webhook_enabled", "true")],
            )
            .await?;
        Ok(response.data)
    }

    async fn webhook_config(&self, token: &str) -> Result<Vec<WebhookEndpoint>> {
        let response = self
            .http
            .get(self.config.webhook_config_url())
            .header("Authorization", token)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(OmniError::Status {
                operation: "webhook_config",
                status: status.as_u16(),
            });
        }

        let config: WebhookConfigResponse = response.json().await?;
        Ok(config.data.webhook_configs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn agent_list_response_decodes() {
        let json = r#"{
            "data": {
                "agents": [
                    {"id": 7, "name": "A", "is_available": true, "current_customer_count": 1},
                    {"id": 8, "name": "B", "is_available": false, "current_customer_count": 0}
                ],
                "meta": {"per_page": 1000, "total_count": 2}
            },
            "status": 200
        }"#;

        let response: AgentListResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.data.agents.len(), 2);
        assert_eq!(response.data.agents[0].id, 7);
        assert_eq!(response.data.agents[1].current_customer_count, Some(0));
    }

    #[test]
    fn login_response_extracts_token() {
        let json = r#"{
            "data": {
                "user": {
                    "id": 1,
                    "email": "ops@example.com",
                    "authentication_token": "tok-123",
                    "is_available": true
                },
                "long_lived_token": "llt"
            }
        }"#;

        let response: LoginResponse = serde_json::from_str(json).unwrap();
        assert_eq!(
            response.data.user.authentication_token.as_deref(),
            Some("tok-123")
        );
    }

    #[test]
    fn assign_response_decodes() {
        let json = r#"{"data": {"added_agent": {"id": 8, "name": "B", "is_available": true}}}"#;
        let response: AssignAgentResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.data.added_agent.id, 8);
    }

    #[test]
    fn webhook_config_response_decodes() {
        let json = r#"{
            "data": {
                "webhook_configs": [
                    {"id": 1, "type": "agent_allocation", "url": "https://x/in", "is_active": true}
                ]
            },
            "status": 200
        }"#;

        let response: WebhookConfigResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.data.webhook_configs.len(), 1);
        assert_eq!(
            response.data.webhook_configs[0].url.as_deref(),
            Some("https://x/in")
        );
    }
}
