//! Operator-facing routes: roster listing and webhook registration.

use axum::extract::State;
use axum::Json;
use omni_client::{Agent, WebhookEndpoint, WebhookTarget};
use tracing::info;

use crate::error::Result;
use crate::routes::{WEBHOOK_INCOMING_MESSAGE_PATH, WEBHOOK_MARK_AS_RESOLVED_PATH};
use crate::state::AppState;
use crate::token;

/// Proxy the platform's full agent roster.
pub async fn list_agents(State(state): State<AppState>) -> Result<Json<Vec<Agent>>> {
    let agents = state.services.upstream.list_all_agents().await?;
    Ok(Json(agents))
}

/// Register both webhook URLs with the platform.
pub async fn set_webhook(State(state): State<AppState>) -> Result<Json<WebhookTarget>> {
    let base = &state.config.webhook.base_url;

    let incoming_url = format!("{base}{WEBHOOK_INCOMING_MESSAGE_PATH}");
    state
        .services
        .upstream
        .set_incoming_webhook(&incoming_url)
        .await?;

    let resolved_url = format!("{base}{WEBHOOK_MARK_AS_RESOLVED_PATH}");
    let target = state
        .services
        .upstream
        .set_resolved_webhook(&resolved_url)
        .await?;

    info!(%incoming_url, %resolved_url, "registered webhooks upstream");

    Ok(Json(target))
}

/// Read the platform's current webhook registration.
pub async fn webhook_config(State(state): State<AppState>) -> Result<Json<Vec<WebhookEndpoint>>> {
    let token = token::access_token(
        state.services.upstream.as_ref(),
        state.services.load.as_ref(),
    )
    .await?;

    let endpoints = state.services.upstream.webhook_config(&token).await?;
    Ok(Json(endpoints))
}
