//! Route handlers for the webhook server.

pub mod admin;
pub mod webhook;

use axum::routing::{get, post};
use axum::Router;

use crate::state::AppState;

/// Path the platform calls for new conversations.
pub const WEBHOOK_INCOMING_MESSAGE_PATH: &str = "/webhook-incoming-message";

/// Path the platform calls when a room is resolved.
pub const WEBHOOK_MARK_AS_RESOLVED_PATH: &str = "/webhook-mark-as-resolved";

/// Build the router with all routes.
pub fn router() -> Router<AppState> {
    Router::new()
        .route(WEBHOOK_INCOMING_MESSAGE_PATH, post(webhook::incoming_message))
        .route(WEBHOOK_MARK_AS_RESOLVED_PATH, post(webhook::mark_as_resolved))
        .route("/agents", get(admin::list_agents))
        .route("/set-webhook", post(admin::set_webhook))
        .route("/webhook-config", get(admin::webhook_config))
}
