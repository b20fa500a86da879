//! Webhook payloads delivered by the platform.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Payload of the incoming-message (agent allocation) webhook.
///
/// Only `room_id` is interpreted; every other field is carried through
/// verbatim so the audit store can persist the event as delivered.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IncomingMessageEvent {
    /// Room the conversation belongs to.
    pub room_id: String,

    #[serde(default)]
    pub app_id: Option<String>,

    #[serde(default)]
    pub source: Option<String>,

    #[serde(default)]
    pub email: Option<String>,

    #[serde(default)]
    pub is_resolved: bool,

    #[serde(default)]
    pub latest_service: Option<LatestService>,

    /// Fields the core does not interpret, preserved for the audit record.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Service record embedded in webhook payloads.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LatestService {
    #[serde(default)]
    pub id: i64,

    #[serde(default)]
    pub room_id: Option<String>,

    #[serde(default)]
    pub is_resolved: bool,

    #[serde(default)]
    pub first_comment_id: Option<String>,

    #[serde(default)]
    pub last_comment_id: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Payload of the mark-as-resolved webhook.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolutionEvent {
    pub service: ResolvedService,

    pub resolved_by: ResolvedBy,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// The resolved room as reported by the platform.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolvedService {
    pub room_id: String,

    #[serde(default)]
    pub is_resolved: bool,

    #[serde(default)]
    pub notes: Option<String>,

    #[serde(default)]
    pub first_comment_id: Option<String>,

    #[serde(default)]
    pub last_comment_id: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Who resolved the room. May be a supervisor rather than the bound agent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolvedBy {
    pub id: i64,

    #[serde(default)]
    pub email: Option<String>,

    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub is_available: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn incoming_event_requires_room_id() {
        let err = serde_json::from_str::<IncomingMessageEvent>(r#"{"source": "wa"}"#);
        assert!(err.is_err());
    }

    #[test]
    fn incoming_event_preserves_unknown_fields() {
        let json = r#"{"room_id": "R1", "candidate_agent": {"id": 3}, "avatar_url": "x"}"#;
        let event: IncomingMessageEvent = serde_json::from_str(json).unwrap();
        assert_eq!(event.room_id, "R1");
        assert!(event.extra.contains_key("candidate_agent"));
        assert!(event.extra.contains_key("avatar_url"));

        let back = serde_json::to_value(&event).unwrap();
        assert_eq!(back["candidate_agent"]["id"], 3);
    }

    #[test]
    fn resolution_event_decodes() {
        let json = r#"{
            "service": {"id": 1, "room_id": "R1", "is_resolved": true, "last_comment_id": "99"},
            "resolved_by": {"id": 42, "email": "sup@example.com", "type": "admin"},
            "customer": {"user_id": "u-1"}
        }"#;
        let event: ResolutionEvent = serde_json::from_str(json).unwrap();
        assert_eq!(event.service.room_id, "R1");
        assert_eq!(event.resolved_by.id, 42);
        assert!(event.extra.contains_key("customer"));
    }
}
