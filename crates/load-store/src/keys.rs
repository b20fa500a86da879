//! Cache key layout.

/// Set of agent-id strings forming the canonical roster.
pub const AGENT_IDS_KEY: &str = "agents:ids";

/// Cached upstream auth token.
pub const TOKEN_KEY: &str = "token";

/// Presence flag for one agent.
pub fn online_key(agent_id: &str) -> String {
    format!("agent:{agent_id}:is_online")
}

/// Open-conversation counter for one agent.
pub fn customer_count_key(agent_id: &str) -> String {
    format!("agent:{agent_id}:customer_count")
}

/// Binding from a room to its currently assigned agent.
pub fn room_agent_key(room_id: &str) -> String {
    format!("room:{room_id}:agent")
}
