//! Platform webhook handlers.

use axum::extract::State;
use axum::http::StatusCode;
use omni_client::{IncomingMessageEvent, ResolutionEvent};
use task_queue::{Task, TYPE_CHAT_ASSIGN_AGENT};
use tracing::{error, info};

use crate::state::AppState;

/// Intake for new conversations.
///
/// Parses the event, enqueues an assignment task, and answers. Nothing here
/// touches the load store, the audit store, or the platform; the latency
/// budget is bounded by the enqueue alone.
pub async fn incoming_message(State(state): State<AppState>, body: String) -> StatusCode {
    let event: IncomingMessageEvent = match serde_json::from_str(&body) {
        Ok(event) => event,
        Err(e) => {
            error!(error = %e, "could not parse incoming-message payload");
            return StatusCode::BAD_REQUEST;
        }
    };

    let payload = match serde_json::to_value(&event) {
        Ok(payload) => payload,
        Err(e) => {
            error!(error = %e, room_id = %event.room_id, "could not encode task payload");
            return StatusCode::INTERNAL_SERVER_ERROR;
        }
    };

    let task = Task::new(TYPE_CHAT_ASSIGN_AGENT, payload);
    match state.services.queue.enqueue(task).await {
        Ok(queued) => {
            info!(
                task_id = %queued.id,
                queue = %queued.queue,
                room_id = %event.room_id,
                "enqueued assignment task"
            );
            StatusCode::OK
        }
        Err(e) => {
            error!(error = %e, room_id = %event.room_id, "could not enqueue task");
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

/// Handler for resolved rooms.
///
/// Decrements the counter of the agent that actually held the room: the
/// room binding, when present, overrides `resolved_by` so a supervisor
/// resolving someone else's room doesn't skew a bystander's counter.
pub async fn mark_as_resolved(State(state): State<AppState>, body: String) -> StatusCode {
    let event: ResolutionEvent = match serde_json::from_str(&body) {
        Ok(event) => event,
        Err(e) => {
            error!(error = %e, "could not parse mark-as-resolved payload");
            return StatusCode::BAD_REQUEST;
        }
    };

    let room_id = event.service.room_id.clone();
    let load = state.services.load.as_ref();

    let binding = match load.room_agent(&room_id).await {
        Ok(binding) => binding,
        Err(e) => {
            error!(room_id = %room_id, error = %e, "could not read room binding");
            return StatusCode::BAD_REQUEST;
        }
    };

    let bound_agent = match binding.as_deref() {
        None => None,
        Some(raw) => match raw.parse::<i64>() {
            Ok(id) => Some(id).filter(|id| *id > 0),
            Err(_) => {
                error!(
                    room_id = %room_id,
                    binding = %raw,
                    "room binding is not a valid agent id"
                );
                return StatusCode::BAD_REQUEST;
            }
        },
    };

    let agent_id = match bound_agent {
        Some(bound) => {
            info!(room_id = %room_id, agent_id = bound, "room binding overrides resolver");
            bound.to_string()
        }
        None => event.resolved_by.id.to_string(),
    };

    let previous = match load.customer_count(&agent_id).await {
        // Nothing to decrement; the counter reseeds on the next refresh.
        Ok(None) => return StatusCode::OK,
        Ok(Some(count)) => count,
        Err(e) => {
            error!(agent_id = %agent_id, error = %e, "could not read customer count");
            return StatusCode::BAD_REQUEST;
        }
    };

    if let Err(e) = load.decr_customer_count(&agent_id).await {
        error!(
            agent_id = %agent_id,
            error = %e,
            "could not decrease customer count"
        );
        return StatusCode::BAD_REQUEST;
    }

    if bound_agent.is_some() {
        if let Err(e) = load.unbind_room(&room_id).await {
            error!(room_id = %room_id, error = %e, "could not drop room binding");
        }
    }

    info!(
        agent_id = %agent_id,
        room_id = %room_id,
        from = previous,
        to = previous - 1,
        "decreased customer count"
    );

    StatusCode::OK
}
