//! Queue worker for assignment tasks.
//!
//! Each `chat:assign_agent` task runs an eight-step state machine inside one
//! audit transaction: existence check, insert, select, upstream assign,
//! counter increment, room binding, status update, commit. Any failure rolls
//! the audit transaction back and nacks the task; a room that already has a
//! row is acked without side effects.
//!
//! Load-store writes and the upstream assign sit between insert and commit
//! and are deliberately not rolled back with the transaction; a crash in
//! that window is repaired by redelivery re-running the whole machine.

use async_trait::async_trait;
use audit_store::{AuditTx, STATUS_SERVED};
use omni_client::IncomingMessageEvent;
use task_queue::{Task, TaskHandler, TYPE_CHAT_ASSIGN_AGENT};
use tracing::{info, warn};

use crate::error::{AllocError, Result};
use crate::selector::Selector;
use crate::services::Services;

/// Single-consumer task worker.
pub struct Worker {
    services: Services,
    selector: Selector,
    max_customers: i64,
}

enum AssignOutcome {
    /// The room already had an audit row; the task is a duplicate.
    Duplicate,
    /// An agent was assigned and the row is ready to commit.
    Assigned { agent_id: String },
}

impl Worker {
    pub fn new(services: Services, max_customers: u32) -> Self {
        Self {
            services,
            selector: Selector::default(),
            max_customers: i64::from(max_customers),
        }
    }

    /// Replace the selector; tests shrink its budget and poll interval.
    pub fn with_selector(mut self, selector: Selector) -> Self {
        self.selector = selector;
        self
    }

    /// Handle one assignment task end to end.
    pub async fn handle_assign(&self, task: &Task) -> Result<()> {
        let event: IncomingMessageEvent = serde_json::from_value(task.payload.clone())?;
        let room_id = event.room_id.clone();

        let mut tx = self.services.audit.begin().await?;

        match self.assign_in_tx(tx.as_mut(), &task.payload, &room_id).await {
            Ok(AssignOutcome::Duplicate) => {
                info!(room_id = %room_id, "room already recorded, skipping");
                tx.rollback().await?;
                Ok(())
            }
            Ok(AssignOutcome::Assigned { agent_id }) => {
                tx.commit().await?;
                info!(
                    room_id = %room_id,
                    assigned_agent_id = %agent_id,
                    "assignment task complete"
                );
                Ok(())
            }
            Err(e) => {
                if let Err(rb) = tx.rollback().await {
                    warn!(room_id = %room_id, error = %rb, "rollback failed");
                }
                Err(e)
            }
        }
    }

    /// Steps 1 through 7; the caller commits or rolls back.
    async fn assign_in_tx(
        &self,
        tx: &mut dyn AuditTx,
        payload: &serde_json::Value,
        room_id: &str,
    ) -> Result<AssignOutcome> {
        if tx.room_exists(room_id).await? {
            return Ok(AssignOutcome::Duplicate);
        }

        tx.insert_room(room_id, payload).await?;

        let agent_id = self
            .selector
            .select(
                self.services.upstream.as_ref(),
                self.services.load.as_ref(),
                room_id,
                self.max_customers,
            )
            .await?;

        let numeric_id: i64 = agent_id
            .parse()
            .map_err(|_| AllocError::InvalidAgentId(agent_id.clone()))?;

        self.services
            .upstream
            .assign_agent(room_id, numeric_id)
            .await?;

        self.services.load.incr_customer_count(&agent_id).await?;
        self.services.load.bind_room(room_id, &agent_id).await?;

        tx.set_status(room_id, STATUS_SERVED).await?;

        Ok(AssignOutcome::Assigned { agent_id })
    }
}

#[async_trait]
impl TaskHandler for Worker {
    async fn handle(
        &self,
        task: &Task,
    ) -> std::result::Result<(), Box<dyn std::error::Error + Send + Sync>> {
        match task.kind.as_str() {
            TYPE_CHAT_ASSIGN_AGENT => self.handle_assign(task).await.map_err(Into::into),
            other => {
                // Unknown kinds would redeliver forever; drop them instead.
                warn!(kind = %other, task_id = %task.id, "unknown task kind, dropping");
                Ok(())
            }
        }
    }
}
