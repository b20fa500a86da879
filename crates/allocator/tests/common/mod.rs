//! Test doubles shared by the pipeline tests.
#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use audit_store::MemoryAuditStore;
use load_store::MemoryLoadStore;
use omni_client::{
    Agent, AssignedAgent, OmniError, Upstream, WebhookEndpoint, WebhookTarget,
};
use task_queue::MemoryQueue;

use allocator::{Config, Services};

/// Build an agent with just the fields the pipeline reads.
pub fn agent(id: i64, is_available: bool, count: Option<i64>) -> Agent {
    Agent {
        id,
        name: Some(format!("agent-{id}")),
        email: None,
        is_available,
        current_customer_count: count,
        force_offline: false,
        avatar_url: None,
        sdk_email: None,
        last_login: None,
        type_as_string: None,
    }
}

/// Scripted platform: fixed roster, per-room candidate lists, recorded
/// assignment calls, and switchable failures.
#[derive(Default)]
pub struct StubUpstream {
    pub roster: Mutex<Vec<Agent>>,
    pub available: Mutex<HashMap<String, Vec<Agent>>>,
    pub assign_calls: Mutex<Vec<(String, i64)>>,
    pub login_calls: AtomicUsize,
    pub fail_assign: AtomicBool,
    pub fail_roster: AtomicBool,
    pub fail_available: AtomicBool,
}

impl StubUpstream {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_roster(roster: Vec<Agent>) -> Self {
        let stub = Self::new();
        *stub.roster.lock().unwrap() = roster;
        stub
    }

    pub fn set_available(&self, room_id: &str, agents: Vec<Agent>) {
        self.available
            .lock()
            .unwrap()
            .insert(room_id.to_string(), agents);
    }

    pub fn assign_call_count(&self) -> usize {
        self.assign_calls.lock().unwrap().len()
    }
}

#[async_trait]
impl Upstream for StubUpstream {
    async fn list_all_agents(&self) -> Result<Vec<Agent>, OmniError> {
        if self.fail_roster.load(Ordering::SeqCst) {
            return Err(OmniError::Status {
                operation: "list_all_agents",
                status: 502,
            });
        }
        Ok(self.roster.lock().unwrap().clone())
    }

    async fn list_available_agents(&self, room_id: &str) -> Result<Vec<Agent>, OmniError> {
        if self.fail_available.load(Ordering::SeqCst) {
            return Err(OmniError::Status {
                operation: "list_available_agents",
                status: 502,
            });
        }
        Ok(self
            .available
            .lock()
            .unwrap()
            .get(room_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn assign_agent(&self, room_id: &str, agent_id: i64) -> Result<AssignedAgent, OmniError> {
        if self.fail_assign.load(Ordering::SeqCst) {
            return Err(OmniError::Status {
                operation: "assign_agent",
                status: 500,
            });
        }
        self.assign_calls
            .lock()
            .unwrap()
            .push((room_id.to_string(), agent_id));
        Ok(AssignedAgent {
            id: agent_id,
            name: None,
            email: None,
            is_available: true,
        })
    }

    async fn mark_resolved(
        &self,
        _room_id: &str,
        _notes: &str,
        _last_comment_id: &str,
    ) -> Result<(), OmniError> {
        Ok(())
    }

    async fn login(&self) -> Result<String, OmniError> {
        self.login_calls.fetch_add(1, Ordering::SeqCst);
        Ok("stub-token".to_string())
    }

    async fn set_incoming_webhook(&self, url: &str) -> Result<WebhookTarget, OmniError> {
        Ok(WebhookTarget {
            allocate_agent_webhook_url: Some(url.to_string()),
            is_allocate_agent_webhook_enabled: true,
            mark_as_resolved_webhook_url: None,
            is_mark_as_resolved_webhook_enabled: false,
        })
    }

    async fn set_resolved_webhook(&self, url: &str) -> Result<WebhookTarget, OmniError> {
        Ok(WebhookTarget {
            allocate_agent_webhook_url: None,
            is_allocate_agent_webhook_enabled: false,
            mark_as_resolved_webhook_url: Some(url.to_string()),
            is_mark_as_resolved_webhook_enabled: true,
        })
    }

    async fn webhook_config(&self, _token: &str) -> Result<Vec<WebhookEndpoint>, OmniError> {
        Ok(Vec::new())
    }
}

/// Everything a pipeline test needs, with each collaborator reachable for
/// assertions.
pub struct TestHarness {
    pub upstream: Arc<StubUpstream>,
    pub load: Arc<MemoryLoadStore>,
    pub audit: Arc<MemoryAuditStore>,
    pub queue: Arc<MemoryQueue>,
    pub services: Services,
}

impl TestHarness {
    pub fn new(upstream: StubUpstream) -> Self {
        let upstream = Arc::new(upstream);
        let load = Arc::new(MemoryLoadStore::new());
        let audit = Arc::new(MemoryAuditStore::new());
        let queue = Arc::new(MemoryQueue::new());

        let services = Services::new(
            upstream.clone(),
            load.clone(),
            audit.clone(),
            queue.clone(),
        );

        Self {
            upstream,
            load,
            audit,
            queue,
            services,
        }
    }

    /// App state over the harness services with default configuration.
    pub fn state(&self) -> allocator::state::AppState {
        allocator::state::AppState::new(self.services.clone(), Config::default())
    }
}
