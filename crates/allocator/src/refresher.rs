//! Periodic presence refresher.
//!
//! Pulls the full roster from the platform once a minute and reconciles it
//! into the load store: membership in `agents:ids`, presence flags, and a
//! `-1` counter seed for agents whose counter key is absent. Agents that
//! left the roster lose their presence key and set membership; their counter
//! keys are left alone and self-heal through reseeding if they reappear.

use std::collections::HashSet;
use std::time::Duration;

use load_store::{LoadStore, UNKNOWN_CUSTOMER_COUNT};
use omni_client::Upstream;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

use crate::error::Result;
use crate::services::Services;

/// Time between refresh ticks.
pub const REFRESH_INTERVAL: Duration = Duration::from_secs(60);

/// Reconcile the platform roster into the load store once.
pub async fn refresh_agent_status(upstream: &dyn Upstream, load: &dyn LoadStore) -> Result<()> {
    let agents = upstream.list_all_agents().await?;

    let previous: HashSet<String> = load.agent_ids().await?.into_iter().collect();
    let mut current = HashSet::with_capacity(agents.len());

    for agent in &agents {
        let id = agent.id.to_string();

        load.add_agent_id(&id).await?;
        load.set_online(&id, agent.is_available).await?;

        // Seed the unknown sentinel only when the counter key is absent; a
        // known counter is the worker's to maintain.
        if load.customer_count(&id).await?.is_none() {
            load.set_customer_count(&id, UNKNOWN_CUSTOMER_COUNT).await?;
        }

        current.insert(id);
    }

    for id in previous.difference(&current) {
        load.clear_online(id).await?;
        load.remove_agent_id(id).await?;
    }

    Ok(())
}

/// Spawn the periodic refresher. A failed tick is logged and the loop
/// continues; the task exits when the token is cancelled.
pub fn spawn(services: Services, cancel: CancellationToken) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(REFRESH_INTERVAL);
        // The startup refresh already ran; skip the immediate first tick.
        interval.tick().await;

        loop {
            tokio::select! {
                _ = cancel.cancelled() => {
                    info!("stopping agent status updater");
                    return;
                }
                _ = interval.tick() => {
                    match refresh_agent_status(services.upstream.as_ref(), services.load.as_ref()).await {
                        Ok(()) => info!("agent cache updated"),
                        Err(e) => error!(error = %e, "agent cache update failed"),
                    }
                }
            }
        }
    })
}
