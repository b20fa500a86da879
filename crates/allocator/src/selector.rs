//! Agent selection.
//!
//! Polls the load store until a cap-eligible agent appears, falling back to
//! a cold refresh from the platform when cached counters are stale. The
//! poll tolerates agents not yet cached, unknown counters, and a fully
//! loaded roster: the upstream flow cannot easily re-deliver, so waiting for
//! the system to drain beats rejecting eagerly. The wall-clock budget bounds
//! queue growth.

use std::time::Duration;

use load_store::{LoadStore, UNKNOWN_CUSTOMER_COUNT};
use omni_client::Upstream;
use tokio::time::Instant;
use tracing::{debug, info, warn};

use crate::error::{AllocError, Result};

/// One scan over the cached roster.
struct ScanOutcome {
    /// Least-loaded eligible agent, if any.
    best: Option<(String, i64)>,
    /// Whether any counter was absent or held the unknown sentinel.
    stale: bool,
}

/// Polling agent selector.
#[derive(Debug, Clone)]
pub struct Selector {
    /// Hard wall-clock budget for one selection.
    pub max_wait: Duration,
    /// Delay between polls.
    pub poll_interval: Duration,
}

impl Default for Selector {
    fn default() -> Self {
        Self {
            max_wait: Duration::from_secs(10 * 60),
            poll_interval: Duration::from_secs(10),
        }
    }
}

impl Selector {
    pub fn new(max_wait: Duration, poll_interval: Duration) -> Self {
        Self {
            max_wait,
            poll_interval,
        }
    }

    /// Select the least-loaded online agent with `customer_count < max`.
    ///
    /// Returns the agent id as stored in the roster set. Errors with
    /// [`AllocError::NoAgentAvailable`] once the budget is exhausted.
    pub async fn select(
        &self,
        upstream: &dyn Upstream,
        load: &dyn LoadStore,
        room_id: &str,
        max: i64,
    ) -> Result<String> {
        let start = Instant::now();

        while start.elapsed() < self.max_wait {
            let outcome = self.scan_cache(load, max).await?;

            if let Some((agent_id, count)) = outcome.best {
                info!(
                    agent_id = %agent_id,
                    room_id = %room_id,
                    customer_count = count,
                    "selected agent from cache"
                );
                return Ok(agent_id);
            }

            if outcome.stale {
                match self.cold_refresh(upstream, load, room_id, max).await {
                    Ok(Some((agent_id, count))) => {
                        info!(
                            agent_id = %agent_id,
                            room_id = %room_id,
                            customer_count = count,
                            "selected agent from cold refresh"
                        );
                        return Ok(agent_id);
                    }
                    Ok(None) => {}
                    Err(e) => {
                        warn!(room_id = %room_id, error = %e, "cold refresh failed");
                    }
                }
            }

            debug!(room_id = %room_id, "no eligible agent, retrying");
            tokio::time::sleep(self.poll_interval).await;
        }

        Err(AllocError::NoAgentAvailable {
            room_id: room_id.to_string(),
        })
    }

    /// One pass over the cached roster.
    async fn scan_cache(&self, load: &dyn LoadStore, max: i64) -> Result<ScanOutcome> {
        let agent_ids = load.agent_ids().await?;

        let mut best: Option<(String, i64)> = None;
        let mut stale = false;

        for id in agent_ids {
            if !load.is_online(&id).await?.unwrap_or(false) {
                continue;
            }

            let count = match load.customer_count(&id).await? {
                None => {
                    stale = true;
                    continue;
                }
                Some(UNKNOWN_CUSTOMER_COUNT) => {
                    stale = true;
                    continue;
                }
                Some(count) => count,
            };

            if count >= max {
                continue;
            }

            // Ties go to the last-scanned eligible agent.
            let is_better = match best.as_ref() {
                None => true,
                Some((_, best_count)) => count <= *best_count,
            };
            if is_better {
                best = Some((id, count));
            }
        }

        Ok(ScanOutcome { best, stale })
    }

    /// Re-populate counters from the platform's candidate list for this
    /// room, then pick among the fresh numbers.
    ///
    /// This both returns a candidate and repairs the cache, so later polls
    /// can reuse the counters it wrote.
    pub async fn cold_refresh(
        &self,
        upstream: &dyn Upstream,
        load: &dyn LoadStore,
        room_id: &str,
        max: i64,
    ) -> Result<Option<(String, i64)>> {
        let candidates = upstream.list_available_agents(room_id).await?;

        let mut best: Option<(String, i64)> = None;

        for agent in &candidates {
            let id = agent.id.to_string();

            load.set_online(&id, true).await?;

            // The platform's count is authoritative; write it through so the
            // sentinel is gone for the next poll. A candidate without a
            // reported count stays unknown and is not eligible.
            let Some(count) = agent.current_customer_count else {
                continue;
            };
            load.set_customer_count(&id, count).await?;

            if count >= max {
                continue;
            }

            let is_better = match best.as_ref() {
                None => true,
                Some((_, best_count)) => count <= *best_count,
            };
            if is_better {
                best = Some((id, count));
            }
        }

        Ok(best)
    }
}
