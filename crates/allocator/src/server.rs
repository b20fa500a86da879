//! Webhook server and worker entry points.

use tokio_util::sync::CancellationToken;
use tracing::info;

use task_queue::RedisQueue;

use crate::config::Config;
use crate::error::Result;
use crate::redact;
use crate::refresher;
use crate::routes;
use crate::services::Services;
use crate::state::AppState;
use crate::worker::Worker;

/// Run the webhook HTTP server until the process is stopped.
pub async fn run_server(config: Config) -> Result<()> {
    let services = Services::connect(&config).await?;
    let addr = config.listen.addr();
    let state = AppState::new(services, config);

    let app = routes::router()
        .layer(axum::middleware::from_fn(redact::log_requests))
        .with_state(state);

    info!(addr = %addr, "webhook server listening");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Run the queue consumer and the presence refresher until interrupted.
///
/// The first roster refresh runs synchronously; if it fails, startup is
/// aborted rather than consuming tasks against an empty cache.
pub async fn run_worker(config: Config) -> Result<()> {
    let services = Services::connect(&config).await?;

    refresh_or_abort(&services).await?;

    let cancel = CancellationToken::new();
    let refresher_handle = refresher::spawn(services.clone(), cancel.clone());

    let consumer = RedisQueue::connect(&config.redis.url).await?;
    consumer.recover().await?;

    let worker = Worker::new(services, config.webhook.max_current_customer);

    info!("starting worker");
    tokio::select! {
        result = consumer.run(&worker, cancel.clone()) => result?,
        _ = tokio::signal::ctrl_c() => {
            info!("shutdown signal received");
        }
    }

    cancel.cancel();
    let _ = refresher_handle.await;

    Ok(())
}

async fn refresh_or_abort(services: &Services) -> Result<()> {
    refresher::refresh_agent_status(services.upstream.as_ref(), services.load.as_ref())
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "initial agent cache update failed");
            e
        })
}
