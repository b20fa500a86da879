use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use tracing::{debug, info};

use allocator::{server, Config};

/// Which half of the pipeline this process runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Mode {
    /// HTTP server receiving platform webhooks.
    Webhook,
    /// Queue consumer plus presence refresher.
    Worker,
}

#[derive(Debug, Parser)]
#[command(name = "allocator")]
#[command(about = "Agent-allocation middleware for an omnichannel chat platform")]
struct Args {
    /// Service to run.
    #[arg(short = 'e', long = "exec", value_enum, default_value = "webhook")]
    exec: Mode,

    /// Config file path.
    #[arg(short = 'c', long = "config", default_value = "config.yml")]
    config: PathBuf,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt::init();

    let args = Args::parse();
    let config = Config::load(Some(args.config.as_path()));

    debug!(?config, "config loaded");
    info!(
        base_url = %config.webhook.base_url,
        "serving with webhook base url"
    );

    match args.exec {
        Mode::Webhook => server::run_server(config).await?,
        Mode::Worker => server::run_worker(config).await?,
    }

    Ok(())
}
