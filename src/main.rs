use std::time::Duration;

use anyhow::Result;
use tracing::info;

mod types;
mod error;
mod config;
mod report;
mod classifier;
mod discord;
mod notifier;
mod kubernetes;
mod monitor;

use config::load_config;
use kubernetes::create_client;
use monitor::Monitor;

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let cfg = load_config()?;
    info!(
        "interval_minutes = {}, deployment_mode = {:?}, policy = {:?}",
        cfg.interval_minutes, cfg.deployment_mode, cfg.policy
    );

    let client = create_client(cfg.deployment_mode).await?;
    let interval = Duration::from_secs(cfg.interval_minutes * 60);

    Monitor::new(client, &cfg).run(interval).await;

    Ok(())
}

fn init_tracing() {
    // DEBUG=true widens the default filter; RUST_LOG still wins when set.
    let default_level = if std::env::var("DEBUG").as_deref() == Ok("true") {
        "debug"
    } else {
        "info"
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .with_target(false)
        .try_init();
}
