//! Messenger Notifier watcher entry point.
//!
//! Reads label snapshots from stdin (one per line) and reports the unread
//! status to the tray daemon.

mod app;
mod config;
mod feed;

use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    // Logs go to stderr; stdin carries the label feed.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        "starting Messenger Notifier watcher"
    );

    let config = config::Config::load()?;
    tracing::info!(endpoint = %config.endpoint, "configuration loaded");

    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(app::run(config))?;

    tracing::info!("watcher shut down cleanly");
    Ok(())
}
