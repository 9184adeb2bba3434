//! Watcher orchestrator: stdin feed -> detector -> change filter -> daemon.

use std::sync::Arc;

use messenger_notifier_detector::{Detector, SharedLabels};
use messenger_notifier_watcher::{HttpNotifier, Watcher};
use tokio::io::BufReader;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::config::Config;
use crate::feed;

/// Runs the watcher until Ctrl+C.
///
/// The feed ending (stdin closed) stops mutation notifications but the
/// interval checks keep running against the last snapshot.
pub async fn run(config: Config) -> anyhow::Result<()> {
    let cancel = CancellationToken::new();

    let detector = Detector::with_keywords(config.keywords(), config.max_labels)?;
    let notifier = HttpNotifier::new(
        config.endpoint.clone(),
        config.method,
        config.request_timeout(),
    )?;
    let labels = SharedLabels::new();

    // Capacity 1: one queued check covers any burst of mutations.
    let (mutation_tx, mutation_rx) = mpsc::channel(1);

    let watcher = Watcher::new(
        config.watcher_config(),
        detector,
        Arc::new(labels.clone()),
        Arc::new(notifier),
    );
    let watcher_task = tokio::spawn(watcher.run(mutation_rx, cancel.clone()));

    let feed_cancel = cancel.clone();
    tokio::spawn(async move {
        let stdin = BufReader::new(tokio::io::stdin());
        tokio::select! {
            _ = feed_cancel.cancelled() => {}
            result = feed::run_feed(stdin, labels, mutation_tx) => match result {
                Ok(()) => tracing::info!("label feed closed"),
                Err(e) => tracing::warn!("label feed failed: {e}"),
            },
        }
    });

    tracing::info!("watcher ready");

    tokio::signal::ctrl_c().await?;
    tracing::info!("SIGINT received, shutting down");

    cancel.cancel();
    watcher_task.await?;

    Ok(())
}
