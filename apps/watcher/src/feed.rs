//! Line-based label feed.
//!
//! Each non-empty line is one snapshot of the page's labels: either a JSON
//! array of strings, or any other text taken as a single label. Every
//! snapshot doubles as a mutation notification for the watcher.

use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::sync::mpsc;

use messenger_notifier_detector::SharedLabels;

/// Parses one feed line into a label snapshot.
pub fn parse_snapshot(line: &str) -> Option<Vec<String>> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }
    match serde_json::from_str::<Vec<String>>(line) {
        Ok(labels) => Some(labels),
        Err(_) => Some(vec![line.to_string()]),
    }
}

/// Reads snapshots until EOF, replacing `labels` and notifying `mutations`.
pub async fn run_feed<R>(
    reader: R,
    labels: SharedLabels,
    mutations: mpsc::Sender<()>,
) -> std::io::Result<()>
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = reader.lines();
    while let Some(line) = lines.next_line().await? {
        let Some(snapshot) = parse_snapshot(&line) else {
            continue;
        };
        tracing::trace!(count = snapshot.len(), "label snapshot");
        labels.replace(snapshot);
        // A full channel already has a check queued.
        let _ = mutations.try_send(());
    }
    Ok(())
}
