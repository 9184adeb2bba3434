//! Daemon orchestrator: wires the status server to the tray.

use std::sync::Arc;
use std::time::Duration;

use messenger_notifier_server::{ServerConfig, StatusServer};
use messenger_notifier_tray::{LogBackend, TrayConfig, TrayEvent, TrayHandle, TrayUpdate};
use tokio_util::sync::CancellationToken;

use crate::config::Config;

/// How long to wait for the server to bind before reporting it to the tray.
const BIND_WAIT: Duration = Duration::from_secs(2);

/// Runs the daemon until Ctrl+C or a tray quit.
pub async fn run(config: Config) -> anyhow::Result<()> {
    let cancel = CancellationToken::new();

    // -- Tray --
    let tray_config = TrayConfig {
        icon_dir: config.icon_dir.clone(),
        ..TrayConfig::default()
    };
    let (tray, runner) = TrayHandle::new(tray_config, LogBackend);
    let tray_task = tokio::spawn(runner.run(cancel.clone()));

    // -- Status server --
    let tray_for_server = tray.clone();
    let server = StatusServer::new(
        ServerConfig { port: config.port },
        Box::new(move |status| tray_for_server.set_status(status)),
    );

    let server_run = Arc::clone(&server);
    let tray_for_run = tray.clone();
    tokio::spawn(async move {
        // A failed bind leaves the daemon running without a server.
        if let Err(e) = server_run.run().await {
            tracing::error!("status server unavailable: {e}");
        }
        tray_for_run.update(TrayUpdate::ServerStopped);
    });

    match tokio::time::timeout(BIND_WAIT, wait_for_port(&server)).await {
        Ok(port) => tray.update(TrayUpdate::ServerStarted { port }),
        Err(_) => tracing::warn!("status server did not come up"),
    }

    // -- Manual toggle --
    #[cfg(unix)]
    spawn_toggle_signal(tray.clone(), cancel.clone())?;

    tracing::info!("daemon ready");

    tokio::select! {
        _ = cancel.cancelled() => {
            tracing::info!("quit requested via tray");
        }
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("SIGINT received, shutting down");
        }
    }

    // -- Graceful shutdown --
    server.shutdown();
    cancel.cancel();
    tray_task.await?;

    Ok(())
}

async fn wait_for_port(server: &StatusServer) -> u16 {
    loop {
        let p = server.port().await;
        if p > 0 {
            return p;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
}

/// Treats `SIGUSR1` as a click on the tray icon.
#[cfg(unix)]
fn spawn_toggle_signal(tray: TrayHandle, cancel: CancellationToken) -> anyhow::Result<()> {
    use tokio::signal::unix::{SignalKind, signal};

    let mut usr1 = signal(SignalKind::user_defined1())?;
    tokio::spawn(async move {
        loop {
            tokio::select! {
                _ = cancel.cancelled() => break,
                received = usr1.recv() => {
                    if received.is_none() {
                        break;
                    }
                    tracing::debug!("SIGUSR1 received, toggling");
                    tray.send_event(TrayEvent::ToggleRequested);
                }
            }
        }
    });
    Ok(())
}
