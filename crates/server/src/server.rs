//! Loopback HTTP server.

use std::net::{Ipv4Addr, SocketAddr};
use std::sync::Arc;

use tokio::net::TcpListener;
use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;

use messenger_notifier_protocol::{DEFAULT_PORT, Status};

use crate::ServerError;
use crate::handler;
use crate::store::StatusStore;

/// Callback invoked with every accepted status.
pub type OnStatusFn = Box<dyn Fn(Status) + Send + Sync + 'static>;

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// TCP port on 127.0.0.1 (0 = OS-assigned).
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { port: DEFAULT_PORT }
    }
}

/// The status server.
///
/// Owns the [`StatusStore`] and pushes accepted updates to the display
/// through the `on_status` callback.
pub struct StatusServer {
    port: u16,
    store: StatusStore,
    on_status: OnStatusFn,
    cancel: CancellationToken,
    local_addr: Mutex<Option<SocketAddr>>,
}

impl StatusServer {
    pub fn new(config: ServerConfig, on_status: OnStatusFn) -> Arc<Self> {
        Arc::new(Self {
            port: config.port,
            store: StatusStore::new(),
            on_status,
            cancel: CancellationToken::new(),
            local_addr: Mutex::new(None),
        })
    }

    pub fn store(&self) -> &StatusStore {
        &self.store
    }

    /// Returns the local address, available once [`run`](Self::run) has bound.
    pub async fn local_addr(&self) -> Option<SocketAddr> {
        *self.local_addr.lock().await
    }

    /// Returns the listening port (0 if not yet bound).
    pub async fn port(&self) -> u16 {
        self.local_addr.lock().await.map(|a| a.port()).unwrap_or(0)
    }

    /// Stores `status` and forwards it to the display.
    ///
    /// The display is notified while the store is still locked, so the two
    /// never disagree about the latest status.
    pub(crate) async fn apply(&self, status: Status) {
        let previous = self
            .store
            .set_with(status, |status| (self.on_status)(status))
            .await;
        tracing::info!(%status, previous = ?previous, "status updated");
    }

    /// Gracefully shuts down the server.
    pub fn shutdown(&self) {
        self.cancel.cancel();
    }

    /// Binds to 127.0.0.1 and serves until [`shutdown`](Self::shutdown).
    pub async fn run(self: &Arc<Self>) -> Result<(), ServerError> {
        let addr: SocketAddr = (Ipv4Addr::LOCALHOST, self.port).into();

        let listener = {
            let mut local = self.local_addr.lock().await;
            if local.is_some() {
                return Err(ServerError::AlreadyRunning);
            }
            let listener = TcpListener::bind(addr)
                .await
                .map_err(|source| ServerError::Bind { addr, source })?;
            let bound = listener.local_addr()?;
            *local = Some(bound);
            tracing::info!("status server listening on {bound}");
            listener
        };

        let app = handler::router(Arc::clone(self));
        let cancel = self.cancel.clone();
        axum::serve(listener, app)
            .with_graceful_shutdown(async move { cancel.cancelled().await })
            .await?;

        tracing::info!("status server stopped");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex as StdMutex;
    use std::time::Duration;

    use super::*;

    async fn spawn_server(
        on_status: OnStatusFn,
    ) -> (Arc<StatusServer>, tokio::task::JoinHandle<()>, u16) {
        let server = StatusServer::new(ServerConfig { port: 0 }, on_status);
        let server2 = Arc::clone(&server);
        let handle = tokio::spawn(async move {
            server2.run().await.unwrap();
        });

        let port = loop {
            let p = server.port().await;
            if p > 0 {
                break p;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        };
        (server, handle, port)
    }

    #[tokio::test]
    async fn binds_loopback_only() {
        let (server, handle, port) = spawn_server(Box::new(|_| {})).await;
        let addr = server.local_addr().await.unwrap();
        assert!(addr.ip().is_loopback());
        assert_eq!(addr.port(), port);

        server.shutdown();
        handle.await.unwrap();
    }

    #[tokio::test]
    async fn port_conflict_reports_bind_error() {
        let (first, handle, port) = spawn_server(Box::new(|_| {})).await;

        let second = StatusServer::new(ServerConfig { port }, Box::new(|_| {}));
        let err = second.run().await.unwrap_err();
        assert!(matches!(err, ServerError::Bind { .. }));
        assert_eq!(second.port().await, 0);

        first.shutdown();
        handle.await.unwrap();
    }

    #[tokio::test]
    async fn second_run_is_rejected() {
        let (server, handle, _) = spawn_server(Box::new(|_| {})).await;
        assert!(matches!(
            server.run().await,
            Err(ServerError::AlreadyRunning)
        ));

        server.shutdown();
        handle.await.unwrap();
    }

    #[tokio::test]
    async fn apply_updates_store_and_notifies() {
        let seen = Arc::new(StdMutex::new(Vec::new()));
        let seen2 = Arc::clone(&seen);
        let server = StatusServer::new(
            ServerConfig { port: 0 },
            Box::new(move |s| seen2.lock().unwrap().push(s)),
        );

        server.apply(Status::Unread).await;
        server.apply(Status::Read).await;

        assert_eq!(server.store().get().await, Some(Status::Read));
        assert_eq!(*seen.lock().unwrap(), vec![Status::Unread, Status::Read]);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn overlapping_applies_keep_display_in_step_with_store() {
        let shown = Arc::new(StdMutex::new(None));
        let shown2 = Arc::clone(&shown);
        let server = StatusServer::new(
            ServerConfig { port: 0 },
            Box::new(move |s| {
                // A slow display update for the first status.
                if s == Status::Unread {
                    std::thread::sleep(Duration::from_millis(20));
                }
                *shown2.lock().unwrap() = Some(s);
            }),
        );

        let first = {
            let server = Arc::clone(&server);
            tokio::spawn(async move { server.apply(Status::Unread).await })
        };
        tokio::time::sleep(Duration::from_millis(2)).await;
        let second = {
            let server = Arc::clone(&server);
            tokio::spawn(async move { server.apply(Status::Read).await })
        };
        first.await.unwrap();
        second.await.unwrap();

        let held = server.store().get().await;
        assert_eq!(held, *shown.lock().unwrap());
    }
}
