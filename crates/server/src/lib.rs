//! Status server for the Messenger Notifier tray daemon.
//!
//! Listens on the loopback interface only, holds the last reported
//! [`Status`](messenger_notifier_protocol::Status) and forwards every
//! accepted update to the display through a callback.
//!
//! Endpoints:
//! - `GET|POST /set-messenger-icon`: set the status (query `status=` or
//!   JSON body `{"status": ...}`; a parseable body wins)
//! - `GET /status`: current status and bound port

mod handler;
mod server;
mod store;

use std::net::SocketAddr;

pub use server::{OnStatusFn, ServerConfig, StatusServer};
pub use store::StatusStore;

/// Errors produced by the status server.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        source: std::io::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("server already running")]
    AlreadyRunning,
}
