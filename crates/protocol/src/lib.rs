//! Wire protocol shared by the Messenger Notifier watcher and tray daemon.
//!
//! The watcher reports a binary read/unread status to the daemon over a
//! loopback-only HTTP endpoint. This crate holds the [`Status`] value, the
//! JSON payloads exchanged on that endpoint and the fixed constants both
//! sides agree on.

pub mod constants;
pub mod messages;
pub mod types;

pub use constants::{DEFAULT_PORT, SET_ICON_PATH, STATUS_PATH};
pub use messages::{
    ErrorResponse, SetStatusRequest, SetStatusResponse, StatusResponse, Usage,
};
pub use types::{ParseStatusError, Status};
