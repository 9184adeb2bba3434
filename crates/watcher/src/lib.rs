//! Watcher side of the Messenger Notifier.
//!
//! Runs the detector on a fixed interval and on mutation notifications,
//! filters the resulting signals through a [`ChangeFilter`] and hands the
//! surviving transitions to a [`Notifier`]:
//! - unread transitions are emitted immediately
//! - read transitions are debounced so a counter blinking to zero during a
//!   page re-render does not flicker the tray icon
//!
//! Delivery is fire-and-forget. A failed send is logged and superseded by
//! the next check; nothing is retried or queued.

mod filter;
mod notifier;
mod watcher;

pub use filter::{ChangeFilter, DEFAULT_DEBOUNCE, FilterState, Policy, TimerCommand, Transition};
pub use notifier::{
    DEFAULT_ENDPOINT, DEFAULT_REQUEST_TIMEOUT, DeliveryMethod, HttpNotifier, Notifier,
    NotifyFuture, SendOutcome,
};
pub use watcher::{DEFAULT_CHECK_INTERVAL, Watcher, WatcherConfig};

/// Errors produced while setting up the watcher.
#[derive(Debug, thiserror::Error)]
pub enum WatcherError {
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),
}
