//! Unread-count detection for the Messenger Notifier watcher.
//!
//! The chat page exposes its unread count through aria labels such as
//! `"Chats, 2 unread"`. A [`LabelSource`] hands the detector a snapshot of
//! candidate labels; [`Detector::detect`] scans them and derives an
//! [`UnreadSignal`]. Detection never fails: no match simply means no
//! unread messages.

mod detector;
mod signal;
mod source;

pub use detector::{DEFAULT_KEYWORDS, DEFAULT_MAX_LABELS, Detector};
pub use signal::{SignalSource, UnreadSignal};
pub use source::{LabelSource, SharedLabels};

/// Errors produced while building a detector.
#[derive(Debug, thiserror::Error)]
pub enum DetectorError {
    #[error("invalid unread pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("at least one unread keyword is required")]
    NoKeywords,
}
