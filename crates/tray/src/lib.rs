//! Tray presentation for the Messenger Notifier daemon.
//!
//! Shows one of two icon/tooltip pairs depending on the unread status and
//! lets the user flip it by hand. The tray talks to the daemon through
//! channels:
//! - [`TrayUpdate`]: daemon to tray (new status from the server, server state)
//! - [`TrayEvent`]: user to tray (manual toggle, quit)
//!
//! A manual toggle only changes what is shown. It is not reported back to
//! the watcher, so the two can disagree until the next automatic update
//! overwrites the override.
//!
//! The platform tray itself sits behind [`PresentationBackend`]; the bundled
//! [`LogBackend`] just logs what would be displayed.

mod display;
mod menu;
mod tray;

pub use display::{
    DisplaySink, ICON_READ, ICON_UNREAD, LogBackend, Presentation, PresentationBackend,
    Presentations, TOOLTIP_READ, TOOLTIP_UNREAD,
};
pub use menu::{MenuAction, MenuItem, MenuState};
pub use tray::{TrayConfig, TrayEvent, TrayHandle, TrayRunner, TrayUpdate};
