//! Icon/tooltip presentation keyed by status.

use std::path::{Path, PathBuf};

use messenger_notifier_protocol::Status;

use crate::menu::MenuItem;

/// Icon shown when there is nothing unread.
pub const ICON_READ: &str = "messenger-grayscale.png";

/// Icon shown when there are unread messages.
pub const ICON_UNREAD: &str = "messenger-colored.png";

pub const TOOLTIP_READ: &str = "Messenger Notifier - No unread messages";
pub const TOOLTIP_UNREAD: &str = "Messenger Notifier - Unread messages!";

/// One icon/tooltip pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Presentation {
    pub status: Status,
    pub icon: PathBuf,
    pub tooltip: &'static str,
}

/// The two presentations, resolved against an icon directory.
#[derive(Debug, Clone)]
pub struct Presentations {
    read: Presentation,
    unread: Presentation,
}

impl Presentations {
    pub fn new(icon_dir: &Path) -> Self {
        Self {
            read: Presentation {
                status: Status::Read,
                icon: icon_dir.join(ICON_READ),
                tooltip: TOOLTIP_READ,
            },
            unread: Presentation {
                status: Status::Unread,
                icon: icon_dir.join(ICON_UNREAD),
                tooltip: TOOLTIP_UNREAD,
            },
        }
    }

    pub fn for_status(&self, status: Status) -> &Presentation {
        match status {
            Status::Read => &self.read,
            Status::Unread => &self.unread,
        }
    }
}

/// Platform side of the tray: receives whatever should be on screen now.
pub trait PresentationBackend: Send + 'static {
    fn show(&mut self, presentation: &Presentation, menu: &[MenuItem]);
}

/// Backend that only logs presentation changes.
#[derive(Debug, Default)]
pub struct LogBackend;

impl PresentationBackend for LogBackend {
    fn show(&mut self, presentation: &Presentation, menu: &[MenuItem]) {
        tracing::info!(
            status = %presentation.status,
            icon = %presentation.icon.display(),
            "{}",
            presentation.tooltip
        );
        for item in menu.iter().filter(|i| !i.label.is_empty()) {
            tracing::trace!(enabled = item.enabled, "menu: {}", item.label);
        }
    }
}

/// Holds what is currently shown and pushes changes to the backend.
///
/// Starts on the read presentation.
pub struct DisplaySink<B: PresentationBackend> {
    presentations: Presentations,
    backend: B,
    shown: Status,
}

impl<B: PresentationBackend> DisplaySink<B> {
    pub fn new(presentations: Presentations, backend: B) -> Self {
        Self {
            presentations,
            backend,
            shown: Status::Read,
        }
    }

    /// Status whose presentation is currently shown.
    pub fn shown(&self) -> Status {
        self.shown
    }

    pub fn presentation(&self) -> &Presentation {
        self.presentations.for_status(self.shown)
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Automatic update from the server. Overwrites any manual override.
    pub fn apply_status(&mut self, status: Status, menu: &[MenuItem]) {
        self.shown = status;
        self.render(menu);
    }

    /// Manual user toggle. Returns the newly shown status.
    pub fn toggle(&mut self, menu: &[MenuItem]) -> Status {
        self.shown = self.shown.toggled();
        tracing::debug!(shown = %self.shown, "manual toggle");
        self.render(menu);
        self.shown
    }

    /// Pushes the current presentation to the backend.
    pub fn render(&mut self, menu: &[MenuItem]) {
        let presentation = self.presentations.for_status(self.shown);
        self.backend.show(presentation, menu);
    }
}
