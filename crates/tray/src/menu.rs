//! Dynamic context menu for the system tray.

use messenger_notifier_protocol::Status;

/// Actions that can be triggered from the tray context menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuAction {
    /// Flip the shown status by hand.
    Toggle,
    /// User requested to quit the daemon.
    Quit,
}

/// A single menu item.
#[derive(Debug, Clone)]
pub struct MenuItem {
    /// Display text.
    pub label: String,
    /// Whether the item is enabled (clickable).
    pub enabled: bool,
    /// Optional action triggered on click.
    pub action: Option<MenuAction>,
}

impl MenuItem {
    fn info(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            enabled: false,
            action: None,
        }
    }

    fn separator() -> Self {
        Self::info(String::new())
    }
}

/// Current state used to build the context menu.
#[derive(Debug, Clone)]
pub struct MenuState {
    /// Application display name.
    pub app_name: String,
    /// Status currently shown by the icon.
    pub shown: Status,
    /// Port of the status server, `None` when it is not running.
    pub server_port: Option<u16>,
}

impl Default for MenuState {
    fn default() -> Self {
        Self {
            app_name: "Messenger Notifier".into(),
            shown: Status::Read,
            server_port: None,
        }
    }
}

impl MenuState {
    /// Builds the menu items from the current state.
    pub fn build_menu(&self) -> Vec<MenuItem> {
        let mut items = Vec::new();

        let status = match self.shown {
            Status::Read => "No unread messages",
            Status::Unread => "Unread messages",
        };
        items.push(MenuItem::info(format!("{} - {status}", self.app_name)));

        items.push(MenuItem::info(match self.server_port {
            Some(port) => format!("Listening on 127.0.0.1:{port}"),
            None => "Status server not running".into(),
        }));

        items.push(MenuItem::separator());

        let toggle_label = match self.shown {
            Status::Read => "Mark as unread",
            Status::Unread => "Mark as read",
        };
        items.push(MenuItem {
            label: toggle_label.into(),
            enabled: true,
            action: Some(MenuAction::Toggle),
        });

        items.push(MenuItem::separator());

        items.push(MenuItem {
            label: "Quit".into(),
            enabled: true,
            action: Some(MenuAction::Quit),
        });

        items
    }
}
