//! Tray handle and the task that owns the display.

use std::path::PathBuf;

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use messenger_notifier_protocol::Status;

use crate::display::{DisplaySink, PresentationBackend, Presentations};
use crate::menu::{MenuAction, MenuState};

/// Tray configuration.
#[derive(Debug, Clone)]
pub struct TrayConfig {
    pub app_name: String,
    /// Directory holding the two status icons.
    pub icon_dir: PathBuf,
}

impl Default for TrayConfig {
    fn default() -> Self {
        Self {
            app_name: "Messenger Notifier".into(),
            icon_dir: PathBuf::from("icons"),
        }
    }
}

/// User interaction with the tray.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrayEvent {
    /// Icon activated (clicked) or "Mark as ..." chosen.
    ToggleRequested,
    QuitRequested,
}

impl From<MenuAction> for TrayEvent {
    fn from(action: MenuAction) -> Self {
        match action {
            MenuAction::Toggle => TrayEvent::ToggleRequested,
            MenuAction::Quit => TrayEvent::QuitRequested,
        }
    }
}

/// Updates pushed by the daemon.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrayUpdate {
    /// Status accepted by the server.
    Status(Status),
    ServerStarted { port: u16 },
    ServerStopped,
}

/// Cloneable handle used by the rest of the daemon to reach the tray.
#[derive(Debug, Clone)]
pub struct TrayHandle {
    update_tx: mpsc::UnboundedSender<TrayUpdate>,
    event_tx: mpsc::UnboundedSender<TrayEvent>,
}

impl TrayHandle {
    /// Creates the handle and the runner that owns the display.
    pub fn new<B: PresentationBackend>(config: TrayConfig, backend: B) -> (Self, TrayRunner<B>) {
        let (update_tx, update_rx) = mpsc::unbounded_channel();
        let (event_tx, event_rx) = mpsc::unbounded_channel();

        let runner = TrayRunner {
            sink: DisplaySink::new(Presentations::new(&config.icon_dir), backend),
            menu: MenuState {
                app_name: config.app_name,
                ..MenuState::default()
            },
            update_rx,
            event_rx,
        };

        (
            Self {
                update_tx,
                event_tx,
            },
            runner,
        )
    }

    pub fn update(&self, update: TrayUpdate) {
        if self.update_tx.send(update).is_err() {
            tracing::debug!(?update, "tray gone, dropping update");
        }
    }

    /// Shortcut for an automatic status update.
    pub fn set_status(&self, status: Status) {
        self.update(TrayUpdate::Status(status));
    }

    /// Reports a user interaction (click, menu item).
    pub fn send_event(&self, event: TrayEvent) {
        if self.event_tx.send(event).is_err() {
            tracing::debug!(?event, "tray gone, dropping event");
        }
    }
}

/// Owns the [`DisplaySink`] and applies updates and events in order.
pub struct TrayRunner<B: PresentationBackend> {
    sink: DisplaySink<B>,
    menu: MenuState,
    update_rx: mpsc::UnboundedReceiver<TrayUpdate>,
    event_rx: mpsc::UnboundedReceiver<TrayEvent>,
}

impl<B: PresentationBackend> TrayRunner<B> {
    pub fn sink(&self) -> &DisplaySink<B> {
        &self.sink
    }

    pub fn menu(&self) -> &MenuState {
        &self.menu
    }

    pub fn handle_update(&mut self, update: TrayUpdate) {
        match update {
            TrayUpdate::Status(status) => {
                self.menu.shown = status;
                self.sink.apply_status(status, &self.menu.build_menu());
            }
            TrayUpdate::ServerStarted { port } => {
                self.menu.server_port = Some(port);
                self.sink.render(&self.menu.build_menu());
            }
            TrayUpdate::ServerStopped => {
                self.menu.server_port = None;
                self.sink.render(&self.menu.build_menu());
            }
        }
    }

    /// Applies a user event. Returns `false` when quit was requested.
    pub fn handle_event(&mut self, event: TrayEvent) -> bool {
        match event {
            TrayEvent::ToggleRequested => {
                self.menu.shown = self.sink.shown().toggled();
                self.sink.toggle(&self.menu.build_menu());
                true
            }
            TrayEvent::QuitRequested => {
                tracing::info!("quit requested via tray");
                false
            }
        }
    }

    /// Runs until `cancel` fires or the user quits; quitting cancels `cancel`.
    pub async fn run(mut self, cancel: CancellationToken) {
        self.sink.render(&self.menu.build_menu());

        loop {
            tokio::select! {
                _ = cancel.cancelled() => break,

                Some(update) = self.update_rx.recv() => self.handle_update(update),

                Some(event) = self.event_rx.recv() => {
                    if !self.handle_event(event) {
                        cancel.cancel();
                        break;
                    }
                }
            }
        }
    }
}
