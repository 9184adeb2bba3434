use tokio::sync::RwLock;

use messenger_notifier_protocol::Status;

/// Process-scoped holder of the last reported status.
///
/// Starts out empty; only the set-status handler writes to it.
#[derive(Debug, Default)]
pub struct StatusStore {
    current: RwLock<Option<Status>>,
}

impl StatusStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the held status, `None` before the first report.
    pub async fn get(&self) -> Option<Status> {
        *self.current.read().await
    }

    /// Replaces the held status and returns the previous one.
    pub async fn set(&self, status: Status) -> Option<Status> {
        self.set_with(status, |_| {}).await
    }

    /// Like [`set`](Self::set), but runs `on_set` before the write lock is
    /// released. Concurrent writers observe `on_set` calls in store order.
    pub async fn set_with<F>(&self, status: Status, on_set: F) -> Option<Status>
    where
        F: FnOnce(Status),
    {
        let mut current = self.current.write().await;
        let previous = current.replace(status);
        on_set(status);
        previous
    }
}
