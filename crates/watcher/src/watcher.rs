//! Watcher event loop.
//!
//! Two producers drive the same check routine: a fixed interval and a
//! mutation channel fed by whatever observes the page. The pending read
//! timer lives in the same loop, so there is never more than one.

use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::{MissedTickBehavior, Sleep};
use tokio_util::sync::CancellationToken;

use messenger_notifier_detector::{Detector, LabelSource};
use messenger_notifier_protocol::Status;

use crate::filter::{ChangeFilter, Policy, TimerCommand};
use crate::notifier::Notifier;

/// Interval between periodic checks.
pub const DEFAULT_CHECK_INTERVAL: Duration = Duration::from_millis(2000);

/// Watcher configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WatcherConfig {
    pub check_interval: Duration,
    pub policy: Policy,
}

impl Default for WatcherConfig {
    fn default() -> Self {
        Self {
            check_interval: DEFAULT_CHECK_INTERVAL,
            policy: Policy::default(),
        }
    }
}

/// Runs detection, filtering and delivery on a single task.
pub struct Watcher {
    detector: Detector,
    source: Arc<dyn LabelSource + Send + Sync>,
    notifier: Arc<dyn Notifier>,
    filter: ChangeFilter,
    check_interval: Duration,
    pending: Option<Pin<Box<Sleep>>>,
}

impl Watcher {
    pub fn new(
        config: WatcherConfig,
        detector: Detector,
        source: Arc<dyn LabelSource + Send + Sync>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            detector,
            source,
            notifier,
            filter: ChangeFilter::new(config.policy),
            check_interval: config.check_interval,
            pending: None,
        }
    }

    pub fn filter(&self) -> &ChangeFilter {
        &self.filter
    }

    /// Runs until `cancel` fires.
    ///
    /// Every message on `mutations` triggers a check. When the sender side
    /// closes, the interval keeps the watcher going.
    pub async fn run(mut self, mut mutations: mpsc::Receiver<()>, cancel: CancellationToken) {
        let mut interval = tokio::time::interval(self.check_interval);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut mutations_open = true;

        tracing::info!(
            interval_ms = self.check_interval.as_millis() as u64,
            policy = ?self.filter.policy(),
            "watcher started"
        );

        loop {
            tokio::select! {
                _ = cancel.cancelled() => {
                    tracing::info!("watcher shutting down");
                    break;
                }

                _ = interval.tick() => self.check(),

                msg = mutations.recv(), if mutations_open => match msg {
                    Some(()) => self.check(),
                    None => {
                        tracing::debug!("mutation feed closed, continuing on interval");
                        mutations_open = false;
                    }
                },

                _ = wait_pending(&mut self.pending) => {
                    self.pending = None;
                    self.on_timer_expired();
                }
            }
        }
    }

    /// Runs one detection pass and applies the filter's decision.
    fn check(&mut self) {
        let signal = self.detector.detect(self.source.as_ref());
        tracing::debug!(
            has_unread = signal.has_unread,
            count = signal.count,
            source = signal.source.as_str(),
            "check"
        );

        let transition = self.filter.observe(signal.has_unread);
        match transition.timer {
            TimerCommand::Keep => {}
            TimerCommand::Start(delay) => {
                tracing::debug!(delay_ms = delay.as_millis() as u64, "read transition pending");
                self.pending = Some(Box::pin(tokio::time::sleep(delay)));
            }
            TimerCommand::Cancel => {
                tracing::debug!("pending read transition cancelled");
                self.pending = None;
            }
        }

        if let Some(status) = transition.emit {
            self.dispatch(status);
        }
    }

    fn on_timer_expired(&mut self) {
        let signal = self.detector.detect(self.source.as_ref());
        match self.filter.timer_expired(signal.has_unread) {
            Some(status) => self.dispatch(status),
            None => tracing::debug!("unread again before debounce elapsed"),
        }
    }

    /// Hands the status to the notifier without waiting for the result.
    fn dispatch(&self, status: Status) {
        let notifier = Arc::clone(&self.notifier);
        tokio::spawn(async move {
            notifier.send(status).await;
        });
    }
}

/// Resolves when the pending timer fires; never resolves without one.
async fn wait_pending(pending: &mut Option<Pin<Box<Sleep>>>) {
    match pending {
        Some(sleep) => sleep.as_mut().await,
        None => std::future::pending().await,
    }
}
