//! Status delivery to the tray daemon.

use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use messenger_notifier_protocol::{SetStatusRequest, Status};

use crate::WatcherError;

/// Set-status endpoint of a daemon running with default settings.
pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:33333/set-messenger-icon";

/// Upper bound for a single delivery attempt.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

/// A boxed future returned by [`Notifier::send`].
pub type NotifyFuture<'a> = Pin<Box<dyn Future<Output = SendOutcome> + Send + 'a>>;

/// Terminal result of one delivery attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SendOutcome {
    Delivered,
    /// The daemon answered with a non-200 status code.
    Rejected(u16),
    /// The request never got an answer (connect error, timeout).
    Failed(String),
}

impl SendOutcome {
    pub fn is_delivered(&self) -> bool {
        matches!(self, SendOutcome::Delivered)
    }
}

/// Delivers a status to the daemon. Implementations must not retry.
pub trait Notifier: Send + Sync + 'static {
    fn send(&self, status: Status) -> NotifyFuture<'_>;
}

/// Request convention used for delivery.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeliveryMethod {
    /// `GET <endpoint>?status=<status>`
    #[default]
    Get,
    /// `POST <endpoint>` with `{"status": "<status>"}`
    Post,
}

/// [`Notifier`] speaking HTTP to the daemon's set-status endpoint.
#[derive(Debug, Clone)]
pub struct HttpNotifier {
    client: reqwest::Client,
    endpoint: String,
    method: DeliveryMethod,
}

impl HttpNotifier {
    /// Creates a notifier whose requests give up after `timeout`.
    pub fn new(
        endpoint: impl Into<String>,
        method: DeliveryMethod,
        timeout: Duration,
    ) -> Result<Self, WatcherError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .connect_timeout(timeout)
            .build()?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
            method,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn deliver(&self, status: Status) -> SendOutcome {
        tracing::info!(%status, endpoint = %self.endpoint, "sending status");

        let request = match self.method {
            DeliveryMethod::Get => self
                .client
                .get(&self.endpoint)
                .query(&[("status", status.as_str())]),
            DeliveryMethod::Post => self
                .client
                .post(&self.endpoint)
                .json(&SetStatusRequest::new(status)),
        };

        match request.send().await {
            Ok(resp) if resp.status() == reqwest::StatusCode::OK => {
                tracing::debug!(%status, "daemon updated");
                SendOutcome::Delivered
            }
            Ok(resp) => {
                let code = resp.status().as_u16();
                tracing::warn!(%status, code, "daemon rejected status update");
                SendOutcome::Rejected(code)
            }
            Err(e) => {
                tracing::warn!(%status, "status update failed: {e}");
                SendOutcome::Failed(e.to_string())
            }
        }
    }
}

impl Notifier for HttpNotifier {
    fn send(&self, status: Status) -> NotifyFuture<'_> {
        Box::pin(self.deliver(status))
    }
}
