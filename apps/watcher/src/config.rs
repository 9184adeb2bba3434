//! Watcher configuration management.
//!
//! Stored as TOML at `~/.config/messenger-notifier/watcher.toml`.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use messenger_notifier_detector::{DEFAULT_KEYWORDS, DEFAULT_MAX_LABELS};
use messenger_notifier_watcher::{DEFAULT_ENDPOINT, DeliveryMethod, Policy, WatcherConfig};

/// How read transitions are emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PolicyKind {
    #[default]
    Debounced,
    Immediate,
}

/// Watcher configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Set-status endpoint of the daemon.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    #[serde(default = "default_check_interval_ms")]
    pub check_interval_ms: u64,

    /// Quiet period before a read transition is sent.
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,

    #[serde(default)]
    pub policy: PolicyKind,

    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,

    #[serde(default)]
    pub method: DeliveryMethod,

    /// Keywords recognised in addition to the built-in ones.
    #[serde(default)]
    pub extra_keywords: Vec<String>,

    #[serde(default = "default_max_labels")]
    pub max_labels: usize,
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.into()
}

fn default_check_interval_ms() -> u64 {
    2000
}

fn default_debounce_ms() -> u64 {
    3000
}

fn default_request_timeout_ms() -> u64 {
    5000
}

fn default_max_labels() -> usize {
    DEFAULT_MAX_LABELS
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            check_interval_ms: default_check_interval_ms(),
            debounce_ms: default_debounce_ms(),
            policy: PolicyKind::default(),
            request_timeout_ms: default_request_timeout_ms(),
            method: DeliveryMethod::default(),
            extra_keywords: Vec::new(),
            max_labels: default_max_labels(),
        }
    }
}

impl Config {
    /// Loads configuration from disk, or creates a default if not found.
    pub fn load() -> anyhow::Result<Self> {
        Self::load_from(&config_path())
    }

    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            Ok(toml::from_str(&content)?)
        } else {
            let config = Config::default();
            config.save_to(path)?;
            Ok(config)
        }
    }

    pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, toml::to_string_pretty(self)?)?;
        tracing::debug!(path = %path.display(), "configuration saved");
        Ok(())
    }

    pub fn watcher_config(&self) -> WatcherConfig {
        let policy = match self.policy {
            PolicyKind::Debounced => Policy::Debounced(Duration::from_millis(self.debounce_ms)),
            PolicyKind::Immediate => Policy::Immediate,
        };
        WatcherConfig {
            check_interval: Duration::from_millis(self.check_interval_ms.max(1)),
            policy,
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    /// Built-in keywords followed by the configured extras.
    pub fn keywords(&self) -> Vec<String> {
        DEFAULT_KEYWORDS
            .iter()
            .map(|k| (*k).to_string())
            .chain(self.extra_keywords.iter().cloned())
            .collect()
    }
}

/// Returns the configuration file path.
fn config_path() -> PathBuf {
    let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".into());
    PathBuf::from(home)
        .join(".config")
        .join("messenger-notifier")
        .join("watcher.toml")
}
