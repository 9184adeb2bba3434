//! Daemon configuration management.
//!
//! Stored as TOML at `~/.config/messenger-notifier/daemon.toml`.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use messenger_notifier_protocol::DEFAULT_PORT;

/// Daemon configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Status server port on 127.0.0.1.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Directory holding `messenger-grayscale.png` and `messenger-colored.png`.
    #[serde(default = "default_icon_dir")]
    pub icon_dir: PathBuf,
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

fn default_icon_dir() -> PathBuf {
    home_dir()
        .join(".local")
        .join("share")
        .join("messenger-notifier")
        .join("icons")
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: default_port(),
            icon_dir: default_icon_dir(),
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
}

fn home_dir() -> PathBuf {
    PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| "/tmp".into()))
}

/// Returns the configuration file path.
fn config_path() -> PathBuf {
    home_dir()
        .join(".config")
        .join("messenger-notifier")
        .join("daemon.toml")
}
