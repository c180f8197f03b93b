use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Default config file path.
pub const CONFIG_PATH: &str = "config.toml";

/// Top-level application config deserialized from `config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub endpoint: EndpointConfig,
    #[serde(default)]
    pub settings: SettingsConfig,
}

/// Telemetry endpoint location.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EndpointConfig {
    /// Base URL of the Live Client Data API.
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

/// Runtime settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SettingsConfig {
    /// Polling interval in seconds for the event feed.
    #[serde(default = "default_poll_interval")]
    pub poll_interval_secs: u64,
    /// Retry interval while the endpoint is up but serving no game data yet.
    #[serde(default = "default_startup_probe")]
    pub startup_probe_secs: u64,
    /// Retry interval while the endpoint refuses connections entirely.
    #[serde(default = "default_offline_retry")]
    pub offline_retry_secs: u64,
}

fn default_base_url() -> String {
    crate::LIVE_CLIENT_API_BASE.to_string()
}

fn default_poll_interval() -> u64 {
    1
}

fn default_startup_probe() -> u64 {
    1
}

fn default_offline_retry() -> u64 {
    10
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}

impl Default for SettingsConfig {
    fn default() -> Self {
        Self {
            poll_interval_secs: default_poll_interval(),
            startup_probe_secs: default_startup_probe(),
            offline_retry_secs: default_offline_retry(),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            endpoint: EndpointConfig::default(),
            settings: SettingsConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load config from the given TOML file path.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let config: Self = toml::from_str(&contents)
            .with_context(|| format!("failed to parse {}", path.display()))?;
        Ok(config)
    }

    /// Load config from the given path, falling back to defaults when the
    /// file is absent.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!("no config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        Self::load(path)
    }
}
