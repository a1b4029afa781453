use anyhow::{anyhow, Context, Result};
use reqwest::Url;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::fs;

use crate::feedback::NotificationDurations;
use crate::selection::RequestedCount;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    #[serde(default = "default_theme")]
    pub theme: String,
    #[serde(default = "default_count")]
    pub default_count: u8,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub notifications: NotificationConfig,
    #[serde(default)]
    pub clipboard: ClipboardConfig,
}

fn default_theme() -> String {
    "auto".to_string()
}

fn default_count() -> u8 {
    RequestedCount::MIN
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    #[serde(default = "default_scheme")]
    pub scheme: String,
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: Option<u16>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_scheme() -> String {
    "http".to_string()
}

fn default_host() -> String {
    "localhost".to_string()
}

fn default_port() -> Option<u16> {
    Some(8000)
}

fn default_timeout_secs() -> u64 {
    10
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            scheme: default_scheme(),
            host: default_host(),
            port: default_port(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl ServerConfig {
    /// Parses `scheme://host[:port]`; any path or query on the input is ignored.
    pub fn from_url(raw: &str) -> Result<Self> {
        let url = Url::parse(raw.trim()).with_context(|| format!("Invalid server URL: {}", raw))?;
        let host = url
            .host_str()
            .ok_or_else(|| anyhow!("Server URL has no host: {}", raw))?
            .to_string();
        Ok(Self {
            scheme: url.scheme().to_string(),
            host,
            port: url.port(),
            timeout_secs: default_timeout_secs(),
        })
    }

    /// `scheme://host`, plus `:port` unless the port is unset, 80, or 443.
    pub fn base_url(&self) -> String {
        let mut base = format!("{}://{}", self.scheme.trim(), self.host.trim());
        if let Some(port) = self.port {
            if port != 80 && port != 443 {
                base.push_str(&format!(":{}", port));
            }
        }
        base
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.max(1))
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct NotificationConfig {
    #[serde(default = "default_error_ms")]
    pub error_ms: u64,
    #[serde(default = "default_success_ms")]
    pub success_ms: u64,
}

fn default_error_ms() -> u64 {
    5000
}

fn default_success_ms() -> u64 {
    3000
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            error_ms: default_error_ms(),
            success_ms: default_success_ms(),
        }
    }
}

impl NotificationConfig {
    pub fn durations(&self) -> NotificationDurations {
        NotificationDurations::from_millis(self.error_ms, self.success_ms)
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct ClipboardConfig {
    #[serde(default = "default_enabled")]
    pub osc52_fallback: bool,
}

fn default_enabled() -> bool {
    true
}

impl Default for ClipboardConfig {
    fn default() -> Self {
        Self {
            osc52_fallback: default_enabled(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: default_theme(),
            default_count: default_count(),
            server: ServerConfig::default(),
            notifications: NotificationConfig::default(),
            clipboard: ClipboardConfig::default(),
        }
    }
}

impl Config {
    pub fn default_path() -> Result<PathBuf> {
        Ok(dirs::config_dir()
            .context("Could not find config directory")?
            .join("petnamer")
            .join("config.toml"))
    }

    pub async fn load() -> Result<Self> {
        Self::load_from(&Self::default_path()?).await
    }

    pub async fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?;

        Ok(config)
    }

    pub async fn save(&self) -> Result<()> {
        self.save_to(&Self::default_path()?).await
    }

    pub async fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(dir) = path.parent() {
            if !dir.exists() {
                fs::create_dir_all(dir).await?;
            }
        }

        let content = toml::to_string_pretty(self)?;
        fs::write(path, content).await?;
        Ok(())
    }

    pub fn initial_count(&self) -> RequestedCount {
        RequestedCount::clamped(self.default_count as i64)
    }
}
