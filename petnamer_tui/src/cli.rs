use anyhow::Result;
use clap::Parser;
use petnamer_core::{Category, Config, ServerConfig};
use std::path::PathBuf;

/// PetNamer - terminal client for the pet name generator service
#[derive(Parser, Debug)]
#[command(name = "petnamer")]
#[command(about = "Pick a pet type, generate names, learn a fact or two")]
#[command(version)]
pub struct Cli {
    /// Service base URL, e.g. http://localhost:8000
    #[arg(long)]
    pub server: Option<String>,

    /// Color theme: auto, dark, light or retro
    #[arg(long)]
    pub theme: Option<String>,

    /// Per-request timeout in seconds
    #[arg(long)]
    pub timeout_secs: Option<u64>,

    /// Pet type to select on startup: dog, cat, bird, fish or rabbit
    #[arg(long)]
    pub pet: Option<Category>,

    /// Configuration file path
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,

    /// Write the effective configuration to the config file and exit
    #[arg(long)]
    pub write_config: bool,
}

impl Cli {
    pub fn config_path(&self) -> Result<PathBuf> {
        match &self.config {
            Some(path) => Ok(path.clone()),
            None => Config::default_path(),
        }
    }

    /// Command line flags win over the file.
    pub fn apply_overrides(&self, config: &mut Config) -> Result<()> {
        if let Some(raw) = &self.server {
            let timeout_secs = config.server.timeout_secs;
            config.server = ServerConfig::from_url(raw)?;
            config.server.timeout_secs = timeout_secs;
        }
        if let Some(theme) = &self.theme {
            config.theme = theme.clone();
        }
        if let Some(secs) = self.timeout_secs {
            config.server.timeout_secs = secs;
        }
        Ok(())
    }
}
