use anyhow::{Context, Result};
use std::fs::{create_dir_all, File, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::Level;

/// Routes `tracing` output to a per-session file. Stdout belongs to the UI.
pub struct SessionLog {
    path: PathBuf,
}

impl SessionLog {
    pub fn init(debug: bool) -> Result<Self> {
        let path = build_log_path().context("Could not find a directory for session logs")?;
        let file = open_log_file(&path)?;
        let level = if debug { Level::DEBUG } else { Level::INFO };

        tracing_subscriber::fmt()
            .with_writer(Mutex::new(file))
            .with_ansi(false)
            .with_max_level(level)
            .try_init()
            .map_err(|e| anyhow::anyhow!("Failed to install log subscriber: {}", e))?;

        Ok(Self { path })
    }

    pub fn display_path(&self) -> String {
        self.path.display().to_string()
    }
}

fn open_log_file(path: &Path) -> Result<File> {
    if let Some(parent) = path.parent() {
        create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open {}", path.display()))
}

fn build_log_path() -> Option<PathBuf> {
    let base = dirs::data_dir().or_else(|| std::env::current_dir().ok())?;
    Some(log_path_in(&base, now_millis()))
}

fn log_path_in(base: &Path, millis: u128) -> PathBuf {
    base.join("petnamer")
        .join("logs")
        .join(format!("session-{}.log", millis))
}

fn now_millis() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or(0)
}
