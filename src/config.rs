use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const APP_DIR: &str = "CustomShell";

/// Log level configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

/// Extension settings stored as JSON next to the logs.
///
/// The menu entries themselves are fixed; only diagnostics are tunable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtensionConfig {
    /// Whether to write logs to file
    pub log_to_file: bool,
    /// Used when RUST_LOG is not set
    pub log_level: LogLevel,
    /// Maximum number of log files to keep
    pub log_max_files: usize,
}

impl Default for ExtensionConfig {
    fn default() -> Self {
        Self {
            log_to_file: true,
            log_level: LogLevel::Info,
            log_max_files: 5,
        }
    }
}

impl ExtensionConfig {
    /// Load the per-user config, or defaults when there is none.
    pub fn load() -> Result<Self> {
        Self::load_from_path(&Self::config_path()?)
    }

    /// `%LOCALAPPDATA%\CustomShell\config.json`
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::base_dir()?.join("config.json"))
    }

    pub fn log_dir() -> Result<PathBuf> {
        Ok(Self::base_dir()?.join("logs"))
    }

    fn base_dir() -> Result<PathBuf> {
        let dir = dirs::data_local_dir().context("Failed to get local data directory")?;
        Ok(dir.join(APP_DIR))
    }

    pub fn load_from_path(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).context("Failed to read config file")?;
        let config: ExtensionConfig =
            serde_json::from_str(&content).context("Failed to parse config file")?;

        tracing::debug!(target: "config", path = %path.display(), "Loaded configuration from file");

        Ok(config)
    }
}
