use anyhow::{Context, Result};
use std::path::PathBuf;
use std::sync::OnceLock;
use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::{ExtensionConfig, LogLevel};

/// Configuration for the logging system
pub struct LogConfig {
    /// Directory where log files will be stored
    pub log_dir: PathBuf,
    /// Prefix for log file names
    pub file_prefix: String,
    /// Maximum number of log files to keep (rotation)
    pub max_files: usize,
    /// Filter used when RUST_LOG is not set
    pub level: LogLevel,
}

impl Default for LogConfig {
    fn default() -> Self {
        let log_dir = ExtensionConfig::log_dir().unwrap_or_else(|_| PathBuf::from("logs"));

        Self {
            log_dir,
            file_prefix: "custom-shell".to_string(),
            max_files: 5,
            level: LogLevel::Info,
        }
    }
}

impl From<&ExtensionConfig> for LogConfig {
    fn from(config: &ExtensionConfig) -> Self {
        Self {
            max_files: config.log_max_files,
            level: config.log_level,
            ..Self::default()
        }
    }
}

/// Initialize file logging for the extension.
///
/// Explorer owns stdout, so there is only a JSON file layer with daily
/// rotation. `RUST_LOG` overrides the configured level. If the host process
/// already installed a global subscriber, that one is left in place.
pub fn init_logging(config: LogConfig) -> Result<LogGuard> {
    std::fs::create_dir_all(&config.log_dir).context("Failed to create log directory")?;

    let file_appender = tracing_appender::rolling::RollingFileAppender::builder()
        .rotation(tracing_appender::rolling::Rotation::DAILY)
        .filename_prefix(&config.file_prefix)
        .filename_suffix("log")
        .max_log_files(config.max_files)
        .build(&config.log_dir)
        .context("Failed to create file appender")?;

    // The guard MUST be kept alive, dropping it stops the writer thread
    let (non_blocking_file, worker_guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.level.as_str()));

    let file_layer = fmt::layer()
        .json()
        .with_writer(non_blocking_file)
        .with_target(true)
        .with_thread_ids(true)
        .with_filter(env_filter);

    if tracing_subscriber::registry()
        .with(file_layer)
        .try_init()
        .is_err()
    {
        tracing::debug!(target: "logging", "Global subscriber already set, keeping it");
    }

    tracing::info!(
        target: "logging",
        log_dir = %config.log_dir.display(),
        max_files = config.max_files,
        "Logging system initialized"
    );

    Ok(LogGuard {
        _worker_guard: worker_guard,
    })
}

/// Guard that ensures logs are flushed before exit
pub struct LogGuard {
    _worker_guard: tracing_appender::non_blocking::WorkerGuard,
}

static LOG_GUARD: OnceLock<Option<LogGuard>> = OnceLock::new();

/// Set up logging from the user config the first time it is called.
///
/// Must not be called from `DllMain`: the appender spawns a thread.
pub fn init_once() {
    LOG_GUARD.get_or_init(|| {
        let config = ExtensionConfig::load().unwrap_or_default();
        if !config.log_to_file {
            return None;
        }
        init_logging(LogConfig::from(&config)).ok()
    });
}
