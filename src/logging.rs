//! Logging setup: console output plus daily-rolling log files.
//!
//! Call [`init`] once at startup. Files land in a project-local `logs/`
//! directory by default; `RUST_LOG` overrides the level filter.

use anyhow::{Context as _, Result};
use std::path::{Path, PathBuf};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{
    EnvFilter, Layer as _, fmt, layer::SubscriberExt as _, util::SubscriberInitExt as _,
};

/// Default directory for log files, relative to the working directory.
pub const DEFAULT_LOG_DIR: &str = "logs";

/// Initialize logging into the default `logs/` directory.
pub fn init() -> Result<()> {
    init_with_dir(Path::new(DEFAULT_LOG_DIR))
}

/// Initialize logging with a custom log directory.
///
/// Creates two daily-rolling files: `maisonette.<date>.log` with everything
/// the filter passes, and `error.<date>.log` with warnings and errors only.
/// Console output uses the same filter (default `info`, `RUST_LOG` wins).
///
/// # Errors
///
/// Returns an error if the directory cannot be created or an appender fails
/// to build.
pub fn init_with_dir(log_dir: &Path) -> Result<()> {
    if !log_dir.exists() {
        std::fs::create_dir_all(log_dir)
            .with_context(|| format!("Failed to create log directory: {}", log_dir.display()))?;
    }

    let all_logs_appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix("maisonette")
        .filename_suffix("log")
        .build(log_dir)
        .context("Failed to create all-logs file appender")?;

    let error_logs_appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix("error")
        .filename_suffix("log")
        .build(log_dir)
        .context("Failed to create error-logs file appender")?;

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info"))
        .context("Failed to create env filter")?;

    let stdout_layer = fmt::layer().with_target(true);

    let all_logs_layer = fmt::layer()
        .with_target(true)
        .with_ansi(false)
        .with_writer(all_logs_appender);

    let error_logs_layer = fmt::layer()
        .with_target(true)
        .with_ansi(false)
        .with_writer(error_logs_appender)
        .with_filter(EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(stdout_layer)
        .with(all_logs_layer)
        .with(error_logs_layer)
        .init();

    tracing::info!(dir = %log_dir.display(), "logging initialized");
    Ok(())
}

/// Path of today's main log file under `log_dir`.
pub fn current_log_path(log_dir: &Path) -> PathBuf {
    let today = chrono::Local::now().format("%Y-%m-%d").to_string();
    log_dir.join(format!("maisonette.{today}.log"))
}
