//! Application logging functionality
//!
//! Handles log file management and output redirection. The windowed app logs
//! through Bevy's `LogPlugin` (see `systems::plugins`); headless runs install
//! their own `tracing-subscriber` here.

use crate::core::config_file::ConfigFile;
use std::fs;
use std::fs::OpenOptions;
use std::os::unix::io::AsRawFd;
use std::path::{Path, PathBuf};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is not set
const DEFAULT_HEADLESS_FILTER: &str = "glyph_projector=info";

/// Get the path to the logs directory
pub fn logs_dir() -> PathBuf {
    ConfigFile::config_dir().join("logs")
}

/// File name prefix shared by all log files
pub fn log_file_prefix() -> &'static str {
    "glyph-projector"
}

/// Extension shared by all log files
pub fn log_file_suffix() -> &'static str {
    "log"
}

/// Get the path to the current log file
///
/// Matches the name the daily rolling appender uses for today's file, so
/// windowed and headless runs on the same day share one log.
pub fn current_log_file() -> PathBuf {
    let timestamp = chrono::Utc::now().format("%Y-%m-%d");
    logs_dir().join(format!(
        "{}.{}.{}",
        log_file_prefix(),
        timestamp,
        log_file_suffix()
    ))
}

/// Daily rolling appender writing `glyph-projector.<date>.log` into `dir`
pub fn rolling_log_appender(dir: &Path) -> anyhow::Result<RollingFileAppender> {
    RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix(log_file_prefix())
        .filename_suffix(log_file_suffix())
        .build(dir)
        .map_err(|e| anyhow::anyhow!("Failed to create log file in {:?}: {}", dir, e))
}

/// Initialize the logs directory
pub fn initialize_logs_directory() -> anyhow::Result<()> {
    let logs_dir = logs_dir();
    fs::create_dir_all(&logs_dir)?;
    Ok(())
}

/// Set up log redirection to ~/.config/glyph-projector/logs/
/// Used by the windowed app when --log-to-file is given
pub fn setup_log_redirection() -> anyhow::Result<()> {
    initialize_logs_directory()?;

    let log_file_path = current_log_file();

    // Create/open the log file - use truncate instead of append for single log file
    let log_file = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(&log_file_path)?;

    // Redirect stdout and stderr to the log file
    unsafe {
        libc::dup2(log_file.as_raw_fd(), libc::STDOUT_FILENO);
        libc::dup2(log_file.as_raw_fd(), libc::STDERR_FILENO);
    }

    println!(
        "=== Glyph projector started at {} ===",
        chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC")
    );
    println!("Logs redirected to: {:?}", log_file_path);

    Ok(())
}

/// Install a `tracing` subscriber for headless runs
///
/// With `to_file` the output goes to a daily rolling file in the logs
/// directory; the returned guard must be kept alive until exit so buffered
/// lines are flushed.
pub fn init_headless_logging(to_file: bool) -> anyhow::Result<Option<WorkerGuard>> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_HEADLESS_FILTER));

    if to_file {
        initialize_logs_directory()?;
        let appender = rolling_log_appender(&logs_dir())?;
        let (writer, guard) = tracing_appender::non_blocking(appender);
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(writer)
            .with_ansi(false)
            .try_init()
            .map_err(|e| anyhow::anyhow!("Failed to install log subscriber: {}", e))?;
        Ok(Some(guard))
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init()
            .map_err(|e| anyhow::anyhow!("Failed to install log subscriber: {}", e))?;
        Ok(None)
    }
}
