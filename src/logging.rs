//! Logging setup for the application.
//!
//! Log lines go to stdout and to a timestamped file under the app logs
//! directory. Old log files are pruned so the directory does not grow
//! without bound.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use thiserror::Error;
use time::OffsetDateTime;
use time::format_description::FormatItem;
use time::macros::format_description;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::time::OffsetTime;
use tracing_subscriber::layer::SubscriberExt;

use crate::app_dirs;

/// Maximum number of log files kept in the logs directory.
pub const MAX_LOG_FILES: usize = 8;

/// Prefix used for log file names.
pub const LOG_FILE_PREFIX: &str = "castlist";

const FILE_STAMP: &[FormatItem<'static>] =
    format_description!("[year]-[month]-[day]_[hour]-[minute]-[second]");
const LINE_STAMP: &[FormatItem<'static>] =
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second].[subsecond digits:3]");

static LOG_GUARD: OnceLock<WorkerGuard> = OnceLock::new();

/// Errors that can occur while initializing logging.
#[derive(Debug, Error)]
pub enum LoggingError {
    /// The logs directory could not be resolved or created.
    #[error(transparent)]
    AppDir(#[from] app_dirs::AppDirError),
    /// The log file could not be created.
    #[error("Failed to create log file at {path}: {source}")]
    CreateLogFile {
        path: PathBuf,
        source: std::io::Error,
    },
    /// The logs directory could not be enumerated while pruning.
    #[error("Failed to read logs directory {path}: {source}")]
    ReadDir {
        path: PathBuf,
        source: std::io::Error,
    },
    /// An old log file could not be removed while pruning.
    #[error("Failed to remove old log file {path}: {source}")]
    RemoveFile {
        path: PathBuf,
        source: std::io::Error,
    },
    /// The log file timestamp could not be formatted.
    #[error("Failed to format log timestamp: {0}")]
    FormatTime(#[from] time::error::Format),
    /// A global tracing subscriber was already installed.
    #[error("Failed to install the global tracing subscriber")]
    SetGlobal,
}

/// Initialize stdout and file logging. Safe to call more than once; only the
/// first call installs the subscriber.
pub fn init() -> Result<(), LoggingError> {
    if LOG_GUARD.get().is_some() {
        return Ok(());
    }

    let logs_dir = app_dirs::logs_dir()?;
    let file_name = log_file_name(OffsetDateTime::now_utc())?;
    let file_path = logs_dir.join(&file_name);
    fs::File::create(&file_path).map_err(|source| LoggingError::CreateLogFile {
        path: file_path.clone(),
        source,
    })?;
    prune_old_logs(&logs_dir)?;

    let (writer, guard) = tracing_appender::non_blocking(tracing_appender::rolling::never(
        &logs_dir, &file_name,
    ));
    if LOG_GUARD.set(guard).is_err() {
        return Ok(());
    }

    let offset = time::UtcOffset::current_local_offset().unwrap_or(time::UtcOffset::UTC);
    let timer = OffsetTime::new(offset, LINE_STAMP);
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let stdout_layer = tracing_subscriber::fmt::layer().with_timer(timer.clone());
    let file_layer = tracing_subscriber::fmt::layer()
        .with_timer(timer)
        .with_ansi(false)
        .with_writer(writer);
    let subscriber = tracing_subscriber::registry()
        .with(env_filter)
        .with(stdout_layer)
        .with(file_layer);
    tracing::subscriber::set_global_default(subscriber).map_err(|_| LoggingError::SetGlobal)?;

    tracing::info!("Logging initialized; log file at {}", file_path.display());
    Ok(())
}

fn log_file_name(now: OffsetDateTime) -> Result<String, LoggingError> {
    let stamp = now.format(FILE_STAMP)?;
    Ok(format!("{LOG_FILE_PREFIX}_{stamp}.log"))
}

/// Remove the oldest log files so at most [`MAX_LOG_FILES`] remain. The
/// timestamped names sort chronologically, so a name sort is enough.
fn prune_old_logs(dir: &Path) -> Result<(), LoggingError> {
    let entries = fs::read_dir(dir).map_err(|source| LoggingError::ReadDir {
        path: dir.to_path_buf(),
        source,
    })?;
    let mut log_files: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| is_log_file(path))
        .collect();
    if log_files.len() <= MAX_LOG_FILES {
        return Ok(());
    }
    log_files.sort();
    let excess = log_files.len() - MAX_LOG_FILES;
    for path in log_files.into_iter().take(excess) {
        fs::remove_file(&path).map_err(|source| LoggingError::RemoveFile { path, source })?;
    }
    Ok(())
}

fn is_log_file(path: &Path) -> bool {
    let Some(name) = path.file_name().and_then(|name| name.to_str()) else {
        return false;
    };
    name.starts_with(LOG_FILE_PREFIX) && name.ends_with(".log")
}
