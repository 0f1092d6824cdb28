use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

use time::UtcOffset;
use time::macros::format_description;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{self, fmt, prelude::*};

const LOG_RETENTION_DAYS: u64 = 7;
const LOG_DIR_NAME: &str = "completion-cache";

/// Log directory inside the user's OS cache directory
/// - Linux: ~/.cache/completion-cache/
/// - macOS: ~/Library/Caches/completion-cache/
/// - Windows: %LOCALAPPDATA%\completion-cache\
fn get_log_dir() -> io::Result<PathBuf> {
    let mut log_dir = dirs::cache_dir()
        .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "Unable to determine user cache directory"))?;
    log_dir.push(LOG_DIR_NAME);

    if !log_dir.exists() {
        fs::create_dir_all(&log_dir)?;
    }
    Ok(log_dir)
}

fn is_session_log(name: &str) -> bool {
    name.starts_with("session-") && name.ends_with(".log")
}

/// Remove session logs older than `LOG_RETENTION_DAYS`.
fn cleanup_old_logs(log_dir: &Path) -> io::Result<()> {
    let now = SystemTime::now();
    let retention = Duration::from_secs(LOG_RETENTION_DAYS * 24 * 60 * 60);

    for entry in fs::read_dir(log_dir)?.flatten() {
        let Ok(metadata) = entry.metadata() else { continue };
        if !metadata.is_file() || !entry.file_name().to_str().is_some_and(is_session_log) {
            continue;
        }
        let expired = metadata
            .modified()
            .ok()
            .and_then(|modified| now.duration_since(modified).ok())
            .is_some_and(|age| age > retention);
        if expired {
            if let Err(e) = fs::remove_file(entry.path()) {
                eprintln!("Failed to remove old log file {:?}: {}", entry.path(), e);
            }
        }
    }
    Ok(())
}

fn already_initialized(e: &impl ToString) -> bool {
    let message = e.to_string();
    message.contains("already been set") || message.contains("already initialized")
}

/// Initialize logging to stderr and, optionally, to a session file.
///
/// Returns the `WorkerGuard` of the file writer; keep it alive until exit or
/// buffered file output is lost.
///
/// # Arguments
/// * `no_color` - Disable ANSI colors in stderr output
/// * `log_level` - Override log level (otherwise uses RUST_LOG or defaults to "info")
/// * `enable_file_logging` - Also log at DEBUG level to a session file in the cache directory
pub fn init_logger(no_color: bool, log_level: Option<&str>, enable_file_logging: bool) -> io::Result<WorkerGuard> {
    let timer = fmt::time::OffsetTime::new(
        UtcOffset::UTC,
        format_description!("[[[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond digits:3]Z]"),
    );

    let stderr_filter = match log_level {
        Some(level) => tracing_subscriber::EnvFilter::new(level),
        None => tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
    };

    let stderr_layer = fmt::layer()
        .with_writer(io::stderr)
        .with_timer(timer.clone())
        .with_ansi(!no_color)
        .with_filter(stderr_filter);

    if !enable_file_logging {
        let (_, guard) = tracing_appender::non_blocking(io::sink());
        return match tracing_subscriber::registry().with(stderr_layer).try_init() {
            Ok(()) => Ok(guard),
            Err(e) if already_initialized(&e) => Ok(guard),
            Err(e) => Err(io::Error::other(e)),
        };
    }

    let log_dir = get_log_dir()?;
    cleanup_old_logs(&log_dir)?;

    let timestamp = time::OffsetDateTime::now_utc()
        .format(format_description!("[year][month][day]-[hour][minute][second]"))
        .map_err(io::Error::other)?;
    let log_path = log_dir.join(format!("session-{}-{}.log", timestamp, std::process::id()));

    let file = fs::OpenOptions::new().create(true).append(true).open(&log_path)?;
    let (non_blocking, guard) = tracing_appender::non_blocking(file);
    let file_layer = fmt::layer()
        .with_writer(non_blocking)
        .with_timer(timer)
        .with_ansi(false)
        .with_filter(tracing_subscriber::EnvFilter::new("debug"));

    match tracing_subscriber::registry().with(stderr_layer).with(file_layer).try_init() {
        Ok(()) => {}
        Err(e) if already_initialized(&e) => {}
        Err(e) => return Err(io::Error::other(e)),
    }
    eprintln!("Logging to file: {:?}", log_path);
    Ok(guard)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_log_names() {
        assert!(is_session_log("session-20260101-120000-42.log"));
        assert!(!is_session_log("wire-20260101.log"));
        assert!(!is_session_log("session-notes.txt"));
    }

    #[test]
    fn test_cleanup_keeps_recent_logs() {
        let dir = tempfile::tempdir().unwrap();
        let recent = dir.path().join("session-recent.log");
        let other = dir.path().join("notes.txt");
        fs::write(&recent, "x").unwrap();
        fs::write(&other, "x").unwrap();

        cleanup_old_logs(dir.path()).unwrap();
        assert!(recent.exists());
        assert!(other.exists());
    }

    #[test]
    fn test_init_without_file_logging_is_repeatable() {
        let _first = init_logger(true, Some("warn"), false).unwrap();
        let _second = init_logger(true, Some("warn"), false).unwrap();
    }
}
