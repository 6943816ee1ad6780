use anyhow::Context;
use protocol::{AppError, ResultExt};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, OnceLock};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{Builder as RollingBuilder, Rotation};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

const DEFAULT_LOG_LEVEL: &str = "info";
const LOG_ENV_VAR: &str = "APPSWEEP_LOG";
const LOG_DIR_NAME: &str = "AppSweep";

#[derive(Debug, Clone)]
pub struct LoggingGuard {
    log_dir: PathBuf,
    level: String,
}

impl LoggingGuard {
    pub fn log_dir(&self) -> &Path {
        &self.log_dir
    }

    pub fn level(&self) -> &str {
        &self.level
    }
}

// The non-blocking writer stops flushing once its guard drops, so the
// guard lives for the process.
fn worker_guard_slot() -> &'static Mutex<Option<WorkerGuard>> {
    static SLOT: OnceLock<Mutex<Option<WorkerGuard>>> = OnceLock::new();
    SLOT.get_or_init(|| Mutex::new(None))
}

/// `~/Library/Logs/AppSweep`, the conventional per-user log area.
pub fn default_log_dir() -> Option<PathBuf> {
    std::env::var_os("HOME")
        .map(PathBuf::from)
        .map(|home| home.join("Library").join("Logs").join(LOG_DIR_NAME))
}

pub fn resolve_log_level(verbose: bool) -> String {
    if verbose {
        return "debug".to_string();
    }
    std::env::var(LOG_ENV_VAR)
        .ok()
        .filter(|value| !value.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string())
}

/// Installs a daily-rolling JSON file subscriber (plus a compact
/// console layer in debug builds). Safe to call once per process;
/// a subscriber installed earlier wins silently.
pub fn init_logging(log_dir: &Path, level: &str) -> Result<LoggingGuard, AppError> {
    fs::create_dir_all(log_dir)
        .with_context(|| format!("could not create log directory: {}", log_dir.display()))
        .with_code("log_dir_create_failed", "could not create log directory")
        .with_ctx("logDir", log_dir.display().to_string())?;

    let file_appender = RollingBuilder::new()
        .rotation(Rotation::DAILY)
        .filename_prefix("appsweep")
        .filename_suffix("log")
        .build(log_dir)
        .with_context(|| format!("could not create log writer: {}", log_dir.display()))
        .with_code("log_appender_create_failed", "could not create log writer")
        .with_ctx("logDir", log_dir.display().to_string())?;
    let (file_writer, worker_guard) = tracing_appender::non_blocking(file_appender);

    if let Ok(mut slot) = worker_guard_slot().lock() {
        *slot = Some(worker_guard);
    }

    if !tracing::dispatcher::has_been_set() {
        let env_filter = EnvFilter::new(level);
        let file_layer = tracing_subscriber::fmt::layer()
            .json()
            .with_ansi(false)
            .with_writer(file_writer)
            .with_current_span(false)
            .with_span_list(false);

        let subscriber = tracing_subscriber::registry()
            .with(env_filter)
            .with(file_layer);
        #[cfg(debug_assertions)]
        let subscriber = subscriber.with(
            tracing_subscriber::fmt::layer()
                .compact()
                .with_ansi(true)
                .with_target(true)
                .with_writer(std::io::stderr),
        );

        subscriber
            .try_init()
            .with_context(|| format!("could not install log subscriber: level={level}"))
            .with_code("log_subscriber_init_failed", "could not install log subscriber")
            .with_ctx("logLevel", level.to_string())?;
    }

    Ok(LoggingGuard {
        log_dir: log_dir.to_path_buf(),
        level: level.to_string(),
    })
}

#[cfg(test)]
#[path = "../tests/logging/level_tests.rs"]
mod level_tests;
