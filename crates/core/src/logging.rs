use crate::config::LoggingConfig;
use crate::error::{Result, StachecError};
use std::path::PathBuf;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Directory the log files go to when the configuration names none.
pub fn default_log_dir() -> PathBuf {
    let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
    PathBuf::from(home).join(".stachec/logs")
}

/// Install the global subscriber for `component`.
///
/// Called once by the host that drives compilation (an annotation
/// processor or build tool front end) before the first template is compiled.
/// Keep the returned guard alive for as long as log lines should be flushed.
pub fn init_logging(component: &str, config: &LoggingConfig) -> Result<WorkerGuard> {
    let log_dir = config.directory.clone().unwrap_or_else(default_log_dir);
    std::fs::create_dir_all(&log_dir)?;

    // Roll daily, with the component name as the prefix
    // e.g. compiler.2024-01-21
    let file_appender = tracing_appender::rolling::daily(&log_dir, component);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.filter));

    // File layer: no ANSI colors, output to file
    let file_layer = fmt::layer()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_target(true);

    let registry = tracing_subscriber::registry().with(filter).with(file_layer);

    let installed = if config.to_stderr {
        let stderr_layer = fmt::layer()
            .with_writer(std::io::stderr)
            .with_ansi(true)
            .with_target(false);
        registry.with(stderr_layer).try_init()
    } else {
        registry.try_init()
    };
    installed.map_err(|e| StachecError::Internal(format!("logging already initialized: {}", e)))?;

    Ok(guard)
}
