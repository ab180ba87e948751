//! Logging system initialization
//!
//! Diagnostics go through `tracing`; user-facing output stays on stdout.

use crate::config::{LoggingConfig, resolve_against_tool_dir};
use crate::errors::{LinkregError, Result};

/// Initialize logging from configuration.
///
/// The filter comes from `config.level` only; `RUST_LOG` is ignored.
/// Returns the writer guard, which must live until the process exits so
/// buffered lines are flushed.
pub fn init_logging(config: &LoggingConfig) -> Result<tracing_appender::non_blocking::WorkerGuard> {
    let to_file = !config.file.is_empty();

    let writer: Box<dyn std::io::Write + Send + Sync> = if to_file {
        let path = resolve_against_tool_dir(&config.file);
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|e| {
                LinkregError::config(format!(
                    "Failed to open log file {}: {}",
                    path.display(),
                    e
                ))
            })?;
        Box::new(file)
    } else {
        Box::new(std::io::stderr())
    };

    let filter = tracing_subscriber::EnvFilter::try_new(&config.level).map_err(|e| {
        LinkregError::config(format!("Invalid log level '{}': {}", config.level, e))
    })?;

    let (non_blocking_writer, guard) = tracing_appender::non_blocking(writer);
    let subscriber_builder = tracing_subscriber::fmt()
        .with_writer(non_blocking_writer)
        .with_env_filter(filter)
        .with_level(true)
        .with_target(false)
        .with_ansi(!to_file);

    // 已初始化时（例如同一进程内多次调用）保留原有订阅者
    let installed = if config.format == "json" {
        subscriber_builder.json().try_init()
    } else {
        subscriber_builder.try_init()
    };
    if installed.is_err() {
        tracing::debug!("Global subscriber already set, keeping it");
    }

    Ok(guard)
}
