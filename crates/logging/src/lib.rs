//! # Volley Stats Logging Infrastructure
//!
//! Structured logging for the statistics service.
//! Provides tracing integration with JSON output and environment-based configuration.

pub mod config;
pub mod macros;
pub mod request_id;

pub use config::LoggingConfig;
pub use request_id::{RequestId, REQUEST_ID_HEADER};
// Re-export tracing macros
pub use tracing::{debug, error, info, trace, warn};
pub use tracing_appender::non_blocking::WorkerGuard;

/// Error raised when a global subscriber is already installed.
pub type InitError = tracing::subscriber::SetGlobalDefaultError;

/// Initialize the logging system.
///
/// # Arguments
///
/// * `level` - Log level or filter directive (debug, info, `server=debug`)
/// * `format` - Output format (json, pretty, compact)
/// * `log_file` - Optional path to log file
///
/// The returned guard flushes the file writer on drop; keep it alive in `main`.
pub fn init(level: &str, format: &str, log_file: Option<&str>) -> Result<Option<WorkerGuard>, InitError> {
    init_with_config(LoggingConfig::from_env(level, format, log_file))
}

/// Initialize logging with a custom configuration.
pub fn init_with_config(config: LoggingConfig) -> Result<Option<WorkerGuard>, InitError> {
    let (subscriber, guard) = config.build();
    tracing::subscriber::set_global_default(subscriber)?;
    info!(
        level = %config.level,
        format = %config.format,
        environment = %config.environment,
        "Logging initialized"
    );
    Ok(guard)
}
