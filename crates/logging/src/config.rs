//! # Logging Configuration
//!
//! Configuration for the logging subsystem.
//! Supports environment variables and programmatic configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{filter::LevelFilter, fmt, prelude::*, EnvFilter, Registry};

/// Environment variable selecting the output format.
pub const LOG_FORMAT_ENV: &str = "VOLLEY_LOG_FORMAT";
/// Environment variable pointing at an optional log file.
pub const LOG_FILE_ENV: &str = "VOLLEY_LOG_FILE";
/// Environment variable naming the deployment environment.
pub const ENVIRONMENT_ENV: &str = "VOLLEY_ENV";

/// Logging configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub struct LoggingConfig {
    /// Log level or filter directive (debug, info, `server=debug,sea_orm=warn`)
    #[serde(default = "default_level")]
    pub level: String,

    /// Output format (json, pretty, compact)
    #[serde(default = "default_format")]
    pub format: String,

    /// Optional log file path
    #[serde(default)]
    pub log_file: Option<String>,

    /// Environment (development, testing, production)
    #[serde(default = "default_environment")]
    pub environment: String,
}

fn default_level() -> String { "info".to_string() }

fn default_format() -> String { "compact".to_string() }

fn default_environment() -> String { "development".to_string() }

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level:       default_level(),
            format:      default_format(),
            log_file:    None,
            environment: default_environment(),
        }
    }
}

impl LoggingConfig {
    /// Create configuration from environment variables, falling back to the given values.
    pub fn from_env(level: &str, format: &str, log_file: Option<&str>) -> Self {
        Self {
            level:       std::env::var("RUST_LOG")
                .ok()
                .unwrap_or_else(|| level.to_string()),
            format:      std::env::var(LOG_FORMAT_ENV)
                .ok()
                .unwrap_or_else(|| format.to_string()),
            log_file:    std::env::var(LOG_FILE_ENV)
                .ok()
                .or(log_file.map(|s| s.to_string())),
            environment: std::env::var(ENVIRONMENT_ENV).unwrap_or_else(|_| default_environment()),
        }
    }

    /// Whether this configuration targets production.
    pub fn is_production(&self) -> bool { self.environment.eq_ignore_ascii_case("production") }

    /// Level filter parsed from the configured level; directives fall back to INFO.
    pub fn level_filter(&self) -> LevelFilter { self.level.parse().unwrap_or(LevelFilter::INFO) }

    fn env_filter(&self) -> EnvFilter {
        EnvFilter::try_new(&self.level).unwrap_or_else(|_| EnvFilter::new(LevelFilter::INFO.to_string()))
    }

    /// Build the tracing subscriber from this configuration.
    ///
    /// The returned guard must be held for as long as file logging should keep flushing.
    pub fn build(&self) -> (Box<dyn tracing::Subscriber + Send + Sync>, Option<WorkerGuard>) {
        match self.format.as_str() {
            "pretty" => (self.build_pretty_subscriber(), None),
            "compact" => (self.build_compact_subscriber(), None),
            _ => self.build_json_subscriber(),
        }
    }

    /// Build a JSON subscriber for production logging.
    fn build_json_subscriber(&self) -> (Box<dyn tracing::Subscriber + Send + Sync>, Option<WorkerGuard>) {
        let stdout_layer = fmt::layer()
            .json()
            .with_timer(fmt::time::UtcTime::rfc_3339());

        if let Some(ref log_file) = self.log_file {
            let path = Path::new(log_file);
            let directory = path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .unwrap_or_else(|| Path::new("."));
            let file_name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| "volley.log".to_string());

            let file_appender = tracing_appender::rolling::daily(directory, file_name);
            let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
            let file_layer = fmt::layer().json().with_writer(non_blocking);
            let subscriber = Registry::default()
                .with(self.env_filter())
                .with(stdout_layer)
                .with(file_layer);
            (Box::new(subscriber), Some(guard))
        }
        else {
            (
                Box::new(Registry::default().with(self.env_filter()).with(stdout_layer)),
                None,
            )
        }
    }

    /// Build a pretty subscriber for development logging.
    fn build_pretty_subscriber(&self) -> Box<dyn tracing::Subscriber + Send + Sync> {
        let layer = fmt::layer()
            .pretty()
            .with_timer(fmt::time::UtcTime::rfc_3339());
        Box::new(Registry::default().with(self.env_filter()).with(layer))
    }

    /// Build a compact subscriber for terminals and tests.
    fn build_compact_subscriber(&self) -> Box<dyn tracing::Subscriber + Send + Sync> {
        let layer = fmt::layer()
            .compact()
            .with_timer(fmt::time::UtcTime::rfc_3339());
        Box::new(Registry::default().with(self.env_filter()).with(layer))
    }
}
