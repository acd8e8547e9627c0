//! # CLI Validate Command
//!
//! Configuration validation for the volley CLI. Checks the environment only; the
//! database is not contacted.

use error::{AppError, Result};
use tracing::info;

use crate::config::{resolve_port, DatabaseConfig, PROXY_PORT_ENV};

/// Variables needed when `DATABASE_URL` is not set
pub const REQUIRED_DATABASE_VARS: [&str; 3] = [
    "VOLLEY_DATABASE_HOST",
    "VOLLEY_DATABASE_NAME",
    "VOLLEY_DATABASE_USER",
];

/// Validates the CLI configuration
pub fn validate() -> Result<()> { validate_with(|key| std::env::var(key).ok()) }

/// Validates the configuration found through `lookup`
///
/// # Errors
///
/// `Config` when a value cannot be parsed, `Validation` when database settings are missing.
pub fn validate_with(lookup: impl Fn(&str) -> Option<String>) -> Result<()> {
    let config = DatabaseConfig::from_lookup(&lookup).map_err(|e| AppError::config(e.to_string()))?;

    if config.url.is_none() {
        let missing: Vec<&str> = REQUIRED_DATABASE_VARS
            .iter()
            .copied()
            .filter(|var| lookup(var).is_none())
            .collect();
        if !missing.is_empty() {
            return Err(AppError::validation(format!(
                "Set DATABASE_URL or the missing variables: {}",
                missing.join(", ")
            )));
        }
    }

    let explicit_port = match lookup("VOLLEY_PORT") {
        Some(value) => {
            Some(value.trim().parse::<u16>().map_err(|_e| {
                AppError::config(format!("Invalid port number: {}", value))
            })?)
        },
        None => None,
    };
    let port = resolve_port(explicit_port, lookup(PROXY_PORT_ENV).as_deref())
        .map_err(|e| AppError::config(e.to_string()))?;

    info!(target: "validate", database = %config.describe(), port, "Configuration is valid");
    Ok(())
}
