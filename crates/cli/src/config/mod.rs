//! # Database Configuration
//!
//! Database configuration handling for the CLI, reading from environment variables.

use std::net::SocketAddr;

/// Environment variable holding a complete connection URL; wins over the parts.
pub const DATABASE_URL_ENV: &str = "DATABASE_URL";
/// Port substituted by the hosting proxy, used when no port is configured.
pub const PROXY_PORT_ENV: &str = "PORT";
/// Listening port when nothing else is configured.
pub const DEFAULT_PORT: u16 = 8080;

/// Database configuration for CLI
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseConfig {
    /// Database host address
    pub host:      String,
    /// Database port number
    pub port:      u16,
    /// Database name
    pub database:  String,
    /// Database username
    pub username:  String,
    /// Database password
    pub password:  String,
    /// SSL mode
    pub ssl_mode:  String,
    /// Maximum pooled connections
    pub pool_size: u32,
    /// Full URL from `DATABASE_URL`, if set
    pub url:       Option<String>,
}

/// Errors that can occur when parsing configuration.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A port number could not be parsed.
    #[error("Invalid port number: {value}")]
    InvalidPort {
        /// The invalid port value that was provided.
        value: String,
    },

    /// The pool size could not be parsed or is zero.
    #[error("Invalid connection pool size: {value}")]
    InvalidPoolSize {
        /// The invalid pool size that was provided.
        value: String,
    },
}

impl DatabaseConfig {
    /// Creates a new DatabaseConfig from `DATABASE_URL` or the `VOLLEY_DATABASE_*` variables.
    ///
    /// Returns `Err` if a numeric variable has an invalid format.
    pub fn from_env() -> Result<Self, ConfigError> { Self::from_lookup(|key| std::env::var(key).ok()) }

    /// Same as [`from_env`](Self::from_env) over an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let port_str = lookup("VOLLEY_DATABASE_PORT").unwrap_or_else(|| "5432".to_owned());
        let port = port_str.parse::<u16>().map_err(|_e| {
            ConfigError::InvalidPort {
                value: port_str.clone(),
            }
        })?;

        let pool_str = lookup("VOLLEY_DATABASE_POOL_SIZE").unwrap_or_else(|| "10".to_owned());
        let pool_size = pool_str
            .parse::<u32>()
            .ok()
            .filter(|size| *size > 0)
            .ok_or_else(|| {
                ConfigError::InvalidPoolSize {
                    value: pool_str.clone(),
                }
            })?;

        Ok(Self {
            host: lookup("VOLLEY_DATABASE_HOST").unwrap_or_else(|| "localhost".to_owned()),
            port,
            database: lookup("VOLLEY_DATABASE_NAME").unwrap_or_else(|| "voleibol".to_owned()),
            username: lookup("VOLLEY_DATABASE_USER").unwrap_or_else(|| "postgres".to_owned()),
            password: lookup("VOLLEY_DATABASE_PASSWORD").unwrap_or_default(),
            ssl_mode: lookup("VOLLEY_DATABASE_SSL_MODE").unwrap_or_else(|| "prefer".to_owned()),
            pool_size,
            url: lookup(DATABASE_URL_ENV).filter(|url| !url.trim().is_empty()),
        })
    }

    /// Connection URL: `DATABASE_URL` when set, otherwise built from the parts.
    pub fn database_url(&self) -> String { self.url.clone().unwrap_or_else(|| build_database_url(self)) }

    /// Where the service connects, without credentials, for logs.
    pub fn describe(&self) -> String {
        if self.url.is_some() {
            format!("URL from {}", DATABASE_URL_ENV)
        }
        else {
            format!("{}:{}/{}", self.host, self.port, self.database)
        }
    }
}

/// Builds the DATABASE_URL from DatabaseConfig
///
/// # Arguments
///
/// * `config` - The database configuration to use
///
/// # Returns
///
/// A PostgreSQL connection URL string.
pub fn build_database_url(config: &DatabaseConfig) -> String {
    let encoded_username = percent_encode_userinfo(&config.username);
    let encoded_password = percent_encode_userinfo(&config.password);
    format!(
        "postgres://{}:{}@{}:{}/{}?sslmode={}",
        encoded_username, encoded_password, config.host, config.port, config.database, config.ssl_mode
    )
}

/// Percent-encoding for username/password in PostgreSQL URIs.
///
/// Everything but unreserved characters is encoded as UTF-8 bytes.
fn percent_encode_userinfo(s: &str) -> String {
    const HEX: &[u8; 16] = b"0123456789ABCDEF";

    let mut result = String::with_capacity(s.len().saturating_mul(3));
    for c in s.chars() {
        if c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | '~') {
            result.push(c);
        }
        else {
            let mut buf = [0u8; 4];
            for byte in c.encode_utf8(&mut buf).as_bytes() {
                result.push('%');
                result.push(char::from(HEX[usize::from(byte >> 4)]));
                result.push(char::from(HEX[usize::from(byte & 15)]));
            }
        }
    }
    result
}

/// Listening port: the explicit value, else the proxy's `PORT`, else [`DEFAULT_PORT`].
pub fn resolve_port(explicit: Option<u16>, proxy_port: Option<&str>) -> Result<u16, ConfigError> {
    if let Some(port) = explicit {
        return Ok(port);
    }
    match proxy_port {
        Some(value) => {
            value.trim().parse::<u16>().map_err(|_e| {
                ConfigError::InvalidPort {
                    value: value.to_owned(),
                }
            })
        },
        None => Ok(DEFAULT_PORT),
    }
}

/// Parses a host and port into a SocketAddr.
///
/// # Arguments
///
/// * `host` - The host string to parse
/// * `port` - The port number
///
/// # Returns
///
/// A `Result` containing the parsed `SocketAddr` or an error if parsing fails.
pub fn parse_socket_addr(host: &str, port: u16) -> Result<SocketAddr, std::net::AddrParseError> {
    // IPv6 addresses must be wrapped in brackets when appending a port
    let addr_str = if host.contains(':') && !host.starts_with('[') {
        format!("[{}]:{}", host, port)
    }
    else {
        format!("{}:{}", host, port)
    };
    addr_str.parse()
}
