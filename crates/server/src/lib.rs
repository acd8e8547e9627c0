//! # Volley Stats API Server
//!
//! Axum-based HTTP API serving the volleyball statistics dashboard.
//!
//! ## Modules
//!
//! - [`cache`]: Time-boxed query result cache
//! - [`context`]: Team / season / phase selection
//! - [`dto`]: Query parameters and response documents
//! - [`middleware`]: HTTP middleware (request ids, CORS)
//! - [`queries`]: Read-only data access
//! - [`reports`]: Report handlers
//! - [`router`]: API route configuration

pub mod cache;
pub mod context;
pub mod dto;
pub mod middleware;
pub mod queries;
pub mod reports;
pub mod router;

pub use cache::{CacheConfig, QueryCache};
pub use middleware::cors::CorsConfig;
pub use router::create_app_router;

/// Application state shared across request handlers
#[derive(Clone, Debug)]
pub struct AppState {
    /// Database connection pool
    pub db:         sea_orm::DbConn,
    /// Query result cache
    pub cache:      QueryCache,
    /// Server start time for uptime calculation
    pub start_time: std::time::Instant,
}

impl AppState {
    /// Creates the state for a connected database
    #[must_use]
    pub fn new(db: sea_orm::DbConn, cache: CacheConfig) -> Self {
        Self {
            db,
            cache: QueryCache::new(cache),
            start_time: std::time::Instant::now(),
        }
    }
}

/// Server initialization result
#[derive(Debug)]
pub struct ServerResult {
    /// The address the server is bound to
    pub address:    String,
    /// Server start timestamp for logging
    pub started_at: chrono::DateTime<chrono::Utc>,
}

impl ServerResult {
    /// Creates a new server result
    #[must_use]
    pub fn new(address: &str) -> Self {
        Self {
            address:    address.to_string(),
            started_at: chrono::Utc::now(),
        }
    }
}
