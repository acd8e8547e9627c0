//! # Logging Macros
//!
//! Convenience macros for structured logging.
//! Every macro logs under a fixed target so operators can filter with `RUST_LOG`.

/// Log an API request with method, path, status and duration.
#[macro_export]
macro_rules! log_api_request {
    ($method:expr, $path:expr, $status:expr, $duration:expr) => {
        tracing::info!(
            target: "api",
            method = %$method,
            path = %$path,
            status = %$status,
            duration_ms = %$duration,
            "API request"
        )
    };
    ($request_id:expr, $method:expr, $path:expr, $status:expr, $duration:expr) => {
        tracing::info!(
            target: "api",
            request_id = %$request_id,
            method = %$method,
            path = %$path,
            status = %$status,
            duration_ms = %$duration,
            "API request"
        )
    };
}

/// Log a database query with duration and table name.
#[macro_export]
macro_rules! log_db_query {
    ($query:expr, $table:expr, $duration:expr) => {
        tracing::debug!(
            target: "database",
            query = %$query,
            table = %$table,
            duration_ms = %$duration,
            "Database query"
        )
    };
    ($query:expr, $table:expr, $duration:expr, $rows:expr) => {
        tracing::debug!(
            target: "database",
            query = %$query,
            table = %$table,
            duration_ms = %$duration,
            rows = $rows,
            "Database query"
        )
    };
}

/// Log a cache lookup with key and hit flag.
#[macro_export]
macro_rules! log_cache_op {
    ($operation:expr, $key:expr, $hit:expr) => {
        tracing::debug!(
            target: "cache",
            operation = %$operation,
            key = %$key,
            hit = $hit,
            "Cache operation"
        )
    };
}
