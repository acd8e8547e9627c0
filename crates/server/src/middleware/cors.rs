//! # CORS Middleware
//!
//! The dashboard front end is served from its own origin and only reads, so the API
//! answers `GET` and preflight `OPTIONS` requests from configured origins.

use axum::{
    body::Body,
    extract::Request,
    http::{self, header::HeaderName, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};

/// CORS configuration for the API
#[derive(Clone, Debug)]
pub struct CorsConfig {
    /// Allowed origin patterns (`*`, `*.example.com` or exact origins)
    pub allowed_origins: Vec<String>,
    /// Headers the dashboard may read from responses
    pub exposed_headers: Vec<String>,
    /// Maximum age for preflight cache (seconds)
    pub max_age:         u64,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: vec!["*".to_string()],
            exposed_headers: vec!["X-Request-ID".to_string(), "X-Error-Code".to_string()],
            max_age:         3600,
        }
    }
}

impl CorsConfig {
    /// Read `VOLLEY_CORS_ALLOWED_ORIGINS` (comma separated) and `VOLLEY_CORS_MAX_AGE`.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            allowed_origins: std::env::var("VOLLEY_CORS_ALLOWED_ORIGINS")
                .map(|origins| {
                    origins
                        .split(',')
                        .map(|s| s.trim().to_string())
                        .filter(|s| !s.is_empty())
                        .collect()
                })
                .unwrap_or(defaults.allowed_origins),
            exposed_headers: defaults.exposed_headers,
            max_age:         std::env::var("VOLLEY_CORS_MAX_AGE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.max_age),
        }
    }

    /// Check if an origin is allowed
    pub fn is_origin_allowed(&self, origin: &str) -> bool {
        self.allowed_origins.iter().any(|allowed| {
            if allowed == "*" {
                true
            }
            else if let Some(suffix) = allowed.strip_prefix('*') {
                origin.ends_with(suffix)
            }
            else {
                origin == allowed
            }
        })
    }
}

/// Safely insert a header value
fn insert_header(headers: &mut http::HeaderMap, name: &str, value: &str) {
    match (
        name.parse::<HeaderName>(),
        value.parse::<http::HeaderValue>(),
    ) {
        (Ok(name), Ok(value)) => {
            headers.insert(name, value);
        },
        _ => tracing::warn!("Failed to insert header: {} = {}", name, value),
    }
}

/// CORS middleware
pub async fn cors_middleware(request: Request, next: Next, config: CorsConfig) -> Response {
    let origin = request
        .headers()
        .get(http::header::ORIGIN)
        .and_then(|v| v.to_str().ok())
        .map(String::from)
        .filter(|origin| config.is_origin_allowed(origin));

    if request.method() == http::Method::OPTIONS {
        let Some(origin) = origin
        else {
            return (StatusCode::FORBIDDEN, Body::empty()).into_response();
        };
        let mut response = (StatusCode::NO_CONTENT, Body::empty()).into_response();
        let headers = response.headers_mut();
        insert_header(headers, "Access-Control-Allow-Origin", &origin);
        insert_header(headers, "Access-Control-Allow-Methods", "GET, OPTIONS");
        insert_header(
            headers,
            "Access-Control-Allow-Headers",
            "Content-Type, Accept, X-Request-ID",
        );
        insert_header(
            headers,
            "Access-Control-Max-Age",
            &config.max_age.to_string(),
        );
        return response;
    }

    let mut response = next.run(request).await;
    if let Some(origin) = origin {
        let headers = response.headers_mut();
        insert_header(headers, "Access-Control-Allow-Origin", &origin);
        insert_header(
            headers,
            "Access-Control-Expose-Headers",
            &config.exposed_headers.join(", "),
        );
    }
    response
}
