//! # Error Response Mapping
//!
//! Converts [`AppError`] values into HTTP responses using the standard
//! [`ApiResponse`] envelope.
//!
//! ## Usage
//!
//! ```rust
//! use error::{AppError, ErrorHandler};
//!
//! let handler = ErrorHandler::new(false);
//! let response = handler.to_response(&AppError::not_found("Match 9"));
//! assert_eq!(response.status(), http::StatusCode::NOT_FOUND);
//! ```

use axum::{
    http::{HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};

use crate::{response::ApiResponse, AppError};

/// Environment variable toggling detailed error messages for server faults.
pub const EXPOSE_ERRORS_ENV: &str = "VOLLEY_EXPOSE_ERRORS";

/// Error handler that converts errors to HTTP responses.
#[derive(Clone, Debug)]
pub struct ErrorHandler {
    /// Whether to include server-side error details in the response.
    pub include_details: bool,
}

impl ErrorHandler {
    /// Create a new error handler.
    #[inline]
    pub fn new(include_details: bool) -> Self {
        Self {
            include_details,
        }
    }

    /// Build a handler from the environment.
    pub fn from_env() -> Self {
        let include_details = std::env::var(EXPOSE_ERRORS_ENV)
            .map(|v| matches!(v.to_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);
        Self::new(include_details)
    }

    /// Message shown to the client.
    ///
    /// Client errors always carry their message. Database failures keep a generic
    /// banner text unless details are enabled.
    pub fn public_message(&self, err: &AppError) -> String {
        if self.include_details || !err.is_server_fault() {
            return err.message();
        }
        match err {
            AppError::Database {
                ..
            } => "The statistics database is unavailable".to_string(),
            _ => "Internal server error".to_string(),
        }
    }

    /// Convert an error to a response.
    pub fn to_response(&self, err: &AppError) -> Response {
        if err.is_server_fault() {
            tracing::error!(code = err.code(), error = %err, "Request failed");
        }
        else {
            tracing::debug!(code = err.code(), error = %err, "Request rejected");
        }

        let body = ApiResponse::<()>::error(err.code(), self.public_message(err));
        let mut response = (err.status(), Json(body)).into_response();
        response
            .headers_mut()
            .insert("x-error-code", HeaderValue::from_static(err.code()));
        response
    }
}

impl Default for ErrorHandler {
    fn default() -> Self { Self::from_env() }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response { ErrorHandler::from_env().to_response(&self) }
}

/// Fallback response for unknown routes.
pub async fn not_found_fallback() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(ApiResponse::<()>::error("NOT_FOUND", "Route not found")),
    )
        .into_response()
}
