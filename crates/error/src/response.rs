//! # API Response Types
//!
//! Generic API response envelope used by every endpoint.
//!
//! ## Response Format
//!
//! ```json
//! {
//!   "status": "success",
//!   "data": { ... },
//!   "requestId": "..."
//! }
//! ```

use serde::{Deserialize, Serialize};

/// API response metadata.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct ResponseMeta {
    /// Request ID for correlation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,

    /// Whether the payload was served from the query cache.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cached: Option<bool>,
}

/// API response type.
///
/// # Example
///
/// ```rust
/// use error::{ApiResponse, ResponseMeta};
///
/// let response = ApiResponse::success(vec!["saque", "atacar"], ResponseMeta {
///     request_id: Some("req-123".to_string()),
///     cached:     Some(false),
/// });
///
/// let json = serde_json::to_string(&response).unwrap();
/// assert!(json.contains("success"));
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", tag = "status")]
pub enum ApiResponse<T> {
    /// Success response.
    Success {
        /// Response data.
        data: T,

        /// Response metadata.
        #[serde(flatten, skip_serializing_if = "Option::is_none")]
        meta: Option<ResponseMeta>,
    },

    /// Error response.
    Error {
        /// Error code.
        code: String,

        /// Error message.
        message: String,

        /// Response metadata.
        #[serde(flatten, skip_serializing_if = "Option::is_none")]
        meta: Option<ResponseMeta>,
    },
}

impl<T> ApiResponse<T> {
    /// Create a success response with data.
    #[inline]
    pub fn ok(data: T) -> Self {
        ApiResponse::Success {
            data,
            meta: None,
        }
    }

    /// Create a success response carrying metadata.
    #[inline]
    pub fn success(data: T, meta: ResponseMeta) -> Self {
        ApiResponse::Success {
            data,
            meta: Some(meta),
        }
    }

    /// Create an error response.
    #[inline]
    pub fn error(code: impl ToString, message: impl ToString) -> Self {
        ApiResponse::Error {
            code:    code.to_string(),
            message: message.to_string(),
            meta:    None,
        }
    }

    /// Check if this is a success response.
    #[inline]
    pub fn is_success(&self) -> bool { matches!(self, ApiResponse::Success { .. }) }
}

impl<T: Serialize> axum::response::IntoResponse for ApiResponse<T> {
    fn into_response(self) -> axum::response::Response {
        let status = if self.is_success() {
            http::StatusCode::OK
        }
        else {
            http::StatusCode::BAD_REQUEST
        };
        (status, axum::Json(self)).into_response()
    }
}
