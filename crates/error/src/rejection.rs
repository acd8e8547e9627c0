//! # Rejection Conversions
//!
//! Converts Axum extractor rejections into [`AppError`] so handlers can use `?`
//! on `Result<Query<T>, QueryRejection>` and friends.

use axum::extract::rejection::{PathRejection, QueryRejection};

use crate::AppError;

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        let message = rejection.body_text();
        // "Failed to deserialize query string: team_id: invalid digit found in string"
        let message = message
            .strip_prefix("Failed to deserialize query string: ")
            .map(|rest| format!("Invalid query parameter {}", rest))
            .unwrap_or(message);
        AppError::bad_request(message)
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self { AppError::bad_request(format!("Invalid path: {}", rejection.body_text())) }
}
