//! # Request ID Middleware
//!
//! Accepts a well-formed `x-request-id` from the client or generates one, stores it in
//! the request extensions, runs the handler inside a span carrying it, and echoes it
//! in the response.

use std::time::Instant;

use axum::{extract::Request, http::HeaderValue, middleware::Next, response::Response};
use logging::{log_api_request, RequestId, REQUEST_ID_HEADER};
use tracing::Instrument;

/// Request ID middleware
pub async fn request_id_middleware(mut request: Request, next: Next) -> Response {
    let request_id = request
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .and_then(RequestId::from_header)
        .unwrap_or_default();
    request.extensions_mut().insert(request_id.clone());

    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let span = tracing::info_span!("request", request_id = %request_id, %method, %path);

    let start = Instant::now();
    let mut response = next.run(request).instrument(span).await;

    if let Ok(value) = HeaderValue::from_str(request_id.as_str()) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }
    log_api_request!(
        request_id,
        method,
        path,
        response.status().as_u16(),
        start.elapsed().as_millis()
    );
    response
}

#[cfg(test)]
mod tests {
    use axum::{
        body::Body,
        extract::Extension,
        http::{Request, StatusCode},
        middleware::from_fn,
        routing::get,
        Router,
    };
    use tower::ServiceExt;

    use super::*;

    async fn echo_handler(Extension(request_id): Extension<RequestId>) -> String { request_id.into_string() }

    fn app() -> Router {
        Router::new()
            .route("/test", get(echo_handler))
            .layer(from_fn(request_id_middleware))
    }

    #[tokio::test]
    async fn test_generates_request_id() {
        let request = Request::builder().uri("/test").body(Body::empty()).unwrap();
        let response = app().oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let header = response.headers().get(REQUEST_ID_HEADER).unwrap();
        assert!(header.to_str().unwrap().len() >= 20);
    }

    #[tokio::test]
    async fn test_keeps_client_request_id() {
        let request = Request::builder()
            .uri("/test")
            .header(REQUEST_ID_HEADER, "dashboard-req-0001")
            .body(Body::empty())
            .unwrap();
        let response = app().oneshot(request).await.unwrap();

        assert_eq!(
            response.headers().get(REQUEST_ID_HEADER).unwrap(),
            "dashboard-req-0001"
        );
    }

    #[tokio::test]
    async fn test_replaces_malformed_request_id() {
        let request = Request::builder()
            .uri("/test")
            .header(REQUEST_ID_HEADER, "bad id")
            .body(Body::empty())
            .unwrap();
        let response = app().oneshot(request).await.unwrap();

        assert_ne!(response.headers().get(REQUEST_ID_HEADER).unwrap(), "bad id");
    }
}
