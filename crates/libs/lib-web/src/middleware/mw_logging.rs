//! # Request/Response Logging Middleware
//!
//! Structured logging for every HTTP request and response: method, path,
//! status, and duration, correlated by request id. Credential-carrying
//! headers are never logged, and bodies of auth endpoints are never
//! inspected.

use axum::{extract::Request, middleware::Next, response::Response};
use std::time::Instant;
use tracing::{error, info, warn};

/// Endpoints whose request bodies carry credentials.
const SENSITIVE_ENDPOINTS: &[&str] = &[
    "/api/auth/login",
    "/api/auth/signup",
    "/api/users/update",
];

/// Request/response logging middleware.
pub async fn log_requests(req: Request, next: Next) -> Response {
    let start = Instant::now();
    let method = req.method().clone();
    let path = req.uri().path().to_string();

    let request_id = req
        .extensions()
        .get::<crate::middleware::mw_req_stamp::RequestStamp>()
        .map(|s| s.id.clone())
        .unwrap_or_else(|| "unknown".to_string());

    let is_sensitive = SENSITIVE_ENDPOINTS.iter().any(|ep| path.starts_with(ep));

    info!(
        request_id = %request_id,
        method = %method,
        path = %path,
        sensitive = is_sensitive,
        "[REQUEST] {} {}",
        method,
        path
    );

    let response = next.run(req).await;

    let duration = start.elapsed();
    let status = response.status();

    if status.is_server_error() {
        error!(
            request_id = %request_id,
            status = status.as_u16(),
            duration_ms = duration.as_millis() as u64,
            "[RESPONSE] {} {} -> {}",
            method,
            path,
            status.as_u16()
        );
    } else if status.is_client_error() {
        warn!(
            request_id = %request_id,
            status = status.as_u16(),
            duration_ms = duration.as_millis() as u64,
            "[RESPONSE] {} {} -> {}",
            method,
            path,
            status.as_u16()
        );
    } else {
        info!(
            request_id = %request_id,
            status = status.as_u16(),
            duration_ms = duration.as_millis() as u64,
            "[RESPONSE] {} {} -> {}",
            method,
            path,
            status.as_u16()
        );
    }

    response
}
