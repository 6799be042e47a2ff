//! HTTP middleware
//!
//! Request logging with per-request correlation ids. The logger runs outside
//! the CORS layer so every request is recorded, including preflights.

use axum::{
    extract::Request,
    http::{Method, Uri},
    middleware::Next,
    response::Response,
};
use std::time::Instant;
use tracing::{debug, info, warn};

/// Request logging middleware
///
/// Emits a debug event when a request arrives and an info/warn event once the
/// response headers are ready. For relayed streams the body keeps flowing
/// after the completion event, so `duration_ms` covers time-to-headers only.
pub async fn request_logging_middleware(
    method: Method,
    uri: Uri,
    request: Request,
    next: Next,
) -> Response {
    let start = Instant::now();
    let request_id = uuid::Uuid::new_v4().to_string();

    debug!(
        method = %method,
        uri = %uri,
        request_id = %request_id,
        "HTTP request started"
    );

    let response = next.run(request).await;

    let status = response.status().as_u16();
    let duration_ms = start.elapsed().as_millis() as u64;

    if status >= 400 {
        warn!(
            method = %method,
            uri = %uri,
            status = status,
            duration_ms = duration_ms,
            request_id = %request_id,
            "HTTP request failed"
        );
    } else {
        info!(
            method = %method,
            uri = %uri,
            status = status,
            duration_ms = duration_ms,
            request_id = %request_id,
            "HTTP request completed"
        );
    }

    response
}
