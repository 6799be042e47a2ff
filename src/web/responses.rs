//! HTTP response utilities
//!
//! Maps [`AppError`] onto the wire contract. Every failure surfaces as a
//! `{"error": message}` JSON body with a matching status code, so browser
//! clients can branch on a single shape.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::error;

use crate::errors::AppError;

/// Convert an application error into its HTTP form.
///
/// Transport failures are logged with their real cause and masked with a
/// generic message, so upstream hostnames never leak to callers.
pub fn handle_error(err: AppError) -> Response {
    let (status, message) = match &err {
        AppError::Validation { message } => (StatusCode::BAD_REQUEST, message.clone()),
        AppError::Unauthorized { message } => (StatusCode::UNAUTHORIZED, message.clone()),
        AppError::Upstream { status, reason } => (
            StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY),
            format!("Upstream error: {reason}"),
        ),
        AppError::Http(source) => {
            error!("Proxy request failed: {source}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Proxy request failed".to_string(),
            )
        }
        AppError::JsonParse(source) => {
            error!("Failed to decode catalog data: {source}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to fetch channels".to_string(),
            )
        }
        AppError::Configuration { message } | AppError::Internal { message } => {
            error!("Internal error: {message}");
            (StatusCode::INTERNAL_SERVER_ERROR, message.clone())
        }
    };

    (status, Json(json!({ "error": message }))).into_response()
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        handle_error(self)
    }
}
