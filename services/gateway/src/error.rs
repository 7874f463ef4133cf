use axum::{
    Json,
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

use crate::models::{RATE_LIMIT_LIMIT, RATE_LIMIT_REMAINING, RATE_LIMIT_RESET};

/// Central error type for the gateway.
///
/// Upstream fetch failures never appear here; they ride inside 200 bodies
/// as per-source error fields. Only rate-limit rejections and genuinely
/// unexpected faults produce non-200 responses.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Rate limit exceeded for {key}")]
    RateLimitExceeded {
        key: String,
        limit: u32,
        retry_after: u64,
    },

    #[error("Internal server error")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::RateLimitExceeded {
                key,
                limit,
                retry_after,
            } => {
                tracing::debug!(key, limit, retry_after, "rate limit exceeded");
                let body = Json(json!({
                    "message": "Too many requests. Please try again later.",
                    "retryAfter": retry_after,
                }));
                let mut response = (StatusCode::TOO_MANY_REQUESTS, body).into_response();
                let headers = response.headers_mut();
                headers.insert(RATE_LIMIT_LIMIT, HeaderValue::from(limit));
                headers.insert(RATE_LIMIT_REMAINING, HeaderValue::from(0));
                headers.insert(RATE_LIMIT_RESET, HeaderValue::from(retry_after));
                headers.insert(header::RETRY_AFTER, HeaderValue::from(retry_after));
                response
            }
            AppError::Internal(err) => {
                tracing::error!(error = %err, "unhandled internal error");
                let body = Json(json!({
                    "error": "INTERNAL_ERROR",
                    "message": "Internal server error",
                }));
                (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
            }
        }
    }
}
