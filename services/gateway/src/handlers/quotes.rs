use crate::error::AppError;
use crate::models::{AllQuotesResponse, RATE_LIMIT_LIMIT, RATE_LIMIT_REMAINING, RandomQuoteParams};
use crate::state::AppState;
use axum::{
    Json,
    extract::{ConnectInfo, Query, State},
    http::{HeaderMap, HeaderValue},
    response::{IntoResponse, Response},
};
use std::net::SocketAddr;
use std::time::Duration;
use types::FastestQuote;

/// Default quota for `/api/quotes/random`: 1 request per 10-second window,
/// overridable per request via `?rateLimit=`.
const DEFAULT_MAX_ATTEMPTS: u32 = 1;
const WINDOW: Duration = Duration::from_secs(10);

/// Rate-limit key for a client IP.
pub fn rate_limit_key(ip: &str) -> String {
    format!("quotes:{ip}")
}

/// Client identity: first `X-Forwarded-For` hop when present (the gateway
/// normally sits behind a load balancer), else the socket peer address.
fn client_ip(headers: &HeaderMap, addr: &SocketAddr) -> String {
    headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(|v| v.trim().to_string())
        .unwrap_or_else(|| addr.ip().to_string())
}

/// `GET /api/quotes/random` — one race, rate limited per client IP.
///
/// Upstream failures do not change the status code: they are embedded in
/// the per-source results of a 200 body.
pub async fn random_quotes(
    State(state): State<AppState>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    Query(params): Query<RandomQuoteParams>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let max_attempts = params.rate_limit.unwrap_or(DEFAULT_MAX_ATTEMPTS);
    let key = rate_limit_key(&client_ip(&headers, &addr));

    let decision = state.rate_limiter.check(&key, max_attempts, WINDOW);
    if !decision.allowed {
        return Err(AppError::RateLimitExceeded {
            key,
            limit: decision.limit,
            retry_after: decision.retry_after.unwrap_or(WINDOW.as_secs()),
        });
    }

    let outcome = state.coordinator.race().await;

    let mut response = Json(AllQuotesResponse::from(outcome)).into_response();
    let response_headers = response.headers_mut();
    response_headers.insert(RATE_LIMIT_LIMIT, HeaderValue::from(decision.limit));
    response_headers.insert(RATE_LIMIT_REMAINING, HeaderValue::from(decision.remaining));
    Ok(response)
}

/// `GET /api/quotes/fastest` — one race, winning entry only.
pub async fn fastest_quote(State(state): State<AppState>) -> Json<FastestQuote> {
    Json(state.coordinator.fastest().await)
}
