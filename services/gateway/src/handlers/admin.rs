use crate::handlers::quotes::rate_limit_key;
use crate::models::{FilterResponse, SetFilterRequest};
use crate::state::AppState;
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

/// `POST /admin/filter` — set the process-wide quote filter. An empty
/// string deactivates filtering.
pub async fn set_filter(
    State(state): State<AppState>,
    Json(request): Json<SetFilterRequest>,
) -> Json<FilterResponse> {
    tracing::info!(filter = %request.filter, "quote filter updated");
    state.filter.set(request.filter.clone());
    Json(FilterResponse {
        filter: request.filter,
    })
}

/// `GET /admin/filter` — read the current filter.
pub async fn get_filter(State(state): State<AppState>) -> Json<FilterResponse> {
    Json(FilterResponse {
        filter: state.filter.get(),
    })
}

/// `DELETE /admin/rate-limit/{ip}` — clear one identity's window.
pub async fn reset_rate_limit(
    State(state): State<AppState>,
    Path(ip): Path<String>,
) -> StatusCode {
    state.rate_limiter.reset(&rate_limit_key(&ip));
    tracing::info!(ip, "rate limit window reset");
    StatusCode::NO_CONTENT
}
