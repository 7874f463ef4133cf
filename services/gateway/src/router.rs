use crate::handlers::{admin, quotes, ws};
use crate::state::AppState;
use axum::{
    Router,
    routing::{delete, get},
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub fn create_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/quotes/random", get(quotes::random_quotes))
        .route("/quotes/fastest", get(quotes::fastest_quote));

    let admin_routes = Router::new()
        .route("/filter", get(admin::get_filter).post(admin::set_filter))
        .route("/rate-limit/{ip}", delete(admin::reset_rate_limit));

    Router::new()
        .nest("/api", api_routes)
        .nest("/admin", admin_routes)
        .route("/ws", get(ws::ws_handler))
        .route("/health", get(health))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health() -> &'static str {
    "OK"
}
