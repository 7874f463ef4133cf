mod config;
mod error;
mod handlers;
mod models;
mod rate_limit;
mod router;
mod state;

use config::Config;
use router::create_router;
use state::AppState;
use std::net::SocketAddr;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    tracing::info!("Starting quote gateway service");

    let config = Config::from_env();
    let state = AppState::new(&config);

    // Create router
    let app = create_router(state);

    // Bind and serve; connect info is needed for per-IP rate limiting
    let listener = TcpListener::bind(config.bind_addr).await?;

    tracing::info!("Listening on {}", config.bind_addr);
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
