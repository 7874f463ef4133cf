//! Provider integration tests against throwaway mock upstreams
//!
//! Each test spins an axum server on an ephemeral port that impersonates
//! one of the real quote APIs, then drives the provider at it.

use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::broadcast::error::TryRecvError;

use quote_engine::provider::{DummyJsonProvider, QuoteProvider, ZenQuotesProvider};
use quote_engine::{EventPublisher, FilterState, TokenCache};
use types::SourceId;

const TEST_TIMEOUT: Duration = Duration::from_secs(5);

async fn spawn_server(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}

fn publisher() -> Arc<EventPublisher> {
    Arc::new(EventPublisher::new(16, Arc::new(FilterState::new())))
}

// --- DummyJSON mock ------------------------------------------------------

async fn users_ok() -> Json<Value> {
    Json(json!({
        "users": [
            { "id": 1, "username": "emilys", "password": "emilyspass" }
        ]
    }))
}

async fn login_ok(State(logins): State<Arc<AtomicUsize>>, Json(body): Json<Value>) -> Json<Value> {
    logins.fetch_add(1, Ordering::SeqCst);
    assert_eq!(body["username"], "emilys");
    assert_eq!(body["password"], "emilyspass");
    assert_eq!(body["expiresInMins"], 30);
    Json(json!({ "accessToken": "tok-1" }))
}

async fn quote_ok() -> Json<Value> {
    Json(json!({ "id": 7, "quote": "Stay hungry.", "author": "Steve Jobs" }))
}

fn dummy_json_router(logins: Arc<AtomicUsize>) -> Router {
    Router::new()
        .route("/users", get(users_ok))
        .route("/auth/login", post(login_ok))
        .route("/quotes/random", get(quote_ok))
        .with_state(logins)
}

fn dummy_provider(base_url: &str, timeout: Duration) -> (DummyJsonProvider, Arc<EventPublisher>) {
    let events = publisher();
    let provider = DummyJsonProvider::new(
        reqwest::Client::new(),
        base_url,
        timeout,
        Arc::new(TokenCache::default()),
        events.clone(),
    );
    (provider, events)
}

#[tokio::test]
async fn dummy_json_success() {
    let logins = Arc::new(AtomicUsize::new(0));
    let base = spawn_server(dummy_json_router(logins.clone())).await;
    let (provider, events) = dummy_provider(&base, TEST_TIMEOUT);
    let mut rx = events.subscribe();

    let result = provider.fetch_quote().await;

    assert_eq!(result.api_name, SourceId::DummyJson);
    assert!(!result.error);
    assert_eq!(result.quote, "Stay hungry.");
    assert_eq!(result.author, "Steve Jobs");
    assert_eq!(result.user.as_deref(), Some("emilys"));
    assert!(result.time_taken >= 0.0);
    assert_eq!(result.is_fastest, None);
    assert_eq!(logins.load(Ordering::SeqCst), 1);

    // A successful fetch notifies subscribers.
    let event = rx.recv().await.unwrap();
    assert_eq!(event.label(), "QuoteRetrieved");
    assert_eq!(event.payload().quote, "Stay hungry.");
}

#[tokio::test]
async fn dummy_json_reuses_cached_token() {
    let logins = Arc::new(AtomicUsize::new(0));
    let base = spawn_server(dummy_json_router(logins.clone())).await;
    let (provider, _events) = dummy_provider(&base, TEST_TIMEOUT);

    let first = provider.fetch_quote().await;
    let second = provider.fetch_quote().await;

    assert!(!first.error && !second.error);
    assert_eq!(second.user.as_deref(), Some("emilys"));
    assert_eq!(logins.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn concurrent_fetches_share_one_login() {
    let logins = Arc::new(AtomicUsize::new(0));
    let base = spawn_server(dummy_json_router(logins.clone())).await;
    let (provider, _events) = dummy_provider(&base, TEST_TIMEOUT);
    let provider = Arc::new(provider);

    let (a, b) = tokio::join!(provider.fetch_quote(), provider.fetch_quote());

    assert!(!a.error && !b.error);
    assert_eq!(logins.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn dummy_json_auth_failure_is_captured() {
    async fn login_denied() -> (axum::http::StatusCode, Json<Value>) {
        (
            axum::http::StatusCode::UNAUTHORIZED,
            Json(json!({ "message": "Invalid credentials" })),
        )
    }
    let router = Router::new()
        .route("/users", get(users_ok))
        .route("/auth/login", post(login_denied));
    let base = spawn_server(router).await;
    let (provider, events) = dummy_provider(&base, TEST_TIMEOUT);
    let mut rx = events.subscribe();

    let result = provider.fetch_quote().await;

    assert!(result.error);
    assert_eq!(result.author, "Error");
    assert!(result
        .error_message
        .as_deref()
        .unwrap()
        .starts_with("Failed to authenticate with DummyJSON"));
    assert!(result.time_taken >= 0.0);
    // Failures do not notify.
    assert!(matches!(rx.try_recv(), Err(TryRecvError::Empty)));
}

#[tokio::test]
async fn dummy_json_bad_status_is_captured() {
    async fn quote_unavailable() -> (axum::http::StatusCode, &'static str) {
        (axum::http::StatusCode::INTERNAL_SERVER_ERROR, "boom")
    }
    let logins = Arc::new(AtomicUsize::new(0));
    let router = Router::new()
        .route("/users", get(users_ok))
        .route("/auth/login", post(login_ok))
        .route("/quotes/random", get(quote_unavailable))
        .with_state(logins);
    let base = spawn_server(router).await;
    let (provider, _events) = dummy_provider(&base, TEST_TIMEOUT);

    let result = provider.fetch_quote().await;

    assert!(result.error);
    let message = result.error_message.unwrap();
    assert!(message.contains("HTTP 500"), "{message}");
    assert!(message.contains("boom"), "{message}");
}

#[tokio::test]
async fn dummy_json_malformed_body_is_captured() {
    async fn quote_malformed() -> Json<Value> {
        Json(json!({ "id": 7 }))
    }
    let logins = Arc::new(AtomicUsize::new(0));
    let router = Router::new()
        .route("/users", get(users_ok))
        .route("/auth/login", post(login_ok))
        .route("/quotes/random", get(quote_malformed))
        .with_state(logins);
    let base = spawn_server(router).await;
    let (provider, _events) = dummy_provider(&base, TEST_TIMEOUT);

    let result = provider.fetch_quote().await;

    assert!(result.error);
    assert!(result
        .error_message
        .unwrap()
        .starts_with("Invalid response from DummyJSON API"));
    // The login succeeded, so the result still carries the user.
    assert_eq!(result.user.as_deref(), Some("emilys"));
}

#[tokio::test]
async fn dummy_json_timeout_resolves_to_failure() {
    async fn quote_slow() -> Json<Value> {
        tokio::time::sleep(Duration::from_millis(500)).await;
        quote_ok().await
    }
    let logins = Arc::new(AtomicUsize::new(0));
    let router = Router::new()
        .route("/users", get(users_ok))
        .route("/auth/login", post(login_ok))
        .route("/quotes/random", get(quote_slow))
        .with_state(logins);
    let base = spawn_server(router).await;
    let (provider, _events) = dummy_provider(&base, Duration::from_millis(50));

    let result = provider.fetch_quote().await;

    assert!(result.error);
    // Timing reflects the time spent before the timeout fired.
    assert!(result.time_taken >= 40.0, "time_taken {}", result.time_taken);
    assert!(result.time_taken < 500.0, "time_taken {}", result.time_taken);
}

// --- ZenQuotes mock ------------------------------------------------------

fn zen_provider(base_url: &str) -> (ZenQuotesProvider, Arc<EventPublisher>) {
    let events = publisher();
    let provider = ZenQuotesProvider::new(
        reqwest::Client::new(),
        base_url,
        TEST_TIMEOUT,
        events.clone(),
    );
    (provider, events)
}

#[tokio::test]
async fn zen_quotes_success() {
    async fn random_ok() -> Json<Value> {
        Json(json!([{ "q": "Well begun is half done.", "a": "Aristotle" }]))
    }
    let base = spawn_server(Router::new().route("/api/random", get(random_ok))).await;
    let (provider, events) = zen_provider(&base);
    let mut rx = events.subscribe();

    let result = provider.fetch_quote().await;

    assert_eq!(result.api_name, SourceId::ZenQuotes);
    assert!(!result.error);
    assert_eq!(result.quote, "Well begun is half done.");
    assert_eq!(result.author, "Aristotle");
    assert_eq!(result.user, None);

    let event = rx.recv().await.unwrap();
    assert_eq!(event.label(), "QuoteRetrieved");
}

#[tokio::test]
async fn zen_quotes_empty_array_is_shape_error() {
    async fn random_empty() -> Json<Value> {
        Json(json!([]))
    }
    let base = spawn_server(Router::new().route("/api/random", get(random_empty))).await;
    let (provider, events) = zen_provider(&base);
    let mut rx = events.subscribe();

    let result = provider.fetch_quote().await;

    assert!(result.error);
    assert!(result
        .error_message
        .unwrap()
        .starts_with("Invalid response from ZenQuotes API"));
    assert!(matches!(rx.try_recv(), Err(TryRecvError::Empty)));
}

#[tokio::test]
async fn zen_quotes_connection_refused_is_transport_error() {
    // Nothing is listening on this port.
    let (provider, _events) = zen_provider("http://127.0.0.1:9");

    let result = provider.fetch_quote().await;

    assert!(result.error);
    assert_eq!(result.author, "Error");
    assert!(result
        .error_message
        .unwrap()
        .starts_with("request to ZenQuotes failed"));
}
