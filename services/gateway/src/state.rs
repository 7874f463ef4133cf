use crate::rate_limit::RateLimiter;
use quote_engine::provider::{DummyJsonProvider, ZenQuotesProvider, DEFAULT_TIMEOUT};
use quote_engine::{EventPublisher, FilterState, RaceCoordinator, TokenCache};
use reqwest::Client;
use std::sync::Arc;

use crate::config::Config;

#[derive(Clone)]
pub struct AppState {
    pub rate_limiter: Arc<RateLimiter>,
    pub coordinator: Arc<RaceCoordinator>,
    pub publisher: Arc<EventPublisher>,
    pub filter: Arc<FilterState>,
}

impl AppState {
    pub fn new(config: &Config) -> Self {
        let http_client = Client::new();
        let filter = Arc::new(FilterState::new());
        let publisher = Arc::new(EventPublisher::new(
            quote_engine::events::DEFAULT_CHANNEL_CAPACITY,
            filter.clone(),
        ));
        let token_cache = Arc::new(TokenCache::default());

        let dummy_json = Arc::new(DummyJsonProvider::new(
            http_client.clone(),
            config.dummy_json_base_url.clone(),
            DEFAULT_TIMEOUT,
            token_cache,
            publisher.clone(),
        ));
        let zen_quotes = Arc::new(ZenQuotesProvider::new(
            http_client,
            config.zen_quotes_base_url.clone(),
            DEFAULT_TIMEOUT,
            publisher.clone(),
        ));

        Self {
            rate_limiter: Arc::new(RateLimiter::new()),
            coordinator: Arc::new(RaceCoordinator::new(dummy_json, zen_quotes)),
            publisher,
            filter,
        }
    }
}
