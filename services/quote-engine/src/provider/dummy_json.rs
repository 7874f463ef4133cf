//! DummyJSON quote provider
//!
//! The authenticating provider: a fetch first obtains a bearer token by
//! picking a random user from the upstream user list and logging in with
//! its credentials. The handshake result is cached process-wide with a
//! TTL (see `TokenCache`) so concurrent and subsequent fetches reuse it.

use async_trait::async_trait;
use rand::seq::IndexedRandom;
use reqwest::Client;
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;

use types::{QuoteResult, SourceId, UpstreamError};

use crate::events::EventPublisher;
use crate::provider::{elapsed_ms, QuoteProvider};
use crate::token_cache::{CachedLogin, TokenCache};

pub const DEFAULT_BASE_URL: &str = "https://dummyjson.com";

const TOKEN_CACHE_KEY: &str = "dummyjson_token";
const LOGIN_EXPIRES_MINS: u32 = 30;

pub struct DummyJsonProvider {
    client: Client,
    base_url: String,
    timeout: Duration,
    token_cache: Arc<TokenCache>,
    publisher: Arc<EventPublisher>,
}

#[derive(Debug, Deserialize)]
struct UsersResponse {
    #[serde(default)]
    users: Vec<UpstreamUser>,
}

#[derive(Debug, Clone, Deserialize)]
struct UpstreamUser {
    username: String,
    #[serde(default)]
    password: Option<String>,
}

#[derive(Debug, Deserialize)]
struct LoginResponse {
    #[serde(default)]
    token: Option<String>,
    #[serde(default, rename = "accessToken")]
    access_token: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct RandomQuote {
    #[serde(default)]
    quote: Option<String>,
    #[serde(default)]
    author: Option<String>,
}

impl DummyJsonProvider {
    pub fn new(
        client: Client,
        base_url: impl Into<String>,
        timeout: Duration,
        token_cache: Arc<TokenCache>,
        publisher: Arc<EventPublisher>,
    ) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            timeout,
            token_cache,
            publisher,
        }
    }

    fn auth_error(&self, message: String) -> UpstreamError {
        UpstreamError::Auth {
            source: SourceId::DummyJson,
            message,
        }
    }

    /// Obtain a bearer token, reusing the cached handshake when present.
    ///
    /// The per-key guard makes concurrent cache misses log in once: the
    /// loser of the lock race finds the winner's entry and returns it.
    async fn login(&self) -> Result<CachedLogin, UpstreamError> {
        let _guard = self.token_cache.login_guard(TOKEN_CACHE_KEY).await;
        if let Some(login) = self.token_cache.get(TOKEN_CACHE_KEY) {
            return Ok(login);
        }

        let response = self
            .client
            .get(format!("{}/users", self.base_url))
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| self.auth_error(format!("failed to fetch users: {e}")))?;
        if !response.status().is_success() {
            return Err(self.auth_error(format!(
                "failed to fetch users: HTTP {}",
                response.status().as_u16()
            )));
        }
        let users: UsersResponse = response
            .json()
            .await
            .map_err(|e| self.auth_error(format!("failed to parse user list: {e}")))?;

        let Some(user) = users.users.choose(&mut rand::rng()).cloned() else {
            return Err(self.auth_error("no users found in the user list response".to_string()));
        };
        // Upstream user lists don't always expose passwords; the API's
        // documented convention is username + "123".
        let password = user
            .password
            .clone()
            .unwrap_or_else(|| format!("{}123", user.username));

        let response = self
            .client
            .post(format!("{}/auth/login", self.base_url))
            .timeout(self.timeout)
            .json(&serde_json::json!({
                "username": user.username,
                "password": password,
                "expiresInMins": LOGIN_EXPIRES_MINS,
            }))
            .send()
            .await
            .map_err(|e| self.auth_error(format!("login request failed: {e}")))?;
        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(self.auth_error(format!("HTTP {status} - {body}")));
        }
        let body: LoginResponse = response
            .json()
            .await
            .map_err(|e| self.auth_error(format!("failed to parse login response: {e}")))?;

        // Token field has varied across upstream versions.
        let token = body.token.or(body.access_token).unwrap_or_else(|| {
            tracing::warn!("no token field in login response, using placeholder token");
            "dummy-token".to_string()
        });

        let login = CachedLogin {
            token,
            user: Some(user.username),
        };
        self.token_cache.put(TOKEN_CACHE_KEY, login.clone());
        Ok(login)
    }

    async fn try_fetch(
        &self,
        start: Instant,
    ) -> Result<QuoteResult, (UpstreamError, Option<String>)> {
        let login = self.login().await.map_err(|e| (e, None))?;
        let user = login.user.clone();

        let response = self
            .client
            .get(format!("{}/quotes/random", self.base_url))
            .bearer_auth(&login.token)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| {
                (
                    UpstreamError::Transport {
                        source: SourceId::DummyJson,
                        message: e.to_string(),
                    },
                    user.clone(),
                )
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err((
                UpstreamError::Status {
                    source: SourceId::DummyJson,
                    status: status.as_u16(),
                    body,
                },
                user,
            ));
        }

        let body = response.text().await.map_err(|e| {
            (
                UpstreamError::Transport {
                    source: SourceId::DummyJson,
                    message: e.to_string(),
                },
                user.clone(),
            )
        })?;
        let parsed: RandomQuote = serde_json::from_str(&body).unwrap_or_default();
        let quote = parsed.quote.filter(|q| !q.is_empty());
        let author = parsed.author.filter(|a| !a.is_empty());
        let (Some(quote), Some(author)) = (quote, author) else {
            return Err((
                UpstreamError::Shape {
                    source: SourceId::DummyJson,
                    body,
                },
                user,
            ));
        };

        Ok(QuoteResult::success(
            SourceId::DummyJson,
            quote,
            author,
            elapsed_ms(start),
            user,
        ))
    }
}

#[async_trait]
impl QuoteProvider for DummyJsonProvider {
    fn id(&self) -> SourceId {
        SourceId::DummyJson
    }

    async fn fetch_quote(&self) -> QuoteResult {
        let start = Instant::now();
        match self.try_fetch(start).await {
            Ok(result) => {
                tracing::debug!(
                    source = %self.id(),
                    time_taken = result.time_taken,
                    "quote retrieved"
                );
                // Success-only notification policy.
                self.publisher.publish_retrieved(&result);
                result
            }
            Err((err, user)) => {
                tracing::warn!(source = %self.id(), error = %err, "quote fetch failed");
                QuoteResult::failure(SourceId::DummyJson, &err, elapsed_ms(start), user)
            }
        }
    }
}
