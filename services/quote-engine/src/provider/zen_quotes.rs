//! ZenQuotes quote provider
//!
//! The unauthenticated provider. The API returns a JSON array whose first
//! element carries the quote under `q` and the author under `a`.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;

use types::{QuoteResult, SourceId, UpstreamError};

use crate::events::EventPublisher;
use crate::provider::{elapsed_ms, QuoteProvider};

pub const DEFAULT_BASE_URL: &str = "https://zenquotes.io";

pub struct ZenQuotesProvider {
    client: Client,
    base_url: String,
    timeout: Duration,
    publisher: Arc<EventPublisher>,
}

#[derive(Debug, Default, Deserialize)]
struct ZenQuote {
    #[serde(default)]
    q: Option<String>,
    #[serde(default)]
    a: Option<String>,
}

impl ZenQuotesProvider {
    pub fn new(
        client: Client,
        base_url: impl Into<String>,
        timeout: Duration,
        publisher: Arc<EventPublisher>,
    ) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            timeout,
            publisher,
        }
    }

    async fn try_fetch(&self, start: Instant) -> Result<QuoteResult, UpstreamError> {
        let response = self
            .client
            .get(format!("{}/api/random", self.base_url))
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| UpstreamError::Transport {
                source: SourceId::ZenQuotes,
                message: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(UpstreamError::Status {
                source: SourceId::ZenQuotes,
                status: status.as_u16(),
                body,
            });
        }

        let body = response.text().await.map_err(|e| UpstreamError::Transport {
            source: SourceId::ZenQuotes,
            message: e.to_string(),
        })?;
        let parsed: Vec<ZenQuote> = serde_json::from_str(&body).unwrap_or_default();
        let first = parsed.into_iter().next().unwrap_or_default();
        let quote = first.q.filter(|q| !q.is_empty());
        let author = first.a.filter(|a| !a.is_empty());
        let (Some(quote), Some(author)) = (quote, author) else {
            return Err(UpstreamError::Shape {
                source: SourceId::ZenQuotes,
                body,
            });
        };

        Ok(QuoteResult::success(
            SourceId::ZenQuotes,
            quote,
            author,
            elapsed_ms(start),
            None,
        ))
    }
}

#[async_trait]
impl QuoteProvider for ZenQuotesProvider {
    fn id(&self) -> SourceId {
        SourceId::ZenQuotes
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
            Err(err) => {
                tracing::warn!(source = %self.id(), error = %err, "quote fetch failed");
                QuoteResult::failure(SourceId::ZenQuotes, &err, elapsed_ms(start), None)
            }
        }
    }
}
