//! Wire models for the gateway's HTTP and WebSocket surfaces.

use axum::http::HeaderName;
use serde::{Deserialize, Serialize};
use types::{QuoteResult, RaceOutcome};

pub const RATE_LIMIT_LIMIT: HeaderName = HeaderName::from_static("x-ratelimit-limit");
pub const RATE_LIMIT_REMAINING: HeaderName = HeaderName::from_static("x-ratelimit-remaining");
pub const RATE_LIMIT_RESET: HeaderName = HeaderName::from_static("x-ratelimit-reset");

/// A quote wrapped one level, matching the established response shape:
/// `{"quotes": {"dummyJson": {"quote": {...}}, "zenQuotes": {"quote": {...}}}}`.
#[derive(Debug, Clone, Serialize)]
pub struct QuoteEnvelope {
    pub quote: QuoteResult,
}

#[derive(Debug, Clone, Serialize)]
pub struct QuotesBySource {
    #[serde(rename = "dummyJson")]
    pub dummy_json: QuoteEnvelope,
    #[serde(rename = "zenQuotes")]
    pub zen_quotes: QuoteEnvelope,
}

/// Response body for `GET /api/quotes/random`.
#[derive(Debug, Clone, Serialize)]
pub struct AllQuotesResponse {
    pub quotes: QuotesBySource,
}

impl From<RaceOutcome> for AllQuotesResponse {
    fn from(outcome: RaceOutcome) -> Self {
        Self {
            quotes: QuotesBySource {
                dummy_json: QuoteEnvelope {
                    quote: outcome.dummy_json,
                },
                zen_quotes: QuoteEnvelope {
                    quote: outcome.zen_quotes,
                },
            },
        }
    }
}

/// Query parameters for `GET /api/quotes/random`. The rate-limit override
/// exists so clients can exercise throttling behavior.
#[derive(Debug, Clone, Deserialize)]
pub struct RandomQuoteParams {
    #[serde(rename = "rateLimit")]
    pub rate_limit: Option<u32>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SetFilterRequest {
    pub filter: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct FilterResponse {
    pub filter: String,
}

/// One frame on the websocket stream.
#[derive(Debug, Serialize)]
pub struct StreamFrame<'a> {
    pub channel: &'static str,
    pub event: &'static str,
    pub data: &'a QuoteResult,
}
