//! Race coordination
//!
//! Runs the two upstream fetches concurrently, so the race's wall time is
//! roughly max(tA, tB) rather than the sum, then flags the fastest result.
//! Each provider resolves to a result (success or captured failure), so
//! the coordinator itself never errors and never retries.

use std::sync::Arc;

use types::{FastestQuote, RaceOutcome};

use crate::provider::QuoteProvider;

pub struct RaceCoordinator {
    dummy_json: Arc<dyn QuoteProvider>,
    zen_quotes: Arc<dyn QuoteProvider>,
}

impl RaceCoordinator {
    pub fn new(dummy_json: Arc<dyn QuoteProvider>, zen_quotes: Arc<dyn QuoteProvider>) -> Self {
        Self {
            dummy_json,
            zen_quotes,
        }
    }

    /// Run one race: both fetches in flight simultaneously, then score.
    ///
    /// Scoring: a failed result is never fastest; a sole survivor is
    /// fastest regardless of timing; with two successes the lower
    /// `time_taken` wins. On exact ties the first-registered source
    /// (DummyJSON) wins: the comparison is deliberately `<=` for it and
    /// strict `<` for ZenQuotes. The asymmetry is long-standing observable
    /// behavior and is kept for compatibility.
    pub async fn race(&self) -> RaceOutcome {
        let (mut dummy_json, mut zen_quotes) = tokio::join!(
            self.dummy_json.fetch_quote(),
            self.zen_quotes.fetch_quote()
        );

        dummy_json.is_fastest = Some(
            !dummy_json.error
                && (dummy_json.time_taken <= zen_quotes.time_taken || zen_quotes.error),
        );
        zen_quotes.is_fastest = Some(
            !zen_quotes.error
                && (zen_quotes.time_taken < dummy_json.time_taken || dummy_json.error),
        );

        tracing::debug!(
            dummy_json_ms = dummy_json.time_taken,
            zen_quotes_ms = zen_quotes.time_taken,
            dummy_json_failed = dummy_json.error,
            zen_quotes_failed = zen_quotes.error,
            "race complete"
        );

        RaceOutcome {
            dummy_json,
            zen_quotes,
        }
    }

    /// Run one race and return only the winning entry.
    pub async fn fastest(&self) -> FastestQuote {
        let outcome = self.race().await;
        let (source, result) = outcome.fastest();
        FastestQuote {
            who_is_fastest: source,
            quote: result.clone(),
        }
    }
}
