//! Quote event fan-out
//!
//! Successful fetches are pushed onto a broadcast channel ("quotes") with
//! at-most-once, no-ack delivery: if nobody is subscribed the event is
//! dropped. Each publish also consults the filter state and, when the
//! quote text matches case-insensitively, re-publishes the same payload as
//! a filtered event.

use std::sync::Arc;
use tokio::sync::broadcast;

use types::QuoteResult;

use crate::filter::FilterState;

/// Default capacity of the broadcast channel. Slow subscribers past this
/// lag see `RecvError::Lagged` rather than applying backpressure.
pub const DEFAULT_CHANNEL_CAPACITY: usize = 64;

/// Events delivered to live subscribers of the "quotes" channel.
#[derive(Debug, Clone, PartialEq)]
pub enum QuoteEvent {
    /// A quote was successfully retrieved from an upstream provider.
    QuoteRetrieved(QuoteResult),
    /// The retrieved quote matched the active filter.
    FilteredQuoteRetrieved(QuoteResult),
}

impl QuoteEvent {
    /// Event name as broadcast to subscribers.
    pub fn label(&self) -> &'static str {
        match self {
            QuoteEvent::QuoteRetrieved(_) => "QuoteRetrieved",
            QuoteEvent::FilteredQuoteRetrieved(_) => "FilteredQuoteRetrieved",
        }
    }

    pub fn payload(&self) -> &QuoteResult {
        match self {
            QuoteEvent::QuoteRetrieved(result)
            | QuoteEvent::FilteredQuoteRetrieved(result) => result,
        }
    }
}

/// Broadcast publisher for retrieved quotes.
///
/// Fire-and-forget: publish never fails from the caller's perspective.
/// A send into a channel with no receivers is logged at debug and dropped.
#[derive(Debug)]
pub struct EventPublisher {
    tx: broadcast::Sender<QuoteEvent>,
    filter: Arc<FilterState>,
}

impl EventPublisher {
    pub fn new(capacity: usize, filter: Arc<FilterState>) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx, filter }
    }

    /// Subscribe to the "quotes" channel. Receivers see events published
    /// after this call, in publish order.
    pub fn subscribe(&self) -> broadcast::Receiver<QuoteEvent> {
        self.tx.subscribe()
    }

    /// Number of live subscribers, for logging.
    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }

    /// Publish a retrieved quote, then re-publish it as a filtered event
    /// when the active filter matches. An empty filter means no filter is
    /// active and suppresses the filtered event entirely.
    pub fn publish_retrieved(&self, result: &QuoteResult) {
        self.send(QuoteEvent::QuoteRetrieved(result.clone()));

        let filter = self.filter.get();
        if filter.is_empty() {
            return;
        }
        if result.quote.to_lowercase().contains(&filter.to_lowercase()) {
            self.send(QuoteEvent::FilteredQuoteRetrieved(result.clone()));
        }
    }

    fn send(&self, event: QuoteEvent) {
        if let Err(err) = self.tx.send(event) {
            // No subscribers connected; at-most-once delivery drops it.
            tracing::debug!(event = err.0.label(), "dropped event, no subscribers");
        }
    }
}
