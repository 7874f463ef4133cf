//! Upstream quote providers
//!
//! Each provider produces one `QuoteResult` per fetch and never returns an
//! error: transport problems, bad statuses, timeouts, malformed bodies,
//! and auth failures are all captured into the result so the race layer
//! can compare failure as an outcome.

use async_trait::async_trait;
use std::time::Duration;
use tokio::time::Instant;

use types::{QuoteResult, SourceId};

pub mod dummy_json;
pub mod zen_quotes;

pub use dummy_json::DummyJsonProvider;
pub use zen_quotes::ZenQuotesProvider;

/// Bound on each upstream call, handshake steps included.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// An upstream quote provider.
///
/// Implementations must be infallible at the signature level: all failure
/// modes fold into a `QuoteResult` with `error = true`.
#[async_trait]
pub trait QuoteProvider: Send + Sync {
    /// Which source this provider fetches from.
    fn id(&self) -> SourceId;

    /// Fetch one quote, timing the attempt.
    async fn fetch_quote(&self) -> QuoteResult;
}

/// Milliseconds since `start`, rounded to 2 decimal places.
pub(crate) fn elapsed_ms(start: Instant) -> f64 {
    (start.elapsed().as_secs_f64() * 1000.0 * 100.0).round() / 100.0
}
