//! Types library for the quote race service
//!
//! This library provides the core type definitions shared between the quote
//! engine and the gateway, so both sides agree on the wire format.
//!
//! # Modules
//! - `quote`: source identifiers, quote results, race outcomes
//! - `errors`: upstream error taxonomy

// Public modules
pub mod errors;
pub mod quote;

pub use errors::UpstreamError;
pub use quote::{FastestQuote, QuoteResult, RaceOutcome, SourceId};
