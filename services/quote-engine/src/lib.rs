//! Quote Engine
//!
//! The concurrent core of the quote race service:
//! - `provider`: clients for the two upstream quote APIs, with timing and
//!   error capture (failures become data, never panics or errors)
//! - `race`: runs both fetches concurrently and scores the fastest
//! - `events`: broadcast fan-out of retrieved quotes, with an optional
//!   filtered re-publish
//! - `token_cache`: TTL'd login cache shared across concurrent fetches
//! - `filter`: the mutable filter string read on every publish
//!
//! **Key invariants:**
//! - A race completes when both branches resolve; neither branch can hang
//!   past its own timeout
//! - Exactly one result per race is fastest, unless both fetches failed
//! - Publish failures never surface to the fetch path

pub mod events;
pub mod filter;
pub mod provider;
pub mod race;
pub mod token_cache;

pub use events::{EventPublisher, QuoteEvent};
pub use filter::FilterState;
pub use race::RaceCoordinator;
pub use token_cache::TokenCache;
