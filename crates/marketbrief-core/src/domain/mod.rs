//! # Domain Models
//!
//! Records produced by the source adapters and assembled by the aggregator.
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Quote`] | Daily quote with change vs. previous close |
//! | [`FearGreedReading`] | Fear & Greed index score and rating |
//! | [`MarketStatus`] | Exchange session derived from the local clock |
//! | [`NewsItem`] | Headline title and destination URL |
//! | [`Fetch`] | Ready record or error-shaped [`FetchFailure`] slot |
//! | [`SentimentScore`] | Bag-of-words headline classification |
//! | [`TickerRecord`] | Watchlist entry with optional sentiment |
//! | [`AggregateSnapshot`] | One immutable aggregation result |
//! | [`Briefing`] | Snapshot plus ticker annotations |
//! | [`Symbol`] | Validated ticker symbol |
//! | [`UtcDateTime`] | UTC instant |
//!
//! Every slot that talks to a provider is a [`Fetch`], so "result" and
//! "error" are a tagged union all the way to the renderer:
//!
//! ```rust
//! use marketbrief_core::{Fetch, FetchFailure, NewsItem};
//!
//! let slot: Fetch<NewsItem> = Fetch::Failed(FetchFailure::new("HTTP 503: busy"));
//! assert!(slot.ready().is_none());
//! ```

mod models;
mod snapshot;
mod symbol;
mod timestamp;

pub use models::{
    round2, FearGreedReading, Fetch, FetchFailure, MarketStatus, NewsItem, Priority, Quote,
    QuoteSession, SentimentLabel, SentimentScore, SessionState, TickerRecord,
};
pub use snapshot::{AggregateSnapshot, Briefing};
pub use symbol::Symbol;
pub use timestamp::UtcDateTime;
