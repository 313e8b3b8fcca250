//! # Marketbrief Core
//!
//! Concurrent market data aggregation, headline sentiment and briefing
//! rendering.
//!
//! ## Overview
//!
//! - **Source adapters** for quotes, the Fear & Greed index, headline search
//!   and the exchange clock
//! - **Aggregator** that fans out to every source at once and folds each
//!   failure into its own slot
//! - **Sentiment scorer** over fixed positive/negative word lists
//! - **Renderer** producing a text briefing or a JSON document from the same
//!   snapshot
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`adapters`] | Yahoo chart, CNN Fear & Greed, DuckDuckGo headlines, market clock |
//! | [`aggregator`] | Concurrent fan-out into an [`AggregateSnapshot`] |
//! | [`cache`] | Hour-bucketed file cache |
//! | [`data_source`] | Source traits and [`SourceError`] |
//! | [`domain`] | Records, [`Fetch`] slots, [`Symbol`], [`UtcDateTime`] |
//! | [`error`] | Validation, configuration and core errors |
//! | [`http_client`] | HTTP transport abstraction |
//! | [`render`] | Text and structured reports |
//! | [`sentiment`] | Headline scoring |
//! | [`source`] | Provider identifiers |
//! | [`watchlist`] | Watchlist configuration file |
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐      ┌──────────────┐
//! │  Watchlist   │─────▶│  Aggregator  │── join ──┐
//! └──────────────┘      └──────┬───────┘          │
//!                              │ fan-out          ▼
//!        ┌──────────┬──────────┼──────────┐ ┌──────────────┐
//!        ▼          ▼          ▼          ▼ │  Snapshot    │
//!     Quotes   Fear&Greed    News      Clock└──────┬───────┘
//!        └──────────┴────┬─────┘                   │
//!                        ▼                         ▼
//!                 ┌─────────────┐          ┌──────────────┐
//!                 │ HTTP Client │          │   Renderer   │
//!                 └─────────────┘          └──────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use marketbrief_core::{render, Aggregator, RenderOptions, ReportFormat, WatchlistConfig};
//!
//! let config = WatchlistConfig::load("watchlist.json").await?;
//! let snapshot = Aggregator::default().collect(&config.plan()).await;
//! let options = RenderOptions::for_watchlist(&config, ReportFormat::Text, false);
//! println!("{}", render(&snapshot, None, &options)?);
//! ```

pub mod adapters;
pub mod aggregator;
pub mod cache;
pub mod data_source;
pub mod domain;
pub mod error;
pub mod http_client;
pub mod render;
pub mod sentiment;
pub mod source;
pub mod watchlist;

// Adapter implementations
pub use adapters::{
    market_status, CnnFearGreedAdapter, DuckDuckGoNewsAdapter, FixedClock, SystemClock,
    YahooChartAdapter,
};

// Aggregation
pub use aggregator::{Aggregator, AggregatorBuilder, BriefingPlan};

// Caching
pub use cache::{CacheMode, CacheStore};

// Source contracts
pub use data_source::{
    Clock, FearGreedSource, NewsSource, QuoteSource, SourceError, SourceErrorKind, SourceFuture,
};

// Domain models
pub use domain::{
    round2, AggregateSnapshot, Briefing, FearGreedReading, Fetch, FetchFailure, MarketStatus,
    NewsItem, Priority, Quote, QuoteSession, SentimentLabel, SentimentScore, SessionState, Symbol,
    TickerRecord, UtcDateTime,
};

// Error types
pub use error::{ConfigError, CoreError, ValidationError};

// HTTP client types
pub use http_client::{HttpClient, HttpError, HttpErrorKind, HttpRequest, HttpResponse, ReqwestHttpClient};

// Rendering
pub use render::{render, RenderOptions, ReportFormat};

// Sentiment
pub use sentiment::{Lexicon, SentimentScorer};

// Source identifiers
pub use source::ProviderId;

// Configuration
pub use watchlist::{NewsTopic, WatchlistConfig, WatchlistEntry};
