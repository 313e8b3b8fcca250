//! Source adapter contracts.
//!
//! Each briefing input sits behind its own narrow trait so adapters can be
//! swapped (or faked in tests) without touching the aggregator or renderer.
//!
//! | Trait | Call | Production adapter |
//! |-------|------|--------------------|
//! | [`QuoteSource`] | `quote(symbol)` | [`YahooChartAdapter`](crate::YahooChartAdapter) |
//! | [`FearGreedSource`] | `fear_greed()` | [`CnnFearGreedAdapter`](crate::CnnFearGreedAdapter) |
//! | [`NewsSource`] | `search(query, count)` | [`DuckDuckGoNewsAdapter`](crate::DuckDuckGoNewsAdapter) |
//! | [`Clock`] | `now()` | [`SystemClock`](crate::SystemClock) |
//!
//! Adapters return `Result<_, SourceError>`; the aggregator turns every
//! error into an error-shaped slot so it never crosses into sibling calls.

use std::fmt::{Display, Formatter};
use std::future::Future;
use std::pin::Pin;

use crate::http_client::HttpError;
use crate::{FearGreedReading, NewsItem, ProviderId, Quote, Symbol, UtcDateTime, ValidationError};

/// Adapter-level error classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceErrorKind {
    /// Timeout, connection failure or non-success status.
    Transport,
    /// Provider answered but the payload did not have the expected shape.
    Parse,
    /// The call was rejected before reaching the provider.
    InvalidRequest,
}

/// Structured source error, isolated to the call that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceError {
    provider: ProviderId,
    kind: SourceErrorKind,
    message: String,
}

impl SourceError {
    pub fn transport(provider: ProviderId, error: &HttpError) -> Self {
        Self {
            provider,
            kind: SourceErrorKind::Transport,
            message: error.message().to_owned(),
        }
    }

    pub fn parse(provider: ProviderId, message: impl Into<String>) -> Self {
        Self {
            provider,
            kind: SourceErrorKind::Parse,
            message: message.into(),
        }
    }

    pub fn invalid_request(provider: ProviderId, message: impl Into<String>) -> Self {
        Self {
            provider,
            kind: SourceErrorKind::InvalidRequest,
            message: message.into(),
        }
    }

    pub fn from_validation(provider: ProviderId, error: ValidationError) -> Self {
        Self::parse(provider, error.to_string())
    }

    pub const fn provider(&self) -> ProviderId {
        self.provider
    }

    pub const fn kind(&self) -> SourceErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub const fn code(&self) -> &'static str {
        match self.kind {
            SourceErrorKind::Transport => "source.transport",
            SourceErrorKind::Parse => "source.parse",
            SourceErrorKind::InvalidRequest => "source.invalid_request",
        }
    }
}

impl Display for SourceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for SourceError {}

pub type SourceFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, SourceError>> + Send + 'a>>;

/// Daily quote lookup for one symbol.
pub trait QuoteSource: Send + Sync {
    fn quote<'a>(&'a self, symbol: &'a Symbol) -> SourceFuture<'a, Quote>;
}

/// Fear & Greed index lookup.
pub trait FearGreedSource: Send + Sync {
    fn fear_greed(&self) -> SourceFuture<'_, FearGreedReading>;
}

/// Headline search, at most `count` items in provider relevance order.
pub trait NewsSource: Send + Sync {
    fn search<'a>(&'a self, query: &'a str, count: usize) -> SourceFuture<'a, Vec<NewsItem>>;
}

/// Source of the invocation instant.
pub trait Clock: Send + Sync {
    fn now(&self) -> UtcDateTime;
}
