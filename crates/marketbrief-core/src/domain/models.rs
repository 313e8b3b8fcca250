use serde::{Deserialize, Serialize};

use crate::{Symbol, ValidationError};

/// Rounds half away from zero to two decimal places.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Outcome of one adapter call: the record itself, or the error that replaced it.
///
/// Serialized untagged, so a failed slot reads `{"symbol"?, "error"}` and a
/// ready slot reads as the bare record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Fetch<T> {
    Ready(T),
    Failed(FetchFailure),
}

impl<T> Fetch<T> {
    pub fn ready(&self) -> Option<&T> {
        match self {
            Self::Ready(value) => Some(value),
            Self::Failed(_) => None,
        }
    }

    pub fn failure(&self) -> Option<&FetchFailure> {
        match self {
            Self::Ready(_) => None,
            Self::Failed(failure) => Some(failure),
        }
    }

    pub const fn is_failed(&self) -> bool {
        matches!(self, Self::Failed(_))
    }
}

/// Error-shaped record occupying a slot whose source failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FetchFailure {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub symbol: Option<Symbol>,
    pub error: String,
}

impl FetchFailure {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            symbol: None,
            error: error.into(),
        }
    }

    pub fn for_symbol(symbol: Symbol, error: impl Into<String>) -> Self {
        Self {
            symbol: Some(symbol),
            error: error.into(),
        }
    }
}

/// Trading session reported by the quote provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum QuoteSession {
    Regular,
    Pre,
    Post,
    Closed,
    Unknown,
}

impl QuoteSession {
    /// Yahoo reports extended variants (`PREPRE`, `POSTPOST`) that fold into the base session.
    pub fn from_provider(value: Option<&str>) -> Self {
        match value.map(str::to_ascii_uppercase).as_deref() {
            Some("REGULAR") => Self::Regular,
            Some("PRE" | "PREPRE") => Self::Pre,
            Some("POST" | "POSTPOST") => Self::Post,
            Some("CLOSED") => Self::Closed,
            _ => Self::Unknown,
        }
    }
}

/// Daily quote with change figures against the previous close.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    pub symbol: Symbol,
    pub price: f64,
    pub change: f64,
    pub change_percent: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volume: Option<u64>,
    pub market_state: QuoteSession,
}

impl Quote {
    /// Builds a quote from the current price and previous close.
    ///
    /// `change` and `change_percent` are rounded to two places; `price` is
    /// rounded the same way for display parity.
    pub fn from_close(
        symbol: Symbol,
        price: f64,
        previous_close: f64,
        volume: Option<u64>,
        market_state: QuoteSession,
    ) -> Result<Self, ValidationError> {
        if !price.is_finite() {
            return Err(ValidationError::NonFiniteValue { field: "price" });
        }
        if !previous_close.is_finite() || previous_close <= 0.0 {
            return Err(ValidationError::NonPositiveValue {
                field: "previous_close",
            });
        }

        let change = price - previous_close;
        let change_percent = change / previous_close * 100.0;

        Ok(Self {
            symbol,
            price: round2(price),
            change: round2(change),
            change_percent: round2(change_percent),
            volume,
            market_state,
        })
    }
}

/// Fear & Greed index reading; all scores are whole numbers in `[0, 100]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FearGreedReading {
    pub score: u8,
    pub rating: String,
    pub previous_score: u8,
    pub one_week_ago_score: u8,
}

impl FearGreedReading {
    pub fn from_raw(score: f64, rating: impl Into<String>, previous: f64, one_week_ago: f64) -> Self {
        Self {
            score: index_score(score),
            rating: rating.into(),
            previous_score: index_score(previous),
            one_week_ago_score: index_score(one_week_ago),
        }
    }
}

fn index_score(value: f64) -> u8 {
    if value.is_nan() {
        return 0;
    }
    value.round().clamp(0.0, 100.0) as u8
}

/// Exchange session derived from the local exchange clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SessionState {
    Open,
    PreMarket,
    AfterHours,
    Weekend,
    Closed,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketStatus {
    pub state: SessionState,
    pub local_time_label: String,
}

/// Headline search hit in provider relevance order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsItem {
    pub title: String,
    pub url: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Normal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SentimentLabel {
    Bullish,
    Bearish,
    Neutral,
}

impl SentimentLabel {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Bullish => "bullish",
            Self::Bearish => "bearish",
            Self::Neutral => "neutral",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SentimentScore {
    /// In `[-1, 1]`, two decimals.
    pub raw_score: f64,
    pub label: SentimentLabel,
    /// In `[0, 1]`, two decimals.
    pub confidence: f64,
}

impl SentimentScore {
    pub const NEUTRAL: Self = Self {
        raw_score: 0.0,
        label: SentimentLabel::Neutral,
        confidence: 0.0,
    };
}

/// Watchlist entry annotated with headline sentiment once headlines are supplied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TickerRecord {
    pub symbol: Symbol,
    pub name: String,
    pub priority: Priority,
    pub sentiment: Option<SentimentScore>,
    pub headlines: Vec<String>,
    pub needs_fetch: bool,
}

impl TickerRecord {
    pub fn pending(symbol: Symbol, name: impl Into<String>, priority: Priority) -> Self {
        Self {
            symbol,
            name: name.into(),
            priority,
            sentiment: None,
            headlines: Vec::new(),
            needs_fetch: true,
        }
    }

    /// Search phrase an external fetcher should use for this ticker.
    pub fn news_query(&self) -> String {
        format!("{} {} stock news", self.symbol, self.name)
    }
}
