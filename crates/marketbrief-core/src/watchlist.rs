//! Watchlist configuration file.
//!
//! ```json
//! {
//!   "tickers": [{"symbol": "NVDA", "name": "NVIDIA", "priority": "high"}],
//!   "indices": ["SPY", "QQQ", "DIA"],
//!   "news": {"query": "NVIDIA semiconductor AI", "count": 4},
//!   "spotlight": "NVDA",
//!   "group_label": "Semiconductors",
//!   "cache_dir": ".cache"
//! }
//! ```
//!
//! Only `tickers` is required. A relative `cache_dir` resolves against the
//! directory holding the file.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::aggregator::BriefingPlan;
use crate::error::ConfigError;
use crate::{Priority, Symbol, TickerRecord, ValidationError};

pub const DEFAULT_CONFIG_FILE: &str = "watchlist.json";
pub const DEFAULT_INDICES: [&str; 3] = ["SPY", "QQQ", "DIA"];
pub const DEFAULT_NEWS_QUERY: &str = "NVIDIA semiconductor AI";
pub const DEFAULT_NEWS_COUNT: usize = 4;
pub const DEFAULT_GROUP_LABEL: &str = "Semiconductors";
const DEFAULT_CACHE_DIR: &str = ".cache";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WatchlistEntry {
    pub symbol: Symbol,
    pub name: String,
    pub priority: Priority,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewsTopic {
    pub query: String,
    pub count: usize,
}

/// Validated watchlist with every default applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WatchlistConfig {
    pub tickers: Vec<WatchlistEntry>,
    pub indices: Vec<Symbol>,
    pub news: NewsTopic,
    pub spotlight: Option<Symbol>,
    pub group_label: String,
    pub cache_dir: PathBuf,
}

#[derive(Debug, Deserialize)]
struct RawWatchlist {
    tickers: Vec<RawEntry>,
    #[serde(default)]
    indices: Option<Vec<String>>,
    #[serde(default)]
    news: Option<RawNews>,
    #[serde(default)]
    spotlight: Option<String>,
    #[serde(default)]
    group_label: Option<String>,
    #[serde(default)]
    cache_dir: Option<PathBuf>,
}

#[derive(Debug, Deserialize)]
struct RawEntry {
    symbol: String,
    name: String,
    #[serde(default = "default_priority")]
    priority: Priority,
}

#[derive(Debug, Deserialize)]
struct RawNews {
    query: String,
    #[serde(default = "default_news_count")]
    count: usize,
}

fn default_priority() -> Priority {
    Priority::Normal
}

fn default_news_count() -> usize {
    DEFAULT_NEWS_COUNT
}

impl WatchlistConfig {
    pub async fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| ConfigError::Read {
                path: path.to_path_buf(),
                source,
            })?;

        Self::from_json(&raw, path)
    }

    /// Parses a watchlist document; `origin` names the file in errors and
    /// anchors a relative `cache_dir`.
    pub fn from_json(raw: &str, origin: &Path) -> Result<Self, ConfigError> {
        let document: RawWatchlist =
            serde_json::from_str(raw).map_err(|source| ConfigError::Malformed {
                path: origin.to_path_buf(),
                source,
            })?;

        if document.tickers.is_empty() {
            return Err(ConfigError::Empty {
                path: origin.to_path_buf(),
            });
        }

        Self::validate(document, origin).map_err(|source| ConfigError::Invalid {
            path: origin.to_path_buf(),
            source,
        })
    }

    fn validate(document: RawWatchlist, origin: &Path) -> Result<Self, ValidationError> {
        let tickers = document
            .tickers
            .into_iter()
            .map(|entry| {
                Ok(WatchlistEntry {
                    symbol: Symbol::parse(&entry.symbol)?,
                    name: entry.name.trim().to_owned(),
                    priority: entry.priority,
                })
            })
            .collect::<Result<Vec<_>, ValidationError>>()?;

        let indices = match document.indices {
            Some(raw) => raw.iter().map(|s| Symbol::parse(s)).collect::<Result<Vec<_>, _>>()?,
            None => DEFAULT_INDICES
                .iter()
                .map(|s| Symbol::parse(s))
                .collect::<Result<Vec<_>, _>>()?,
        };

        let news = match document.news {
            Some(news) if news.count == 0 => return Err(ValidationError::ZeroNewsCount),
            Some(news) => NewsTopic {
                query: news.query,
                count: news.count,
            },
            None => NewsTopic {
                query: String::from(DEFAULT_NEWS_QUERY),
                count: DEFAULT_NEWS_COUNT,
            },
        };

        let spotlight = match document.spotlight {
            Some(raw) => Some(Symbol::parse(&raw)?),
            None => tickers
                .iter()
                .find(|entry| entry.priority == Priority::High)
                .map(|entry| entry.symbol.clone()),
        };

        let base = origin.parent().unwrap_or_else(|| Path::new(""));
        let cache_dir = base.join(
            document
                .cache_dir
                .unwrap_or_else(|| PathBuf::from(DEFAULT_CACHE_DIR)),
        );

        Ok(Self {
            tickers,
            indices,
            news,
            spotlight,
            group_label: document
                .group_label
                .unwrap_or_else(|| String::from(DEFAULT_GROUP_LABEL)),
            cache_dir,
        })
    }

    /// Narrows the watchlist to one ticker, matched case-insensitively.
    ///
    /// Returns `None` when the symbol is not on the watchlist. A spotlight
    /// outside the remaining ticker and the indices is dropped.
    pub fn restrict_to(&self, symbol: &str) -> Option<Self> {
        let wanted = Symbol::parse(symbol).ok()?;
        let entry = self.tickers.iter().find(|entry| entry.symbol == wanted)?;

        let spotlight = self
            .spotlight
            .clone()
            .filter(|spot| *spot == entry.symbol || self.indices.contains(spot));

        Some(Self {
            tickers: vec![entry.clone()],
            spotlight,
            ..self.clone()
        })
    }

    pub fn plan(&self) -> BriefingPlan {
        BriefingPlan {
            indices: self.indices.clone(),
            watchlist: self.tickers.iter().map(|entry| entry.symbol.clone()).collect(),
            news_query: self.news.query.clone(),
            news_count: self.news.count,
        }
    }

    /// Fresh, not-yet-scored records in watchlist order.
    pub fn ticker_records(&self) -> Vec<TickerRecord> {
        self.tickers
            .iter()
            .map(|entry| TickerRecord::pending(entry.symbol.clone(), entry.name.clone(), entry.priority))
            .collect()
    }
}
