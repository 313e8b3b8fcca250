use serde::{Deserialize, Serialize};

use super::models::{Fetch, FearGreedReading, MarketStatus, NewsItem, Quote, TickerRecord};
use super::UtcDateTime;

/// One fully assembled aggregation result for a single invocation instant.
///
/// Built only by the aggregator; consumers receive it by shared reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregateSnapshot {
    pub timestamp: UtcDateTime,
    pub market_status: MarketStatus,
    pub fear_greed: Fetch<FearGreedReading>,
    pub indices: Vec<Fetch<Quote>>,
    /// Quotes for the configured watchlist group.
    pub watchlist: Vec<Fetch<Quote>>,
    pub news: Vec<Fetch<NewsItem>>,
}

impl AggregateSnapshot {
    /// Successful watchlist or index quote for `symbol`, if any.
    pub fn quote(&self, symbol: &str) -> Option<&Quote> {
        self.watchlist
            .iter()
            .chain(self.indices.iter())
            .filter_map(Fetch::ready)
            .find(|quote| quote.symbol.as_str() == symbol)
    }

    /// Number of slots that degraded to an error record.
    pub fn failed_slots(&self) -> usize {
        usize::from(self.fear_greed.is_failed())
            + self.indices.iter().filter(|slot| slot.is_failed()).count()
            + self.watchlist.iter().filter(|slot| slot.is_failed()).count()
            + self.news.iter().filter(|slot| slot.is_failed()).count()
    }
}

/// Structured document: the snapshot fields plus ticker annotations, when present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Briefing {
    #[serde(flatten)]
    pub snapshot: AggregateSnapshot,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tickers: Vec<TickerRecord>,
}
