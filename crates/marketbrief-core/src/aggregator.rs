//! Concurrent fan-out over every briefing source.
//!
//! One [`Aggregator::collect`] call issues every quote lookup, the Fear &
//! Greed lookup and the news search at once and waits for all of them to
//! settle. Each call's error is folded into its own [`Fetch::Failed`] slot, so
//! the snapshot always comes back complete.

use std::sync::Arc;

use futures::future::join_all;
use tracing::{info, warn};

use crate::adapters::{market_status, SystemClock};
use crate::data_source::{Clock, FearGreedSource, NewsSource, QuoteSource, SourceError};
use crate::http_client::{HttpClient, ReqwestHttpClient};
use crate::{
    AggregateSnapshot, CnnFearGreedAdapter, DuckDuckGoNewsAdapter, Fetch, FetchFailure, NewsItem,
    Quote, Symbol, YahooChartAdapter,
};

/// Which sources one briefing queries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BriefingPlan {
    pub indices: Vec<Symbol>,
    pub watchlist: Vec<Symbol>,
    pub news_query: String,
    pub news_count: usize,
}

/// Source registry plus the fan-out itself.
#[derive(Clone)]
pub struct Aggregator {
    quotes: Arc<dyn QuoteSource>,
    fear_greed: Arc<dyn FearGreedSource>,
    news: Arc<dyn NewsSource>,
    clock: Arc<dyn Clock>,
}

impl Default for Aggregator {
    fn default() -> Self {
        Self::with_http_client(Arc::new(ReqwestHttpClient::default()))
    }
}

impl Aggregator {
    /// Production adapters sharing one transport, on the system clock.
    pub fn with_http_client(http_client: Arc<dyn HttpClient>) -> Self {
        AggregatorBuilder::new()
            .quotes(Arc::new(YahooChartAdapter::new(http_client.clone())))
            .fear_greed(Arc::new(CnnFearGreedAdapter::new(http_client.clone())))
            .news(Arc::new(DuckDuckGoNewsAdapter::new(http_client)))
            .build()
    }

    pub fn builder() -> AggregatorBuilder {
        AggregatorBuilder::new()
    }

    pub async fn collect(&self, plan: &BriefingPlan) -> AggregateSnapshot {
        let timestamp = self.clock.now();
        info!(
            indices = plan.indices.len(),
            watchlist = plan.watchlist.len(),
            news_count = plan.news_count,
            "collecting briefing sources"
        );

        let (indices, watchlist, fear_greed, news) = tokio::join!(
            self.quote_slots(&plan.indices),
            self.quote_slots(&plan.watchlist),
            self.fear_greed.fear_greed(),
            self.news.search(&plan.news_query, plan.news_count),
        );

        let fear_greed = match fear_greed {
            Ok(reading) => Fetch::Ready(reading),
            Err(error) => {
                log_isolated("fear_greed", &error);
                Fetch::Failed(FetchFailure::new(error.message()))
            }
        };

        let snapshot = AggregateSnapshot {
            timestamp,
            market_status: market_status(timestamp),
            fear_greed,
            indices,
            watchlist,
            news: news_slots(news),
        };

        info!(failed_slots = snapshot.failed_slots(), "briefing sources settled");
        snapshot
    }

    /// One slot per symbol, in request order.
    async fn quote_slots(&self, symbols: &[Symbol]) -> Vec<Fetch<Quote>> {
        let results = join_all(symbols.iter().map(|symbol| self.quotes.quote(symbol))).await;

        symbols
            .iter()
            .zip(results)
            .map(|(symbol, result)| match result {
                Ok(quote) => Fetch::Ready(quote),
                Err(error) => {
                    log_isolated(symbol.as_str(), &error);
                    Fetch::Failed(FetchFailure::for_symbol(symbol.clone(), error.message()))
                }
            })
            .collect()
    }
}

/// A failed search collapses to a single error item.
fn news_slots(result: Result<Vec<NewsItem>, SourceError>) -> Vec<Fetch<NewsItem>> {
    match result {
        Ok(items) => items.into_iter().map(Fetch::Ready).collect(),
        Err(error) => {
            log_isolated("news", &error);
            vec![Fetch::Failed(FetchFailure::new(error.message()))]
        }
    }
}

fn log_isolated(slot: &str, error: &SourceError) {
    warn!(
        slot,
        provider = %error.provider(),
        code = error.code(),
        error = %error,
        "source failed; slot degraded to error record"
    );
}

/// Wires sources into an [`Aggregator`]. Unset sources default to the
/// production adapters over [`ReqwestHttpClient`]; the clock defaults to
/// [`SystemClock`].
#[derive(Default)]
pub struct AggregatorBuilder {
    quotes: Option<Arc<dyn QuoteSource>>,
    fear_greed: Option<Arc<dyn FearGreedSource>>,
    news: Option<Arc<dyn NewsSource>>,
    clock: Option<Arc<dyn Clock>>,
}

impl AggregatorBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn quotes(mut self, source: Arc<dyn QuoteSource>) -> Self {
        self.quotes = Some(source);
        self
    }

    pub fn fear_greed(mut self, source: Arc<dyn FearGreedSource>) -> Self {
        self.fear_greed = Some(source);
        self
    }

    pub fn news(mut self, source: Arc<dyn NewsSource>) -> Self {
        self.news = Some(source);
        self
    }

    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    pub fn build(self) -> Aggregator {
        // One transport shared by whichever default adapters are needed.
        let mut shared: Option<Arc<dyn HttpClient>> = None;
        let mut http_client = || {
            shared
                .get_or_insert_with(|| Arc::new(ReqwestHttpClient::default()))
                .clone()
        };

        let quotes: Arc<dyn QuoteSource> = match self.quotes {
            Some(source) => source,
            None => Arc::new(YahooChartAdapter::new(http_client())),
        };
        let fear_greed: Arc<dyn FearGreedSource> = match self.fear_greed {
            Some(source) => source,
            None => Arc::new(CnnFearGreedAdapter::new(http_client())),
        };
        let news: Arc<dyn NewsSource> = match self.news {
            Some(source) => source,
            None => Arc::new(DuckDuckGoNewsAdapter::new(http_client())),
        };

        Aggregator {
            quotes,
            fear_greed,
            news,
            clock: self.clock.unwrap_or_else(|| Arc::new(SystemClock)),
        }
    }
}
