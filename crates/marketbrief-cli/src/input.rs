//! Piped per-ticker headlines and their hourly cache.
//!
//! Stdin, when it is not a terminal, may carry
//! `{"NVDA": {"headlines": ["...", "..."]}}`. Piped headlines win; a ticker
//! without piped headlines falls back to the cached set for the current hour.

use std::collections::BTreeMap;
use std::io::IsTerminal;

use marketbrief_core::{CacheStore, SentimentScorer, TickerRecord, UtcDateTime};
use serde::Deserialize;
use tokio::io::{AsyncRead, AsyncReadExt};
use tracing::{debug, warn};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PipedTicker {
    #[serde(default)]
    pub headlines: Vec<String>,
}

/// Keys are upper-cased symbols.
pub type HeadlineDocument = BTreeMap<String, PipedTicker>;

/// Reads stdin unless it is attached to a terminal.
pub async fn read_piped() -> Option<String> {
    if std::io::stdin().is_terminal() {
        return None;
    }
    read_input(tokio::io::stdin()).await
}

/// Unreadable or non-UTF-8 input is logged and treated as absent.
async fn read_input<R: AsyncRead + Unpin>(mut reader: R) -> Option<String> {
    let mut raw = Vec::new();
    if let Err(error) = reader.read_to_end(&mut raw).await {
        warn!(%error, "ignoring unreadable piped headlines");
        return None;
    }

    match String::from_utf8(raw) {
        Ok(text) => Some(text),
        Err(error) => {
            warn!(%error, "ignoring piped headlines that are not UTF-8");
            None
        }
    }
}

/// Blank input is no input; a malformed document is logged and ignored.
pub fn parse_headlines(raw: &str) -> Option<HeadlineDocument> {
    if raw.trim().is_empty() {
        return None;
    }

    match serde_json::from_str::<HeadlineDocument>(raw) {
        Ok(document) => Some(
            document
                .into_iter()
                .map(|(symbol, ticker)| (symbol.trim().to_ascii_uppercase(), ticker))
                .collect(),
        ),
        Err(error) => {
            warn!(%error, "ignoring malformed piped headlines");
            None
        }
    }
}

/// Scores each ticker from piped or cached headlines; the rest stay pending.
pub async fn annotate(
    tickers: &mut [TickerRecord],
    piped: Option<&HeadlineDocument>,
    cache: &CacheStore,
    now: UtcDateTime,
    scorer: &SentimentScorer,
) {
    for ticker in tickers.iter_mut() {
        let key = ticker.symbol.as_str().to_owned();
        let fresh = piped
            .and_then(|document| document.get(&key))
            .map(|entry| entry.headlines.clone());

        match fresh {
            Some(headlines) => {
                cache.put(&key, now, &headlines).await;
                scorer.enrich(ticker, headlines);
            }
            None => match cache.get::<Vec<String>>(&key, now).await {
                Some(headlines) if !headlines.is_empty() => scorer.enrich(ticker, headlines),
                _ => debug!(symbol = %ticker.symbol, "no headlines; ticker left pending"),
            },
        }
    }
}
