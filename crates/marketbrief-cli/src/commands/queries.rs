use marketbrief_core::WatchlistConfig;
use serde::Serialize;

use crate::error::CliError;

#[derive(Debug, Serialize)]
struct TickerQuery<'a> {
    symbol: &'a str,
    query: String,
}

/// Pretty JSON array of `{symbol, query}` for an external headline fetcher.
pub fn run(config: &WatchlistConfig) -> Result<String, CliError> {
    let records = config.ticker_records();
    let queries: Vec<TickerQuery<'_>> = records
        .iter()
        .map(|ticker| TickerQuery {
            symbol: ticker.symbol.as_str(),
            query: ticker.news_query(),
        })
        .collect();

    Ok(serde_json::to_string_pretty(&queries)?)
}
