use marketbrief_core::{
    render, Aggregator, CacheStore, RenderOptions, ReportFormat, SentimentScorer, WatchlistConfig,
};
use tracing::{info, info_span, Instrument};
use uuid::Uuid;

use crate::cli::Cli;
use crate::error::CliError;
use crate::input;

pub async fn run(
    cli: &Cli,
    config: &WatchlistConfig,
    aggregator: &Aggregator,
    piped: Option<&str>,
) -> Result<String, CliError> {
    let run_id = Uuid::new_v4();
    assemble(cli, config, aggregator, piped)
        .instrument(info_span!("briefing", %run_id))
        .await
}

async fn assemble(
    cli: &Cli,
    config: &WatchlistConfig,
    aggregator: &Aggregator,
    piped: Option<&str>,
) -> Result<String, CliError> {
    let snapshot = aggregator.collect(&config.plan()).await;

    let mut tickers = config.ticker_records();
    let document = piped.and_then(input::parse_headlines);
    let cache = CacheStore::new(&config.cache_dir, cli.cache.into());
    input::annotate(
        &mut tickers,
        document.as_ref(),
        &cache,
        snapshot.timestamp,
        &SentimentScorer::default(),
    )
    .await;

    let format = if cli.json {
        ReportFormat::Structured
    } else {
        ReportFormat::Text
    };
    let options = RenderOptions::for_watchlist(config, format, cli.brief);
    let report = render(&snapshot, Some(tickers.as_slice()), &options)?;

    info!(
        failed_slots = snapshot.failed_slots(),
        scored = tickers.iter().filter(|t| !t.needs_fetch).count(),
        "briefing rendered"
    );
    Ok(report)
}
