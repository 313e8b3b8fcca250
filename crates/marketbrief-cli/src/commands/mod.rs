mod briefing;
mod queries;

use marketbrief_core::{Aggregator, WatchlistConfig};
use tracing::info;

use crate::cli::Cli;
use crate::error::CliError;
use crate::input;

/// Environment switch selecting query export instead of a briefing.
pub const MODE_ENV: &str = "MARKETBRIEF_MODE";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Briefing,
    Queries,
}

impl Mode {
    pub fn from_env() -> Self {
        Self::parse(std::env::var(MODE_ENV).ok().as_deref())
    }

    fn parse(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            Some(mode) if mode.eq_ignore_ascii_case("queries") => Self::Queries,
            _ => Self::Briefing,
        }
    }
}

pub async fn run(cli: &Cli) -> Result<String, CliError> {
    let config = load_watchlist(cli).await?;

    match Mode::from_env() {
        Mode::Queries => queries::run(&config),
        Mode::Briefing => {
            let piped = input::read_piped().await;
            briefing::run(cli, &config, &Aggregator::default(), piped.as_deref()).await
        }
    }
}

/// Loads the watchlist and applies `--ticker`. Nothing touches the network before this succeeds.
pub async fn load_watchlist(cli: &Cli) -> Result<WatchlistConfig, CliError> {
    let config = WatchlistConfig::load(&cli.config).await?;
    info!(path = %cli.config.display(), tickers = config.tickers.len(), "watchlist loaded");

    match cli.ticker.as_deref() {
        None => Ok(config),
        Some(symbol) => config
            .restrict_to(symbol)
            .ok_or_else(|| CliError::UnknownTicker {
                symbol: symbol.trim().to_ascii_uppercase(),
            }),
    }
}
