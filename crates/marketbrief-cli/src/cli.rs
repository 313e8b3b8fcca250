//! CLI argument definitions for marketbrief.
//!
//! # Options
//!
//! | Option | Default | Description |
//! |--------|---------|-------------|
//! | `--json` | `false` | Emit the structured JSON document |
//! | `--brief`, `--quick` | `false` | Omit headline detail |
//! | `--ticker` | none | Restrict to one watchlist entry |
//! | `--config` | `watchlist.json` | Watchlist file (`MARKETBRIEF_CONFIG`) |
//! | `--cache` | `use` | Headline cache mode |
//!
//! Setting `MARKETBRIEF_MODE=queries` prints the per-ticker search queries
//! instead of a briefing.
//!
//! # Examples
//!
//! ```bash
//! marketbrief
//! marketbrief --quick
//! marketbrief --ticker nvda --json
//! cat headlines.json | marketbrief --cache refresh
//! ```

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use marketbrief_core::watchlist::DEFAULT_CONFIG_FILE;
use marketbrief_core::CacheMode;

/// 🎯 marketbrief - point-in-time market and watchlist briefing
///
/// Queries quotes, the Fear & Greed index and headlines concurrently,
/// scores piped headlines per ticker and prints one report.
#[derive(Debug, Parser)]
#[command(
    name = "marketbrief",
    author,
    version,
    about = "Point-in-time market and watchlist briefing",
    long_about = "marketbrief queries index and watchlist quotes, the Fear & Greed index and \
a headline search concurrently. A failed source degrades to a placeholder instead of \
failing the run.\n\
\n\
Per-ticker headlines can be piped on stdin as JSON:\n\
\n\
  {\"NVDA\": {\"headlines\": [\"...\"]}}\n\
\n\
Set MARKETBRIEF_MODE=queries to print the search query for each ticker instead."
)]
pub struct Cli {
    /// Output the structured JSON document.
    #[arg(long, default_value_t = false)]
    pub json: bool,

    /// Omit headline detail.
    #[arg(long, visible_alias = "quick", default_value_t = false)]
    pub brief: bool,

    /// Restrict the report to one watchlist symbol (case-insensitive).
    #[arg(long, value_name = "SYMBOL")]
    pub ticker: Option<String>,

    /// Watchlist configuration file.
    #[arg(long, env = "MARKETBRIEF_CONFIG", default_value = DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,

    /// Headline cache mode.
    #[arg(long, value_enum, default_value_t = CacheSelector::Use)]
    pub cache: CacheSelector,
}

/// How piped and cached headlines interact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CacheSelector {
    /// Read current-hour entries and write fresh ones.
    Use,
    /// Ignore cached entries but write fresh ones.
    Refresh,
    /// Neither read nor write.
    Bypass,
}

impl From<CacheSelector> for CacheMode {
    fn from(value: CacheSelector) -> Self {
        match value {
            CacheSelector::Use => Self::Use,
            CacheSelector::Refresh => Self::Refresh,
            CacheSelector::Bypass => Self::Bypass,
        }
    }
}
