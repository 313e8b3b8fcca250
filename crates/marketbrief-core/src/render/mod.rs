//! Report rendering.
//!
//! Both formats are pure functions of their inputs: the same snapshot, ticker
//! annotations and options always produce the same string. Failed slots never
//! abort rendering; the text format shows a placeholder and the structured
//! format keeps the error record.

mod structured;
mod text;

use crate::error::CoreError;
use crate::watchlist::{WatchlistConfig, DEFAULT_GROUP_LABEL};
use crate::{AggregateSnapshot, Symbol, TickerRecord};

pub use structured::render_structured;
pub use text::render_text;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportFormat {
    #[default]
    Text,
    Structured,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    pub format: ReportFormat,
    /// Drops headline detail from the text report.
    pub brief: bool,
    pub spotlight: Option<Symbol>,
    pub group_label: String,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            format: ReportFormat::Text,
            brief: false,
            spotlight: None,
            group_label: String::from(DEFAULT_GROUP_LABEL),
        }
    }
}

impl RenderOptions {
    /// Spotlight and group label taken from the watchlist.
    pub fn for_watchlist(config: &WatchlistConfig, format: ReportFormat, brief: bool) -> Self {
        Self {
            format,
            brief,
            spotlight: config.spotlight.clone(),
            group_label: config.group_label.clone(),
        }
    }
}

/// Renders `snapshot`, plus per-ticker sentiment when `tickers` is given.
///
/// Only the structured format can fail, and only on serialization.
pub fn render(
    snapshot: &AggregateSnapshot,
    tickers: Option<&[TickerRecord]>,
    options: &RenderOptions,
) -> Result<String, CoreError> {
    match options.format {
        ReportFormat::Text => Ok(render_text(snapshot, tickers, options)),
        ReportFormat::Structured => render_structured(snapshot, tickers),
    }
}
