use crate::error::CoreError;
use crate::{AggregateSnapshot, Briefing, TickerRecord};

/// Pretty JSON of the snapshot with ticker annotations appended as `tickers`.
///
/// Keys follow record field order, so output is byte-stable for equal input.
pub fn render_structured(
    snapshot: &AggregateSnapshot,
    tickers: Option<&[TickerRecord]>,
) -> Result<String, CoreError> {
    let briefing = Briefing {
        snapshot: snapshot.clone(),
        tickers: tickers.map(<[TickerRecord]>::to_vec).unwrap_or_default(),
    };

    Ok(serde_json::to_string_pretty(&briefing)?)
}
