//! Production source adapters.

pub mod cnn;
pub mod duckduckgo;
pub mod market_clock;
pub mod yahoo;

pub use cnn::CnnFearGreedAdapter;
pub use duckduckgo::DuckDuckGoNewsAdapter;
pub use market_clock::{market_status, FixedClock, SystemClock};
pub use yahoo::YahooChartAdapter;
