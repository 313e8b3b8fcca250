use std::sync::Arc;

use serde::Deserialize;
use tracing::debug;

use crate::data_source::{QuoteSource, SourceError, SourceFuture};
use crate::http_client::{HttpClient, HttpRequest};
use crate::{ProviderId, Quote, QuoteSession, Symbol};

const DEFAULT_BASE_URL: &str = "https://query1.finance.yahoo.com";

/// Quote adapter over Yahoo's chart endpoint (daily interval, two-day range).
#[derive(Clone)]
pub struct YahooChartAdapter {
    http_client: Arc<dyn HttpClient>,
    base_url: String,
}

impl YahooChartAdapter {
    pub fn new(http_client: Arc<dyn HttpClient>) -> Self {
        Self {
            http_client,
            base_url: String::from(DEFAULT_BASE_URL),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn chart_url(&self, symbol: &Symbol) -> String {
        format!(
            "{}/v8/finance/chart/{}?interval=1d&range=2d",
            self.base_url.trim_end_matches('/'),
            urlencoding::encode(symbol.as_str())
        )
    }

    async fn fetch_quote(&self, symbol: &Symbol) -> Result<Quote, SourceError> {
        let request = HttpRequest::get(self.chart_url(symbol))
            .with_header("referer", "https://finance.yahoo.com/");
        debug!(%symbol, url = %request.url, "requesting yahoo chart");

        let response = self
            .http_client
            .execute(request)
            .await
            .and_then(|response| response.error_for_status())
            .map_err(|error| SourceError::transport(ProviderId::Yahoo, &error))?;

        parse_chart_response(symbol, &response.body)
    }
}

impl QuoteSource for YahooChartAdapter {
    fn quote<'a>(&'a self, symbol: &'a Symbol) -> SourceFuture<'a, Quote> {
        Box::pin(self.fetch_quote(symbol))
    }
}

fn parse_chart_response(symbol: &Symbol, body: &str) -> Result<Quote, SourceError> {
    let response: YahooChartResponse = serde_json::from_str(body).map_err(|e| {
        SourceError::parse(ProviderId::Yahoo, format!("failed to parse yahoo chart: {e}"))
    })?;

    if let Some(error) = response.chart.error {
        return Err(SourceError::parse(
            ProviderId::Yahoo,
            format!(
                "yahoo chart error: {}",
                error
                    .description
                    .or(error.code)
                    .unwrap_or_else(|| String::from("unknown"))
            ),
        ));
    }

    let meta = response
        .chart
        .result
        .and_then(|results| results.into_iter().next())
        .map(|result| result.meta)
        .ok_or_else(|| SourceError::parse(ProviderId::Yahoo, "yahoo chart returned no result"))?;

    let price = meta.regular_market_price.ok_or_else(|| {
        SourceError::parse(ProviderId::Yahoo, "yahoo chart is missing regularMarketPrice")
    })?;
    let previous_close = meta
        .previous_close
        .filter(|close| *close != 0.0)
        .or(meta.chart_previous_close)
        .ok_or_else(|| {
            SourceError::parse(ProviderId::Yahoo, "yahoo chart is missing previous close")
        })?;
    let volume = meta
        .regular_market_volume
        .filter(|volume| volume.is_finite() && *volume >= 0.0)
        .map(|volume| volume as u64);

    Quote::from_close(
        symbol.clone(),
        price,
        previous_close,
        volume,
        QuoteSession::from_provider(meta.market_state.as_deref()),
    )
    .map_err(|error| SourceError::from_validation(ProviderId::Yahoo, error))
}

#[derive(Debug, Deserialize)]
struct YahooChartResponse {
    chart: YahooChart,
}

#[derive(Debug, Deserialize)]
struct YahooChart {
    #[serde(default)]
    result: Option<Vec<YahooChartResult>>,
    #[serde(default)]
    error: Option<YahooChartError>,
}

#[derive(Debug, Deserialize)]
struct YahooChartError {
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct YahooChartResult {
    meta: YahooChartMeta,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct YahooChartMeta {
    #[serde(default)]
    regular_market_price: Option<f64>,
    #[serde(default)]
    previous_close: Option<f64>,
    #[serde(default)]
    chart_previous_close: Option<f64>,
    #[serde(default)]
    regular_market_volume: Option<f64>,
    #[serde(default)]
    market_state: Option<String>,
}
