use std::sync::Arc;

use serde::Deserialize;
use tracing::debug;

use crate::data_source::{FearGreedSource, SourceError, SourceFuture};
use crate::http_client::{HttpClient, HttpRequest};
use crate::{FearGreedReading, ProviderId};

const DEFAULT_ENDPOINT: &str = "https://production.dataviz.cnn.io/index/fearandgreed/graphdata";

/// Fear & Greed adapter over CNN's graph data endpoint.
#[derive(Clone)]
pub struct CnnFearGreedAdapter {
    http_client: Arc<dyn HttpClient>,
    endpoint: String,
}

impl CnnFearGreedAdapter {
    pub fn new(http_client: Arc<dyn HttpClient>) -> Self {
        Self {
            http_client,
            endpoint: String::from(DEFAULT_ENDPOINT),
        }
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    async fn fetch_reading(&self) -> Result<FearGreedReading, SourceError> {
        let request = HttpRequest::get(self.endpoint.as_str()).with_header("accept", "application/json");
        debug!(url = %request.url, "requesting fear & greed index");

        let response = self
            .http_client
            .execute(request)
            .await
            .and_then(|response| response.error_for_status())
            .map_err(|error| SourceError::transport(ProviderId::Cnn, &error))?;

        parse_graph_data(&response.body)
    }
}

impl FearGreedSource for CnnFearGreedAdapter {
    fn fear_greed(&self) -> SourceFuture<'_, FearGreedReading> {
        Box::pin(self.fetch_reading())
    }
}

fn parse_graph_data(body: &str) -> Result<FearGreedReading, SourceError> {
    let data: CnnGraphData = serde_json::from_str(body).map_err(|e| {
        SourceError::parse(ProviderId::Cnn, format!("failed to parse fear & greed data: {e}"))
    })?;

    let current = data.fear_and_greed;
    // The historical block is optional; a missing week-ago value reads as 0.
    let one_week_ago = data
        .fear_and_greed_historical
        .and_then(|historical| historical.one_week_ago)
        .or(current.previous_1_week)
        .unwrap_or(0.0);

    Ok(FearGreedReading::from_raw(
        current.score,
        current.rating,
        current.previous_close.unwrap_or(current.score),
        one_week_ago,
    ))
}

#[derive(Debug, Deserialize)]
struct CnnGraphData {
    fear_and_greed: CnnCurrentReading,
    #[serde(default)]
    fear_and_greed_historical: Option<CnnHistorical>,
}

#[derive(Debug, Deserialize)]
struct CnnCurrentReading {
    score: f64,
    rating: String,
    #[serde(default)]
    previous_close: Option<f64>,
    #[serde(default)]
    previous_1_week: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct CnnHistorical {
    #[serde(default)]
    one_week_ago: Option<f64>,
}
