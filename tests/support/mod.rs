//! Shared fixtures for the workspace integration suites.
#![allow(dead_code)]

use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use marketbrief_core::{
    Aggregator, CnnFearGreedAdapter, DuckDuckGoNewsAdapter, FixedClock, HttpClient, HttpError,
    HttpRequest, HttpResponse, UtcDateTime, YahooChartAdapter,
};

pub const YAHOO_BASE: &str = "http://yahoo.test";
pub const CNN_ENDPOINT: &str = "http://cnn.test/graphdata";
pub const DDG_ENDPOINT: &str = "http://ddg.test/html/";

enum Route {
    Respond(HttpResponse),
    Fail(HttpError),
}

/// Fake transport answering by the first route whose fragment occurs in the URL.
/// Unrouted URLs answer 404.
#[derive(Default)]
pub struct RoutedHttpClient {
    routes: Vec<(String, Route)>,
    delay: Option<Duration>,
    requested: Mutex<Vec<String>>,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl RoutedHttpClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(mut self, fragment: &str, status: u16, body: impl Into<String>) -> Self {
        self.routes.push((
            fragment.to_owned(),
            Route::Respond(HttpResponse::with_status(status, body)),
        ));
        self
    }

    pub fn fail(mut self, fragment: &str, error: HttpError) -> Self {
        self.routes.push((fragment.to_owned(), Route::Fail(error)));
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn requested_urls(&self) -> Vec<String> {
        self.requested.lock().expect("request log lock").clone()
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    fn outcome(&self, url: &str) -> Result<HttpResponse, HttpError> {
        match self.routes.iter().find(|(fragment, _)| url.contains(fragment.as_str())) {
            Some((_, Route::Respond(response))) => Ok(response.clone()),
            Some((_, Route::Fail(error))) => Err(error.clone()),
            None => Ok(HttpResponse::with_status(404, "not routed")),
        }
    }
}

impl HttpClient for RoutedHttpClient {
    fn execute<'a>(
        &'a self,
        request: HttpRequest,
    ) -> Pin<Box<dyn Future<Output = Result<HttpResponse, HttpError>> + Send + 'a>> {
        Box::pin(async move {
            self.requested
                .lock()
                .expect("request log lock")
                .push(request.url.clone());

            let current = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            self.max_in_flight.fetch_max(current, Ordering::SeqCst);
            if let Some(delay) = self.delay {
                tokio::time::sleep(delay).await;
            }
            self.in_flight.fetch_sub(1, Ordering::SeqCst);

            self.outcome(&request.url)
        })
    }
}

pub fn instant() -> UtcDateTime {
    // Friday 10:30 in New York.
    UtcDateTime::parse("2026-10-16T14:30:00Z").expect("valid timestamp")
}

/// Production adapters over `client`, pinned to [`instant`].
pub fn aggregator(client: Arc<RoutedHttpClient>) -> Aggregator {
    Aggregator::builder()
        .quotes(Arc::new(
            YahooChartAdapter::new(client.clone()).with_base_url(YAHOO_BASE),
        ))
        .fear_greed(Arc::new(
            CnnFearGreedAdapter::new(client.clone()).with_endpoint(CNN_ENDPOINT),
        ))
        .news(Arc::new(
            DuckDuckGoNewsAdapter::new(client).with_endpoint(DDG_ENDPOINT),
        ))
        .clock(Arc::new(FixedClock(instant())))
        .build()
}

pub fn chart_body(symbol: &str, price: f64, previous_close: f64) -> String {
    format!(
        r#"{{"chart": {{"result": [{{"meta": {{"symbol": "{symbol}", "regularMarketPrice": {price}, "previousClose": {previous_close}, "regularMarketVolume": 1000, "marketState": "REGULAR"}}}}], "error": null}}}}"#
    )
}

pub fn chart_route(symbol: &str) -> String {
    format!("/v8/finance/chart/{symbol}?")
}

pub fn fear_greed_body(score: f64, previous_close: f64) -> String {
    format!(
        r#"{{"fear_and_greed": {{"score": {score}, "rating": "greed", "previous_close": {previous_close}}}, "fear_and_greed_historical": {{"one_week_ago": 40.2}}}}"#
    )
}

pub fn results_page(titles: &[&str]) -> String {
    titles
        .iter()
        .enumerate()
        .map(|(n, title)| {
            format!(
                r#"<div class="result"><a rel="nofollow" class="result__a" href="https://news.test/{n}">{title}</a></div>"#
            )
        })
        .collect()
}
