//! Contract every production adapter honors regardless of provider: a
//! non-success status or a transport failure is a `Transport` error carrying
//! the transport message, and no provider payload can panic an adapter.

#[path = "../support/mod.rs"]
mod support;

use std::sync::Arc;

use marketbrief_core::{
    CnnFearGreedAdapter, DuckDuckGoNewsAdapter, FearGreedSource, HttpError, NewsSource,
    QuoteSource, SourceError, SourceErrorKind, Symbol, YahooChartAdapter,
};

use support::{chart_body, fear_greed_body, RoutedHttpClient, CNN_ENDPOINT, DDG_ENDPOINT, YAHOO_BASE};

#[derive(Clone, Copy, Debug)]
enum Provider {
    Yahoo,
    Cnn,
    Duckduckgo,
}

const PROVIDERS: [Provider; 3] = [Provider::Yahoo, Provider::Cnn, Provider::Duckduckgo];

/// Drives one call against `provider`, discarding the success value.
async fn call(provider: Provider, client: Arc<RoutedHttpClient>) -> Result<(), SourceError> {
    let nvda = Symbol::parse("NVDA").expect("valid symbol");
    let outcome = match provider {
        Provider::Yahoo => YahooChartAdapter::new(client)
            .with_base_url(YAHOO_BASE)
            .quote(&nvda)
            .await
            .map(drop),
        Provider::Cnn => CnnFearGreedAdapter::new(client)
            .with_endpoint(CNN_ENDPOINT)
            .fear_greed()
            .await
            .map(drop),
        Provider::Duckduckgo => DuckDuckGoNewsAdapter::new(client)
            .with_endpoint(DDG_ENDPOINT)
            .search("semiconductor", 4)
            .await
            .map(drop),
    };
    outcome
}

#[tokio::test]
async fn non_success_status_is_a_transport_error_for_every_provider() {
    for provider in PROVIDERS {
        let client = Arc::new(RoutedHttpClient::new().respond("", 503, "upstream busy"));

        let error = call(provider, client).await.expect_err("503 must fail");

        assert_eq!(error.kind(), SourceErrorKind::Transport, "{provider:?}");
        assert_eq!(error.code(), "source.transport");
        assert_eq!(error.message(), "HTTP 503: upstream busy", "{provider:?}");
    }
}

#[tokio::test]
async fn long_error_bodies_are_truncated_to_200_characters() {
    for provider in PROVIDERS {
        let client = Arc::new(RoutedHttpClient::new().respond("", 500, "x".repeat(1_000)));

        let error = call(provider, client).await.expect_err("500 must fail");

        assert_eq!(error.message().len(), "HTTP 500: ".len() + 200, "{provider:?}");
    }
}

#[tokio::test]
async fn timeouts_and_connection_failures_keep_their_message() {
    for provider in PROVIDERS {
        for failure in [
            HttpError::timeout("request timeout"),
            HttpError::connection("connection refused"),
        ] {
            let expected = failure.message().to_owned();
            let client = Arc::new(RoutedHttpClient::new().fail("", failure));

            let error = call(provider, client).await.expect_err("transport failure");

            assert_eq!(error.kind(), SourceErrorKind::Transport, "{provider:?}");
            assert_eq!(error.message(), expected);
        }
    }
}

#[tokio::test]
async fn garbage_payloads_never_panic() {
    for body in ["", "null", "<html>captcha</html>", r#"{"chart": {"result": []}}"#, "[1,2,3]"] {
        for provider in PROVIDERS {
            let client = Arc::new(RoutedHttpClient::new().respond("", 200, body));

            match call(provider, client).await {
                Ok(()) => {}
                Err(error) => assert_eq!(error.kind(), SourceErrorKind::Parse, "{provider:?} {body:?}"),
            }
        }
    }
}

#[tokio::test]
async fn well_formed_payloads_succeed_for_every_provider() {
    let client = Arc::new(
        RoutedHttpClient::new()
            .respond(YAHOO_BASE, 200, chart_body("NVDA", 120.0, 100.0))
            .respond(CNN_ENDPOINT, 200, fear_greed_body(50.0, 50.0))
            .respond(DDG_ENDPOINT, 200, ""),
    );

    for provider in PROVIDERS {
        call(provider, client.clone())
            .await
            .unwrap_or_else(|error| panic!("{provider:?} failed: {error}"));
    }
    assert_eq!(client.requested_urls().len(), 3);
}

#[tokio::test]
async fn news_count_caps_results_and_zero_skips_the_request() {
    let page = support::results_page(&["one", "two", "three"]);
    let client = Arc::new(RoutedHttpClient::new().respond(DDG_ENDPOINT, 200, page));
    let adapter = DuckDuckGoNewsAdapter::new(client.clone()).with_endpoint(DDG_ENDPOINT);

    assert_eq!(adapter.search("chips", 2).await.expect("results").len(), 2);
    assert!(adapter.search("chips", 0).await.expect("empty").is_empty());
    assert_eq!(client.requested_urls().len(), 1);
}
