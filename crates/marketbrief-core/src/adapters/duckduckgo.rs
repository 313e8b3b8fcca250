//! Headline search scraped from DuckDuckGo's HTML results page.
//!
//! Extraction is best-effort: the markup is third-party and unversioned, so
//! anything that does not look like a result anchor is skipped rather than
//! reported. Only transport failures and blank queries surface as errors.

use std::sync::{Arc, LazyLock};

use regex::{Captures, Regex};
use tracing::debug;

use crate::data_source::{NewsSource, SourceError, SourceFuture};
use crate::http_client::{HttpClient, HttpRequest};
use crate::{NewsItem, ProviderId};

const DEFAULT_ENDPOINT: &str = "https://html.duckduckgo.com/html/";

/// Appended to every query so results lean toward market coverage.
const QUERY_QUALIFIER: &str = "stock market";

static RESULT_ANCHOR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?is)<a\b([^>]*\bclass="[^"]*\bresult__a\b[^"]*"[^>]*)>(.*?)</a>"#)
        .expect("result anchor pattern is valid")
});
static HREF_ATTR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)\bhref="([^"]*)""#).expect("href pattern is valid"));
static REDIRECT_TARGET: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[?&]uddg=([^&]+)").expect("redirect pattern is valid"));
static INNER_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]*>").expect("tag pattern is valid"));
static ENTITY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"&(#[0-9]{1,7}|#[xX][0-9a-fA-F]{1,6}|[a-zA-Z]{2,8});").expect("entity pattern is valid")
});

/// News adapter for DuckDuckGo's no-JavaScript results page.
#[derive(Clone)]
pub struct DuckDuckGoNewsAdapter {
    http_client: Arc<dyn HttpClient>,
    endpoint: String,
}

impl DuckDuckGoNewsAdapter {
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

    fn search_url(&self, query: &str) -> String {
        let qualified = format!("{} {QUERY_QUALIFIER}", query.trim());
        format!(
            "{}?q={}&t=h_&iar=news&ia=news",
            self.endpoint,
            urlencoding::encode(&qualified)
        )
    }

    async fn fetch_results(&self, query: &str, count: usize) -> Result<Vec<NewsItem>, SourceError> {
        if query.trim().is_empty() {
            return Err(SourceError::invalid_request(
                ProviderId::Duckduckgo,
                "news query must not be empty",
            ));
        }
        if count == 0 {
            return Ok(Vec::new());
        }

        let request = HttpRequest::get(self.search_url(query));
        debug!(url = %request.url, count, "requesting headline search");

        let response = self
            .http_client
            .execute(request)
            .await
            .and_then(|response| response.error_for_status())
            .map_err(|error| SourceError::transport(ProviderId::Duckduckgo, &error))?;

        let items = extract_results(&response.body, count);
        debug!(found = items.len(), "parsed headline results");
        Ok(items)
    }
}

impl NewsSource for DuckDuckGoNewsAdapter {
    fn search<'a>(&'a self, query: &'a str, count: usize) -> SourceFuture<'a, Vec<NewsItem>> {
        Box::pin(self.fetch_results(query, count))
    }
}

/// Scans result-title anchors in document order, keeping at most `count`.
pub fn extract_results(html: &str, count: usize) -> Vec<NewsItem> {
    RESULT_ANCHOR
        .captures_iter(html)
        .filter_map(|captures| {
            let attributes = captures.get(1)?.as_str();
            let href = HREF_ATTR.captures(attributes)?.get(1)?.as_str();
            let title = decode_entities(&INNER_TAG.replace_all(captures.get(2)?.as_str(), ""));
            let title = title.trim();
            if title.is_empty() {
                return None;
            }

            Some(NewsItem {
                title: title.to_owned(),
                url: resolve_redirect(&decode_entities(href)),
            })
        })
        .take(count)
        .collect()
}

/// Unwraps `/l/?uddg=<encoded>` redirect links to their destination.
fn resolve_redirect(href: &str) -> String {
    if let Some(target) = REDIRECT_TARGET
        .captures(href)
        .and_then(|captures| captures.get(1))
        .and_then(|encoded| urlencoding::decode(encoded.as_str()).ok())
    {
        return target.into_owned();
    }

    if href.starts_with("//") {
        format!("https:{href}")
    } else {
        href.to_owned()
    }
}

fn decode_entities(text: &str) -> String {
    ENTITY
        .replace_all(text, |captures: &Captures<'_>| {
            let entity = &captures[1];
            let decoded = match entity {
                "amp" => Some('&'),
                "quot" => Some('"'),
                "apos" => Some('\''),
                "lt" => Some('<'),
                "gt" => Some('>'),
                "nbsp" => Some(' '),
                _ => entity
                    .strip_prefix("#x")
                    .or_else(|| entity.strip_prefix("#X"))
                    .map(|hex| u32::from_str_radix(hex, 16))
                    .or_else(|| entity.strip_prefix('#').map(str::parse::<u32>))
                    .and_then(Result::ok)
                    .and_then(char::from_u32),
            };

            decoded.map_or_else(|| captures[0].to_owned(), String::from)
        })
        .into_owned()
}
