//! Fetching page HTML: the relay fetch, the relay client and the proxy chain
//!
//! All network access goes through the [`Transport`] trait. With the
//! `network` feature, [`ReqwestTransport`] provides the real implementation.

mod proxy;
mod relay_client;

#[cfg(feature = "network")]
mod http;

#[cfg(test)]
pub(crate) mod mock;

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value as JsonValue;

use crate::error::FetchError;
use crate::types::PageDocument;
use crate::url_utils::parse_http_url;

pub use proxy::{ProxyConfig, ProxyKind, default_proxies, fetch_via_proxies};
pub use relay_client::{DEFAULT_RELAY_ENDPOINT, fetch_via_relay};

#[cfg(feature = "network")]
pub use http::ReqwestTransport;

/// Shortest body accepted as a real page
pub const MIN_HTML_CHARS: usize = 100;

/// Timeout for the relay's own fetch of the target page
pub const RELAY_FETCH_TIMEOUT: Duration = Duration::from_secs(15);

/// Timeout for proxies and third-party data providers
pub const REMOTE_TIMEOUT: Duration = Duration::from_secs(10);

/// Timeout for a call to the relay, longer than the relay's own page fetch
pub const RELAY_CLIENT_TIMEOUT: Duration =
    Duration::from_secs(RELAY_FETCH_TIMEOUT.as_secs() + REMOTE_TIMEOUT.as_secs());

/// Desktop Chrome user agent presented to target sites
pub const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Headers of a top-level browser navigation.
///
/// `Accept-Encoding` and `Connection` are left to the HTTP client.
pub const NAVIGATION_HEADERS: &[(&str, &str)] = &[
    ("User-Agent", BROWSER_USER_AGENT),
    (
        "Accept",
        "text/html,application/xhtml+xml,application/xml;q=0.9,image/avif,image/webp,image/apng,*/*;q=0.8",
    ),
    ("Accept-Language", "en-US,en;q=0.9"),
    ("DNT", "1"),
    ("Upgrade-Insecure-Requests", "1"),
    ("Sec-Fetch-Dest", "document"),
    ("Sec-Fetch-Mode", "navigate"),
    ("Sec-Fetch-Site", "none"),
    ("Cache-Control", "max-age=0"),
];

/// Headers for JSON APIs
pub const JSON_HEADERS: &[(&str, &str)] = &[
    ("Accept", "application/json"),
    ("User-Agent", "Mozilla/5.0 (Windows NT 10.0; Win64; x64)"),
];

/// A fully read HTTP response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub final_url: String,
    pub content_type: Option<String>,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn is_json(&self) -> bool {
        self.content_type
            .as_deref()
            .is_some_and(|ct| ct.to_ascii_lowercase().contains("application/json"))
    }
}

/// Outbound HTTP
#[async_trait]
pub trait Transport: Send + Sync {
    /// GET `url`, following redirects, aborting after `timeout`
    async fn get(
        &self,
        url: &str,
        headers: &[(&str, &str)],
        timeout: Duration,
    ) -> Result<HttpResponse, FetchError>;

    /// POST a JSON body to `url`, aborting after `timeout`
    async fn post_json(
        &self,
        url: &str,
        body: &JsonValue,
        timeout: Duration,
    ) -> Result<HttpResponse, FetchError>;
}

/// GET a JSON document; non-2xx and unparsable bodies are errors
pub async fn get_json(transport: &dyn Transport, url: &str) -> Result<JsonValue, FetchError> {
    let response = transport.get(url, JSON_HEADERS, REMOTE_TIMEOUT).await?;
    if !response.is_success() {
        return Err(FetchError::HttpStatus {
            status: response.status,
        });
    }
    serde_json::from_str(&response.body)
        .map_err(|e| FetchError::Transport(format!("invalid JSON from {url}: {e}")))
}

/// Fetch a page directly, the way the relay does
pub async fn fetch_html(transport: &dyn Transport, url: &str) -> Result<PageDocument, FetchError> {
    fetch_html_with_timeout(transport, url, RELAY_FETCH_TIMEOUT).await
}

pub async fn fetch_html_with_timeout(
    transport: &dyn Transport,
    url: &str,
    timeout: Duration,
) -> Result<PageDocument, FetchError> {
    parse_http_url(url).map_err(|e| FetchError::InvalidUrl(e.to_string()))?;

    tracing::info!(url, "fetching page");
    let response = transport.get(url, NAVIGATION_HEADERS, timeout).await?;

    if !response.is_success() {
        return Err(FetchError::HttpStatus {
            status: response.status,
        });
    }

    let length = response.body.chars().count();
    if length < MIN_HTML_CHARS {
        return Err(FetchError::EmptyBody { length });
    }

    Ok(PageDocument {
        html: response.body,
        final_url: response.final_url,
        status_code: response.status,
    })
}

/// Relay first, then the proxy chain
#[derive(Clone)]
pub struct PageFetcher {
    transport: Arc<dyn Transport>,
    relay_endpoint: Option<String>,
    proxies: Vec<ProxyConfig>,
}

impl PageFetcher {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self {
            transport,
            relay_endpoint: Some(DEFAULT_RELAY_ENDPOINT.to_string()),
            proxies: default_proxies(),
        }
    }

    /// Use a different relay endpoint, or none to go straight to the proxies
    pub fn with_relay(mut self, endpoint: Option<String>) -> Self {
        self.relay_endpoint = endpoint;
        self
    }

    pub fn with_proxies(mut self, proxies: Vec<ProxyConfig>) -> Self {
        self.proxies = proxies;
        self
    }

    pub fn transport(&self) -> &Arc<dyn Transport> {
        &self.transport
    }

    /// Fetch page HTML for an absolute URL
    pub async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        parse_http_url(url).map_err(|e| FetchError::InvalidUrl(e.to_string()))?;

        let relay_failure = match &self.relay_endpoint {
            Some(endpoint) => {
                match fetch_via_relay(self.transport.as_ref(), endpoint, url).await {
                    Ok(html) => {
                        tracing::info!(url, "fetched via relay");
                        return Ok(html);
                    }
                    Err(err) if !err.is_fallback_candidate() => return Err(err),
                    Err(err) => {
                        tracing::warn!(url, error = %err, "relay fetch failed, falling back to proxies");
                        format!("relay: {err}")
                    }
                }
            }
            None => "relay disabled".to_string(),
        };

        match fetch_via_proxies(self.transport.as_ref(), url, &self.proxies).await {
            Ok(html) => Ok(html),
            Err(FetchError::AllProxiesFailed { reason }) => Err(FetchError::AllProxiesFailed {
                reason: format!("{relay_failure}; {reason}"),
            }),
            Err(other) => Err(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::mock::MockTransport;
    use super::*;

    fn page(len: usize) -> String {
        format!("<html><body>{}</body></html>", "a".repeat(len))
    }

    #[tokio::test]
    async fn fetch_html_accepts_long_pages() {
        let transport =
            MockTransport::new().route("https://example.com", MockTransport::html(200, &page(200)));

        let doc = fetch_html(&transport, "https://example.com").await.unwrap();
        assert_eq!(doc.status_code, 200);
        assert_eq!(doc.final_url, "https://example.com");
        assert!(doc.html.contains("aaaa"));
        assert_eq!(transport.calls(), vec!["GET https://example.com"]);
    }

    #[tokio::test]
    async fn fetch_html_maps_failures() {
        let transport = MockTransport::new()
            .route("https://down.example", MockTransport::html(503, &page(200)))
            .route("https://tiny.example", MockTransport::html(200, "<p>hi</p>"))
            .route("https://slow.example", Err(FetchError::Timeout(15)));

        assert_eq!(
            fetch_html(&transport, "https://down.example").await,
            Err(FetchError::HttpStatus { status: 503 })
        );
        assert_eq!(
            fetch_html(&transport, "https://tiny.example").await,
            Err(FetchError::EmptyBody { length: 9 })
        );
        assert_eq!(
            fetch_html(&transport, "https://slow.example").await,
            Err(FetchError::Timeout(15))
        );
    }

    #[tokio::test]
    async fn fetch_html_rejects_relative_urls() {
        let transport = MockTransport::new();
        let err = fetch_html(&transport, "example.com").await.unwrap_err();
        assert!(matches!(err, FetchError::InvalidUrl(_)));
        assert!(transport.calls().is_empty());
    }

    #[tokio::test]
    async fn page_fetcher_prefers_relay() {
        let relay_body = serde_json::json!({
            "success": true,
            "html": page(150),
            "url": "https://example.com/",
            "status": 200
        });
        let transport = Arc::new(
            MockTransport::new().route(DEFAULT_RELAY_ENDPOINT, MockTransport::json(200, &relay_body)),
        );

        let fetcher = PageFetcher::new(transport.clone());
        let html = fetcher.fetch("https://example.com/").await.unwrap();
        assert!(html.contains("aaaa"));
        assert_eq!(transport.calls(), vec![format!("POST {DEFAULT_RELAY_ENDPOINT}")]);
        assert_eq!(transport.timeouts(), vec![RELAY_CLIENT_TIMEOUT]);
    }

    #[tokio::test]
    async fn relay_503_falls_back_to_proxies() {
        let transport = Arc::new(
            MockTransport::new()
                .route(DEFAULT_RELAY_ENDPOINT, MockTransport::json(503, &serde_json::json!({})))
                .route(
                    "https://api.allorigins.win/",
                    MockTransport::json(200, &serde_json::json!({ "contents": page(200) })),
                ),
        );

        let fetcher = PageFetcher::new(transport.clone());
        let html = fetcher.fetch("https://example.com/").await.unwrap();
        assert!(html.contains("aaaa"));

        let calls = transport.calls();
        assert_eq!(calls.len(), 2);
        assert!(calls[1].starts_with("GET https://api.allorigins.win/get?url="));
    }

    #[tokio::test]
    async fn relay_503_and_dead_proxies_report_relay() {
        let transport = Arc::new(
            MockTransport::new()
                .route(DEFAULT_RELAY_ENDPOINT, MockTransport::json(503, &serde_json::json!({}))),
        );

        let err = PageFetcher::new(transport.clone())
            .fetch("https://example.com/")
            .await
            .unwrap_err();

        let FetchError::AllProxiesFailed { reason } = &err else {
            panic!("unexpected error {err:?}");
        };
        assert!(reason.contains("relay: website returned status 503"));
        assert!(err.to_string().contains("relay server may not be running"));
        // relay + every default proxy, each tried once
        assert_eq!(transport.calls().len(), 1 + default_proxies().len());
    }
}
