//! Public CORS proxies, tried in order when the relay is unavailable

use serde_json::Value as JsonValue;
use url::form_urlencoded::byte_serialize;

use super::{MIN_HTML_CHARS, REMOTE_TIMEOUT, Transport};
use crate::error::FetchError;

const PROXY_HEADERS: &[(&str, &str)] = &[
    (
        "Accept",
        "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8",
    ),
    (
        "User-Agent",
        "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36",
    ),
];

/// How a proxy is addressed and how it wraps the page in JSON
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProxyKind {
    /// `<base>/get?url=<encoded>`, JSON `{contents}`
    AllOrigins,
    /// `<base>/?url=<encoded>`, JSON `{contents}` or `{text}`
    TextsNow,
    /// `<base>/<raw url>`, raw body or JSON string / `{contents}`
    CorsAnywhere,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProxyConfig {
    pub base_url: String,
    pub kind: ProxyKind,
}

impl ProxyConfig {
    pub fn new(base_url: impl Into<String>, kind: ProxyKind) -> Self {
        Self {
            base_url: base_url.into(),
            kind,
        }
    }

    /// Host part of the base URL, for log lines
    pub fn host(&self) -> &str {
        self.base_url
            .split("://")
            .nth(1)
            .and_then(|rest| rest.split('/').next())
            .unwrap_or(&self.base_url)
    }

    pub fn request_url(&self, target: &str) -> String {
        let base = self.base_url.trim_end_matches('/');
        let encoded: String = byte_serialize(target.as_bytes()).collect();
        match self.kind {
            ProxyKind::AllOrigins => format!("{base}/get?url={encoded}"),
            ProxyKind::TextsNow => format!("{base}/?url={encoded}"),
            ProxyKind::CorsAnywhere => format!("{base}/{target}"),
        }
    }

    /// Pull the page HTML out of a JSON proxy response
    pub fn extract(&self, data: &JsonValue) -> Option<String> {
        let field = |name: &str| data.get(name).and_then(JsonValue::as_str);
        let html = match self.kind {
            ProxyKind::AllOrigins => field("contents"),
            ProxyKind::TextsNow => field("contents").or_else(|| field("text")),
            ProxyKind::CorsAnywhere => data.as_str().or_else(|| field("contents")),
        };
        html.map(str::to_string)
    }
}

/// The built-in proxy list, in the order they are tried
pub fn default_proxies() -> Vec<ProxyConfig> {
    vec![
        ProxyConfig::new("https://api.allorigins.win", ProxyKind::AllOrigins),
        ProxyConfig::new("https://textsnow.herokuapp.com", ProxyKind::TextsNow),
        ProxyConfig::new("https://cors-anywhere.herokuapp.com", ProxyKind::CorsAnywhere),
    ]
}

/// Try each proxy in order; the first one yielding a real page wins.
pub async fn fetch_via_proxies(
    transport: &dyn Transport,
    url: &str,
    proxies: &[ProxyConfig],
) -> Result<String, FetchError> {
    let mut failures = Vec::new();

    for proxy in proxies {
        match fetch_through(transport, proxy, url).await {
            Ok(html) => {
                tracing::info!(proxy = proxy.host(), "fetched via proxy");
                return Ok(html);
            }
            Err(err) => {
                tracing::info!(proxy = proxy.host(), error = %err, "proxy failed");
                failures.push(format!("{}: {err}", proxy.host()));
            }
        }
    }

    let reason = if failures.is_empty() {
        "no proxies configured".to_string()
    } else {
        format!("proxies: {}", failures.join(", "))
    };
    Err(FetchError::AllProxiesFailed { reason })
}

async fn fetch_through(
    transport: &dyn Transport,
    proxy: &ProxyConfig,
    url: &str,
) -> Result<String, FetchError> {
    let response = transport
        .get(&proxy.request_url(url), PROXY_HEADERS, REMOTE_TIMEOUT)
        .await?;

    if !response.is_success() {
        return Err(FetchError::HttpStatus {
            status: response.status,
        });
    }

    let html = if response.is_json() {
        let data: JsonValue = serde_json::from_str(&response.body)
            .map_err(|e| FetchError::Transport(format!("invalid JSON: {e}")))?;
        proxy.extract(&data).unwrap_or_default()
    } else {
        response.body
    };

    let length = html.chars().count();
    if length < MIN_HTML_CHARS {
        return Err(FetchError::EmptyBody { length });
    }
    Ok(html)
}
