use serde::Deserialize;

use super::{MIN_HTML_CHARS, RELAY_CLIENT_TIMEOUT, Transport};
use crate::error::FetchError;

/// Where `seokit-relay` listens by default
pub const DEFAULT_RELAY_ENDPOINT: &str = "http://localhost:3001/api/fetch-website";

#[derive(Debug, Deserialize)]
struct RelayReply {
    #[serde(default)]
    html: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

/// Ask a running relay to fetch `url` on our behalf
pub async fn fetch_via_relay(
    transport: &dyn Transport,
    endpoint: &str,
    url: &str,
) -> Result<String, FetchError> {
    let body = serde_json::json!({ "url": url });
    let response = transport.post_json(endpoint, &body, RELAY_CLIENT_TIMEOUT).await?;

    if !response.is_success() {
        tracing::debug!(status = response.status, body = %response.body, "relay refused");
        return Err(FetchError::HttpStatus {
            status: response.status,
        });
    }

    let reply: RelayReply = serde_json::from_str(&response.body)
        .map_err(|e| FetchError::Transport(format!("invalid relay reply: {e}")))?;

    if let Some(error) = reply.error {
        return Err(FetchError::Transport(error));
    }

    // strictly longer than the floor
    let html = reply.html.unwrap_or_default();
    let length = html.chars().count();
    if length <= MIN_HTML_CHARS {
        return Err(FetchError::EmptyBody { length });
    }
    Ok(html)
}

#[cfg(test)]
mod tests {
    use super::super::mock::MockTransport;
    use super::*;

    const ENDPOINT: &str = "http://relay.test/api/fetch-website";

    #[tokio::test]
    async fn returns_relay_html() {
        let html = "<p>".repeat(40);
        let transport = MockTransport::new().route(
            ENDPOINT,
            MockTransport::json(200, &serde_json::json!({"success": true, "html": html})),
        );

        let fetched = fetch_via_relay(&transport, ENDPOINT, "https://example.com")
            .await
            .unwrap();
        assert_eq!(fetched, html);
    }

    #[tokio::test]
    async fn waits_longer_than_the_relay_fetch() {
        let html = "x".repeat(150);
        let transport = MockTransport::new().route(
            ENDPOINT,
            MockTransport::json(200, &serde_json::json!({"html": html})),
        );

        fetch_via_relay(&transport, ENDPOINT, "https://example.com")
            .await
            .unwrap();
        assert_eq!(transport.timeouts(), vec![RELAY_CLIENT_TIMEOUT]);
        assert!(RELAY_CLIENT_TIMEOUT > super::super::RELAY_FETCH_TIMEOUT);
    }

    #[tokio::test]
    async fn needs_more_than_the_minimum_length() {
        let transport = MockTransport::new()
            .route(
                "http://exact.test",
                MockTransport::json(200, &serde_json::json!({"html": "x".repeat(MIN_HTML_CHARS)})),
            )
            .route(
                "http://longer.test",
                MockTransport::json(200, &serde_json::json!({"html": "x".repeat(MIN_HTML_CHARS + 1)})),
            );

        let url = "https://example.com";
        assert_eq!(
            fetch_via_relay(&transport, "http://exact.test", url).await,
            Err(FetchError::EmptyBody { length: MIN_HTML_CHARS })
        );
        assert!(fetch_via_relay(&transport, "http://longer.test", url).await.is_ok());
    }

    #[tokio::test]
    async fn maps_relay_failures() {
        let transport = MockTransport::new()
            .route(
                "http://short.test",
                MockTransport::json(200, &serde_json::json!({"html": "<p/>"})),
            )
            .route("http://garbage.test", MockTransport::html(200, "not json"))
            .route(
                "http://gone.test",
                MockTransport::json(404, &serde_json::json!({"error": "not found", "status": 404})),
            )
            .route("http://slow.test", Err(FetchError::Timeout(10)));

        let url = "https://example.com";
        assert_eq!(
            fetch_via_relay(&transport, "http://short.test", url).await,
            Err(FetchError::EmptyBody { length: 4 })
        );
        assert!(matches!(
            fetch_via_relay(&transport, "http://garbage.test", url).await,
            Err(FetchError::Transport(_))
        ));
        assert_eq!(
            fetch_via_relay(&transport, "http://gone.test", url).await,
            Err(FetchError::HttpStatus { status: 404 })
        );
        assert_eq!(
            fetch_via_relay(&transport, "http://slow.test", url).await,
            Err(FetchError::Timeout(10))
        );
    }
}
