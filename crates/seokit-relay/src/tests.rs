#[cfg(test)]
mod relay_tests {
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use http_body_util::BodyExt;
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use crate::{AppState, RelayConfig, router};
    use seokit_core::FetchError;
    use seokit_core::fetch::{HttpResponse, Transport};

    /// Answers every GET with the same canned result
    struct StubTransport {
        reply: Result<HttpResponse, FetchError>,
        seen: Mutex<Vec<(String, Duration)>>,
    }

    impl StubTransport {
        fn new(reply: Result<HttpResponse, FetchError>) -> Arc<Self> {
            Arc::new(Self {
                reply,
                seen: Mutex::new(Vec::new()),
            })
        }

        fn page(status: u16, body: &str) -> Arc<Self> {
            Self::new(Ok(HttpResponse {
                status,
                final_url: "https://example.com/final".to_string(),
                content_type: Some("text/html".to_string()),
                body: body.to_string(),
            }))
        }
    }

    #[async_trait]
    impl Transport for StubTransport {
        async fn get(
            &self,
            url: &str,
            _headers: &[(&str, &str)],
            timeout: Duration,
        ) -> Result<HttpResponse, FetchError> {
            self.seen.lock().unwrap().push((url.to_string(), timeout));
            self.reply.clone()
        }

        async fn post_json(
            &self,
            _url: &str,
            _body: &Value,
            _timeout: Duration,
        ) -> Result<HttpResponse, FetchError> {
            Err(FetchError::Transport("relay never posts".into()))
        }
    }

    fn app(transport: Arc<StubTransport>) -> axum::Router {
        router(AppState::new(transport, Duration::from_secs(15)))
    }

    fn post(body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/api/fetch-website")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn send(app: axum::Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    fn long_page() -> String {
        format!("<html><body>{}</body></html>", "content ".repeat(30))
    }

    #[tokio::test]
    async fn test_health() {
        let request = Request::builder()
            .uri("/api/health")
            .body(Body::empty())
            .unwrap();
        let (status, body) = send(app(StubTransport::page(200, "")), request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"status": "ok", "message": "Backend server is running"}));
    }

    #[tokio::test]
    async fn test_fetch_success() {
        let transport = StubTransport::page(200, &long_page());
        let (status, body) = send(app(transport.clone()), post(r#"{"url": "https://example.com"}"#)).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert_eq!(body["html"], long_page());
        assert_eq!(body["url"], "https://example.com/final");
        assert_eq!(body["status"], 200);

        let seen = transport.seen.lock().unwrap().clone();
        assert_eq!(seen, vec![("https://example.com".to_string(), Duration::from_secs(15))]);
    }

    #[tokio::test]
    async fn test_missing_url() {
        let transport = StubTransport::page(200, &long_page());
        let (status, body) = send(app(transport.clone()), post("{}")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "URL is required");
        assert!(transport.seen.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_invalid_url() {
        let (status, body) = send(
            app(StubTransport::page(200, &long_page())),
            post(r#"{"url": "ftp://example.com"}"#),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().contains("unsupported scheme"));
    }

    #[tokio::test]
    async fn test_malformed_body() {
        let (status, body) = send(app(StubTransport::page(200, "")), post("{not json")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().starts_with("Invalid request body"));
    }

    #[tokio::test]
    async fn test_get_is_not_allowed() {
        let request = Request::builder()
            .uri("/api/fetch-website")
            .body(Body::empty())
            .unwrap();
        let (status, body) = send(app(StubTransport::page(200, "")), request).await;
        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(body["error"], "Method not allowed");
    }

    #[tokio::test]
    async fn test_upstream_status_passes_through() {
        let (status, body) = send(
            app(StubTransport::page(503, &long_page())),
            post(r#"{"url": "https://example.com"}"#),
        )
        .await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body, json!({"error": "Website returned status 503", "status": 503}));
    }

    #[tokio::test]
    async fn test_short_body() {
        let (status, body) = send(
            app(StubTransport::page(200, "<p>tiny</p>")),
            post(r#"{"url": "https://example.com"}"#),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Unable to fetch valid HTML content from website");
    }

    #[tokio::test]
    async fn test_timeout() {
        let (status, body) = send(
            app(StubTransport::new(Err(FetchError::Timeout(15)))),
            post(r#"{"url": "https://example.com"}"#),
        )
        .await;
        assert_eq!(status, StatusCode::GATEWAY_TIMEOUT);
        assert!(body["error"].as_str().unwrap().contains("timeout"));
    }

    #[tokio::test]
    async fn test_transport_failure() {
        let (status, body) = send(
            app(StubTransport::new(Err(FetchError::Transport("dns error".into())))),
            post(r#"{"url": "https://example.com"}"#),
        )
        .await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "Failed to fetch website");
        assert!(body["details"].as_str().unwrap().contains("dns error"));
    }

    #[test]
    fn test_config_from_lookup() {
        let config = RelayConfig::from_lookup(|key| match key {
            "PORT" => Some("8080".into()),
            "RELAY_FETCH_TIMEOUT_SECS" => Some("20".into()),
            "RELAY_ACCEPT_INVALID_CERTS" => Some("true".into()),
            _ => None,
        })
        .unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.fetch_timeout, Duration::from_secs(20));
        assert!(config.accept_invalid_certs);
        assert_eq!(config.bind_addr(), "0.0.0.0:8080");

        assert_eq!(RelayConfig::from_lookup(|_| None).unwrap(), RelayConfig::default());
        assert!(RelayConfig::from_lookup(|k| (k == "PORT").then(|| "http".into())).is_err());
        assert!(
            RelayConfig::from_lookup(|k| (k == "RELAY_FETCH_TIMEOUT_SECS").then(|| "0".into()))
                .is_err()
        );
    }
}
