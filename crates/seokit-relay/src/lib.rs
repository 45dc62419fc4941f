//! Fetch relay for seokit
//!
//! Fetches pages on behalf of clients that cannot (CORS, blocked user
//! agents) and hands back the raw HTML.
//!
//! - `POST /api/fetch-website` with `{"url": "..."}`
//! - `GET /api/health`

use std::env;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::json;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use seokit_core::fetch::{RELAY_FETCH_TIMEOUT, Transport, fetch_html_with_timeout};
use seokit_core::url_utils::parse_http_url;
use seokit_core::{FetchError, PageDocument};

pub const DEFAULT_PORT: u16 = 3001;
pub const DEFAULT_HOST: &str = "0.0.0.0";

/// Relay settings, read from the environment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelayConfig {
    pub host: String,
    pub port: u16,
    pub fetch_timeout: Duration,
    /// Accept broken TLS chains on target sites
    pub accept_invalid_certs: bool,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            fetch_timeout: RELAY_FETCH_TIMEOUT,
            accept_invalid_certs: false,
        }
    }
}

impl RelayConfig {
    /// `PORT`, `RELAY_HOST`, `RELAY_FETCH_TIMEOUT_SECS` and
    /// `RELAY_ACCEPT_INVALID_CERTS`; unset variables keep their defaults.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();

        if let Some(host) = lookup("RELAY_HOST").filter(|h| !h.trim().is_empty()) {
            config.host = host.trim().to_string();
        }
        if let Some(port) = lookup("PORT") {
            config.port = port
                .trim()
                .parse()
                .with_context(|| format!("invalid PORT '{port}'"))?;
        }
        if let Some(secs) = lookup("RELAY_FETCH_TIMEOUT_SECS") {
            let secs: u64 = secs
                .trim()
                .parse()
                .with_context(|| format!("invalid RELAY_FETCH_TIMEOUT_SECS '{secs}'"))?;
            anyhow::ensure!(secs > 0, "RELAY_FETCH_TIMEOUT_SECS must be positive");
            config.fetch_timeout = Duration::from_secs(secs);
        }
        if let Some(flag) = lookup("RELAY_ACCEPT_INVALID_CERTS") {
            config.accept_invalid_certs = matches!(
                flag.trim().to_ascii_lowercase().as_str(),
                "1" | "true" | "yes" | "on"
            );
        }
        Ok(config)
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Shared handler state
#[derive(Clone)]
pub struct AppState {
    transport: Arc<dyn Transport>,
    fetch_timeout: Duration,
}

impl AppState {
    pub fn new(transport: Arc<dyn Transport>, fetch_timeout: Duration) -> Self {
        Self {
            transport,
            fetch_timeout,
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route(
            "/api/fetch-website",
            post(fetch_website).fallback(method_not_allowed),
        )
        .route("/api/health", get(health))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Install the stderr log subscriber; `RUST_LOG` overrides the default filter.
pub fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("seokit=info,tower_http=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[derive(Debug, Deserialize)]
struct FetchRequest {
    #[serde(default)]
    url: Option<String>,
}

fn error_response(status: StatusCode, body: serde_json::Value) -> Response {
    (status, Json(body)).into_response()
}

async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok", "message": "Backend server is running" }))
}

async fn method_not_allowed() -> Response {
    error_response(
        StatusCode::METHOD_NOT_ALLOWED,
        json!({ "error": "Method not allowed" }),
    )
}

async fn fetch_website(
    State(state): State<AppState>,
    payload: Result<Json<FetchRequest>, JsonRejection>,
) -> Response {
    let url = match payload {
        Ok(Json(FetchRequest { url: Some(url) })) if !url.trim().is_empty() => url.trim().to_string(),
        Ok(_) => {
            return error_response(StatusCode::BAD_REQUEST, json!({ "error": "URL is required" }));
        }
        Err(rejection) => {
            return error_response(
                StatusCode::BAD_REQUEST,
                json!({ "error": format!("Invalid request body: {}", rejection.body_text()) }),
            );
        }
    };

    if let Err(err) = parse_http_url(&url) {
        return error_response(StatusCode::BAD_REQUEST, json!({ "error": err.to_string() }));
    }

    match fetch_html_with_timeout(state.transport.as_ref(), &url, state.fetch_timeout).await {
        Ok(document) => success_response(document),
        Err(err) => {
            tracing::warn!(url = %url, error = %err, "relay fetch failed");
            fetch_error_response(err)
        }
    }
}

fn success_response(document: PageDocument) -> Response {
    Json(json!({
        "success": true,
        "html": document.html,
        "url": document.final_url,
        "status": document.status_code,
    }))
    .into_response()
}

fn fetch_error_response(err: FetchError) -> Response {
    match err {
        FetchError::HttpStatus { status } => error_response(
            StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_GATEWAY),
            json!({ "error": format!("Website returned status {status}"), "status": status }),
        ),
        FetchError::EmptyBody { .. } => error_response(
            StatusCode::BAD_REQUEST,
            json!({ "error": "Unable to fetch valid HTML content from website" }),
        ),
        FetchError::Timeout(_) => error_response(
            StatusCode::GATEWAY_TIMEOUT,
            json!({ "error": "Request timeout - website took too long to respond" }),
        ),
        FetchError::InvalidUrl(message) => {
            error_response(StatusCode::BAD_REQUEST, json!({ "error": message }))
        }
        other => error_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            json!({ "error": "Failed to fetch website", "details": other.to_string() }),
        ),
    }
}

mod tests;
