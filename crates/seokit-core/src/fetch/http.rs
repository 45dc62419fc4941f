//! reqwest-backed [`Transport`]

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use serde_json::Value as JsonValue;

use super::{HttpResponse, Transport};
use crate::error::FetchError;

const MAX_REDIRECTS: usize = 10;

#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new() -> Result<Self, FetchError> {
        Self::build(false)
    }

    /// Skip TLS certificate validation. Many small sites serve broken
    /// chains; only the relay should use this.
    pub fn accepting_invalid_certs() -> Result<Self, FetchError> {
        Self::build(true)
    }

    fn build(accept_invalid_certs: bool) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS))
            .danger_accept_invalid_certs(accept_invalid_certs)
            .build()
            .map_err(|e| FetchError::Transport(e.to_string()))?;
        Ok(Self { client })
    }

    /// Wrap an already configured client
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }

    async fn read(
        response: Result<reqwest::Response, reqwest::Error>,
        timeout: Duration,
    ) -> Result<HttpResponse, FetchError> {
        let response = response.map_err(|e| map_error(e, timeout))?;
        let status = response.status().as_u16();
        let final_url = response.url().to_string();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let body = response.text().await.map_err(|e| map_error(e, timeout))?;

        Ok(HttpResponse {
            status,
            final_url,
            content_type,
            body,
        })
    }
}

fn map_error(err: reqwest::Error, timeout: Duration) -> FetchError {
    if err.is_timeout() {
        FetchError::Timeout(timeout.as_secs())
    } else {
        FetchError::Transport(err.to_string())
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn get(
        &self,
        url: &str,
        headers: &[(&str, &str)],
        timeout: Duration,
    ) -> Result<HttpResponse, FetchError> {
        let mut request = self.client.get(url).timeout(timeout);
        for (name, value) in headers {
            request = request.header(*name, *value);
        }
        Self::read(request.send().await, timeout).await
    }

    async fn post_json(
        &self,
        url: &str,
        body: &JsonValue,
        timeout: Duration,
    ) -> Result<HttpResponse, FetchError> {
        let response = self.client.post(url).timeout(timeout).json(body).send().await;
        Self::read(response, timeout).await
    }
}
