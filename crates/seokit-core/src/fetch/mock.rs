//! In-memory transport for tests

use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value as JsonValue;

use super::{HttpResponse, Transport};
use crate::error::FetchError;

/// Answers requests from canned routes matched by URL prefix; unmatched
/// URLs fail with a transport error. Every request is recorded.
#[derive(Default)]
pub struct MockTransport {
    routes: Vec<(String, Result<HttpResponse, FetchError>)>,
    calls: Mutex<Vec<(String, Duration)>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn route(mut self, prefix: &str, response: Result<HttpResponse, FetchError>) -> Self {
        self.routes.push((prefix.to_string(), response));
        self
    }

    pub fn html(status: u16, body: &str) -> Result<HttpResponse, FetchError> {
        Ok(HttpResponse {
            status,
            final_url: String::new(),
            content_type: Some("text/html; charset=utf-8".to_string()),
            body: body.to_string(),
        })
    }

    pub fn json(status: u16, body: &JsonValue) -> Result<HttpResponse, FetchError> {
        Ok(HttpResponse {
            status,
            final_url: String::new(),
            content_type: Some("application/json".to_string()),
            body: body.to_string(),
        })
    }

    /// `"GET url"` / `"POST url"` per request, in order
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().iter().map(|(call, _)| call.clone()).collect()
    }

    /// Timeout passed with each request, in order
    pub fn timeouts(&self) -> Vec<Duration> {
        self.calls.lock().unwrap().iter().map(|(_, timeout)| *timeout).collect()
    }

    fn respond(
        &self,
        method: &str,
        url: &str,
        timeout: Duration,
    ) -> Result<HttpResponse, FetchError> {
        self.calls.lock().unwrap().push((format!("{method} {url}"), timeout));
        let (_, response) = self
            .routes
            .iter()
            .find(|(prefix, _)| url.starts_with(prefix.as_str()))
            .ok_or_else(|| FetchError::Transport(format!("no route for {url}")))?;

        response.clone().map(|mut response| {
            if response.final_url.is_empty() {
                response.final_url = url.to_string();
            }
            response
        })
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn get(
        &self,
        url: &str,
        _headers: &[(&str, &str)],
        timeout: Duration,
    ) -> Result<HttpResponse, FetchError> {
        self.respond("GET", url, timeout)
    }

    async fn post_json(
        &self,
        url: &str,
        _body: &JsonValue,
        timeout: Duration,
    ) -> Result<HttpResponse, FetchError> {
        self.respond("POST", url, timeout)
    }
}
