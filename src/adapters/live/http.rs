//! Live adapter for the `JsonFetcher` port using reqwest.

use std::time::Duration;

use reqwest::header::ACCEPT;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::error::TransportError;
use crate::ports::http::{FetchFuture, JsonFetcher};

const JSON_API_MEDIA_TYPE: &str = "application/vnd.api+json";

/// Live fetcher that performs real HTTPS requests.
pub struct LiveJsonFetcher {
    client: Client,
    timeout: Duration,
}

impl LiveJsonFetcher {
    /// Creates a fetcher whose every request is bounded by `timeout`.
    #[must_use]
    pub fn new(timeout: Duration) -> Self {
        Self { client: Client::new(), timeout }
    }

    fn classify(&self, err: &reqwest::Error) -> TransportError {
        if err.is_timeout() {
            TransportError::timeout(self.timeout)
        } else {
            TransportError::Network { message: err.to_string() }
        }
    }
}

/// JSON:API error envelope returned by the REST API.
#[derive(Deserialize)]
struct ErrorEnvelope {
    #[serde(default)]
    errors: Vec<ErrorObject>,
    #[serde(default)]
    message: Option<String>,
}

/// A single entry of the `errors` array.
#[derive(Deserialize)]
struct ErrorObject {
    detail: Option<String>,
    title: Option<String>,
}

/// Picks the most descriptive text out of an upstream error payload.
fn error_detail(body: &str) -> Option<String> {
    let envelope: ErrorEnvelope = serde_json::from_str(body).ok()?;
    envelope
        .errors
        .into_iter()
        .find_map(|e| e.detail.or(e.title))
        .or(envelope.message)
}

impl JsonFetcher for LiveJsonFetcher {
    fn get_json(&self, url: &str, token: &str) -> FetchFuture<'_> {
        let url = url.to_string();
        let token = token.to_string();

        Box::pin(async move {
            debug!(%url, "GET");
            let response = self
                .client
                .get(&url)
                .bearer_auth(&token)
                .header(ACCEPT, JSON_API_MEDIA_TYPE)
                .timeout(self.timeout)
                .send()
                .await
                .map_err(|e| self.classify(&e))?;

            let status = response.status();
            let text = response.text().await.map_err(|e| self.classify(&e))?;

            if !status.is_success() {
                let detail = error_detail(&text).unwrap_or_else(|| {
                    status.canonical_reason().unwrap_or("request failed").to_string()
                });
                return Err(TransportError::Status { status: status.as_u16(), detail, body: text });
            }

            serde_json::from_str::<Value>(&text)
                .map_err(|e| TransportError::Decode { message: e.to_string() })
        })
    }
}
