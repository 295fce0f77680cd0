//! Recording adapter for the `JsonFetcher` port.

use std::sync::{Arc, Mutex};

use serde::Serialize;

use super::record_result;
use crate::cassette::recorder::CassetteRecorder;
use crate::ports::http::{FetchFuture, JsonFetcher};

/// Records fetches while delegating to an inner implementation.
///
/// Only the URL is recorded; the bearer token never reaches the cassette.
pub struct RecordingJsonFetcher {
    inner: Box<dyn JsonFetcher>,
    recorder: Arc<Mutex<CassetteRecorder>>,
}

impl RecordingJsonFetcher {
    /// Creates a new recording fetcher wrapping the given implementation.
    pub fn new(inner: Box<dyn JsonFetcher>, recorder: Arc<Mutex<CassetteRecorder>>) -> Self {
        Self { inner, recorder }
    }
}

#[derive(Serialize)]
struct GetJsonInput {
    url: String,
}

impl JsonFetcher for RecordingJsonFetcher {
    fn get_json(&self, url: &str, token: &str) -> FetchFuture<'_> {
        let input = GetJsonInput { url: url.to_string() };
        let token = token.to_string();

        Box::pin(async move {
            let result = self.inner.get_json(&input.url, &token).await;
            record_result(&self.recorder, "http", "get_json", &input, &result);
            result
        })
    }
}
