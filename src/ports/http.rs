//! JSON-over-HTTPS port for the upstream REST API.

use std::future::Future;
use std::pin::Pin;

use serde_json::Value;

use crate::error::TransportError;

/// Boxed future type alias used by [`JsonFetcher`] to keep the trait dyn-compatible.
pub type FetchFuture<'a> = Pin<Box<dyn Future<Output = Result<Value, TransportError>> + Send + 'a>>;

/// Fetches one JSON document with bearer-token authentication.
///
/// Abstracting the transport lets the orchestrator run against recorded
/// cassettes or scripted responses without touching the network.
pub trait JsonFetcher: Send + Sync {
    /// Issues a single authenticated `GET` for `url` and parses the body.
    ///
    /// # Errors
    ///
    /// Returns a [`TransportError`] on timeout, connection failure,
    /// non-success status, or an unparseable body.
    fn get_json(&self, url: &str, token: &str) -> FetchFuture<'_>;
}
