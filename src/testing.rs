//! In-memory `JsonFetcher` for unit tests.

use std::collections::VecDeque;
use std::sync::Mutex;

use serde_json::Value;

use crate::error::TransportError;
use crate::ports::http::{FetchFuture, JsonFetcher};

/// Serves canned responses in order and remembers every requested URL.
pub(crate) struct ScriptedFetcher {
    responses: Mutex<VecDeque<Result<Value, TransportError>>>,
    calls: Mutex<Vec<(String, String)>>,
}

impl ScriptedFetcher {
    pub(crate) fn new(responses: Vec<Result<Value, TransportError>>) -> Self {
        Self { responses: Mutex::new(responses.into()), calls: Mutex::new(Vec::new()) }
    }

    /// Requested URLs, in call order.
    pub(crate) fn urls(&self) -> Vec<String> {
        self.calls.lock().unwrap().iter().map(|(url, _)| url.clone()).collect()
    }

    /// Tokens sent with each request, in call order.
    pub(crate) fn tokens(&self) -> Vec<String> {
        self.calls.lock().unwrap().iter().map(|(_, token)| token.clone()).collect()
    }
}

impl JsonFetcher for ScriptedFetcher {
    fn get_json(&self, url: &str, token: &str) -> FetchFuture<'_> {
        self.calls.lock().unwrap().push((url.to_string(), token.to_string()));
        let next = self
            .responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| panic!("no scripted response left for {url}"));
        Box::pin(async move { next })
    }
}

/// One issue page in the REST envelope shape.
pub(crate) fn issue_page(items: Vec<Value>, next: Option<&str>) -> Value {
    match next {
        Some(link) => serde_json::json!({ "data": items, "links": { "next": link } }),
        None => serde_json::json!({ "data": items, "links": {} }),
    }
}

/// One issue item with the given id, key and coordinate reachabilities.
pub(crate) fn issue(id: &str, key: &str, reachability: &[&str]) -> Value {
    let coordinates: Vec<Value> = reachability
        .iter()
        .map(|r| serde_json::json!({ "is_fixable_snyk": false, "reachability": r }))
        .collect();
    serde_json::json!({
        "id": id,
        "type": "issue",
        "attributes": { "key": key, "title": "Prototype Pollution", "coordinates": coordinates }
    })
}
