//! Replaying adapter for the `JsonFetcher` port.

use std::sync::Mutex;

use serde_json::Value;

use super::{next_output, replay_result};
use crate::cassette::replayer::CassetteReplayer;
use crate::error::TransportError;
use crate::ports::http::{FetchFuture, JsonFetcher};

/// Serves recorded fetch results from a cassette, ignoring the network.
pub struct ReplayingJsonFetcher {
    replayer: Mutex<CassetteReplayer>,
}

impl ReplayingJsonFetcher {
    /// Creates a replaying fetcher backed by the given replayer.
    #[must_use]
    pub fn new(replayer: CassetteReplayer) -> Self {
        Self { replayer: Mutex::new(replayer) }
    }

    /// Number of fetches served so far.
    #[must_use]
    pub fn served(&self) -> usize {
        self.replayer.lock().expect("replayer lock poisoned").consumed()
    }
}

impl JsonFetcher for ReplayingJsonFetcher {
    fn get_json(&self, _url: &str, _token: &str) -> FetchFuture<'_> {
        let output = next_output(&self.replayer, "http", "get_json");
        Box::pin(async move { replay_result::<Value, TransportError>(output) })
    }
}
