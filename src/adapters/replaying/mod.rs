//! Replaying adapters that serve recorded interactions.

pub mod http;

use std::sync::Mutex;

use serde::de::DeserializeOwned;

use crate::cassette::replayer::CassetteReplayer;

pub use http::ReplayingJsonFetcher;

/// Pull the next recorded output for `port::method`.
pub(crate) fn next_output(
    replayer: &Mutex<CassetteReplayer>,
    port: &str,
    method: &str,
) -> serde_json::Value {
    let mut guard = replayer.lock().expect("replayer lock poisoned");
    guard.next_interaction(port, method).output
}

/// Decode a recorded `{"Ok": ..}` / `{"Err": ..}` output.
///
/// # Panics
///
/// Panics if the recorded output does not have the expected shape.
pub(crate) fn replay_result<T, E>(output: serde_json::Value) -> Result<T, E>
where
    T: DeserializeOwned,
    E: DeserializeOwned,
{
    serde_json::from_value::<Result<T, E>>(output)
        .unwrap_or_else(|e| panic!("recorded output is not a valid Ok/Err result: {e}"))
}
