//! Recording adapters that capture interactions to cassettes.

pub mod http;

use std::sync::{Arc, Mutex};

use serde::Serialize;

use crate::cassette::recorder::CassetteRecorder;

pub use http::RecordingJsonFetcher;

/// Record a `Result<T, E>` interaction.
///
/// Mirror of `replaying::replay_result`. The result is stored in serde's
/// external tagging, `{"Ok": v}` or `{"Err": e}`, so both arms round-trip.
pub(crate) fn record_result<T, E, I>(
    recorder: &Arc<Mutex<CassetteRecorder>>,
    port: &str,
    method: &str,
    input: &I,
    result: &Result<T, E>,
) where
    T: Serialize,
    E: Serialize,
    I: Serialize,
{
    let input_json = serde_json::to_value(input).expect("failed to serialize recording input");
    let output_json = serde_json::to_value(result).expect("failed to serialize recording output");

    let mut guard = recorder.lock().expect("recorder lock poisoned");
    guard.record(port, method, input_json, output_json);
}
