//! `check`: one invocation, envelope printed to stdout.

use serde_json::{Map, Value};

use crate::handler::ReachabilityService;

/// Builds the request body from CLI flags.
///
/// A raw `--body` is passed through untouched. Otherwise only the flags that
/// were given become fields, so a missing `--severity` surfaces as the same
/// 400 an HTTP caller would see.
#[must_use]
pub fn request_body(url: Option<&str>, severity: Option<&str>, raw: Option<&str>) -> String {
    if let Some(raw) = raw {
        return raw.to_string();
    }
    let mut body = Map::new();
    if let Some(url) = url {
        body.insert("snykIssueUrl".into(), Value::from(url));
    }
    if let Some(severity) = severity {
        body.insert("severity".into(), Value::from(severity));
    }
    Value::Object(body).to_string()
}

/// Runs the check and prints the response envelope.
///
/// # Errors
///
/// Returns an error string when the response status is not 200.
pub async fn run(service: &ReachabilityService, body: &str) -> Result<(), String> {
    let response = service.handle(body).await;
    let rendered = serde_json::to_string_pretty(&response)
        .map_err(|e| format!("Failed to render response: {e}"))?;
    println!("{rendered}");

    if response.status == 200 {
        Ok(())
    } else {
        Err(format!("check failed with status {}", response.status))
    }
}
