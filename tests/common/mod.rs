//! Shared fixtures for integration tests.

#![allow(dead_code)]

use serde_json::{json, Value};

pub const PROJECT: &str = "11111111-2222-3333-4444-555555555555";
pub const ISSUE_KEY: &str = "SNYK-JS-FOO-123";

/// Tracker URL for `org` pointing at [`PROJECT`] / [`ISSUE_KEY`].
pub fn tracker_url(org: &str) -> String {
    format!("https://app.snyk.io/org/{org}/project/{PROJECT}#issue-{ISSUE_KEY}")
}

/// Request body as the gateway receives it.
pub fn request_body(org: &str, severity: &str) -> String {
    json!({ "snykIssueUrl": tracker_url(org), "severity": severity }).to_string()
}

/// Organization lookup envelope with one match.
pub fn org_envelope(id: &str, slug: &str) -> Value {
    json!({
        "data": [{ "id": id, "type": "org", "attributes": { "slug": slug, "name": "Acme Inc" } }],
        "links": {}
    })
}

/// Issue collection item.
pub fn issue(id: &str, key: &str, reachability: &[&str]) -> Value {
    let coordinates: Vec<Value> = reachability
        .iter()
        .map(|r| {
            json!({
                "is_fixable_snyk": true,
                "is_upgradeable": true,
                "reachability": r,
                "representations": [{ "dependency": { "package_name": "foo", "package_version": "1.0.0" } }]
            })
        })
        .collect();
    json!({
        "id": id,
        "type": "issue",
        "attributes": {
            "key": key,
            "title": "Prototype Pollution",
            "effective_severity_level": "critical",
            "coordinates": coordinates
        }
    })
}

/// Issue page envelope.
pub fn issue_page(items: Vec<Value>, next: Option<&str>) -> Value {
    match next {
        Some(next) => json!({ "data": items, "links": { "next": next } }),
        None => json!({ "data": items, "links": {} }),
    }
}
