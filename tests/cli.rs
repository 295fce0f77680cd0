//! Integration tests for top-level CLI behavior.

mod common;

use std::process::Command;

use chrono::Utc;
use serde_json::json;

use common::{issue, issue_page, org_envelope, tracker_url, ISSUE_KEY};
use snyk_reach::cassette::{Cassette, Interaction};

fn run_snyk_reach(args: &[&str], token: Option<&str>) -> std::process::Output {
    let bin = env!("CARGO_BIN_EXE_snyk-reach");
    let mut command = Command::new(bin);
    command
        .args(args)
        .env_remove("SNYK_REACH_RECORD")
        .env_remove("SNYK_API_URL")
        .env_remove("SNYK_INVOCATION_BUDGET_SECS")
        .env("RUST_LOG", "off");
    match token {
        Some(token) => command.env("SNYK_TOKEN", token),
        None => command.env_remove("SNYK_TOKEN"),
    };
    command.output().expect("failed to run snyk-reach binary")
}

fn envelope(output: &std::process::Output) -> serde_json::Value {
    serde_json::from_slice(&output.stdout).expect("stdout should be a JSON envelope")
}

#[test]
fn check_without_severity_prints_400() {
    let url = tracker_url("acme");
    let output = run_snyk_reach(&["check", "--url", &url], Some("tok"));
    assert!(!output.status.success());
    let envelope = envelope(&output);
    assert_eq!(envelope["statusCode"], 400);
    assert!(envelope["body"]["message"].as_str().unwrap().contains("severity"));
}

#[test]
fn check_with_bad_severity_prints_400() {
    let url = tracker_url("acme");
    let output = run_snyk_reach(&["check", "--url", &url, "--severity", "urgent"], Some("tok"));
    assert!(!output.status.success());
    assert_eq!(envelope(&output)["statusCode"], 400);
}

#[test]
fn check_without_token_prints_500() {
    let url = tracker_url("acme");
    let output = run_snyk_reach(&["check", "--url", &url, "--severity", "high"], None);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(!output.status.success());
    assert_eq!(envelope(&output)["statusCode"], 500);
    assert!(stderr.contains("status 500"));
}

#[test]
fn check_with_bad_severity_and_no_token_prints_400() {
    let url = tracker_url("acme");
    let output = run_snyk_reach(&["check", "--url", &url, "--severity", "urgent"], None);
    assert!(!output.status.success());
    assert_eq!(envelope(&output)["statusCode"], 400);
}

#[test]
fn check_replays_cassette() {
    let dir = std::env::temp_dir().join("snyk_reach_cli_replay");
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("cli.cassette.yaml");
    let interaction = |seq: u64, url: &str, body: serde_json::Value| Interaction {
        seq,
        port: "http".into(),
        method: "get_json".into(),
        input: json!({ "url": url }),
        output: json!({ "Ok": body }),
    };
    Cassette {
        name: "cli".into(),
        recorded_at: Utc::now(),
        commit: "abc".into(),
        interactions: vec![
            interaction(0, "https://api.snyk.io/rest/orgs", org_envelope("org-9", "acme")),
            interaction(
                1,
                "https://api.snyk.io/rest/orgs/org-9/issues",
                issue_page(vec![issue("issue-1", ISSUE_KEY, &["package"])], None),
            ),
        ],
    }
    .save(&path)
    .unwrap();

    let url = tracker_url("acme");
    let output = run_snyk_reach(
        &["check", "--url", &url, "--severity", "critical", "--replay", path.to_str().unwrap()],
        Some("tok"),
    );
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    let envelope = envelope(&output);
    assert_eq!(envelope["statusCode"], 200);
    assert_eq!(envelope["body"]["issueId"], "issue-1");
    assert_eq!(envelope["body"]["isReachable"], true);

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn check_requires_url_or_body() {
    let output = run_snyk_reach(&["check"], Some("tok"));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(!output.status.success());
    assert!(stderr.contains("--url") || stderr.contains("--body"));
}

#[test]
fn check_help_shows_usage() {
    let output = run_snyk_reach(&["check", "--help"], None);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success());
    assert!(stdout.contains("--url"));
    assert!(stdout.contains("--replay"));
}

#[test]
fn invalid_subcommand_exits_with_error() {
    let output = run_snyk_reach(&["nonsense"], None);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(!output.status.success());
    assert!(stderr.contains("unrecognized subcommand"));
}
