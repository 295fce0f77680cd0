//! Decomposition of human-facing Snyk issue URLs.
//!
//! A tracker URL looks like
//! `https://app.snyk.io/org/<handle>/project/<uuid>#issue-<key>`. The three
//! identifiers are extracted independently with positional patterns; if any
//! one of them is missing the whole URL is rejected.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::DecomposeError;

static ORG_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/org/([^/]+)/project/").expect("valid org pattern"));
static PROJECT_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/project/([0-9a-fA-F-]+)(?:#|$)").expect("valid project pattern"));
static ISSUE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"#issue-(.+)$").expect("valid issue pattern"));

/// Identifiers extracted from a tracker URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssueLocation {
    /// Organization handle (slug) as shown in the UI.
    pub org_handle: String,
    /// Project identifier.
    pub project_id: String,
    /// Issue key, e.g. `SNYK-JS-LODASH-1018905`.
    pub issue_key: String,
}

/// Extracts organization handle, project id and issue key from `url`.
///
/// # Errors
///
/// Returns [`DecomposeError`] unless all three identifiers are present.
pub fn decompose(url: &str) -> Result<IssueLocation, DecomposeError> {
    match (capture(&ORG_PATTERN, url), capture(&PROJECT_PATTERN, url), capture(&ISSUE_PATTERN, url)) {
        (Some(org_handle), Some(project_id), Some(issue_key)) => {
            Ok(IssueLocation { org_handle, project_id, issue_key })
        }
        _ => Err(DecomposeError { url: url.to_string() }),
    }
}

fn capture(pattern: &Regex, url: &str) -> Option<String> {
    pattern.captures(url).and_then(|caps| caps.get(1)).map(|m| m.as_str().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    const PROJECT: &str = "11111111-2222-3333-4444-555555555555";

    #[test]
    fn extracts_all_three_identifiers() {
        let url = format!("https://app.snyk.io/org/acme/project/{PROJECT}#issue-SNYK-JS-FOO-123");
        let location = decompose(&url).unwrap();
        assert_eq!(location.org_handle, "acme");
        assert_eq!(location.project_id, PROJECT);
        assert_eq!(location.issue_key, "SNYK-JS-FOO-123");
    }

    #[test]
    fn keeps_issue_key_verbatim_to_end_of_string() {
        let url = format!("https://app.snyk.io/org/my-org/project/{PROJECT}#issue-npm:lodash:20180130");
        let location = decompose(&url).unwrap();
        assert_eq!(location.org_handle, "my-org");
        assert_eq!(location.issue_key, "npm:lodash:20180130");
    }

    #[test]
    fn missing_fragment_fails_whole_url() {
        let url = format!("https://app.snyk.io/org/acme/project/{PROJECT}");
        let err = decompose(&url).unwrap_err();
        assert_eq!(err.url, url);
    }

    #[test]
    fn missing_org_segment_fails() {
        let url = format!("https://app.snyk.io/project/{PROJECT}#issue-SNYK-JS-FOO-123");
        assert!(decompose(&url).is_err());
    }

    #[test]
    fn non_hex_project_id_fails() {
        let url = "https://app.snyk.io/org/acme/project/not_a_uuid#issue-SNYK-JS-FOO-123";
        assert!(decompose(url).is_err());
    }

    #[test]
    fn empty_issue_key_fails() {
        let url = format!("https://app.snyk.io/org/acme/project/{PROJECT}#issue-");
        assert!(decompose(&url).is_err());
    }

    #[test]
    fn arbitrary_text_fails() {
        assert!(decompose("").is_err());
        assert!(decompose("not a url").is_err());
    }
}
