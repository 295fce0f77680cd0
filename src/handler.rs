//! Request orchestration: tracker URL in, reachability verdict out.
//!
//! One invocation runs these stages strictly in order, and the first failing
//! stage ends it:
//!
//! 1. parse the request body
//! 2. validate the severity
//! 3. decompose the tracker URL
//! 4. resolve the organization
//! 5. locate the issue
//! 6. evaluate reachability
//!
//! The configured token is checked after stage 3 and before any network
//! call, so client errors stay 400 even on a deployment without credentials.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::{error, info, instrument, warn};

use crate::config::Settings;
use crate::error::{ReachError, TransportError};
use crate::ports::http::JsonFetcher;
use crate::reachability::is_reachable;
use crate::severity::Severity;
use crate::snyk::{IssueQuery, SnykClient};
use crate::tracker_url::decompose;

/// Inbound request body.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CheckRequest {
    snyk_issue_url: String,
    severity: String,
}

/// Successful outcome of an invocation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Verdict {
    /// Internal id of the matched issue.
    pub issue_id: String,
    /// Whether any coordinate is reachable.
    pub is_reachable: bool,
    /// The issue exactly as the API returned it.
    pub full_issue_data: Value,
}

/// Transport-neutral response envelope.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Response {
    /// HTTP-style status code.
    #[serde(rename = "statusCode")]
    pub status: u16,
    /// JSON body: a [`Verdict`] or `{"message": ...}`.
    pub body: Value,
}

impl Response {
    fn ok(verdict: &Verdict) -> Self {
        let body = serde_json::to_value(verdict)
            .unwrap_or_else(|e| json!({ "message": format!("failed to encode verdict: {e}") }));
        Self { status: 200, body }
    }

    fn from_error(err: &ReachError) -> Self {
        Self { status: err.status_code(), body: json!({ "message": err.to_string() }) }
    }
}

/// Orchestrates reachability checks against one upstream.
///
/// Cheap to clone; clones share the transport and settings.
#[derive(Clone)]
pub struct ReachabilityService {
    settings: Arc<Settings>,
    fetcher: Arc<dyn JsonFetcher>,
}

impl ReachabilityService {
    /// Creates a service that talks to the upstream through `fetcher`.
    pub fn new(settings: Settings, fetcher: Arc<dyn JsonFetcher>) -> Self {
        Self { settings: Arc::new(settings), fetcher }
    }

    /// Handles one raw request body and always produces a response.
    pub async fn handle(&self, body: &str) -> Response {
        match self.evaluate(body).await {
            Ok(verdict) => Response::ok(&verdict),
            Err(err) => {
                log_failure(&err);
                Response::from_error(&err)
            }
        }
    }

    /// Runs the pipeline, bounded by the configured invocation budget.
    ///
    /// # Errors
    ///
    /// Returns the failure of the first stage that did not succeed. An
    /// exhausted budget aborts the in-flight fetch and is reported as a
    /// timeout.
    pub async fn evaluate(&self, body: &str) -> Result<Verdict, ReachError> {
        match self.settings.invocation_budget {
            Some(budget) => tokio::time::timeout(budget, self.run(body))
                .await
                .unwrap_or_else(|_| Err(ReachError::Upstream(TransportError::timeout(budget)))),
            None => self.run(body).await,
        }
    }

    #[instrument(skip_all)]
    async fn run(&self, body: &str) -> Result<Verdict, ReachError> {
        let request: CheckRequest =
            serde_json::from_str(body).map_err(|e| ReachError::InvalidRequest(e.to_string()))?;
        let severity: Severity = request.severity.parse()?;
        let location = decompose(&request.snyk_issue_url)?;
        info!(
            org = %location.org_handle,
            project = %location.project_id,
            key = %location.issue_key,
            %severity,
            "request accepted"
        );

        let token = self.settings.token.as_deref().ok_or(ReachError::MissingCredentials)?;

        let client = SnykClient::new(Arc::clone(&self.fetcher), token, &self.settings);

        let org = client
            .resolve_org(&location.org_handle)
            .await?
            .ok_or_else(|| ReachError::OrgNotFound { org: location.org_handle.clone() })?;
        info!(org = %org.handle, org_id = %org.id, "organization resolved");

        let query = IssueQuery {
            org_id: &org.id,
            project_id: &location.project_id,
            severity,
            key: &location.issue_key,
        };
        let record = client.locate_issue(query).await?.ok_or_else(|| ReachError::IssueNotFound {
            key: location.issue_key.clone(),
            project: location.project_id.clone(),
            org: location.org_handle.clone(),
            severity: severity.to_string(),
        })?;

        let reachable = is_reachable(&record);
        info!(issue_id = %record.id, reachable, "verdict ready");

        Ok(Verdict { issue_id: record.id, is_reachable: reachable, full_issue_data: record.raw })
    }
}

fn log_failure(err: &ReachError) {
    match err {
        ReachError::InvalidRequest(_) | ReachError::InvalidUrl(_) | ReachError::InvalidSeverity(_) => {
            info!(error = %err, "rejected request");
        }
        ReachError::OrgNotFound { .. } | ReachError::IssueNotFound { .. } => {
            warn!(error = %err, "lookup found nothing");
        }
        ReachError::MissingCredentials => error!(error = %err, "deployment is missing credentials"),
        ReachError::Upstream(TransportError::Status { status, body, .. }) => {
            error!(status, payload = %body, error = %err, "upstream request failed");
        }
        ReachError::Upstream(_) => error!(error = %err, "upstream request failed"),
    }
}
