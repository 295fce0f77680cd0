//! Error taxonomy for a reachability invocation.
//!
//! Every stage of the pipeline fails with one of these types, and
//! [`ReachError::status_code`] maps each failure onto the response status
//! returned to the caller.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The tracker URL did not yield all three identifiers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("could not extract organization, project and issue key from `{url}`")]
pub struct DecomposeError {
    /// The URL as received.
    pub url: String,
}

/// The severity string is not one of the accepted levels.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid severity `{value}`: expected one of critical, high, medium, low")]
pub struct SeverityError {
    /// The rejected input.
    pub value: String,
}

/// Failure of a single upstream fetch.
///
/// Serializable so that recorded cassettes can replay failures exactly.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TransportError {
    /// The fetch exceeded its time ceiling.
    #[error("request timed out after {millis}ms")]
    Timeout {
        /// The ceiling that was exceeded, in milliseconds.
        millis: u64,
    },
    /// Connection-level failure before a response arrived.
    #[error("network error: {message}")]
    Network {
        /// Underlying client message.
        message: String,
    },
    /// The upstream answered with a non-success status.
    #[error("upstream returned {status}: {detail}")]
    Status {
        /// HTTP status reported by the upstream.
        status: u16,
        /// Detail text lifted from the upstream error envelope.
        detail: String,
        /// Raw response payload.
        body: String,
    },
    /// The response could not be read as the expected shape.
    #[error("unexpected upstream response: {message}")]
    Decode {
        /// What was wrong with the response.
        message: String,
    },
}

impl TransportError {
    /// A [`TransportError::Timeout`] for the ceiling `limit`.
    #[must_use]
    pub fn timeout(limit: Duration) -> Self {
        Self::Timeout { millis: u64::try_from(limit.as_millis()).unwrap_or(u64::MAX) }
    }
}

/// Terminal outcome of a failed invocation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReachError {
    /// Malformed JSON or a missing required field.
    #[error("invalid request body: {0}")]
    InvalidRequest(String),
    /// Tracker URL could not be decomposed.
    #[error(transparent)]
    InvalidUrl(#[from] DecomposeError),
    /// Severity outside the accepted set.
    #[error(transparent)]
    InvalidSeverity(#[from] SeverityError),
    /// No API token configured for this deployment.
    #[error("SNYK_TOKEN is not configured")]
    MissingCredentials,
    /// Organization lookup returned no match.
    #[error("organization `{org}` not found")]
    OrgNotFound {
        /// The handle that was searched.
        org: String,
    },
    /// Every page was scanned without finding the issue key.
    #[error(
        "issue `{key}` not found in project {project} (organization `{org}`, severity {severity})"
    )]
    IssueNotFound {
        /// Secondary key that was searched for.
        key: String,
        /// Project identifier the search was filtered by.
        project: String,
        /// Organization handle.
        org: String,
        /// Severity filter applied.
        severity: String,
    },
    /// A remote call failed.
    #[error("upstream request failed: {0}")]
    Upstream(#[from] TransportError),
}

impl ReachError {
    /// Response status for this failure.
    #[must_use]
    pub fn status_code(&self) -> u16 {
        match self {
            Self::InvalidRequest(_) | Self::InvalidUrl(_) | Self::InvalidSeverity(_) => 400,
            Self::MissingCredentials => 500,
            Self::OrgNotFound { .. } | Self::IssueNotFound { .. } => 404,
            Self::Upstream(TransportError::Status { status, .. }) => *status,
            Self::Upstream(_) => 500,
        }
    }
}
