//! Issue records and the paginated issue search.

use futures::TryStreamExt;
use serde_json::Value;
use tracing::{debug, info};

use super::SnykClient;
use crate::error::TransportError;
use crate::severity::Severity;

/// One concrete location of an issue.
///
/// Only `reachability` is interpreted; fixability flags and
/// representations stay in the raw record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Coordinate {
    /// `function`, `package`, `no-info`, `not-applicable`, ...
    ///
    /// `None` when the entry has no string `reachability`.
    pub reachability: Option<String>,
}

impl Coordinate {
    /// Reads one entry of `attributes.coordinates`, whatever its shape.
    fn from_value(entry: &Value) -> Self {
        let reachability = entry.get("reachability").and_then(Value::as_str).map(str::to_string);
        Self { reachability }
    }
}

/// An issue as returned by the collection, plus the typed fields we inspect.
#[derive(Debug, Clone, PartialEq)]
pub struct IssueRecord {
    /// Internal record id.
    pub id: String,
    /// Secondary key, e.g. `SNYK-JS-LODASH-1018905`.
    pub key: String,
    /// Coordinates in API order. Empty when absent.
    pub coordinates: Vec<Coordinate>,
    /// The item exactly as received.
    pub raw: Value,
}

impl IssueRecord {
    /// Builds a record from a collection item, keeping the item verbatim.
    ///
    /// Missing or mistyped fields read as empty; the item itself is opaque
    /// beyond the id, the key and each coordinate's `reachability`.
    #[must_use]
    pub fn from_value(raw: Value) -> Self {
        let text = |pointer: &str| {
            raw.pointer(pointer).and_then(Value::as_str).unwrap_or_default().to_string()
        };
        let id = text("/id");
        let key = text("/attributes/key");
        let coordinates = raw
            .pointer("/attributes/coordinates")
            .and_then(Value::as_array)
            .map(|entries| entries.iter().map(Coordinate::from_value).collect())
            .unwrap_or_default();
        Self { id, key, coordinates, raw }
    }
}

/// Secondary key of a raw collection item, if it has one.
fn secondary_key(item: &Value) -> Option<&str> {
    item.pointer("/attributes/key").and_then(Value::as_str)
}

/// What to search for.
#[derive(Debug, Clone, Copy)]
pub struct IssueQuery<'a> {
    /// Internal organization id.
    pub org_id: &'a str,
    /// Project the issues were found in.
    pub project_id: &'a str,
    /// Effective severity filter.
    pub severity: Severity,
    /// Secondary key to match exactly.
    pub key: &'a str,
}

impl SnykClient {
    /// Walks the filtered issue collection until an item's key equals `query.key`.
    ///
    /// Items are scanned in API order and the walk stops at the first match,
    /// so no page after the matching one is requested. `Ok(None)` means every
    /// page was scanned without a match.
    ///
    /// # Errors
    ///
    /// Any failed page fetch ends the search.
    pub async fn locate_issue(
        &self,
        query: IssueQuery<'_>,
    ) -> Result<Option<IssueRecord>, TransportError> {
        let mut url = self.endpoint(&["orgs", query.org_id, "issues"]);
        url.query_pairs_mut()
            .append_pair("scan_item.id", query.project_id)
            .append_pair("scan_item.type", "project")
            .append_pair("effective_severity_level", query.severity.as_str())
            .append_pair("limit", &self.page_limit.to_string());

        let pages = self.pages(url);
        futures::pin_mut!(pages);

        let mut scanned = 0usize;
        while let Some(page) = pages.try_next().await? {
            scanned += 1;
            debug!(page = scanned, items = page.items.len(), "scanning issue page");

            if let Some(item) = page.items.into_iter().find(|i| secondary_key(i) == Some(query.key)) {
                info!(key = query.key, pages = scanned, "issue found");
                return Ok(Some(IssueRecord::from_value(item)));
            }
        }

        debug!(key = query.key, pages = scanned, "issue collection exhausted");
        Ok(None)
    }
}
