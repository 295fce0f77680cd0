//! Organization lookup by handle.

use serde_json::Value;
use tracing::debug;

use super::SnykClient;
use crate::error::TransportError;

/// An organization as resolved from its handle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Organization {
    /// Internal identifier used in API paths.
    pub id: String,
    /// Human-readable handle (slug).
    pub handle: String,
}

impl SnykClient {
    /// Resolves `handle` to an organization.
    ///
    /// Only the first item of the first page is considered; handles are
    /// assumed unique upstream. `Ok(None)` means the lookup matched nothing.
    ///
    /// # Errors
    ///
    /// Propagates the transport failure of the lookup call.
    pub async fn resolve_org(&self, handle: &str) -> Result<Option<Organization>, TransportError> {
        let mut url = self.endpoint(&["orgs"]);
        url.query_pairs_mut().append_pair("slug", handle);

        let page = self.fetch_page(url.as_str()).await?;
        let org = page.items.into_iter().next().and_then(|item| {
            let id = item.get("id")?.as_str()?.to_string();
            let handle = item
                .pointer("/attributes/slug")
                .and_then(Value::as_str)
                .unwrap_or(handle)
                .to_string();
            Some(Organization { id, handle })
        });

        debug!(handle, found = org.is_some(), "organization lookup finished");
        Ok(org)
    }
}
