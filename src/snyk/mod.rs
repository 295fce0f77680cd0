//! Client for the Snyk REST API.
//!
//! [`SnykClient`] holds everything one invocation needs to talk to the API:
//! the transport port, the token and the endpoint settings. It is built per
//! invocation and shares nothing with other invocations except the
//! transport itself.

pub mod issues;
pub mod orgs;
pub mod paging;

use std::sync::Arc;

use reqwest::Url;

use crate::config::Settings;
use crate::ports::http::JsonFetcher;

pub use issues::{Coordinate, IssueQuery, IssueRecord};
pub use orgs::Organization;
pub use paging::Page;

/// Authenticated view of the REST API for one invocation.
pub struct SnykClient {
    fetcher: Arc<dyn JsonFetcher>,
    token: String,
    base: Url,
    version: String,
    page_limit: u32,
}

impl SnykClient {
    /// Creates a client using `settings` for endpoint details.
    pub fn new(fetcher: Arc<dyn JsonFetcher>, token: impl Into<String>, settings: &Settings) -> Self {
        Self {
            fetcher,
            token: token.into(),
            base: settings.api_url.clone(),
            version: settings.api_version.clone(),
            page_limit: settings.page_limit,
        }
    }

    /// URL for `segments` under the API base, carrying the `version` parameter.
    pub(crate) fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url.query_pairs_mut().append_pair("version", &self.version);
        url
    }
}
