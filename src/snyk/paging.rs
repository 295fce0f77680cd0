//! Page fetching and the lazy page sequence.
//!
//! A collection is walked by following `links.next` until it is absent. The
//! sequence is exposed as a [`Stream`] so callers can scan items and stop as
//! soon as they have what they need: page *n + 1* is only requested when the
//! consumer polls past page *n*.

use std::collections::HashSet;

use futures::stream::{self, Stream};
use reqwest::Url;
use serde_json::Value;
use tracing::debug;

use super::SnykClient;
use crate::error::TransportError;

/// One page of a collection.
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    /// Items in the order the API returned them.
    pub items: Vec<Value>,
    /// Link to the next page, verbatim from the response.
    pub next: Option<String>,
}

impl Page {
    /// Splits a JSON:API envelope into items and next link.
    ///
    /// A missing or non-array `data` member yields an empty page. The next
    /// link may be a plain string or a link object with an `href`.
    #[must_use]
    pub fn from_envelope(mut envelope: Value) -> Self {
        let next = envelope
            .pointer("/links/next")
            .and_then(|link| link.as_str().or_else(|| link.get("href").and_then(Value::as_str)))
            .filter(|link| !link.is_empty())
            .map(str::to_string);

        let items = match envelope.get_mut("data").map(Value::take) {
            Some(Value::Array(items)) => items,
            _ => Vec::new(),
        };

        Self { items, next }
    }
}

/// Unfold state: the cursor to fetch next and every URL already fetched.
struct Cursor {
    next: Option<Url>,
    seen: HashSet<Url>,
}

impl SnykClient {
    /// Fetches a single page.
    ///
    /// # Errors
    ///
    /// Propagates the transport failure unchanged.
    pub async fn fetch_page(&self, url: &str) -> Result<Page, TransportError> {
        debug!(%url, "fetching page");
        self.fetcher.get_json(url, &self.token).await.map(Page::from_envelope)
    }

    /// Lazily walks a collection starting at `first`.
    ///
    /// The stream ends after the page without a next link, or at the first
    /// error. A next link that points back to an already fetched page ends
    /// the stream with an error instead of looping.
    pub fn pages(&self, first: Url) -> impl Stream<Item = Result<Page, TransportError>> + '_ {
        let start = Cursor { next: Some(first), seen: HashSet::new() };
        stream::try_unfold(start, move |cursor| self.advance(cursor))
    }

    async fn advance(&self, mut cursor: Cursor) -> Result<Option<(Page, Cursor)>, TransportError> {
        let Some(url) = cursor.next.take() else {
            return Ok(None);
        };
        if !cursor.seen.insert(url.clone()) {
            return Err(TransportError::Decode {
                message: format!("pagination revisited {url}"),
            });
        }

        let page = self.fetch_page(url.as_str()).await?;
        cursor.next = page.next.as_deref().map(|link| self.resolve_link(link)).transpose()?;
        Ok(Some((page, cursor)))
    }

    /// Turns a `links.next` value into an absolute URL.
    ///
    /// Absolute links are used as-is. Relative links live under the API base
    /// path; links that already start with that path are only given the
    /// base's origin.
    pub(crate) fn resolve_link(&self, link: &str) -> Result<Url, TransportError> {
        if let Ok(url) = Url::parse(link) {
            return Ok(url);
        }

        let base_path = self.base.path().trim_end_matches('/');
        let path = if link.starts_with('/') {
            if base_path.is_empty() || link.starts_with(&format!("{base_path}/")) {
                link.to_string()
            } else {
                format!("{base_path}{link}")
            }
        } else {
            format!("{base_path}/{link}")
        };

        self.base.join(&path).map_err(|e| TransportError::Decode {
            message: format!("invalid next link `{link}`: {e}"),
        })
    }
}
