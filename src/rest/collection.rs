//! The paginated collection envelope Confluence wraps list responses in.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One page of a collection endpoint.
///
/// `size` is the number of results in this page; when the server omits it,
/// [`Collection::size`] falls back to `results.len()`. `total_size` is only
/// present on endpoints that report a count across all pages.
///
/// # Example
///
/// ```rust
/// use confluence_api::rest::Collection;
/// use serde_json::json;
///
/// let page: Collection<serde_json::Value> = serde_json::from_value(json!({
///     "results": [{"id": "1"}, {"id": "2"}],
///     "start": 0,
///     "limit": 25,
///     "size": 2,
///     "_links": {"base": "https://example.atlassian.net/wiki"}
/// }))
/// .unwrap();
///
/// assert_eq!(page.size(), 2);
/// assert!(page.total_size.is_none());
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Collection<T> {
    /// The items in this page.
    #[serde(default = "Vec::new")]
    pub results: Vec<T>,
    /// Offset of the first item.
    #[serde(default)]
    pub start: u32,
    /// The page size the server applied.
    #[serde(default)]
    pub limit: u32,
    /// Number of items in this page, as reported by the server.
    #[serde(default, rename = "size")]
    pub reported_size: Option<u32>,
    /// Number of items across all pages, when reported.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_size: Option<u64>,
    /// Navigation links.
    #[serde(default, rename = "_links")]
    pub links: Value,
}

impl<T> Default for Collection<T> {
    fn default() -> Self {
        Self {
            results: Vec::new(),
            start: 0,
            limit: 0,
            reported_size: None,
            total_size: None,
            links: Value::Null,
        }
    }
}

impl<T> Collection<T> {
    /// Number of items in this page.
    #[must_use]
    pub fn size(&self) -> usize {
        self.reported_size
            .map_or(self.results.len(), |size| size as usize)
    }

    /// Returns `true` if the server reported a next page link.
    #[must_use]
    pub fn has_next_link(&self) -> bool {
        self.links.get("next").is_some()
    }

    /// Consumes the envelope, returning its results.
    #[must_use]
    pub fn into_results(self) -> Vec<T> {
        self.results
    }
}
