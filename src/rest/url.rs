//! URL building for resource requests.
//!
//! [`build_url`] joins the host, a resource root, an optional path segment
//! and an encoded query string. [`QueryParams`] holds the query; keys are
//! kept sorted so the same inputs always give the same URL.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;

use crate::rest::errors::ResourceError;

/// Query parameters for a request.
///
/// A key mapped to `None` is kept but never emitted.
///
/// # Example
///
/// ```rust
/// use confluence_api::rest::QueryParams;
///
/// let mut params = QueryParams::new();
/// params.insert("expand", "space,version");
/// params.insert_opt("status", None::<String>);
///
/// assert_eq!(params.to_query_string(), "expand=space%2Cversion");
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct QueryParams(BTreeMap<String, Option<String>>);

impl QueryParams {
    /// Creates an empty set of parameters.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `key` to `value`, replacing any previous value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl ToString) -> &mut Self {
        self.0.insert(key.into(), Some(value.to_string()));
        self
    }

    /// Sets `key` to `value`; `None` marks the key as null (omitted).
    pub fn insert_opt(&mut self, key: impl Into<String>, value: Option<impl ToString>) -> &mut Self {
        self.0.insert(key.into(), value.map(|v| v.to_string()));
        self
    }

    /// Sets `key` to the JSON serialization of `value`.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Serialization`] if `value` cannot be serialized.
    pub fn insert_json<T: Serialize>(
        &mut self,
        key: impl Into<String>,
        value: &T,
    ) -> Result<&mut Self, ResourceError> {
        let encoded = serde_json::to_string(value)?;
        self.0.insert(key.into(), Some(encoded));
        Ok(self)
    }

    /// Returns the value for `key`, if set and not null.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Option::as_deref)
    }

    /// Returns `true` if no non-null parameter is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.values().all(Option::is_none)
    }

    /// Copies every entry of `other` into `self`; `other` wins on conflicts.
    pub fn merge(&mut self, other: &Self) -> &mut Self {
        for (key, value) in &other.0 {
            self.0.insert(key.clone(), value.clone());
        }
        self
    }

    /// Builds parameters from any serializable struct or map.
    ///
    /// Nulls are dropped, scalars are stringified, arrays of scalars are
    /// joined with `,`, nested objects are sent as JSON.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Serialization`] if `params` cannot be
    /// serialized, or [`ResourceError::InvalidArgument`] if it is not an
    /// object.
    pub fn from_serializable<T: Serialize>(params: &T) -> Result<Self, ResourceError> {
        let value = serde_json::to_value(params)?;

        let Value::Object(map) = value else {
            return Err(ResourceError::InvalidArgument {
                reason: "query parameters must serialize to an object".to_string(),
            });
        };

        let mut query = Self::new();
        for (key, val) in map {
            match val {
                Value::Null => {}
                Value::String(s) => {
                    query.insert(key, s);
                }
                Value::Number(n) => {
                    query.insert(key, n);
                }
                Value::Bool(b) => {
                    query.insert(key, b);
                }
                Value::Array(arr) => {
                    let values: Vec<String> = arr
                        .iter()
                        .filter_map(|v| match v {
                            Value::String(s) => Some(s.clone()),
                            Value::Number(n) => Some(n.to_string()),
                            Value::Bool(b) => Some(b.to_string()),
                            _ => None,
                        })
                        .collect();
                    if !values.is_empty() {
                        query.insert(key, values.join(","));
                    }
                }
                Value::Object(_) => {
                    query.insert(key, val);
                }
            }
        }
        Ok(query)
    }

    /// Encodes the non-null parameters as `k=v&k=v` in key order.
    #[must_use]
    pub fn to_query_string(&self) -> String {
        self.0
            .iter()
            .filter_map(|(key, value)| {
                value.as_ref().map(|value| {
                    format!(
                        "{}={}",
                        urlencoding::encode(key),
                        urlencoding::encode(value)
                    )
                })
            })
            .collect::<Vec<_>>()
            .join("&")
    }
}

impl<K, V> FromIterator<(K, V)> for QueryParams
where
    K: Into<String>,
    V: ToString,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = Self::new();
        for (key, value) in iter {
            params.insert(key, value);
        }
        params
    }
}

/// Builds the absolute URL for a resource request.
///
/// The result is `host + root + "/"`, then `id` verbatim (it may contain
/// `/`), then `?` and the encoded query when any non-null parameter is set.
/// An empty `id` is treated as absent.
///
/// # Example
///
/// ```rust
/// use confluence_api::rest::{build_url, QueryParams};
///
/// let params: QueryParams = [("expand", "description.plain")].into_iter().collect();
/// let url = build_url(
///     "https://example.atlassian.net/wiki",
///     "/rest/api/space",
///     Some("DEMO"),
///     Some(&params),
/// );
///
/// assert_eq!(
///     url,
///     "https://example.atlassian.net/wiki/rest/api/space/DEMO?expand=description.plain"
/// );
/// ```
#[must_use]
pub fn build_url(host: &str, root: &str, id: Option<&str>, query: Option<&QueryParams>) -> String {
    let mut url = format!("{host}{root}/");

    if let Some(id) = id.filter(|id| !id.is_empty()) {
        url.push_str(id);
    }

    if let Some(query) = query {
        let encoded = query.to_query_string();
        if !encoded.is_empty() {
            url.push('?');
            url.push_str(&encoded);
        }
    }

    url
}
