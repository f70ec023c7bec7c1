//! The generic resource-access layer.
//!
//! A [`Resource`] is bound to one REST root (such as `/rest/api/space`) and
//! exposes the primitives every typed API is built from:
//!
//! - single-item operations: [`fetch_one`](Resource::fetch_one),
//!   [`create`](Resource::create), [`update`](Resource::update),
//!   [`remove`](Resource::remove)
//! - pagination: [`fetch_page`](Resource::fetch_page),
//!   [`fetch_all`](Resource::fetch_all),
//!   [`total_size`](Resource::total_size),
//!   [`fetch_all_by_total`](Resource::fetch_all_by_total)
//!
//! Each primitive builds a fresh [`HttpRequest`], attaches the configured
//! credentials, and sends it through the shared [`Transport`]. Transport
//! failures come back as [`ResourceError::Api`].

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::clients::{HttpMethod, HttpRequest, HttpResponse, RequestBody, Transport};
use crate::config::ConfluenceConfig;
use crate::rest::collection::Collection;
use crate::rest::errors::{ApiError, ResourceError};
use crate::rest::url::{build_url, QueryParams};

/// Page size used by [`Resource::fetch_all_by_total`].
pub const PROBE_BATCH_SIZE: u32 = 100;

/// Options for [`Resource::create`] and [`Resource::update`].
#[derive(Clone, Debug, Default)]
pub struct WriteOptions {
    /// Query parameters.
    pub params: Option<QueryParams>,
    /// Headers added to the request.
    pub extra_headers: Option<HashMap<String, String>>,
}

impl WriteOptions {
    /// Creates empty options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the query parameters.
    #[must_use]
    pub fn params(mut self, params: QueryParams) -> Self {
        self.params = Some(params);
        self
    }

    /// Adds one extra header.
    #[must_use]
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra_headers
            .get_or_insert_with(HashMap::new)
            .insert(key.into(), value.into());
        self
    }
}

/// Options for [`Resource::fetch_page`].
#[derive(Clone, Debug, Default)]
pub struct PageOptions {
    /// Offset of the first item.
    pub start: u32,
    /// Page size; the configured page size when `None`.
    pub limit: Option<u32>,
    /// Sub-path below the resource root.
    pub id: Option<String>,
    /// Extra query parameters.
    pub params: Option<QueryParams>,
    /// Expansions, sent comma-joined as `expand`.
    pub expand: Vec<String>,
}

/// Options for [`Resource::fetch_all`] and its variants.
///
/// # Example
///
/// ```rust
/// use confluence_api::rest::{FetchAllOptions, QueryParams};
///
/// let params: QueryParams = [("type", "page")].into_iter().collect();
/// let options = FetchAllOptions::new()
///     .id("123/child/attachment")
///     .params(params)
///     .expand(["version"]);
///
/// assert_eq!(options.expand, vec!["version".to_string()]);
/// ```
#[derive(Clone, Debug, Default)]
pub struct FetchAllOptions {
    /// Sub-path below the resource root.
    pub id: Option<String>,
    /// Extra query parameters.
    pub params: Option<QueryParams>,
    /// Expansions, sent comma-joined as `expand`.
    pub expand: Vec<String>,
}

impl FetchAllOptions {
    /// Creates empty options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the sub-path.
    #[must_use]
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Sets the query parameters.
    #[must_use]
    pub fn params(mut self, params: QueryParams) -> Self {
        self.params = Some(params);
        self
    }

    /// Sets the expansions.
    #[must_use]
    pub fn expand<I, S>(mut self, expand: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.expand = expand.into_iter().map(Into::into).collect();
        self
    }

    fn page(&self, start: u32, limit: u32) -> PageOptions {
        PageOptions {
            start,
            limit: Some(limit),
            id: self.id.clone(),
            params: self.params.clone(),
            expand: self.expand.clone(),
        }
    }
}

/// A handle on one Confluence REST root.
///
/// Cloning is cheap; the configuration and transport are shared.
#[derive(Clone)]
pub struct Resource {
    root: &'static str,
    config: Arc<ConfluenceConfig>,
    transport: Arc<dyn Transport>,
}

// Verify Resource is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Resource>();
};

impl fmt::Debug for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Resource")
            .field("root", &self.root)
            .field("host", &self.config.host().as_ref())
            .field("page_size", &self.config.page_size())
            .finish_non_exhaustive()
    }
}

impl Resource {
    /// Binds a resource root to a configuration and transport.
    #[must_use]
    pub fn new(
        root: &'static str,
        config: Arc<ConfluenceConfig>,
        transport: Arc<dyn Transport>,
    ) -> Self {
        Self {
            root,
            config,
            transport,
        }
    }

    /// The REST root, e.g. `/rest/api/content`.
    #[must_use]
    pub const fn root(&self) -> &'static str {
        self.root
    }

    /// The shared configuration.
    #[must_use]
    pub fn config(&self) -> &ConfluenceConfig {
        &self.config
    }

    /// Page size used by [`fetch_all`](Self::fetch_all).
    #[must_use]
    pub fn page_size(&self) -> u32 {
        self.config.page_size()
    }

    /// Builds the absolute URL for `id` below this root.
    #[must_use]
    pub fn url(&self, id: Option<&str>, query: Option<&QueryParams>) -> String {
        build_url(self.config.host().as_ref(), self.root, id, query)
    }

    async fn dispatch(
        &self,
        method: HttpMethod,
        id: Option<&str>,
        query: Option<&QueryParams>,
        body: Option<RequestBody>,
        extra_headers: Option<HashMap<String, String>>,
    ) -> Result<HttpResponse, ResourceError> {
        let url = self.url(id, query);

        let mut builder = HttpRequest::builder(method, url)
            .maybe_body(body)
            .authorization(self.config.credentials().authorization());
        if let Some(headers) = extra_headers {
            builder = builder.extra_headers(headers);
        }
        let request = builder.build()?;

        tracing::debug!("Sending {} {}", request.http_method, request.url);

        let response = self.transport.send(request).await?;
        Ok(response)
    }

    fn ensure_ok(response: HttpResponse) -> Result<HttpResponse, ResourceError> {
        if response.is_ok() {
            return Ok(response);
        }
        let fallback = format!("Request failed with status code {}", response.code);
        Err(ApiError::from_response(response.code, &response.body, &fallback).into())
    }

    /// Fetches one item with a GET on `root/id`.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Api`] if the request fails, or
    /// [`ResourceError::Serialization`] if the body is not a `T`.
    pub async fn fetch_one<T: DeserializeOwned>(
        &self,
        id: &str,
        params: Option<&QueryParams>,
    ) -> Result<T, ResourceError> {
        let response = self
            .dispatch(HttpMethod::Get, Some(id), params, None, None)
            .await?;
        let response = Self::ensure_ok(response)?;
        Ok(serde_json::from_value(response.body)?)
    }

    /// Creates an item with a POST on the root, or on `root/id` when `id`
    /// targets a sub-collection.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Api`] if the request fails, or
    /// [`ResourceError::Serialization`] if the body is not a `P`.
    pub async fn create<P: DeserializeOwned>(
        &self,
        id: Option<&str>,
        body: impl Into<RequestBody>,
        options: WriteOptions,
    ) -> Result<P, ResourceError> {
        let response = self
            .dispatch(
                HttpMethod::Post,
                id,
                options.params.as_ref(),
                Some(body.into()),
                options.extra_headers,
            )
            .await?;
        let response = Self::ensure_ok(response)?;
        Ok(serde_json::from_value(response.body)?)
    }

    /// Replaces an item with a PUT on `root/id`.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Api`] if the request fails, or
    /// [`ResourceError::Serialization`] if the body is not a `P`.
    pub async fn update<P: DeserializeOwned>(
        &self,
        id: &str,
        body: impl Into<RequestBody>,
        options: WriteOptions,
    ) -> Result<P, ResourceError> {
        let response = self
            .dispatch(
                HttpMethod::Put,
                Some(id),
                options.params.as_ref(),
                Some(body.into()),
                options.extra_headers,
            )
            .await?;
        let response = Self::ensure_ok(response)?;
        Ok(serde_json::from_value(response.body)?)
    }

    /// Deletes `root/id`, optionally with a JSON body.
    ///
    /// Returns `true` iff the response status is 2xx. A non-2xx response
    /// the transport did not reject yields `false`.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Api`] if the transport reports a failure.
    pub async fn remove(
        &self,
        id: &str,
        data: Option<Value>,
        params: Option<&QueryParams>,
    ) -> Result<bool, ResourceError> {
        let response = self
            .dispatch(
                HttpMethod::Delete,
                Some(id),
                params,
                data.map(RequestBody::Json),
                None,
            )
            .await?;
        Ok(response.is_ok())
    }

    /// Fetches one page of a collection.
    ///
    /// `start`, `limit` and the comma-joined `expand` are merged into the
    /// query, overriding the same keys in `params`.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Api`] if the request fails or the status is
    /// not 2xx, or [`ResourceError::Serialization`] if the body is not a
    /// collection of `T`.
    pub async fn fetch_page<T: DeserializeOwned>(
        &self,
        options: &PageOptions,
    ) -> Result<Collection<T>, ResourceError> {
        let limit = options.limit.unwrap_or_else(|| self.page_size());

        let mut query = options.params.clone().unwrap_or_default();
        query.insert("start", options.start);
        query.insert("limit", limit);
        if !options.expand.is_empty() {
            query.insert("expand", options.expand.join(","));
        }

        let response = self
            .dispatch(
                HttpMethod::Get,
                options.id.as_deref(),
                Some(&query),
                None,
                None,
            )
            .await?;
        let response = Self::ensure_ok(response)?;
        Ok(serde_json::from_value(response.body)?)
    }

    /// Fetches every page of a collection and concatenates the results.
    ///
    /// Pages of the configured size are requested one after another with
    /// ascending `start` until a page comes back with fewer items than the
    /// limit. Any error aborts the loop; partial results are dropped.
    ///
    /// # Errors
    ///
    /// Returns the first error any page fetch produced.
    pub async fn fetch_all<T: DeserializeOwned>(
        &self,
        options: &FetchAllOptions,
    ) -> Result<Vec<T>, ResourceError> {
        let limit = self.page_size();
        let mut results = Vec::new();
        let mut start: u32 = 0;

        loop {
            let page: Collection<T> = self.fetch_page(&options.page(start, limit)).await?;
            let size = page.size();

            tracing::trace!(
                "Fetched page of {}{} at start {} ({} items)",
                self.root,
                options.id.as_deref().map_or(String::new(), |id| format!("/{id}")),
                start,
                size
            );

            results.extend(page.results);

            if size < limit as usize {
                break;
            }
            start = start.saturating_add(limit);
        }

        Ok(results)
    }

    /// Returns the collection's `totalSize` with a zero-limit probe.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::MissingTotalSize`] if the endpoint does not
    /// report a total, or the probe's own error.
    pub async fn total_size(&self, options: &FetchAllOptions) -> Result<u64, ResourceError> {
        let probe: Collection<Value> = self.fetch_page(&options.page(0, 0)).await?;
        probe.total_size.ok_or(ResourceError::MissingTotalSize)
    }

    /// Fetches every page by first probing `totalSize`, then requesting
    /// `ceil(total / PROBE_BATCH_SIZE)` pages.
    ///
    /// Only use this on endpoints that report an accurate `totalSize`.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::MissingTotalSize`] if no total is reported,
    /// or the first error any page fetch produced.
    pub async fn fetch_all_by_total<T: DeserializeOwned>(
        &self,
        options: &FetchAllOptions,
    ) -> Result<Vec<T>, ResourceError> {
        let total = self.total_size(options).await?;
        let pages = total.div_ceil(u64::from(PROBE_BATCH_SIZE));

        let mut results = Vec::new();
        for page_index in 0..pages {
            let start = u32::try_from(page_index * u64::from(PROBE_BATCH_SIZE)).map_err(|_| {
                ResourceError::OperationFailed {
                    reason: format!("collection of {total} items exceeds the addressable range"),
                }
            })?;

            let page: Collection<T> = self
                .fetch_page(&options.page(start, PROBE_BATCH_SIZE))
                .await?;

            tracing::trace!(
                "Fetched page {} of {} from {} ({} items)",
                page_index + 1,
                pages,
                self.root,
                page.size()
            );

            results.extend(page.results);
        }

        Ok(results)
    }
}
