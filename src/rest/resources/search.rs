//! CQL search.

use std::ops::Deref;
use std::sync::Arc;

use crate::clients::Transport;
use crate::config::ConfluenceConfig;
use crate::rest::resources::types::{CqlContext, SearchResult};
use crate::rest::{FetchAllOptions, QueryParams, Resource, ResourceError};

/// Access to `/rest/api/search`.
///
/// # Example
///
/// ```rust,ignore
/// use confluence_api::rest::resources::CqlContext;
///
/// let hits = confluence
///     .search()
///     .search(
///         "type = page and text ~ \"release\"",
///         Some(&CqlContext {
///             space_key: Some("DEMO".to_string()),
///             ..Default::default()
///         }),
///     )
///     .await?;
/// ```
#[derive(Clone, Debug)]
pub struct SearchApi {
    resource: Resource,
}

impl SearchApi {
    /// The REST root.
    pub const ROOT: &'static str = "/rest/api/search";

    /// Creates the API over a shared configuration and transport.
    #[must_use]
    pub fn new(config: Arc<ConfluenceConfig>, transport: Arc<dyn Transport>) -> Self {
        Self {
            resource: Resource::new(Self::ROOT, config, transport),
        }
    }

    /// Runs a CQL query and returns every page of results.
    ///
    /// `context` is sent as the JSON `cqlcontext` parameter.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Serialization`] if the context cannot be
    /// encoded, or the first error any page fetch produced.
    pub async fn search(
        &self,
        cql: &str,
        context: Option<&CqlContext>,
    ) -> Result<Vec<SearchResult>, ResourceError> {
        let mut params = QueryParams::new();
        params.insert("cql", cql);
        if let Some(context) = context {
            params.insert_json("cqlcontext", context)?;
        }

        self.fetch_all(&FetchAllOptions::new().params(params)).await
    }
}

impl Deref for SearchApi {
    type Target = Resource;

    fn deref(&self) -> &Self::Target {
        &self.resource
    }
}
