//! Space resource.
//!
//! # Example
//!
//! ```rust,ignore
//! use confluence_api::rest::resources::{ExpandableSpaceKey, GetAllSpacesOptions, SpaceType};
//!
//! let space = confluence
//!     .spaces()
//!     .get_space_by_key("DEMO", &[ExpandableSpaceKey::DescriptionPlain])
//!     .await?;
//!
//! let spaces = confluence
//!     .spaces()
//!     .get_all_spaces(&GetAllSpacesOptions {
//!         space_type: Some(SpaceType::Global),
//!         ..Default::default()
//!     })
//!     .await?;
//! ```

use std::ops::Deref;
use std::sync::Arc;

use crate::clients::Transport;
use crate::config::ConfluenceConfig;
use crate::rest::resources::types::{ExpandableSpaceKey, Space, SpaceStatus, SpaceType};
use crate::rest::{FetchAllOptions, QueryParams, Resource, ResourceError};

use super::join;

/// Filters for [`SpaceApi::get_all_spaces`].
#[derive(Clone, Debug, Default)]
pub struct GetAllSpacesOptions {
    /// Only these space keys.
    pub keys: Vec<String>,
    /// Only spaces of this type.
    pub space_type: Option<SpaceType>,
    /// Only spaces with this status.
    pub status: Option<SpaceStatus>,
    /// Only spaces with all of these labels.
    pub labels: Vec<String>,
    /// Only spaces the current user (or `favourite_user_key`) marked as favourite.
    pub favourite: Option<bool>,
    /// The user whose favourites `favourite` refers to.
    pub favourite_user_key: Option<String>,
    /// Expansions for each space.
    pub expand: Vec<ExpandableSpaceKey>,
}

impl GetAllSpacesOptions {
    fn to_query(&self) -> QueryParams {
        let mut params = QueryParams::new();
        if !self.keys.is_empty() {
            params.insert("spaceKey", self.keys.join(","));
        }
        params.insert_opt("type", self.space_type);
        params.insert_opt("status", self.status);
        if !self.labels.is_empty() {
            params.insert("label", self.labels.join(","));
        }
        params.insert_opt("favourite", self.favourite);
        params.insert_opt("favouriteUserKey", self.favourite_user_key.as_deref());
        params
    }
}

/// Access to `/rest/api/space`.
#[derive(Clone, Debug)]
pub struct SpaceApi {
    resource: Resource,
}

impl SpaceApi {
    /// The REST root.
    pub const ROOT: &'static str = "/rest/api/space";

    /// Creates the API over a shared configuration and transport.
    #[must_use]
    pub fn new(config: Arc<ConfluenceConfig>, transport: Arc<dyn Transport>) -> Self {
        Self {
            resource: Resource::new(Self::ROOT, config, transport),
        }
    }

    /// Fetches one space by key.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Api`] if the request fails (404 for an
    /// unknown key).
    pub async fn get_space_by_key(
        &self,
        key: &str,
        expand: &[ExpandableSpaceKey],
    ) -> Result<Space, ResourceError> {
        let mut params = QueryParams::new();
        if !expand.is_empty() {
            params.insert("expand", join(expand));
        }
        self.fetch_one(key, Some(&params)).await
    }

    /// Fetches every space matching `options`.
    ///
    /// # Errors
    ///
    /// Returns the first error any page fetch produced.
    pub async fn get_all_spaces(
        &self,
        options: &GetAllSpacesOptions,
    ) -> Result<Vec<Space>, ResourceError> {
        let fetch = FetchAllOptions::new()
            .params(options.to_query())
            .expand(options.expand.iter().map(ExpandableSpaceKey::as_str));
        self.fetch_all(&fetch).await
    }
}

impl Deref for SpaceApi {
    type Target = Resource;

    fn deref(&self) -> &Self::Target {
        &self.resource
    }
}
