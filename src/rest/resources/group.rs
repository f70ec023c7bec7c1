//! Group resource.

use std::ops::Deref;
use std::sync::Arc;

use crate::clients::Transport;
use crate::config::ConfluenceConfig;
use crate::rest::resources::types::User;
use crate::rest::{FetchAllOptions, Resource, ResourceError};

/// Access to `/rest/api/group`.
#[derive(Clone, Debug)]
pub struct GroupApi {
    resource: Resource,
}

impl GroupApi {
    /// The REST root.
    pub const ROOT: &'static str = "/rest/api/group";

    /// Creates the API over a shared configuration and transport.
    #[must_use]
    pub fn new(config: Arc<ConfluenceConfig>, transport: Arc<dyn Transport>) -> Self {
        Self {
            resource: Resource::new(Self::ROOT, config, transport),
        }
    }

    /// Fetches every member of a group.
    ///
    /// # Errors
    ///
    /// Returns the first error any page fetch produced.
    pub async fn get_group_members(&self, group_name: &str) -> Result<Vec<User>, ResourceError> {
        self.fetch_all(&FetchAllOptions::new().id(format!("{group_name}/member")))
            .await
    }
}

impl Deref for GroupApi {
    type Target = Resource;

    fn deref(&self) -> &Self::Target {
        &self.resource
    }
}
