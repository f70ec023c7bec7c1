//! The top-level Confluence client.

use std::sync::Arc;

use crate::clients::{HttpClient, HttpError, Transport};
use crate::config::ConfluenceConfig;
use crate::rest::resources::{
    ContentApi, GroupApi, SearchApi, SettingsApi, SpaceApi, ThemeApi, UserApi,
};

/// Entry point bundling every typed API over one configuration and
/// transport.
///
/// All accessors share the same `Arc`s; cloning the client or any accessor
/// is cheap.
///
/// # Example
///
/// ```rust,ignore
/// use confluence_api::{Confluence, ConfluenceConfig};
///
/// let confluence = Confluence::new(ConfluenceConfig::from_env()?)?;
///
/// let me = confluence.users().get_current_user(&[]).await?;
/// let spaces = confluence.spaces().get_all_spaces(&Default::default()).await?;
/// ```
#[derive(Clone, Debug)]
pub struct Confluence {
    config: Arc<ConfluenceConfig>,
    spaces: SpaceApi,
    content: ContentApi,
    users: UserApi,
    groups: GroupApi,
    settings: SettingsApi,
    themes: ThemeApi,
    search: SearchApi,
}

// Verify Confluence is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Confluence>();
};

impl Confluence {
    /// Creates a client over the default `reqwest` transport.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::Network`] if the HTTP client cannot be created.
    pub fn new(config: ConfluenceConfig) -> Result<Self, HttpError> {
        let transport = HttpClient::new(&config)?;
        Ok(Self::with_transport(config, Arc::new(transport)))
    }

    /// Creates a client over a caller-supplied transport.
    #[must_use]
    pub fn with_transport(config: ConfluenceConfig, transport: Arc<dyn Transport>) -> Self {
        let config = Arc::new(config);
        Self {
            spaces: SpaceApi::new(Arc::clone(&config), Arc::clone(&transport)),
            content: ContentApi::new(Arc::clone(&config), Arc::clone(&transport)),
            users: UserApi::new(Arc::clone(&config), Arc::clone(&transport)),
            groups: GroupApi::new(Arc::clone(&config), Arc::clone(&transport)),
            settings: SettingsApi::new(Arc::clone(&config), Arc::clone(&transport)),
            themes: ThemeApi::new(Arc::clone(&config), Arc::clone(&transport)),
            search: SearchApi::new(Arc::clone(&config), transport),
            config,
        }
    }

    /// The shared configuration.
    #[must_use]
    pub fn config(&self) -> &ConfluenceConfig {
        &self.config
    }

    /// `/rest/api/space`.
    #[must_use]
    pub const fn spaces(&self) -> &SpaceApi {
        &self.spaces
    }

    /// `/rest/api/content`.
    #[must_use]
    pub const fn content(&self) -> &ContentApi {
        &self.content
    }

    /// `/rest/api/user`.
    #[must_use]
    pub const fn users(&self) -> &UserApi {
        &self.users
    }

    /// `/rest/api/group`.
    #[must_use]
    pub const fn groups(&self) -> &GroupApi {
        &self.groups
    }

    /// `/rest/api/settings`.
    #[must_use]
    pub const fn settings(&self) -> &SettingsApi {
        &self.settings
    }

    /// `/rest/api/settings/theme`.
    #[must_use]
    pub const fn themes(&self) -> &ThemeApi {
        &self.themes
    }

    /// `/rest/api/search`.
    #[must_use]
    pub const fn search(&self) -> &SearchApi {
        &self.search
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::HostUrl;

    #[test]
    fn test_accessors_are_bound_to_their_roots() {
        let config = ConfluenceConfig::builder()
            .host(HostUrl::new("https://example.atlassian.net/wiki").unwrap())
            .build()
            .unwrap();
        let confluence = Confluence::new(config).unwrap();

        assert_eq!(confluence.spaces().root(), "/rest/api/space");
        assert_eq!(confluence.content().root(), "/rest/api/content");
        assert_eq!(confluence.users().root(), "/rest/api/user");
        assert_eq!(confluence.groups().root(), "/rest/api/group");
        assert_eq!(confluence.settings().root(), "/rest/api/settings");
        assert_eq!(confluence.themes().root(), "/rest/api/settings/theme");
        assert_eq!(confluence.search().root(), "/rest/api/search");
        assert_eq!(
            confluence.config().host().as_ref(),
            "https://example.atlassian.net/wiki"
        );
    }
}
