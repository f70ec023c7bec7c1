//! Site settings and themes.

use std::ops::Deref;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::clients::Transport;
use crate::config::ConfluenceConfig;
use crate::rest::{QueryParams, Resource, ResourceError};

/// Look and feel settings for the site or a space.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct LookAndFeelSettings {
    /// Which of `global`, `theme` or `custom` is in use.
    #[serde(default)]
    pub selected: String,
    /// Site defaults.
    #[serde(default)]
    pub global: Value,
    /// Theme settings.
    #[serde(default)]
    pub theme: Value,
    /// Custom settings.
    #[serde(default)]
    pub custom: Value,
}

/// Build information for a Confluence Cloud site.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemInfo {
    /// Site identifier.
    #[serde(default)]
    pub cloud_id: String,
    /// Build commit.
    #[serde(default)]
    pub commit_hash: String,
}

/// Access to `/rest/api/settings`.
#[derive(Clone, Debug)]
pub struct SettingsApi {
    resource: Resource,
}

impl SettingsApi {
    /// The REST root.
    pub const ROOT: &'static str = "/rest/api/settings";

    /// Creates the API over a shared configuration and transport.
    #[must_use]
    pub fn new(config: Arc<ConfluenceConfig>, transport: Arc<dyn Transport>) -> Self {
        Self {
            resource: Resource::new(Self::ROOT, config, transport),
        }
    }

    /// Fetches the look and feel of the site, or of a space.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Api`] if the request fails.
    pub async fn get_look_and_feel(
        &self,
        space_key: Option<&str>,
    ) -> Result<LookAndFeelSettings, ResourceError> {
        let mut params = QueryParams::new();
        params.insert_opt("spaceKey", space_key);
        self.fetch_one("lookandfeel", Some(&params)).await
    }

    /// Fetches build information for the site.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Api`] if the request fails.
    pub async fn get_system_info(&self) -> Result<SystemInfo, ResourceError> {
        self.fetch_one("systemInfo", None).await
    }
}

impl Deref for SettingsApi {
    type Target = Resource;

    fn deref(&self) -> &Self::Target {
        &self.resource
    }
}

/// Access to `/rest/api/settings/theme`.
#[derive(Clone, Debug)]
pub struct ThemeApi {
    resource: Resource,
}

impl ThemeApi {
    /// The REST root.
    pub const ROOT: &'static str = "/rest/api/settings/theme";

    /// Creates the API over a shared configuration and transport.
    #[must_use]
    pub fn new(config: Arc<ConfluenceConfig>, transport: Arc<dyn Transport>) -> Self {
        Self {
            resource: Resource::new(Self::ROOT, config, transport),
        }
    }

    /// Fetches the theme the site uses.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Api`] if the request fails.
    pub async fn get_global_theme(&self) -> Result<Value, ResourceError> {
        self.fetch_one("selected", None).await
    }

    /// Fetches one theme by key.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Api`] if the request fails (404 for an
    /// unknown key).
    pub async fn get_theme(&self, theme_key: &str) -> Result<Value, ResourceError> {
        self.fetch_one(theme_key, None).await
    }
}

impl Deref for ThemeApi {
    type Target = Resource;

    fn deref(&self) -> &Self::Target {
        &self.resource
    }
}
