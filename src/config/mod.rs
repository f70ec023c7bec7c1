//! Configuration types for the Confluence client.
//!
//! This module provides the connection descriptor shared by every resource
//! accessor of a [`Confluence`](crate::Confluence) client.
//!
//! # Overview
//!
//! - [`ConfluenceConfig`]: The immutable connection descriptor
//! - [`ConfluenceConfigBuilder`]: A builder for constructing [`ConfluenceConfig`] instances
//! - [`HostUrl`]: A validated Confluence base URL
//! - [`ApiToken`]: A validated API token with masked debug output
//! - [`AccessToken`]: A validated OAuth access token with masked debug output
//!
//! # Example
//!
//! ```rust
//! use confluence_api::{AccessToken, ConfluenceConfig, HostUrl};
//!
//! let config = ConfluenceConfig::builder()
//!     .host(HostUrl::new("https://example.atlassian.net/wiki").unwrap())
//!     .access_token(AccessToken::new("oauth-token").unwrap())
//!     .page_size(25)
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.page_size(), 25);
//! ```

mod newtypes;

pub use newtypes::{AccessToken, ApiToken, HostUrl};

use std::time::Duration;

use crate::auth::Credentials;
use crate::error::ConfigError;

/// Default number of items requested per page when paging collections.
pub const DEFAULT_PAGE_SIZE: u32 = 50;

/// Environment variable holding the Confluence base URL.
pub const ENV_HOST: &str = "CONFLUENCE_HOST";
/// Environment variable holding the account name for Basic auth.
pub const ENV_USERNAME: &str = "CONFLUENCE_USERNAME";
/// Environment variable holding the API token for Basic auth.
pub const ENV_API_KEY: &str = "CONFLUENCE_API_KEY";
/// Environment variable holding an OAuth access token.
pub const ENV_ACCESS_TOKEN: &str = "CONFLUENCE_ACCESS_TOKEN";
/// Environment variable overriding the page size.
pub const ENV_PAGE_SIZE: &str = "CONFLUENCE_PAGE_SIZE";

/// Connection descriptor for a Confluence site.
///
/// Holds the host, the selected [`Credentials`], and transport settings.
/// A config is immutable once built; clients share it read-only.
///
/// # Thread Safety
///
/// `ConfluenceConfig` is `Clone`, `Send`, and `Sync`.
#[derive(Clone, Debug)]
pub struct ConfluenceConfig {
    host: HostUrl,
    credentials: Credentials,
    page_size: u32,
    timeout: Option<Duration>,
    user_agent_prefix: Option<String>,
}

impl ConfluenceConfig {
    /// Creates a new builder for constructing a `ConfluenceConfig`.
    #[must_use]
    pub fn builder() -> ConfluenceConfigBuilder {
        ConfluenceConfigBuilder::new()
    }

    /// Builds a configuration from the process environment.
    ///
    /// Reads `CONFLUENCE_HOST` (required), `CONFLUENCE_USERNAME`,
    /// `CONFLUENCE_API_KEY`, `CONFLUENCE_ACCESS_TOKEN` and
    /// `CONFLUENCE_PAGE_SIZE`. Empty variables are treated as unset.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the host is missing or any value is invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds a configuration using `lookup` to resolve variable names.
    ///
    /// This is what [`from_env`](Self::from_env) delegates to; it accepts
    /// any source of named values (a dotenv map, a test fixture).
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the host is missing or any value is invalid.
    ///
    /// # Example
    ///
    /// ```rust
    /// use std::collections::HashMap;
    /// use confluence_api::ConfluenceConfig;
    ///
    /// let vars = HashMap::from([
    ///     ("CONFLUENCE_HOST", "https://example.atlassian.net/wiki"),
    ///     ("CONFLUENCE_ACCESS_TOKEN", "oauth-token"),
    /// ]);
    /// let config = ConfluenceConfig::from_lookup(|name| vars.get(name).map(|v| v.to_string()))
    ///     .unwrap();
    /// assert_eq!(config.host().host_name(), "example.atlassian.net");
    /// ```
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        let host = read(ENV_HOST).ok_or(ConfigError::MissingRequiredField { field: ENV_HOST })?;
        let mut builder = Self::builder().host(HostUrl::new(host)?);

        if let Some(username) = read(ENV_USERNAME) {
            builder = builder.username(username);
        }
        if let Some(api_token) = read(ENV_API_KEY) {
            builder = builder.api_token(ApiToken::new(api_token)?);
        }
        if let Some(access_token) = read(ENV_ACCESS_TOKEN) {
            builder = builder.access_token(AccessToken::new(access_token)?);
        }
        if let Some(page_size) = read(ENV_PAGE_SIZE) {
            let size = page_size.trim().parse::<u32>().map_err(|e| {
                ConfigError::InvalidEnvironmentValue {
                    name: ENV_PAGE_SIZE,
                    reason: e.to_string(),
                }
            })?;
            builder = builder.page_size(size);
        }

        builder.build()
    }

    /// Returns the Confluence base URL.
    #[must_use]
    pub const fn host(&self) -> &HostUrl {
        &self.host
    }

    /// Returns the credentials selected for this configuration.
    #[must_use]
    pub const fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Returns the number of items requested per page when paging.
    #[must_use]
    pub const fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Returns the per-request timeout, if configured.
    #[must_use]
    pub const fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Returns the user agent prefix, if configured.
    #[must_use]
    pub fn user_agent_prefix(&self) -> Option<&str> {
        self.user_agent_prefix.as_deref()
    }
}

// Verify ConfluenceConfig is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ConfluenceConfig>();
};

/// Builder for constructing [`ConfluenceConfig`] instances.
///
/// `host` is required. Credentials are optional: an access token selects
/// bearer auth, a username plus API token selects Basic auth, and the
/// access token wins when both are given.
///
/// # Defaults
///
/// - `page_size`: [`DEFAULT_PAGE_SIZE`]
/// - `timeout`: `None` (the transport's default)
/// - `user_agent_prefix`: `None`
#[derive(Debug, Default)]
pub struct ConfluenceConfigBuilder {
    host: Option<HostUrl>,
    username: Option<String>,
    api_token: Option<ApiToken>,
    access_token: Option<AccessToken>,
    page_size: Option<u32>,
    timeout: Option<Duration>,
    user_agent_prefix: Option<String>,
}

impl ConfluenceConfigBuilder {
    /// Creates a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the Confluence base URL (required).
    #[must_use]
    pub fn host(mut self, host: HostUrl) -> Self {
        self.host = Some(host);
        self
    }

    /// Sets the account name used for Basic auth.
    #[must_use]
    pub fn username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    /// Sets the API token used for Basic auth.
    #[must_use]
    pub fn api_token(mut self, token: ApiToken) -> Self {
        self.api_token = Some(token);
        self
    }

    /// Sets the OAuth access token used for bearer auth.
    #[must_use]
    pub fn access_token(mut self, token: AccessToken) -> Self {
        self.access_token = Some(token);
        self
    }

    /// Sets the number of items requested per page.
    #[must_use]
    pub const fn page_size(mut self, size: u32) -> Self {
        self.page_size = Some(size);
        self
    }

    /// Sets the per-request timeout passed to the transport.
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets the user agent prefix for HTTP requests.
    #[must_use]
    pub fn user_agent_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.user_agent_prefix = Some(prefix.into());
        self
    }

    /// Builds the [`ConfluenceConfig`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingRequiredField`] if `host` is not set,
    /// [`ConfigError::EmptyUsername`] for an empty username, and
    /// [`ConfigError::InvalidPageSize`] for a page size of zero.
    pub fn build(self) -> Result<ConfluenceConfig, ConfigError> {
        let host = self
            .host
            .ok_or(ConfigError::MissingRequiredField { field: "host" })?;

        if self.username.as_deref().is_some_and(str::is_empty) {
            return Err(ConfigError::EmptyUsername);
        }

        let page_size = self.page_size.unwrap_or(DEFAULT_PAGE_SIZE);
        if page_size == 0 {
            return Err(ConfigError::InvalidPageSize { size: page_size });
        }

        if self.access_token.is_none() && self.username.is_some() != self.api_token.is_some() {
            tracing::warn!(
                "Confluence config for {} has only half of a username/API token pair; requests will be sent without credentials",
                host
            );
        }

        let credentials = Credentials::select(self.username, self.api_token, self.access_token);

        Ok(ConfluenceConfig {
            host,
            credentials,
            page_size,
            timeout: self.timeout,
            user_agent_prefix: self.user_agent_prefix,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn host() -> HostUrl {
        HostUrl::new("https://example.atlassian.net/wiki").unwrap()
    }

    #[test]
    fn test_builder_requires_host() {
        let result = ConfluenceConfigBuilder::new()
            .access_token(AccessToken::new("token").unwrap())
            .build();

        assert!(matches!(
            result,
            Err(ConfigError::MissingRequiredField { field: "host" })
        ));
    }

    #[test]
    fn test_builder_provides_sensible_defaults() {
        let config = ConfluenceConfig::builder().host(host()).build().unwrap();

        assert_eq!(config.page_size(), DEFAULT_PAGE_SIZE);
        assert!(config.timeout().is_none());
        assert!(config.user_agent_prefix().is_none());
        assert_eq!(config.credentials(), &Credentials::Anonymous);
    }

    #[test]
    fn test_builder_rejects_zero_page_size() {
        let result = ConfluenceConfig::builder().host(host()).page_size(0).build();
        assert!(matches!(
            result,
            Err(ConfigError::InvalidPageSize { size: 0 })
        ));
    }

    #[test]
    fn test_builder_rejects_empty_username() {
        let result = ConfluenceConfig::builder()
            .host(host())
            .username("")
            .api_token(ApiToken::new("token").unwrap())
            .build();
        assert!(matches!(result, Err(ConfigError::EmptyUsername)));
    }

    #[test]
    fn test_builder_with_all_optional_fields() {
        let config = ConfluenceConfig::builder()
            .host(host())
            .username("alice")
            .api_token(ApiToken::new("api-token").unwrap())
            .page_size(10)
            .timeout(Duration::from_secs(30))
            .user_agent_prefix("MyApp/1.0")
            .build()
            .unwrap();

        assert!(matches!(config.credentials(), Credentials::Basic { .. }));
        assert_eq!(config.page_size(), 10);
        assert_eq!(config.timeout(), Some(Duration::from_secs(30)));
        assert_eq!(config.user_agent_prefix(), Some("MyApp/1.0"));
    }

    #[test]
    fn test_config_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ConfluenceConfig>();
    }

    #[test]
    fn test_from_lookup_reads_basic_credentials() {
        let vars = HashMap::from([
            (ENV_HOST, "https://example.atlassian.net/wiki"),
            (ENV_USERNAME, "alice@example.com"),
            (ENV_API_KEY, "api-token"),
            (ENV_PAGE_SIZE, "20"),
        ]);
        let config =
            ConfluenceConfig::from_lookup(|name| vars.get(name).map(ToString::to_string)).unwrap();

        assert_eq!(config.host().as_ref(), "https://example.atlassian.net/wiki");
        assert!(matches!(config.credentials(), Credentials::Basic { username, .. } if username == "alice@example.com"));
        assert_eq!(config.page_size(), 20);
    }

    #[test]
    fn test_from_lookup_prefers_access_token() {
        let vars = HashMap::from([
            (ENV_HOST, "https://example.atlassian.net/wiki"),
            (ENV_USERNAME, "alice@example.com"),
            (ENV_API_KEY, "api-token"),
            (ENV_ACCESS_TOKEN, "oauth-token"),
        ]);
        let config =
            ConfluenceConfig::from_lookup(|name| vars.get(name).map(ToString::to_string)).unwrap();

        assert!(matches!(config.credentials(), Credentials::Bearer { .. }));
    }

    #[test]
    fn test_from_lookup_requires_host() {
        let result = ConfluenceConfig::from_lookup(|_| None);
        assert!(matches!(
            result,
            Err(ConfigError::MissingRequiredField { field: ENV_HOST })
        ));
    }

    #[test]
    fn test_from_lookup_treats_blank_values_as_unset() {
        let vars = HashMap::from([
            (ENV_HOST, "https://example.atlassian.net"),
            (ENV_API_KEY, ""),
        ]);
        let config =
            ConfluenceConfig::from_lookup(|name| vars.get(name).map(ToString::to_string)).unwrap();
        assert_eq!(config.credentials(), &Credentials::Anonymous);
    }

    #[test]
    fn test_from_lookup_rejects_invalid_page_size() {
        let vars = HashMap::from([
            (ENV_HOST, "https://example.atlassian.net"),
            (ENV_PAGE_SIZE, "lots"),
        ]);
        let result = ConfluenceConfig::from_lookup(|name| vars.get(name).map(ToString::to_string));
        assert!(matches!(
            result,
            Err(ConfigError::InvalidEnvironmentValue {
                name: ENV_PAGE_SIZE,
                ..
            })
        ));
    }
}
