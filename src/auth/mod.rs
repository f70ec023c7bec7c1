//! Authentication types for the Confluence client.
//!
//! Confluence accepts two kinds of credentials:
//!
//! - **Bearer tokens**: OAuth 2.0 access tokens, sent as
//!   `Authorization: Bearer <token>`.
//! - **Basic auth**: an Atlassian account name plus an API token, sent as
//!   `Authorization: Basic <base64>`.
//!
//! The choice is made once, when the configuration is built, by
//! [`Credentials::select`]. Each request then carries the
//! [`Authorization`] material produced by [`Credentials::authorization`].
//!
//! # Example
//!
//! ```rust
//! use confluence_api::{ApiToken, ConfluenceConfig, HostUrl};
//! use confluence_api::auth::Credentials;
//!
//! let config = ConfluenceConfig::builder()
//!     .host(HostUrl::new("https://example.atlassian.net/wiki").unwrap())
//!     .username("alice@example.com")
//!     .api_token(ApiToken::new("api-token").unwrap())
//!     .build()
//!     .unwrap();
//!
//! assert!(matches!(config.credentials(), Credentials::Basic { .. }));
//! ```

mod credentials;

pub use credentials::{Authorization, Credentials};
