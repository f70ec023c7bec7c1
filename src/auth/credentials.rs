//! Credential selection for Confluence requests.
//!
//! This module provides the [`Credentials`] type, which captures which kind
//! of authentication a client was configured with, and [`Authorization`],
//! the per-request auth material derived from it.

use std::fmt;

use base64::prelude::*;

use crate::config::{AccessToken, ApiToken};

/// The credentials a client authenticates with.
///
/// Built once from the configured values by [`Credentials::select`]. A
/// bearer access token takes precedence over username/API token pairs.
#[derive(Clone, PartialEq, Eq)]
pub enum Credentials {
    /// OAuth 2.0 bearer token.
    Bearer {
        /// The access token sent in the `Authorization` header.
        access_token: AccessToken,
    },
    /// HTTP Basic authentication with an Atlassian account and API token.
    Basic {
        /// The account name (usually an email address).
        username: String,
        /// The API token used as the Basic password.
        api_token: ApiToken,
    },
    /// No credentials; requests are sent unauthenticated.
    Anonymous,
}

impl Credentials {
    /// Chooses the credentials to use from the configured values.
    ///
    /// - An access token always wins.
    /// - Otherwise a username and API token together select Basic auth.
    /// - Anything else yields [`Credentials::Anonymous`].
    ///
    /// # Example
    ///
    /// ```rust
    /// use confluence_api::{AccessToken, ApiToken};
    /// use confluence_api::auth::Credentials;
    ///
    /// let credentials = Credentials::select(
    ///     Some("alice@example.com".to_string()),
    ///     Some(ApiToken::new("api-token").unwrap()),
    ///     Some(AccessToken::new("oauth-token").unwrap()),
    /// );
    /// assert!(matches!(credentials, Credentials::Bearer { .. }));
    /// ```
    #[must_use]
    pub fn select(
        username: Option<String>,
        api_token: Option<ApiToken>,
        access_token: Option<AccessToken>,
    ) -> Self {
        match (access_token, username, api_token) {
            (Some(access_token), _, _) => Self::Bearer { access_token },
            (None, Some(username), Some(api_token)) => Self::Basic {
                username,
                api_token,
            },
            _ => Self::Anonymous,
        }
    }

    /// Returns the auth material to attach to a request, if any.
    #[must_use]
    pub fn authorization(&self) -> Option<Authorization> {
        match self {
            Self::Bearer { access_token } => {
                Some(Authorization::Bearer(access_token.as_ref().to_string()))
            }
            Self::Basic {
                username,
                api_token,
            } => Some(Authorization::Basic {
                username: username.clone(),
                password: api_token.as_ref().to_string(),
            }),
            Self::Anonymous => None,
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bearer { access_token } => f
                .debug_struct("Bearer")
                .field("access_token", access_token)
                .finish(),
            Self::Basic {
                username,
                api_token,
            } => f
                .debug_struct("Basic")
                .field("username", username)
                .field("api_token", api_token)
                .finish(),
            Self::Anonymous => f.write_str("Anonymous"),
        }
    }
}

/// Auth material attached to a single outgoing request.
#[derive(Clone, PartialEq, Eq)]
pub enum Authorization {
    /// `Authorization: Bearer <token>`.
    Bearer(String),
    /// `Authorization: Basic base64(<username>:<password>)`.
    Basic {
        /// The Basic auth user.
        username: String,
        /// The Basic auth password (the API token).
        password: String,
    },
}

impl Authorization {
    /// Returns the value of the `Authorization` header for this material.
    ///
    /// # Example
    ///
    /// ```rust
    /// use confluence_api::auth::Authorization;
    ///
    /// let auth = Authorization::Basic {
    ///     username: "alice".to_string(),
    ///     password: "secret".to_string(),
    /// };
    /// assert_eq!(auth.header_value(), "Basic YWxpY2U6c2VjcmV0");
    /// ```
    #[must_use]
    pub fn header_value(&self) -> String {
        match self {
            Self::Bearer(token) => format!("Bearer {token}"),
            Self::Basic { username, password } => {
                let encoded = BASE64_STANDARD.encode(format!("{username}:{password}"));
                format!("Basic {encoded}")
            }
        }
    }

    /// Returns `true` for bearer material.
    #[must_use]
    pub const fn is_bearer(&self) -> bool {
        matches!(self, Self::Bearer(_))
    }

    /// Returns `true` for Basic material.
    #[must_use]
    pub const fn is_basic(&self) -> bool {
        matches!(self, Self::Basic { .. })
    }
}

impl fmt::Debug for Authorization {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bearer(_) => f.write_str("Bearer(*****)"),
            Self::Basic { username, .. } => f
                .debug_struct("Basic")
                .field("username", username)
                .field("password", &"*****")
                .finish(),
        }
    }
}
