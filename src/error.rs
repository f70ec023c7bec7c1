//! Error types for client configuration.
//!
//! This module contains the error type used when building a
//! [`ConfluenceConfig`](crate::ConfluenceConfig) or one of its validated
//! newtypes.
//!
//! # Error Handling
//!
//! All configuration constructors return `Result<T, ConfigError>` to enable
//! fail-fast validation. Error messages are designed to be clear and actionable.
//!
//! # Example
//!
//! ```rust
//! use confluence_api::{ApiToken, ConfigError};
//!
//! let result = ApiToken::new("");
//! assert!(matches!(result, Err(ConfigError::EmptyApiToken)));
//! ```

use thiserror::Error;

/// Errors that can occur during client configuration.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// API token cannot be empty.
    #[error("API token cannot be empty. Please provide a valid Atlassian API token.")]
    EmptyApiToken,

    /// Access token cannot be empty.
    #[error("Access token cannot be empty. Please provide a valid OAuth access token.")]
    EmptyAccessToken,

    /// Username cannot be empty.
    #[error("Username cannot be empty when provided.")]
    EmptyUsername,

    /// Host URL is invalid.
    #[error("Invalid host URL '{url}'. Please provide a valid URL with scheme (e.g., 'https://example.atlassian.net/wiki').")]
    InvalidHostUrl {
        /// The invalid URL that was provided.
        url: String,
    },

    /// Page size must be at least one.
    #[error("Invalid page size {size}. Page size must be at least 1.")]
    InvalidPageSize {
        /// The rejected page size.
        size: u32,
    },

    /// A required field is missing.
    #[error("Missing required field: '{field}'. This field must be set before building the configuration.")]
    MissingRequiredField {
        /// The name of the missing field.
        field: &'static str,
    },

    /// An environment variable holds a value that cannot be used.
    #[error("Environment variable '{name}' has an invalid value: {reason}")]
    InvalidEnvironmentValue {
        /// The environment variable name.
        name: &'static str,
        /// Why the value was rejected.
        reason: String,
    },
}
