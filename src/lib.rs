//! # Confluence API Rust Client
//!
//! A typed client for the Confluence REST API: spaces, content pages,
//! attachments, users, groups, settings, themes and CQL search.
//!
//! ## Overview
//!
//! This crate provides:
//! - Type-safe configuration via [`ConfluenceConfig`] and [`ConfluenceConfigBuilder`]
//! - Validated newtypes for the host URL and credentials
//! - Bearer-token or basic-auth selection from the configured credentials
//! - An injectable [`Transport`](clients::Transport) with a `reqwest` default
//! - A generic resource layer with single-item operations and transparent
//!   pagination
//! - One normalized [`ApiError`] shape for every failed call
//!
//! ## Quick Start
//!
//! ```rust
//! use confluence_api::{ApiToken, ConfluenceConfig, HostUrl};
//!
//! let config = ConfluenceConfig::builder()
//!     .host(HostUrl::new("https://example.atlassian.net/wiki").unwrap())
//!     .username("alice@example.com")
//!     .api_token(ApiToken::new("api-token").unwrap())
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.page_size(), 50);
//! ```
//!
//! ## Making API Requests
//!
//! ```rust,ignore
//! use confluence_api::{Confluence, ConfluenceConfig};
//! use confluence_api::rest::resources::ExpandableSpaceKey;
//!
//! let confluence = Confluence::new(ConfluenceConfig::from_env()?)?;
//!
//! let space = confluence
//!     .spaces()
//!     .get_space_by_key("DEMO", &[ExpandableSpaceKey::DescriptionPlain])
//!     .await?;
//!
//! let pages = confluence.content().get_pages_in_space("DEMO").await?;
//! ```
//!
//! ## Errors
//!
//! Every resource operation returns [`ResourceError`]. Failures that reached
//! (or tried to reach) Confluence are [`ResourceError::Api`] carrying an
//! [`ApiError`] whose `status_code` is 0 when no response arrived.
//!
//! ## Design Principles
//!
//! - **No global state**: Configuration is instance-based and passed explicitly
//! - **Fail-fast validation**: All newtypes validate on construction
//! - **Thread-safe**: All types are `Send + Sync`
//! - **Async-first**: Designed for use with Tokio async runtime
//! - **One request at a time**: Pagination never overlaps requests

pub mod auth;
mod client;
pub mod clients;
pub mod config;
pub mod error;
pub mod rest;

// Re-export public types at crate root for convenience
pub use client::Confluence;
pub use config::{AccessToken, ApiToken, ConfluenceConfig, ConfluenceConfigBuilder, HostUrl};
pub use error::ConfigError;

// Re-export HTTP transport types
pub use clients::{
    HttpClient, HttpError, HttpMethod, HttpRequest, HttpRequestBuilder, HttpResponse,
    HttpResponseError, InvalidHttpRequestError, MultipartForm, RequestBody, Transport,
};

// Re-export resource layer types
pub use rest::{
    build_url, ApiError, Collection, FetchAllOptions, PageOptions, QueryParams, Resource,
    ResourceError, WriteOptions,
};
