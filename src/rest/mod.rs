//! The resource-access layer.
//!
//! This module is what every typed Confluence API is built on:
//!
//! - **[`Resource`]**: one REST root plus the shared config and transport,
//!   with the single-item and pagination primitives
//! - **[`build_url`] / [`QueryParams`]**: deterministic URL building
//! - **[`Collection<T>`]**: the paginated envelope
//! - **[`ApiError`]**: the one shape every failed call is normalized into
//! - **[`ResourceError`]**: the error type of every resource operation
//! - **[`resources`]**: the typed APIs (spaces, content, users, ...)
//!
//! # Example
//!
//! ```rust,ignore
//! use confluence_api::rest::{FetchAllOptions, PageOptions, QueryParams};
//! use confluence_api::rest::resources::Content;
//!
//! let content = confluence.content();
//!
//! // One page
//! let page = content
//!     .fetch_page::<Content>(&PageOptions { start: 0, limit: Some(25), ..Default::default() })
//!     .await?;
//!
//! // Everything, page by page
//! let params: QueryParams = [("spaceKey", "DEMO")].into_iter().collect();
//! let all: Vec<Content> = content
//!     .fetch_all(&FetchAllOptions::new().params(params))
//!     .await?;
//! ```

mod collection;
mod errors;
mod resource;
pub mod resources;
mod url;

pub use collection::Collection;
pub use errors::{ApiError, ResourceError};
pub use resource::{FetchAllOptions, PageOptions, Resource, WriteOptions, PROBE_BATCH_SIZE};
pub use url::{build_url, QueryParams};
