//! HTTP transport types for Confluence communication.
//!
//! This module provides the layer the resource operations dispatch through.
//! It knows nothing about Confluence resources; it only turns a request
//! descriptor into a response or a transport error.
//!
//! # Overview
//!
//! - [`Transport`]: The injectable dispatch trait
//! - [`HttpClient`]: The default `reqwest` implementation of [`Transport`]
//! - [`HttpRequest`]: A request to be sent
//! - [`HttpResponse`]: A parsed response
//! - [`MultipartForm`]: Multipart bodies for attachment uploads
//! - [`HttpError`]: Transport failures
//!
//! # Example
//!
//! ```rust,ignore
//! use confluence_api::clients::{HttpClient, HttpMethod, HttpRequest, Transport};
//!
//! let client = HttpClient::new(&config)?;
//!
//! let request = HttpRequest::builder(
//!     HttpMethod::Get,
//!     "https://example.atlassian.net/wiki/rest/api/space/DEMO",
//! )
//! .authorization(config.credentials().authorization())
//! .build()?;
//!
//! let response = client.send(request).await?;
//! ```

mod errors;
mod http_client;
mod http_request;
mod http_response;
mod multipart;
mod transport;

pub use errors::{HttpError, HttpResponseError, InvalidHttpRequestError};
pub use http_client::{HttpClient, SDK_VERSION};
pub use http_request::{ContentType, HttpMethod, HttpRequest, HttpRequestBuilder, RequestBody};
pub use http_response::HttpResponse;
pub use multipart::{EncodedMultipart, FormPart, MultipartForm};
pub use transport::Transport;
