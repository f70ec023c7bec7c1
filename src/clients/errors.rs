//! HTTP-specific error types for the Confluence client.
//!
//! These are the errors a [`Transport`](crate::clients::Transport) reports.
//! The resource layer never hands them to callers directly; it runs them
//! through [`ApiError::normalize`](crate::rest::ApiError::normalize) first.
//!
//! - [`HttpResponseError`]: A response arrived but its status was not 2xx
//! - [`InvalidHttpRequestError`]: A request failed validation before sending
//! - [`HttpError`]: Unified error type encompassing all transport failures

use thiserror::Error;

/// Error returned when an HTTP request receives a non-successful response.
///
/// Carries the status code and the parsed response body so the error
/// normalizer can pull Confluence's own `statusCode`/`message`/`data`
/// fields out of it.
///
/// # Example
///
/// ```rust
/// use confluence_api::clients::HttpResponseError;
/// use serde_json::json;
///
/// let error = HttpResponseError {
///     code: 404,
///     message: "Request failed with status code 404".to_string(),
///     body: json!({"statusCode": 404, "message": "No space with key : DEMO"}),
/// };
///
/// assert_eq!(error.code, 404);
/// ```
#[derive(Debug, Error, Clone, PartialEq)]
#[error("{message}")]
pub struct HttpResponseError {
    /// The HTTP status code of the response.
    pub code: u16,
    /// The transport's own description of the failure.
    pub message: String,
    /// The parsed response body (`{}` when the body was empty).
    pub body: serde_json::Value,
}

/// Error returned when an HTTP request fails validation.
///
/// This error is raised before a request is sent.
///
/// # Example
///
/// ```rust
/// use confluence_api::clients::InvalidHttpRequestError;
///
/// let error = InvalidHttpRequestError::MissingBody {
///     method: "post".to_string(),
/// };
///
/// assert_eq!(error.to_string(), "Cannot use post without specifying data.");
/// ```
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvalidHttpRequestError {
    /// A POST or PUT request was made without a body.
    #[error("Cannot use {method} without specifying data.")]
    MissingBody {
        /// The HTTP method that requires a body.
        method: String,
    },

    /// The declared content type does not match the body.
    #[error("Content type {content_type} does not match a {body} body.")]
    ContentTypeMismatch {
        /// The declared content type.
        content_type: &'static str,
        /// The kind of body that was supplied.
        body: &'static str,
    },

    /// A multipart file part declared an unparseable MIME type.
    #[error("Invalid MIME type '{mime}' for multipart field '{field}'.")]
    InvalidMimeType {
        /// The form field name.
        field: String,
        /// The rejected MIME type.
        mime: String,
    },
}

/// Unified error type for all transport failures.
///
/// # Example
///
/// ```rust,ignore
/// use confluence_api::clients::{HttpError, Transport};
///
/// match transport.send(request).await {
///     Ok(response) => { /* handle success */ }
///     Err(HttpError::Response(e)) => { /* non-2xx status */ }
///     Err(HttpError::InvalidRequest(e)) => { /* rejected before sending */ }
///     Err(HttpError::Network { message }) => { /* no response received */ }
/// }
/// ```
#[derive(Debug, Error, Clone, PartialEq)]
pub enum HttpError {
    /// An HTTP response error (non-2xx status code).
    #[error(transparent)]
    Response(#[from] HttpResponseError),

    /// Request validation failed.
    #[error(transparent)]
    InvalidRequest(#[from] InvalidHttpRequestError),

    /// No response was received (DNS, connection refused, timeout, ...).
    #[error("Network error: {message}")]
    Network {
        /// The transport's description of the failure.
        message: String,
    },
}

impl From<reqwest::Error> for HttpError {
    fn from(error: reqwest::Error) -> Self {
        Self::Network {
            message: error.to_string(),
        }
    }
}
