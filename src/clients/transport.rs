//! The injectable transport seam.

use async_trait::async_trait;

use crate::clients::errors::HttpError;
use crate::clients::http_request::HttpRequest;
use crate::clients::http_response::HttpResponse;

/// Sends one [`HttpRequest`] and reports the outcome.
///
/// Implementations return `Err(HttpError::Response(..))` for statuses they
/// treat as failures (the default [`HttpClient`](crate::clients::HttpClient)
/// treats every non-2xx status that way) and `Err(HttpError::Network { .. })`
/// when no response was received. A non-2xx response returned as `Ok` is
/// allowed; the resource layer inspects the status itself.
///
/// # Example
///
/// ```rust
/// use std::collections::HashMap;
/// use async_trait::async_trait;
/// use confluence_api::clients::{HttpError, HttpRequest, HttpResponse, Transport};
/// use serde_json::json;
///
/// #[derive(Debug)]
/// struct AlwaysEmpty;
///
/// #[async_trait]
/// impl Transport for AlwaysEmpty {
///     async fn send(&self, _request: HttpRequest) -> Result<HttpResponse, HttpError> {
///         Ok(HttpResponse::new(200, HashMap::new(), json!({"results": [], "size": 0})))
///     }
/// }
/// ```
#[async_trait]
pub trait Transport: Send + Sync + std::fmt::Debug {
    /// Dispatches a request.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] when the request could not be sent, no response
    /// arrived, or the response status is one the transport rejects.
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, HttpError>;
}
