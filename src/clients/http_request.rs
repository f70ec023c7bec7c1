//! HTTP request types for the Confluence client.
//!
//! This module provides the [`HttpRequest`] descriptor and its builder. A
//! descriptor is built fresh for every call and handed to a
//! [`Transport`](crate::clients::Transport) by value.

use std::collections::HashMap;
use std::fmt;

use crate::auth::Authorization;
use crate::clients::errors::InvalidHttpRequestError;
use crate::clients::multipart::MultipartForm;

/// HTTP methods used by the Confluence REST API.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HttpMethod {
    /// HTTP GET method for retrieving resources.
    Get,
    /// HTTP POST method for creating resources.
    Post,
    /// HTTP PUT method for updating resources.
    Put,
    /// HTTP DELETE method for removing resources.
    Delete,
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Get => write!(f, "get"),
            Self::Post => write!(f, "post"),
            Self::Put => write!(f, "put"),
            Self::Delete => write!(f, "delete"),
        }
    }
}

/// Content type for HTTP request bodies.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ContentType {
    /// JSON content type (`application/json`).
    #[default]
    Json,
    /// Multipart form content type (`multipart/form-data`).
    FormData,
}

impl ContentType {
    /// Returns the MIME type string for this content type.
    #[must_use]
    pub const fn as_mime(&self) -> &'static str {
        match self {
            Self::Json => "application/json",
            Self::FormData => "multipart/form-data",
        }
    }
}

/// A request body.
#[derive(Clone, Debug, PartialEq)]
pub enum RequestBody {
    /// A JSON document.
    Json(serde_json::Value),
    /// A multipart form (attachment uploads).
    Multipart(MultipartForm),
}

impl RequestBody {
    /// Returns the content type this body must be sent with.
    #[must_use]
    pub const fn content_type(&self) -> ContentType {
        match self {
            Self::Json(_) => ContentType::Json,
            Self::Multipart(_) => ContentType::FormData,
        }
    }

    const fn kind(&self) -> &'static str {
        match self {
            Self::Json(_) => "json",
            Self::Multipart(_) => "multipart",
        }
    }
}

impl From<serde_json::Value> for RequestBody {
    fn from(value: serde_json::Value) -> Self {
        Self::Json(value)
    }
}

impl From<MultipartForm> for RequestBody {
    fn from(form: MultipartForm) -> Self {
        Self::Multipart(form)
    }
}

/// An HTTP request to be sent to Confluence.
///
/// `url` is the absolute URL, query string included, as produced by
/// [`build_url`](crate::rest::build_url).
///
/// # Example
///
/// ```rust
/// use confluence_api::clients::{ContentType, HttpMethod, HttpRequest};
/// use serde_json::json;
///
/// let request = HttpRequest::builder(
///     HttpMethod::Post,
///     "https://example.atlassian.net/wiki/rest/api/content/",
/// )
/// .body(json!({"type": "page", "title": "Hello"}))
/// .build()
/// .unwrap();
///
/// assert_eq!(request.content_type, ContentType::Json);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct HttpRequest {
    /// The HTTP method for this request.
    pub http_method: HttpMethod,
    /// The absolute URL, including any query string.
    pub url: String,
    /// The request body, if any.
    pub body: Option<RequestBody>,
    /// The content type of the request.
    pub content_type: ContentType,
    /// Additional headers to include in the request.
    pub extra_headers: Option<HashMap<String, String>>,
    /// Auth material for this request.
    pub authorization: Option<Authorization>,
}

impl HttpRequest {
    /// Creates a new builder for constructing an `HttpRequest`.
    #[must_use]
    pub fn builder(method: HttpMethod, url: impl Into<String>) -> HttpRequestBuilder {
        HttpRequestBuilder::new(method, url)
    }

    /// Validates the request, ensuring it meets all requirements.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidHttpRequestError`] if:
    /// - `http_method` is `Post` or `Put` but `body` is `None`
    /// - the body kind does not match `content_type`
    pub fn verify(&self) -> Result<(), InvalidHttpRequestError> {
        if matches!(self.http_method, HttpMethod::Post | HttpMethod::Put) && self.body.is_none() {
            return Err(InvalidHttpRequestError::MissingBody {
                method: self.http_method.to_string(),
            });
        }

        if let Some(body) = &self.body {
            if body.content_type() != self.content_type {
                return Err(InvalidHttpRequestError::ContentTypeMismatch {
                    content_type: self.content_type.as_mime(),
                    body: body.kind(),
                });
            }
        }

        Ok(())
    }
}

/// Builder for constructing [`HttpRequest`] instances.
///
/// The content type follows the body unless set explicitly.
#[derive(Debug)]
pub struct HttpRequestBuilder {
    http_method: HttpMethod,
    url: String,
    body: Option<RequestBody>,
    content_type: Option<ContentType>,
    extra_headers: Option<HashMap<String, String>>,
    authorization: Option<Authorization>,
}

impl HttpRequestBuilder {
    fn new(method: HttpMethod, url: impl Into<String>) -> Self {
        Self {
            http_method: method,
            url: url.into(),
            body: None,
            content_type: None,
            extra_headers: None,
            authorization: None,
        }
    }

    /// Sets the request body.
    #[must_use]
    pub fn body(mut self, body: impl Into<RequestBody>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Sets the request body if one is given.
    #[must_use]
    pub fn maybe_body(mut self, body: Option<RequestBody>) -> Self {
        self.body = body;
        self
    }

    /// Overrides the content type.
    #[must_use]
    pub const fn content_type(mut self, content_type: ContentType) -> Self {
        self.content_type = Some(content_type);
        self
    }

    /// Merges a map of extra headers into the request.
    #[must_use]
    pub fn extra_headers(mut self, headers: HashMap<String, String>) -> Self {
        self.extra_headers
            .get_or_insert_with(HashMap::new)
            .extend(headers);
        self
    }

    /// Adds a single extra header.
    #[must_use]
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra_headers
            .get_or_insert_with(HashMap::new)
            .insert(key.into(), value.into());
        self
    }

    /// Sets the auth material for the request.
    #[must_use]
    pub fn authorization(mut self, authorization: Option<Authorization>) -> Self {
        self.authorization = authorization;
        self
    }

    /// Builds the [`HttpRequest`], validating it in the process.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidHttpRequestError`] if the request fails validation.
    pub fn build(self) -> Result<HttpRequest, InvalidHttpRequestError> {
        let content_type = self
            .content_type
            .or_else(|| self.body.as_ref().map(RequestBody::content_type))
            .unwrap_or_default();

        let request = HttpRequest {
            http_method: self.http_method,
            url: self.url,
            body: self.body,
            content_type,
            extra_headers: self.extra_headers,
            authorization: self.authorization,
        };
        request.verify()?;
        Ok(request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const URL: &str = "https://example.atlassian.net/wiki/rest/api/content/";

    #[test]
    fn test_http_method_display() {
        assert_eq!(HttpMethod::Get.to_string(), "get");
        assert_eq!(HttpMethod::Post.to_string(), "post");
        assert_eq!(HttpMethod::Put.to_string(), "put");
        assert_eq!(HttpMethod::Delete.to_string(), "delete");
    }

    #[test]
    fn test_content_type_mime() {
        assert_eq!(ContentType::Json.as_mime(), "application/json");
        assert_eq!(ContentType::FormData.as_mime(), "multipart/form-data");
    }

    #[test]
    fn test_builder_creates_valid_get_request() {
        let request = HttpRequest::builder(HttpMethod::Get, URL).build().unwrap();

        assert_eq!(request.http_method, HttpMethod::Get);
        assert_eq!(request.url, URL);
        assert!(request.body.is_none());
        assert_eq!(request.content_type, ContentType::Json);
        assert!(request.authorization.is_none());
    }

    #[test]
    fn test_content_type_follows_multipart_body() {
        let form = MultipartForm::new().text("comment", "hi");
        let request = HttpRequest::builder(HttpMethod::Put, URL)
            .body(form)
            .build()
            .unwrap();

        assert_eq!(request.content_type, ContentType::FormData);
    }

    #[test]
    fn test_verify_requires_body_for_post_and_put() {
        let result = HttpRequest::builder(HttpMethod::Post, URL).build();
        assert!(matches!(
            result,
            Err(InvalidHttpRequestError::MissingBody { method }) if method == "post"
        ));

        let result = HttpRequest::builder(HttpMethod::Put, URL).build();
        assert!(matches!(
            result,
            Err(InvalidHttpRequestError::MissingBody { method }) if method == "put"
        ));
    }

    #[test]
    fn test_verify_rejects_mismatched_content_type() {
        let result = HttpRequest::builder(HttpMethod::Post, URL)
            .body(json!({"title": "x"}))
            .content_type(ContentType::FormData)
            .build();

        assert!(matches!(
            result,
            Err(InvalidHttpRequestError::ContentTypeMismatch { body: "json", .. })
        ));
    }

    #[test]
    fn test_delete_accepts_optional_body() {
        let request = HttpRequest::builder(HttpMethod::Delete, URL)
            .maybe_body(Some(json!({"name": "label"}).into()))
            .build()
            .unwrap();
        assert!(request.body.is_some());

        let request = HttpRequest::builder(HttpMethod::Delete, URL)
            .maybe_body(None)
            .build()
            .unwrap();
        assert!(request.body.is_none());
    }

    #[test]
    fn test_builder_with_extra_headers() {
        let request = HttpRequest::builder(HttpMethod::Get, URL)
            .header("X-Atlassian-Token", "nocheck")
            .extra_headers(HashMap::from([(
                "X-Custom".to_string(),
                "value".to_string(),
            )]))
            .build()
            .unwrap();

        let headers = request.extra_headers.unwrap();
        assert_eq!(headers.get("X-Atlassian-Token"), Some(&"nocheck".to_string()));
        assert_eq!(headers.get("X-Custom"), Some(&"value".to_string()));
    }

    #[test]
    fn test_builder_attaches_authorization() {
        let request = HttpRequest::builder(HttpMethod::Get, URL)
            .authorization(Some(Authorization::Bearer("token".to_string())))
            .build()
            .unwrap();

        assert!(request.authorization.unwrap().is_bearer());
    }
}
