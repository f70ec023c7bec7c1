//! Default `reqwest`-backed transport.
//!
//! This module provides the [`HttpClient`] type, the [`Transport`] used by
//! [`Confluence::new`](crate::Confluence::new).

use std::collections::HashMap;

use async_trait::async_trait;

use crate::clients::errors::{HttpError, HttpResponseError};
use crate::clients::http_request::{ContentType, HttpMethod, HttpRequest, RequestBody};
use crate::clients::http_response::HttpResponse;
use crate::clients::transport::Transport;
use crate::config::ConfluenceConfig;

/// Library version from Cargo.toml.
pub const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

/// HTTP transport for talking to Confluence over `reqwest`.
///
/// The client handles:
/// - Default headers (`User-Agent`, `Accept`)
/// - The `Authorization` header from the request's auth material
/// - JSON and multipart bodies
/// - Mapping non-2xx statuses, and 2xx responses whose body is not JSON,
///   to [`HttpError::Response`]
///
/// It never retries.
///
/// # Thread Safety
///
/// `HttpClient` is `Send + Sync`, making it safe to share across async tasks.
///
/// # Example
///
/// ```rust
/// use confluence_api::{ConfluenceConfig, HostUrl};
/// use confluence_api::clients::HttpClient;
///
/// let config = ConfluenceConfig::builder()
///     .host(HostUrl::new("https://example.atlassian.net/wiki").unwrap())
///     .build()
///     .unwrap();
///
/// let client = HttpClient::new(&config).unwrap();
/// assert!(client.user_agent().contains("Confluence API Library v"));
/// ```
#[derive(Debug)]
pub struct HttpClient {
    client: reqwest::Client,
    user_agent: String,
}

// Verify HttpClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<HttpClient>();
};

impl HttpClient {
    /// Creates a new transport from the timeout and user agent in `config`.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::Network`] if the underlying `reqwest` client
    /// cannot be created (for example, TLS initialization failure).
    pub fn new(config: &ConfluenceConfig) -> Result<Self, HttpError> {
        let user_agent_prefix = config
            .user_agent_prefix()
            .map_or(String::new(), |prefix| format!("{prefix} | "));
        let rust_version = env!("CARGO_PKG_RUST_VERSION");
        let user_agent = format!(
            "{user_agent_prefix}Confluence API Library v{SDK_VERSION} | Rust {rust_version}"
        );

        let mut builder = reqwest::Client::builder()
            .use_rustls_tls()
            .user_agent(user_agent.clone());
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        Ok(Self { client, user_agent })
    }

    /// Returns the `User-Agent` header value sent with every request.
    #[must_use]
    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    /// Parses response headers into a `HashMap`.
    fn parse_response_headers(
        headers: &reqwest::header::HeaderMap,
    ) -> HashMap<String, Vec<String>> {
        let mut result: HashMap<String, Vec<String>> = HashMap::new();
        for (name, value) in headers {
            let key = name.as_str().to_lowercase();
            let value = value.to_str().unwrap_or_default().to_string();
            result.entry(key).or_default().push(value);
        }
        result
    }

    /// Parses a response body; an empty body becomes `{}`.
    fn parse_body(text: &str) -> Result<serde_json::Value, serde_json::Error> {
        if text.trim().is_empty() {
            return Ok(serde_json::json!({}));
        }
        serde_json::from_str(text)
    }
}

#[async_trait]
impl Transport for HttpClient {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, HttpError> {
        request.verify()?;

        let mut builder = match request.http_method {
            HttpMethod::Get => self.client.get(&request.url),
            HttpMethod::Post => self.client.post(&request.url),
            HttpMethod::Put => self.client.put(&request.url),
            HttpMethod::Delete => self.client.delete(&request.url),
        };

        builder = builder.header(reqwest::header::ACCEPT, ContentType::Json.as_mime());

        if let Some(authorization) = &request.authorization {
            builder = builder.header(reqwest::header::AUTHORIZATION, authorization.header_value());
        }

        if let Some(extra) = &request.extra_headers {
            for (key, value) in extra {
                builder = builder.header(key.as_str(), value.as_str());
            }
        }

        match &request.body {
            Some(RequestBody::Json(value)) => {
                builder = builder
                    .header(reqwest::header::CONTENT_TYPE, ContentType::Json.as_mime())
                    .body(value.to_string());
            }
            Some(RequestBody::Multipart(form)) => {
                let encoded = form.encode()?;
                tracing::debug!("Encoded multipart body as {}", encoded.content_type);
                builder = builder.multipart(encoded.form);
            }
            None => {}
        }

        let res = builder.send().await?;

        let code = res.status().as_u16();
        let headers = Self::parse_response_headers(res.headers());
        let body_text = res.text().await?;

        // A 2xx body must be JSON; error bodies fall back to `{}`.
        let body = match Self::parse_body(&body_text) {
            Ok(body) => body,
            Err(e) if (200..=299).contains(&code) => {
                tracing::debug!(
                    "{} {} returned a non-JSON body with status {}",
                    request.http_method,
                    request.url,
                    code
                );
                return Err(HttpError::Response(HttpResponseError {
                    code,
                    message: format!("Response body is not valid JSON: {e}"),
                    body: serde_json::json!({}),
                }));
            }
            Err(_) => serde_json::json!({}),
        };
        let response = HttpResponse::new(code, headers, body);

        if response.is_ok() {
            return Ok(response);
        }

        tracing::debug!(
            "{} {} failed with status {} (request id {})",
            request.http_method,
            request.url,
            code,
            response.request_id().unwrap_or("none")
        );

        Err(HttpError::Response(HttpResponseError {
            code,
            message: format!("Request failed with status code {code}"),
            body: response.body,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::HostUrl;
    use serde_json::json;

    fn config() -> ConfluenceConfig {
        ConfluenceConfig::builder()
            .host(HostUrl::new("https://example.atlassian.net/wiki").unwrap())
            .build()
            .unwrap()
    }

    #[test]
    fn test_user_agent_header_format() {
        let client = HttpClient::new(&config()).unwrap();

        assert!(client.user_agent().contains("Confluence API Library v"));
        assert!(client.user_agent().contains("Rust"));
    }

    #[test]
    fn test_user_agent_with_prefix() {
        let config = ConfluenceConfig::builder()
            .host(HostUrl::new("https://example.atlassian.net/wiki").unwrap())
            .user_agent_prefix("MyApp/1.0")
            .build()
            .unwrap();

        let client = HttpClient::new(&config).unwrap();
        assert!(client.user_agent().starts_with("MyApp/1.0 | "));
    }

    #[test]
    fn test_parse_body_empty_is_empty_object() {
        assert_eq!(HttpClient::parse_body("").unwrap(), json!({}));
        assert_eq!(HttpClient::parse_body("   ").unwrap(), json!({}));
        assert_eq!(HttpClient::parse_body(r#"{"a":1}"#).unwrap(), json!({"a": 1}));
    }

    #[test]
    fn test_parse_body_rejects_html() {
        assert!(HttpClient::parse_body("<html>Log in</html>").is_err());
    }

    #[test]
    fn test_client_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<HttpClient>();
    }
}
