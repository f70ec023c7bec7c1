//! HTTP response types for the Confluence client.
//!
//! This module provides the [`HttpResponse`] type returned by every
//! [`Transport`](crate::clients::Transport).

use std::collections::HashMap;

/// An HTTP response from Confluence.
///
/// Header names are lowercased. A response without a body carries `{}`.
#[derive(Clone, Debug, PartialEq)]
pub struct HttpResponse {
    /// The HTTP status code.
    pub code: u16,
    /// Response headers (headers may have multiple values).
    pub headers: HashMap<String, Vec<String>>,
    /// The parsed response body.
    pub body: serde_json::Value,
}

impl HttpResponse {
    /// Creates a new `HttpResponse`.
    #[must_use]
    pub const fn new(
        code: u16,
        headers: HashMap<String, Vec<String>>,
        body: serde_json::Value,
    ) -> Self {
        Self {
            code,
            headers,
            body,
        }
    }

    /// Returns `true` if the response status code is in the 2xx range.
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        self.code >= 200 && self.code <= 299
    }

    /// Returns the first value of a header, looked up case-insensitively.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    /// Returns the `X-AREQUESTID` header Confluence Cloud attaches to every
    /// response, if present.
    #[must_use]
    pub fn request_id(&self) -> Option<&str> {
        self.header("x-arequestid")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_is_ok_returns_true_for_2xx() {
        for code in 200..=299 {
            let response = HttpResponse::new(code, HashMap::new(), json!({}));
            assert!(
                response.is_ok(),
                "Expected is_ok() to be true for code {code}"
            );
        }
    }

    #[test]
    fn test_is_ok_returns_false_outside_2xx() {
        for code in [0, 199, 300, 404, 429, 500] {
            let response = HttpResponse::new(code, HashMap::new(), json!({}));
            assert!(!response.is_ok(), "Expected is_ok() to be false for {code}");
        }
    }

    #[test]
    fn test_header_lookup_is_case_insensitive() {
        let mut headers = HashMap::new();
        headers.insert("x-arequestid".to_string(), vec!["abc-123".to_string()]);

        let response = HttpResponse::new(200, headers, json!({}));
        assert_eq!(response.header("X-AREQUESTID"), Some("abc-123"));
        assert_eq!(response.request_id(), Some("abc-123"));
    }

    #[test]
    fn test_missing_headers_return_none() {
        let response = HttpResponse::new(200, HashMap::new(), json!({}));
        assert!(response.request_id().is_none());
        assert!(response.header("content-type").is_none());
    }
}
