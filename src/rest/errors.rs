//! Error types for resource operations.
//!
//! Every failed HTTP call is turned into one [`ApiError`] shape, whatever
//! the transport reported. [`ResourceError`] wraps it next to the failures
//! raised locally before any request is made.
//!
//! # Example
//!
//! ```rust,ignore
//! use confluence_api::rest::ResourceError;
//!
//! match confluence.spaces().get_space_by_key("DEMO", &[]).await {
//!     Ok(space) => println!("Found: {:?}", space.name),
//!     Err(ResourceError::Api(error)) if error.status_code == 404 => {
//!         println!("no such space: {}", error.message);
//!     }
//!     Err(ResourceError::Api(error)) if error.status_code == 0 => {
//!         println!("Confluence unreachable: {}", error.message);
//!     }
//!     Err(e) => println!("Other error: {e}"),
//! }
//! ```

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::clients::{HttpError, InvalidHttpRequestError};

fn empty_object() -> Value {
    Value::Object(serde_json::Map::new())
}

/// A normalized Confluence error.
///
/// `status_code` is 0 when no HTTP response was received. `data` is always
/// an object, `{}` when the server sent none.
///
/// # Example
///
/// ```rust
/// use confluence_api::rest::ApiError;
/// use serde_json::json;
///
/// let error: ApiError = serde_json::from_value(json!({
///     "statusCode": 404,
///     "message": "Not Found",
/// }))
/// .unwrap();
///
/// assert_eq!(error.status_code, 404);
/// assert_eq!(error.data, json!({}));
/// ```
#[derive(Clone, Debug, Error, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[error("Confluence request failed ({status_code}): {message}")]
pub struct ApiError {
    /// HTTP status, or 0 when the request never got a response.
    #[serde(default)]
    pub status_code: u16,
    /// Human-readable description.
    #[serde(default)]
    pub message: String,
    /// Structured detail from the server (validation errors and the like).
    #[serde(default = "empty_object")]
    pub data: Value,
}

impl ApiError {
    /// Creates an error with an empty `data` object.
    #[must_use]
    pub fn new(status_code: u16, message: impl Into<String>) -> Self {
        Self {
            status_code,
            message: message.into(),
            data: empty_object(),
        }
    }

    /// Normalizes any transport failure. Never fails.
    ///
    /// For a response error the transport's status wins, falling back to the
    /// body's `statusCode` when the transport reports 0. `message` and `data`
    /// come from the body when present.
    #[must_use]
    pub fn normalize(error: &HttpError) -> Self {
        match error {
            HttpError::Response(response) => {
                Self::from_response(response.code, &response.body, &response.message)
            }
            HttpError::InvalidRequest(invalid) => Self::new(0, invalid.to_string()),
            HttpError::Network { message } => Self::new(0, message.clone()),
        }
    }

    /// Builds an error from a response status and its parsed body.
    ///
    /// `fallback_message` is used when the body carries no `message`.
    #[must_use]
    pub fn from_response(code: u16, body: &Value, fallback_message: &str) -> Self {
        let body_status = body
            .get("statusCode")
            .and_then(Value::as_u64)
            .and_then(|status| u16::try_from(status).ok());

        let status_code = if code == 0 {
            body_status.unwrap_or(0)
        } else {
            code
        };

        let message = body
            .get("message")
            .and_then(Value::as_str)
            .filter(|message| !message.is_empty())
            .map_or_else(|| fallback_message.to_string(), str::to_string);

        let data = body
            .get("data")
            .filter(|data| !data.is_null())
            .cloned()
            .unwrap_or_else(empty_object);

        Self {
            status_code,
            message,
            data,
        }
    }
}

/// Error type for resource operations.
///
/// # Example
///
/// ```rust
/// use confluence_api::rest::{ApiError, ResourceError};
///
/// let error = ResourceError::from(ApiError::new(403, "Forbidden"));
/// assert_eq!(error.status_code(), Some(403));
///
/// let error = ResourceError::InvalidArgument {
///     reason: "Blog posts cannot be children of any other content".to_string(),
/// };
/// assert!(error.api_error().is_none());
/// ```
#[derive(Debug, Error)]
pub enum ResourceError {
    /// The request reached (or tried to reach) Confluence and failed.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// The request descriptor was rejected before sending.
    #[error(transparent)]
    InvalidRequest(#[from] InvalidHttpRequestError),

    /// The caller passed an argument the endpoint cannot accept.
    #[error("Invalid argument: {reason}")]
    InvalidArgument {
        /// Why the argument was rejected.
        reason: String,
    },

    /// A body or response could not be (de)serialized.
    #[error("Serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    /// An attachment file could not be read.
    #[error("Unable to read attachment '{path}': {source}")]
    Attachment {
        /// The path that was read.
        path: String,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The endpoint did not report `totalSize`.
    #[error("Response did not include totalSize")]
    MissingTotalSize,

    /// A multi-step operation could not complete.
    #[error("Operation failed: {reason}")]
    OperationFailed {
        /// What went wrong.
        reason: String,
    },
}

impl ResourceError {
    /// Returns the normalized API error, if this is one.
    #[must_use]
    pub const fn api_error(&self) -> Option<&ApiError> {
        match self {
            Self::Api(error) => Some(error),
            _ => None,
        }
    }

    /// Returns the HTTP status of an API error (0 for network failures).
    #[must_use]
    pub const fn status_code(&self) -> Option<u16> {
        match self {
            Self::Api(error) => Some(error.status_code),
            _ => None,
        }
    }
}

impl From<HttpError> for ResourceError {
    fn from(error: HttpError) -> Self {
        Self::Api(ApiError::normalize(&error))
    }
}
