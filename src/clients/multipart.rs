//! Multipart form bodies for attachment uploads.
//!
//! [`MultipartForm`] is a cloneable description of a `multipart/form-data`
//! body. It is encoded into a [`reqwest::multipart::Form`] only when the
//! transport sends it, via [`MultipartForm::encode`].

use std::path::Path;

use reqwest::multipart::{Form, Part};

use crate::clients::errors::InvalidHttpRequestError;

/// One field of a multipart form.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FormPart {
    /// A plain text field.
    Text {
        /// The field name.
        name: String,
        /// The field value.
        value: String,
    },
    /// A binary file field.
    File {
        /// The field name.
        name: String,
        /// The file name reported to the server.
        file_name: String,
        /// The file contents.
        bytes: Vec<u8>,
        /// The MIME type of the contents, if known.
        mime: Option<String>,
    },
}

impl FormPart {
    /// Returns the field name of this part.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Text { name, .. } | Self::File { name, .. } => name,
        }
    }
}

/// A `multipart/form-data` request body.
///
/// # Example
///
/// ```rust
/// use confluence_api::clients::MultipartForm;
///
/// let form = MultipartForm::new()
///     .file("file", "notes.txt", b"hello".to_vec())
///     .text("comment", "first draft")
///     .text("minorEdit", "true");
///
/// assert_eq!(form.parts().len(), 3);
///
/// let encoded = form.encode().unwrap();
/// assert!(encoded.content_type.starts_with("multipart/form-data; boundary="));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MultipartForm {
    parts: Vec<FormPart>,
}

/// A multipart form ready to be sent, with its `Content-Type` header value.
#[derive(Debug)]
pub struct EncodedMultipart {
    /// The encoded form.
    pub form: Form,
    /// `multipart/form-data; boundary=<boundary>`.
    pub content_type: String,
}

impl MultipartForm {
    /// Creates an empty form.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a text field.
    #[must_use]
    pub fn text(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.parts.push(FormPart::Text {
            name: name.into(),
            value: value.into(),
        });
        self
    }

    /// Adds a file field with an unspecified MIME type.
    #[must_use]
    pub fn file(
        mut self,
        name: impl Into<String>,
        file_name: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Self {
        self.parts.push(FormPart::File {
            name: name.into(),
            file_name: file_name.into(),
            bytes,
            mime: None,
        });
        self
    }

    /// Adds a file field with an explicit MIME type.
    #[must_use]
    pub fn file_with_mime(
        mut self,
        name: impl Into<String>,
        file_name: impl Into<String>,
        bytes: Vec<u8>,
        mime: impl Into<String>,
    ) -> Self {
        self.parts.push(FormPart::File {
            name: name.into(),
            file_name: file_name.into(),
            bytes,
            mime: Some(mime.into()),
        });
        self
    }

    /// Reads `path` and adds its contents as a file field named `name`.
    ///
    /// The file name sent to the server is the last component of `path`.
    ///
    /// # Errors
    ///
    /// Returns the I/O error if the file cannot be read.
    pub async fn file_from_path(
        self,
        name: impl Into<String>,
        path: impl AsRef<Path>,
    ) -> std::io::Result<Self> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .map_or_else(|| "file".to_string(), |n| n.to_string_lossy().into_owned());
        Ok(self.file(name, file_name, bytes))
    }

    /// Returns the parts of this form in insertion order.
    #[must_use]
    pub fn parts(&self) -> &[FormPart] {
        &self.parts
    }

    /// Encodes this description into a sendable form and content type.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidHttpRequestError::InvalidMimeType`] if a file part
    /// declares a MIME type that cannot be parsed.
    pub fn encode(&self) -> Result<EncodedMultipart, InvalidHttpRequestError> {
        let mut form = Form::new();

        for part in &self.parts {
            form = match part {
                FormPart::Text { name, value } => form.text(name.clone(), value.clone()),
                FormPart::File {
                    name,
                    file_name,
                    bytes,
                    mime,
                } => {
                    let mut file_part = Part::bytes(bytes.clone()).file_name(file_name.clone());
                    if let Some(mime) = mime {
                        file_part = file_part.mime_str(mime).map_err(|_| {
                            InvalidHttpRequestError::InvalidMimeType {
                                field: name.clone(),
                                mime: mime.clone(),
                            }
                        })?;
                    }
                    form.part(name.clone(), file_part)
                }
            };
        }

        let content_type = format!("multipart/form-data; boundary={}", form.boundary());
        Ok(EncodedMultipart { form, content_type })
    }
}
