//! Content resource: pages, blog posts, attachments, labels, properties and
//! versions.
//!
//! # Example
//!
//! ```rust,ignore
//! use confluence_api::rest::resources::{
//!     AttachmentProperties, ContentFormat, ContentType, CreateContentProperties,
//! };
//!
//! let page = confluence
//!     .content()
//!     .create_content(&CreateContentProperties {
//!         title: "Release notes".to_string(),
//!         space: "DEMO".to_string(),
//!         content_type: ContentType::Page,
//!         body: "<p>Hello</p>".to_string(),
//!         format: ContentFormat::Storage,
//!         parent_id: None,
//!     })
//!     .await?;
//!
//! let id = page.id.unwrap_or_default();
//! let attachments = confluence
//!     .content()
//!     .add_attachment(
//!         &id,
//!         &AttachmentProperties {
//!             file: "notes.pdf".into(),
//!             comment: "first upload".to_string(),
//!             minor_edit: true,
//!         },
//!     )
//!     .await?;
//! ```

use std::ops::Deref;
use std::path::PathBuf;
use std::sync::Arc;

use serde_json::{json, Value};

use crate::clients::{MultipartForm, Transport};
use crate::config::ConfluenceConfig;
use crate::rest::resources::types::{
    Content, ContentChildren, ContentFormat, ContentHistory, ContentHistoryExpansion,
    ContentLabel, ContentLabelPrefix, ContentProperty, ContentStatus, ContentType,
    ContentVersion, CqlContext,
};
use crate::rest::{
    Collection, FetchAllOptions, QueryParams, Resource, ResourceError, WriteOptions,
};

use super::join;

/// Header Confluence requires on attachment uploads to skip XSRF checks.
const NO_CHECK_HEADER: (&str, &str) = ("X-Atlassian-Token", "nocheck");

/// Input for [`ContentApi::create_content`].
#[derive(Clone, Debug)]
pub struct CreateContentProperties {
    /// Title.
    pub title: String,
    /// Key of the space to create the content in.
    pub space: String,
    /// Kind of content.
    pub content_type: ContentType,
    /// Body text in `format`.
    pub body: String,
    /// Representation of `body`.
    pub format: ContentFormat,
    /// Parent page, if any.
    pub parent_id: Option<String>,
}

/// Input for [`ContentApi::update_content`].
#[derive(Clone, Debug)]
pub struct UpdateContentProperties {
    /// Title.
    pub title: String,
    /// New version number; the current version plus one when `None`.
    pub version: Option<u64>,
    /// Kind of content.
    pub content_type: ContentType,
    /// Body text in `format`.
    pub body: String,
    /// Representation of `body`.
    pub format: ContentFormat,
    /// New parent page, if any.
    pub parent_id: Option<String>,
}

/// Input for [`ContentApi::update_attachment`].
#[derive(Clone, Debug)]
pub struct AttachmentProperties {
    /// Path of the file to upload.
    pub file: PathBuf,
    /// Version comment.
    pub comment: String,
    /// Skip notifying watchers.
    pub minor_edit: bool,
}

/// Filters for [`ContentApi::get_attachments`].
#[derive(Clone, Debug, Default)]
pub struct AttachmentFilter {
    /// Only attachments of this media type.
    pub media_type: Option<String>,
    /// Only attachments with this file name.
    pub filename: Option<String>,
}

/// Filters for [`ContentApi::get_content_collection`].
#[derive(Clone, Debug)]
pub struct ContentQuery {
    /// Kind of content.
    pub content_type: ContentType,
    /// Space to list.
    pub space_key: String,
    /// Only pages with this title.
    pub title: Option<String>,
    /// Only blog posts from this day (`yyyy-mm-dd`).
    pub posting_day: Option<String>,
    /// Only content with these statuses.
    pub status: Vec<ContentStatus>,
    /// Expansions for each item.
    pub expand: Vec<String>,
}

impl ContentQuery {
    /// All pages in a space.
    #[must_use]
    pub fn pages_in(space_key: impl Into<String>) -> Self {
        Self {
            content_type: ContentType::Page,
            space_key: space_key.into(),
            title: None,
            posting_day: None,
            status: Vec::new(),
            expand: Vec::new(),
        }
    }

    fn to_query(&self) -> QueryParams {
        let mut params = QueryParams::new();
        params.insert("type", self.content_type);
        params.insert("spaceKey", &self.space_key);
        params.insert_opt("title", self.title.as_deref());
        params.insert_opt("postingDay", self.posting_day.as_deref());
        if !self.status.is_empty() {
            params.insert("status", join(&self.status));
        }
        params
    }
}

/// Access to `/rest/api/content`.
#[derive(Clone, Debug)]
pub struct ContentApi {
    resource: Resource,
}

impl ContentApi {
    /// The REST root.
    pub const ROOT: &'static str = "/rest/api/content";

    /// Expansions callers commonly want on a page.
    pub const DEFAULT_EXPANSIONS: [&'static str; 3] = ["space", "history", "version"];

    /// Creates the API over a shared configuration and transport.
    #[must_use]
    pub fn new(config: Arc<ConfluenceConfig>, transport: Arc<dyn Transport>) -> Self {
        Self {
            resource: Resource::new(Self::ROOT, config, transport),
        }
    }

    /// Creates a page or blog post.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Api`] if Confluence rejects the content.
    pub async fn create_content(
        &self,
        props: &CreateContentProperties,
    ) -> Result<Content, ResourceError> {
        let mut body = json!({
            "title": props.title,
            "type": props.content_type,
            "status": ContentStatus::Current,
            "space": {"key": props.space},
            "body": body_in(props.format, &props.body),
        });
        if let Some(parent_id) = &props.parent_id {
            body["ancestors"] = json!([{"id": parent_id}]);
        }

        self.create(None, body, WriteOptions::new()).await
    }

    /// Replaces the title and body of content.
    ///
    /// When `props.version` is `None` the current version is fetched first
    /// and incremented.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::OperationFailed`] if the current version
    /// cannot be determined, or [`ResourceError::Api`] if a request fails.
    pub async fn update_content(
        &self,
        id: &str,
        props: &UpdateContentProperties,
    ) -> Result<Content, ResourceError> {
        let version = match props.version {
            Some(version) => version,
            None => {
                let existing: Content = self.fetch_one(id, None).await?;
                existing
                    .version
                    .map(|version| version.number + 1)
                    .ok_or_else(|| ResourceError::OperationFailed {
                        reason: format!("Unable to find the current version of content {id}"),
                    })?
            }
        };

        let mut body = json!({
            "title": props.title,
            "version": {"number": version},
            "type": props.content_type,
            "status": ContentStatus::Current,
            "body": body_in(props.format, &props.body),
        });
        if let Some(parent_id) = &props.parent_id {
            body["ancestors"] = json!([{"id": parent_id}]);
        }

        self.update(id, body, WriteOptions::new()).await
    }

    /// Deletes content for good, moving it to the trash first if needed.
    ///
    /// Returns `true` once the purge succeeded.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::OperationFailed`] if the content could not be
    /// trashed, or [`ResourceError::Api`] if a request fails.
    pub async fn permanently_delete(&self, id: &str) -> Result<bool, ResourceError> {
        let mut trashed = QueryParams::new();
        trashed.insert("status", ContentStatus::Trashed);

        let content: Content = self.fetch_one(id, Some(&trashed)).await?;

        if content.status != Some(ContentStatus::Trashed) && !self.remove(id, None, None).await? {
            return Err(ResourceError::OperationFailed {
                reason: format!(
                    "Unable to move content {id} to the trash before permanently deleting it"
                ),
            });
        }

        self.remove(id, None, Some(&trashed)).await
    }

    /// Fetches a content property.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Api`] if the request fails.
    pub async fn get_content_property(
        &self,
        id: &str,
        key: &str,
    ) -> Result<ContentProperty, ResourceError> {
        self.fetch_one(&format!("{id}/property/{key}"), None).await
    }

    /// Creates a content property.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Api`] if the request fails.
    pub async fn create_content_property(
        &self,
        id: &str,
        key: &str,
        value: Value,
    ) -> Result<ContentProperty, ResourceError> {
        let path = format!("{id}/property");
        self.create(
            Some(&path),
            json!({"key": key, "value": value}),
            WriteOptions::new(),
        )
        .await
    }

    /// Replaces a content property's value, bumping its version.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Api`] if either the lookup or the update
    /// fails.
    pub async fn update_content_property(
        &self,
        id: &str,
        key: &str,
        value: Value,
        minor_edit: bool,
    ) -> Result<ContentProperty, ResourceError> {
        let existing = self.get_content_property(id, key).await?;
        let number = existing.version.map_or(1, |version| version.number + 1);

        self.update(
            &format!("{id}/property/{key}"),
            json!({
                "key": key,
                "value": value,
                "version": {"number": number, "minorEdit": minor_edit},
            }),
            WriteOptions::new(),
        )
        .await
    }

    /// Runs a CQL search over content and returns every page of results.
    ///
    /// # Errors
    ///
    /// Returns the first error any page fetch produced.
    pub async fn search_content(
        &self,
        cql: &str,
        context: Option<&CqlContext>,
    ) -> Result<Vec<Content>, ResourceError> {
        let mut params = QueryParams::new();
        params.insert("cql", cql);
        if let Some(context) = context {
            params.insert_json("cqlcontext", context)?;
        }

        self.fetch_all(&FetchAllOptions::new().id("search").params(params))
            .await
    }

    /// Fetches one page of descendant pages, expanding each as requested.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Api`] if the request fails.
    pub async fn get_child_pages(
        &self,
        id: &str,
        expand: &[&str],
    ) -> Result<Collection<Content>, ResourceError> {
        let mut params = QueryParams::new();
        if !expand.is_empty() {
            params.insert("expand", expand.join(","));
        }
        self.fetch_one(&format!("{id}/descendant/page"), Some(&params))
            .await
    }

    /// Fetches the direct children of content, grouped by type.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::InvalidArgument`] before any request if
    /// `child_types` contains [`ContentType::BlogPost`], or
    /// [`ResourceError::Api`] if the request fails.
    pub async fn get_content_children(
        &self,
        id: &str,
        child_types: &[ContentType],
    ) -> Result<ContentChildren, ResourceError> {
        reject_blog_posts(child_types)?;

        let mut params = QueryParams::new();
        if !child_types.is_empty() {
            params.insert("expand", join(child_types));
        }
        self.fetch_one(&format!("{id}/child"), Some(&params)).await
    }

    /// Fetches every child of one type.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::InvalidArgument`] before any request for
    /// [`ContentType::BlogPost`], or the first error any page fetch produced.
    pub async fn get_content_children_by_type(
        &self,
        id: &str,
        child_type: ContentType,
        expand: &[&str],
    ) -> Result<Vec<Content>, ResourceError> {
        reject_blog_posts(&[child_type])?;

        self.fetch_all(
            &FetchAllOptions::new()
                .id(format!("{id}/child/{child_type}"))
                .expand(expand.iter().copied()),
        )
        .await
    }

    /// Fetches every attachment of content.
    ///
    /// # Errors
    ///
    /// Returns the first error any page fetch produced.
    pub async fn get_attachments(
        &self,
        id: &str,
        filter: Option<&AttachmentFilter>,
    ) -> Result<Vec<Content>, ResourceError> {
        let mut params = QueryParams::new();
        if let Some(filter) = filter {
            params.insert_opt("mediaType", filter.media_type.as_deref());
            params.insert_opt("filename", filter.filename.as_deref());
        }

        self.fetch_all(
            &FetchAllOptions::new()
                .id(format!("{id}/child/attachment"))
                .params(params),
        )
        .await
    }

    /// Uploads a file as an attachment, creating it or adding a new version
    /// when the file name already exists.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Attachment`] if the file cannot be read, or
    /// [`ResourceError::Api`] if the upload fails.
    pub async fn update_attachment(
        &self,
        content_id: &str,
        attachment: &AttachmentProperties,
    ) -> Result<Vec<Content>, ResourceError> {
        let form = MultipartForm::new()
            .file_from_path("file", &attachment.file)
            .await
            .map_err(|source| ResourceError::Attachment {
                path: attachment.file.display().to_string(),
                source,
            })?
            .text("comment", &attachment.comment)
            .text("minorEdit", attachment.minor_edit.to_string());

        let (header, value) = NO_CHECK_HEADER;
        let uploaded: Collection<Content> = self
            .update(
                &format!("{content_id}/child/attachment"),
                form,
                WriteOptions::new().header(header, value),
            )
            .await?;

        Ok(uploaded.results)
    }

    /// Same as [`update_attachment`](Self::update_attachment).
    ///
    /// # Errors
    ///
    /// See [`update_attachment`](Self::update_attachment).
    pub async fn add_attachment(
        &self,
        content_id: &str,
        attachment: &AttachmentProperties,
    ) -> Result<Vec<Content>, ResourceError> {
        self.update_attachment(content_id, attachment).await
    }

    /// Fetches every page in a space.
    ///
    /// # Errors
    ///
    /// Returns the first error any page fetch produced.
    pub async fn get_pages_in_space(&self, space_key: &str) -> Result<Vec<Content>, ResourceError> {
        self.get_content_collection(&ContentQuery::pages_in(space_key))
            .await
    }

    /// Fetches all content matching `query`.
    ///
    /// # Errors
    ///
    /// Returns the first error any page fetch produced.
    pub async fn get_content_collection(
        &self,
        query: &ContentQuery,
    ) -> Result<Vec<Content>, ResourceError> {
        self.fetch_all(
            &FetchAllOptions::new()
                .params(query.to_query())
                .expand(query.expand.iter().cloned()),
        )
        .await
    }

    /// Fetches the history of content.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Api`] if the request fails.
    pub async fn get_content_history(
        &self,
        id: &str,
        expand: &[ContentHistoryExpansion],
    ) -> Result<ContentHistory, ResourceError> {
        let mut params = QueryParams::new();
        if !expand.is_empty() {
            params.insert("expand", join(expand));
        }
        self.fetch_one(&format!("{id}/history"), Some(&params))
            .await
    }

    /// Adds a global label, returning the labels now on the content.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Api`] if the request fails.
    pub async fn add_content_label(
        &self,
        id: &str,
        label_name: &str,
    ) -> Result<Vec<ContentLabel>, ResourceError> {
        let path = format!("{id}/label");
        let labels: Collection<ContentLabel> = self
            .create(
                Some(&path),
                serde_json::to_value(ContentLabel::global(label_name))?,
                WriteOptions::new(),
            )
            .await?;
        Ok(labels.results)
    }

    /// Removes a label from content.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Api`] if the transport reports a failure.
    pub async fn remove_content_label(
        &self,
        id: &str,
        label: &ContentLabel,
    ) -> Result<bool, ResourceError> {
        self.remove(&format!("{id}/label"), Some(serde_json::to_value(label)?), None)
            .await
    }

    /// Fetches every label with the given prefix.
    ///
    /// # Errors
    ///
    /// Returns the first error any page fetch produced.
    pub async fn get_content_labels(
        &self,
        id: &str,
        prefix: ContentLabelPrefix,
    ) -> Result<Vec<ContentLabel>, ResourceError> {
        let mut params = QueryParams::new();
        params.insert("prefix", prefix);

        self.fetch_all(
            &FetchAllOptions::new()
                .id(format!("{id}/label"))
                .params(params),
        )
        .await
    }

    /// Fetches every version of content.
    ///
    /// # Errors
    ///
    /// Returns the first error any page fetch produced.
    pub async fn get_content_versions(
        &self,
        id: &str,
    ) -> Result<Vec<ContentVersion>, ResourceError> {
        self.fetch_all(&FetchAllOptions::new().id(format!("{id}/version")))
            .await
    }

    /// Fetches one version of content.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Api`] if the request fails.
    pub async fn get_content_version(
        &self,
        id: &str,
        version: u64,
        expand: &[&str],
    ) -> Result<ContentVersion, ResourceError> {
        let mut params = QueryParams::new();
        if !expand.is_empty() {
            params.insert("expand", expand.join(","));
        }
        self.fetch_one(&format!("{id}/version/{version}"), Some(&params))
            .await
    }

    /// Restores an old version as a new current version.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Api`] if the request fails.
    pub async fn restore_content_version(
        &self,
        id: &str,
        version: u64,
        message: &str,
    ) -> Result<ContentVersion, ResourceError> {
        let path = format!("{id}/version");
        self.create(
            Some(&path),
            json!({
                "operationKey": "restore",
                "params": {"versionNumber": version, "message": message},
            }),
            WriteOptions::new(),
        )
        .await
    }
}

impl Deref for ContentApi {
    type Target = Resource;

    fn deref(&self) -> &Self::Target {
        &self.resource
    }
}

fn body_in(format: ContentFormat, text: &str) -> Value {
    let mut body = serde_json::Map::new();
    body.insert(
        format.as_str().to_string(),
        json!({"value": text, "representation": format}),
    );
    Value::Object(body)
}

fn reject_blog_posts(types: &[ContentType]) -> Result<(), ResourceError> {
    if types.contains(&ContentType::BlogPost) {
        return Err(ResourceError::InvalidArgument {
            reason: "Blog posts cannot be children of any other content".to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_body_in_keys_by_format() {
        assert_eq!(
            body_in(ContentFormat::Storage, "<p>x</p>"),
            json!({"storage": {"value": "<p>x</p>", "representation": "storage"}})
        );
    }

    #[test]
    fn test_reject_blog_posts() {
        assert!(reject_blog_posts(&[ContentType::Page, ContentType::Comment]).is_ok());
        assert!(matches!(
            reject_blog_posts(&[ContentType::Page, ContentType::BlogPost]),
            Err(ResourceError::InvalidArgument { .. })
        ));
    }

    #[test]
    fn test_content_query_to_query() {
        let mut query = ContentQuery::pages_in("DEMO");
        query.status = vec![ContentStatus::Current, ContentStatus::Draft];
        let params = query.to_query();

        assert_eq!(params.get("type"), Some("page"));
        assert_eq!(params.get("spaceKey"), Some("DEMO"));
        assert_eq!(params.get("status"), Some("current,draft"));
        assert!(params.get("title").is_none());
        assert!(params.get("postingDay").is_none());
    }
}
