//! Entity types returned by the Confluence REST API.
//!
//! Every field is optional or defaulted: which fields are present depends on
//! the `expand` parameters of the request. Sub-objects this crate does not
//! model are kept as raw [`serde_json::Value`]s.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::rest::Collection;

macro_rules! wire_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $($(#[$vmeta:meta])* $variant:ident => $wire:literal,)+
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $($(#[$vmeta])* #[serde(rename = $wire)] $variant,)+
        }

        impl $name {
            /// Returns the value Confluence uses on the wire.
            #[must_use]
            pub const fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $wire,)+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

wire_enum! {
    /// Kinds of content.
    pub enum ContentType {
        /// A regular page.
        Page => "page",
        /// A blog post. Never a child of other content.
        BlogPost => "blogpost",
        /// A comment.
        Comment => "comment",
        /// An attachment.
        Attachment => "attachment",
    }
}

wire_enum! {
    /// Lifecycle status of content.
    pub enum ContentStatus {
        /// Published.
        Current => "current",
        /// In the trash.
        Trashed => "trashed",
        /// A previous version.
        Historical => "historical",
        /// Unpublished draft.
        Draft => "draft",
    }
}

wire_enum! {
    /// Body representations.
    ///
    /// `storage` is the raw format Confluence stores pages in.
    pub enum ContentFormat {
        /// Raw storage format.
        Storage => "storage",
        /// Rendered HTML with styles inlined.
        StyledView => "styled_view",
        /// Rendered HTML.
        View => "view",
        /// Rendered HTML for export.
        ExportView => "export_view",
    }
}

wire_enum! {
    /// Space kinds.
    pub enum SpaceType {
        /// A site-wide space.
        Global => "global",
        /// A user's personal space.
        Personal => "personal",
    }
}

wire_enum! {
    /// Space lifecycle status.
    pub enum SpaceStatus {
        /// Active.
        Current => "current",
        /// Archived.
        Archived => "archived",
    }
}

wire_enum! {
    /// Expansions accepted by the space endpoints.
    pub enum ExpandableSpaceKey {
        /// Space settings.
        Settings => "settings",
        /// Space metadata.
        Metadata => "metadata",
        /// Operations the current user may perform.
        Operations => "operations",
        /// Look and feel settings.
        LookAndFeel => "lookAndFeel",
        /// Space permissions.
        Permissions => "permissions",
        /// Space icon.
        Icon => "icon",
        /// Plain text description.
        DescriptionPlain => "description.plain",
        /// Rendered description.
        DescriptionView => "description.view",
        /// Space theme.
        Theme => "theme",
        /// Home page.
        Homepage => "homepage",
    }
}

wire_enum! {
    /// Label namespaces.
    pub enum ContentLabelPrefix {
        /// Visible to everyone.
        Global => "global",
        /// Personal labels.
        My => "my",
        /// Team labels.
        Team => "team",
    }
}

wire_enum! {
    /// Expansions accepted by the content history endpoint.
    pub enum ContentHistoryExpansion {
        /// The latest version.
        LastUpdated => "lastUpdated",
        /// The version before the requested one.
        PreviousVersion => "previousVersion",
        /// Users who contributed.
        Contributors => "contributors",
        /// The full history.
        History => "history",
        /// The version after the requested one.
        NextVersion => "nextVersion",
    }
}

/// A body or description in one representation.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentView {
    /// The rendered or stored text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    /// The representation name (`storage`, `view`, ...).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub representation: Option<String>,
}

/// A space description in its available representations.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SpaceDescription {
    /// Plain text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plain: Option<ContentView>,
    /// Rendered HTML.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub view: Option<ContentView>,
}

/// A Confluence space.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Space {
    /// Numeric identifier.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    /// The space key, e.g. `DEMO`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    /// Display name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// `global` or `personal`.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub space_type: Option<SpaceType>,
    /// `current` or `archived`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<SpaceStatus>,
    /// Space icon.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<Value>,
    /// Description (needs `description.plain` or `description.view`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<SpaceDescription>,
    /// Home page (needs `homepage`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub homepage: Option<Box<Content>>,
    /// Fields that can be expanded.
    #[serde(rename = "_expandable", skip_serializing_if = "Option::is_none")]
    pub expandable: Option<Value>,
    /// Navigation links.
    #[serde(rename = "_links", skip_serializing_if = "Option::is_none")]
    pub links: Option<Value>,
}

/// A page, blog post, comment or attachment.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Content {
    /// Content identifier.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Content kind.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub content_type: Option<ContentType>,
    /// Lifecycle status.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ContentStatus>,
    /// Title.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Containing space.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub space: Option<Box<Space>>,
    /// History.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub history: Option<Box<ContentHistory>>,
    /// Current version.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<ContentVersion>,
    /// Parent chain, root first.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ancestors: Vec<Content>,
    /// Body keyed by representation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<Value>,
    /// Direct children.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub children: Option<Box<ContentChildren>>,
    /// Labels, properties and other metadata.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Value>,
    /// Type-specific extensions (media type and file size for attachments).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extensions: Option<Value>,
    /// Fields that can be expanded.
    #[serde(rename = "_expandable", skip_serializing_if = "Option::is_none")]
    pub expandable: Option<Value>,
    /// Navigation links.
    #[serde(rename = "_links", skip_serializing_if = "Option::is_none")]
    pub links: Option<Value>,
}

/// Version of a content property.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyVersion {
    /// Version number.
    pub number: u64,
    /// Whether the change is hidden from page history.
    #[serde(default)]
    pub minor_edit: bool,
}

/// Custom data attached to content.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ContentProperty {
    /// Property identifier.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Property key.
    pub key: String,
    /// Arbitrary JSON value.
    #[serde(default)]
    pub value: Value,
    /// Property version.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<PropertyVersion>,
    /// Navigation links.
    #[serde(rename = "_links", skip_serializing_if = "Option::is_none")]
    pub links: Option<Value>,
}

/// A label on content.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentLabel {
    /// `global`, `my` or `team`.
    pub prefix: String,
    /// Label text.
    pub name: String,
    /// Label identifier.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Prefixed label, e.g. `global:draft`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl ContentLabel {
    /// Creates a global label.
    #[must_use]
    pub fn global(name: impl Into<String>) -> Self {
        Self {
            prefix: ContentLabelPrefix::Global.as_str().to_string(),
            name: name.into(),
            id: None,
            label: None,
        }
    }
}

/// One version of a piece of content.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentVersion {
    /// Author of this version.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub by: Option<User>,
    /// When this version was created.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub when: Option<DateTime<Utc>>,
    /// Relative description of `when`, e.g. `yesterday`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub friendly_when: Option<String>,
    /// Version comment.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Version number.
    #[serde(default)]
    pub number: u64,
    /// Whether watchers were notified.
    #[serde(default)]
    pub minor_edit: bool,
    /// The content at this version.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<Value>,
    /// Users who edited this version.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub collaborators: Option<Value>,
    /// Navigation links.
    #[serde(rename = "_links", skip_serializing_if = "Option::is_none")]
    pub links: Option<Value>,
}

/// History of a piece of content.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentHistory {
    /// Whether this is the latest version.
    #[serde(default)]
    pub latest: bool,
    /// Original author.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_by: Option<User>,
    /// Creation time.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_date: Option<DateTime<Utc>>,
    /// Latest version (needs `lastUpdated`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<ContentVersion>,
    /// Previous version (needs `previousVersion`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub previous_version: Option<ContentVersion>,
    /// Next version (needs `nextVersion`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_version: Option<ContentVersion>,
    /// Contributors (needs `contributors`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contributors: Option<Value>,
    /// Navigation links.
    #[serde(rename = "_links", skip_serializing_if = "Option::is_none")]
    pub links: Option<Value>,
}

/// Children of a piece of content, grouped by type.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ContentChildren {
    /// Attachments.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attachment: Option<Collection<Content>>,
    /// Child pages.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<Collection<Content>>,
    /// Comments.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<Collection<Content>>,
    /// Child types that can be expanded.
    #[serde(rename = "_expandable", skip_serializing_if = "Option::is_none")]
    pub expandable: Option<Value>,
    /// Navigation links.
    #[serde(rename = "_links", skip_serializing_if = "Option::is_none")]
    pub links: Option<Value>,
}

/// An Atlassian account.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// `known`, `unknown`, `anonymous` or `user`.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub user_type: Option<String>,
    /// Legacy user name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    /// Atlassian account identifier.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_id: Option<String>,
    /// `atlassian` or `app`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_type: Option<String>,
    /// Email address, when visible.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Public name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub public_name: Option<String>,
    /// Display name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    /// Avatar.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_picture: Option<Value>,
    /// Personal space.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub personal_space: Option<Value>,
    /// Navigation links.
    #[serde(rename = "_links", skip_serializing_if = "Option::is_none")]
    pub links: Option<Value>,
}

/// A user group.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Group {
    /// Always `group`.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub group_type: Option<String>,
    /// Group name.
    pub name: String,
    /// Group identifier.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Navigation links.
    #[serde(rename = "_links", skip_serializing_if = "Option::is_none")]
    pub links: Option<Value>,
}

/// One hit of a CQL search.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    /// Matching content, for content hits.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<Content>,
    /// Matching space, for space hits.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub space: Option<Space>,
    /// Matching user, for user hits.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
    /// Title.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Highlighted excerpt.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub excerpt: Option<String>,
    /// Relative URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// `content`, `space` or `user`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entity_type: Option<String>,
    /// Last modification time.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_modified: Option<DateTime<Utc>>,
    /// Relative description of `last_modified`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub friendly_last_modified: Option<String>,
}

/// Restricts a CQL search to a space, a piece of content or statuses.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CqlContext {
    /// Space key.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub space_key: Option<String>,
    /// Content identifier.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_id: Option<String>,
    /// Content statuses to include.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub content_statuses: Vec<ContentStatus>,
}

/// Result of a watch status check.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WatchStatus {
    /// Whether the user watches the target.
    #[serde(default)]
    pub watching: bool,
}
