//! Typed Confluence resources.
//!
//! Each API type is bound to one REST root and derefs to the underlying
//! [`Resource`](crate::rest::Resource), so the generic primitives stay
//! available next to the typed methods:
//!
//! | Type | Root |
//! |------|------|
//! | [`SpaceApi`] | `/rest/api/space` |
//! | [`ContentApi`] | `/rest/api/content` |
//! | [`UserApi`] | `/rest/api/user` |
//! | [`GroupApi`] | `/rest/api/group` |
//! | [`SettingsApi`] | `/rest/api/settings` |
//! | [`ThemeApi`] | `/rest/api/settings/theme` |
//! | [`SearchApi`] | `/rest/api/search` |
//!
//! # Example
//!
//! ```rust,ignore
//! use confluence_api::rest::resources::Space;
//! use confluence_api::rest::FetchAllOptions;
//!
//! // Typed helper
//! let pages = confluence.content().get_pages_in_space("DEMO").await?;
//!
//! // Generic primitive on the same root
//! let spaces: Vec<Space> = confluence
//!     .spaces()
//!     .fetch_all(&FetchAllOptions::new().expand(["icon"]))
//!     .await?;
//! ```

mod content;
mod group;
mod search;
mod settings;
mod space;
mod types;
mod user;

pub use content::{
    AttachmentFilter, AttachmentProperties, ContentApi, ContentQuery, CreateContentProperties,
    UpdateContentProperties,
};
pub use group::GroupApi;
pub use search::SearchApi;
pub use settings::{LookAndFeelSettings, SettingsApi, SystemInfo, ThemeApi};
pub use space::{GetAllSpacesOptions, SpaceApi};
pub use types::{
    Content, ContentChildren, ContentFormat, ContentHistory, ContentHistoryExpansion,
    ContentLabel, ContentLabelPrefix, ContentProperty, ContentStatus, ContentType,
    ContentVersion, ContentView, CqlContext, ExpandableSpaceKey, Group, PropertyVersion,
    SearchResult, Space, SpaceDescription, SpaceStatus, SpaceType, User, WatchStatus,
};
pub use user::UserApi;

/// Joins wire values with `,` for `expand`-style parameters.
fn join<T: std::fmt::Display>(values: &[T]) -> String {
    values
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(",")
}
