//! User resource: profiles, group membership and watches.

use std::ops::Deref;
use std::sync::Arc;

use serde_json::{json, Value};

use crate::clients::Transport;
use crate::config::ConfluenceConfig;
use crate::rest::resources::types::{Group, User, WatchStatus};
use crate::rest::{FetchAllOptions, QueryParams, Resource, ResourceError, WriteOptions};

/// Things a user can watch.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum WatchTarget {
    Content,
    Space,
    Label,
}

impl WatchTarget {
    const fn segment(self) -> &'static str {
        match self {
            Self::Content => "content",
            Self::Space => "space",
            Self::Label => "label",
        }
    }
}

/// Access to `/rest/api/user`.
#[derive(Clone, Debug)]
pub struct UserApi {
    resource: Resource,
}

impl UserApi {
    /// The REST root.
    pub const ROOT: &'static str = "/rest/api/user";

    /// Creates the API over a shared configuration and transport.
    #[must_use]
    pub fn new(config: Arc<ConfluenceConfig>, transport: Arc<dyn Transport>) -> Self {
        Self {
            resource: Resource::new(Self::ROOT, config, transport),
        }
    }

    /// Fetches the user the credentials belong to.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Api`] if the request fails.
    pub async fn get_current_user(&self, expand: &[&str]) -> Result<User, ResourceError> {
        self.fetch_one("current", Some(&expand_params(expand)))
            .await
    }

    /// Fetches a user by account id.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Api`] if the request fails.
    pub async fn get_user(&self, account_id: &str, expand: &[&str]) -> Result<User, ResourceError> {
        let mut params = expand_params(expand);
        params.insert("accountId", account_id);
        self.fetch_one("", Some(&params)).await
    }

    /// Fetches every group the user belongs to.
    ///
    /// # Errors
    ///
    /// Returns the first error any page fetch produced.
    pub async fn get_groups_for_user(&self, account_id: &str) -> Result<Vec<Group>, ResourceError> {
        self.fetch_all(
            &FetchAllOptions::new()
                .id("memberof")
                .params(account_params(account_id)),
        )
        .await
    }

    /// Returns whether the user watches the content.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Api`] if the request fails.
    pub async fn get_content_watch_status(
        &self,
        account_id: &str,
        content_id: &str,
    ) -> Result<bool, ResourceError> {
        self.watch_status(WatchTarget::Content, account_id, content_id)
            .await
    }

    /// Makes the user watch the content.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Api`] if the request fails.
    pub async fn add_content_watcher(
        &self,
        account_id: &str,
        content_id: &str,
    ) -> Result<(), ResourceError> {
        self.add_watch(WatchTarget::Content, account_id, content_id)
            .await
    }

    /// Stops the user watching the content.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Api`] if the transport reports a failure.
    pub async fn remove_content_watcher(
        &self,
        account_id: &str,
        content_id: &str,
    ) -> Result<bool, ResourceError> {
        self.remove_watch(WatchTarget::Content, account_id, content_id)
            .await
    }

    /// Returns whether the user watches the space.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Api`] if the request fails.
    pub async fn get_space_watch_status(
        &self,
        account_id: &str,
        space_key: &str,
    ) -> Result<bool, ResourceError> {
        self.watch_status(WatchTarget::Space, account_id, space_key)
            .await
    }

    /// Makes the user watch the space.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Api`] if the request fails.
    pub async fn add_space_watcher(
        &self,
        account_id: &str,
        space_key: &str,
    ) -> Result<(), ResourceError> {
        self.add_watch(WatchTarget::Space, account_id, space_key)
            .await
    }

    /// Stops the user watching the space.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Api`] if the transport reports a failure.
    pub async fn remove_space_watcher(
        &self,
        account_id: &str,
        space_key: &str,
    ) -> Result<bool, ResourceError> {
        self.remove_watch(WatchTarget::Space, account_id, space_key)
            .await
    }

    /// Returns whether the user watches the label.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Api`] if the request fails.
    pub async fn get_label_watch_status(
        &self,
        account_id: &str,
        label_name: &str,
    ) -> Result<bool, ResourceError> {
        self.watch_status(WatchTarget::Label, account_id, label_name)
            .await
    }

    /// Makes the user watch the label.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Api`] if the request fails.
    pub async fn add_label_watcher(
        &self,
        account_id: &str,
        label_name: &str,
    ) -> Result<(), ResourceError> {
        self.add_watch(WatchTarget::Label, account_id, label_name)
            .await
    }

    /// Stops the user watching the label.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Api`] if the transport reports a failure.
    pub async fn remove_label_watcher(
        &self,
        account_id: &str,
        label_name: &str,
    ) -> Result<bool, ResourceError> {
        self.remove_watch(WatchTarget::Label, account_id, label_name)
            .await
    }

    async fn watch_status(
        &self,
        target: WatchTarget,
        account_id: &str,
        key: &str,
    ) -> Result<bool, ResourceError> {
        let status: WatchStatus = self
            .fetch_one(&watch_path(target, key), Some(&account_params(account_id)))
            .await?;
        Ok(status.watching)
    }

    async fn add_watch(
        &self,
        target: WatchTarget,
        account_id: &str,
        key: &str,
    ) -> Result<(), ResourceError> {
        let path = watch_path(target, key);
        let _: Value = self
            .create(
                Some(&path),
                json!({}),
                WriteOptions::new().params(account_params(account_id)),
            )
            .await?;
        Ok(())
    }

    async fn remove_watch(
        &self,
        target: WatchTarget,
        account_id: &str,
        key: &str,
    ) -> Result<bool, ResourceError> {
        self.remove(
            &watch_path(target, key),
            None,
            Some(&account_params(account_id)),
        )
        .await
    }
}

impl Deref for UserApi {
    type Target = Resource;

    fn deref(&self) -> &Self::Target {
        &self.resource
    }
}

fn watch_path(target: WatchTarget, key: &str) -> String {
    format!("watch/{}/{key}", target.segment())
}

fn account_params(account_id: &str) -> QueryParams {
    let mut params = QueryParams::new();
    params.insert("accountId", account_id);
    params
}

fn expand_params(expand: &[&str]) -> QueryParams {
    let mut params = QueryParams::new();
    if !expand.is_empty() {
        params.insert("expand", expand.join(","));
    }
    params
}
