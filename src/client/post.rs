//! Post and reaction operations.

use super::{to_body, Api, MattermostClient, MattermostError};
use crate::models::{Post, PostList, Reaction, StatusResponse};
use reqwest::Method;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::collections::HashMap;
use tracing::instrument;

/// Fields accepted when creating a post. `props` carries invisible metadata
/// (flat string-to-string only).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePostParams {
    pub channel_id: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub props: Option<HashMap<String, String>>,
    /// Parent post id when replying in a thread.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub root_id: Option<String>,
}

impl MattermostClient {
    /// Fetch a post by id.
    pub async fn post_get(&self, post_id: &str) -> Result<Post, MattermostError> {
        self.request_as(Method::GET, Api::Platform, &format!("/posts/{post_id}"), None)
            .await
    }

    /// Page through the posts of a channel, newest first.
    pub async fn post_get_channel(
        &self,
        channel_id: &str,
        page: u32,
        per_page: u32,
    ) -> Result<PostList, MattermostError> {
        self.request_as(
            Method::GET,
            Api::Platform,
            &format!("/channels/{channel_id}/posts?page={page}&per_page={per_page}"),
            None,
        )
        .await
    }

    /// Fetch the full thread a post belongs to.
    pub async fn post_get_thread(&self, post_id: &str) -> Result<PostList, MattermostError> {
        self.request_as(
            Method::GET,
            Api::Platform,
            &format!("/posts/{post_id}/thread"),
            None,
        )
        .await
    }

    /// Search posts in a team.
    pub async fn post_search(
        &self,
        team_id: &str,
        terms: &str,
    ) -> Result<PostList, MattermostError> {
        self.request_as(
            Method::POST,
            Api::Platform,
            &format!("/teams/{team_id}/posts/search"),
            Some(json!({ "terms": terms, "is_or_search": false })),
        )
        .await
    }

    /// Create a post.
    pub async fn post_create(&self, post: &CreatePostParams) -> Result<Post, MattermostError> {
        self.request_as(Method::POST, Api::Platform, "/posts", Some(to_body(post)))
            .await
    }

    /// Update the message of a post.
    pub async fn post_update(
        &self,
        post_id: &str,
        message: &str,
    ) -> Result<Post, MattermostError> {
        self.request_as(
            Method::PUT,
            Api::Platform,
            &format!("/posts/{post_id}/patch"),
            Some(json!({ "message": message })),
        )
        .await
    }

    /// Merge props into a post and write the full entity back.
    ///
    /// The patch endpoint ignores `props`, so this reads the post, merges
    /// the given keys and replaces the whole object with a PUT.
    #[instrument(skip(self, props))]
    pub async fn post_update_props(
        &self,
        post_id: &str,
        props: &HashMap<String, String>,
    ) -> Result<Post, MattermostError> {
        let updated = self.merge_props(&format!("/posts/{post_id}"), props).await?;
        serde_json::from_value(updated).map_err(|e| MattermostError::InvalidResponse(e.to_string()))
    }

    /// Delete a post.
    pub async fn post_delete(&self, post_id: &str) -> Result<StatusResponse, MattermostError> {
        self.request_as(
            Method::DELETE,
            Api::Platform,
            &format!("/posts/{post_id}"),
            None,
        )
        .await
    }

    /// Pin a post to its channel.
    pub async fn post_pin(&self, post_id: &str) -> Result<StatusResponse, MattermostError> {
        self.request_as(
            Method::POST,
            Api::Platform,
            &format!("/posts/{post_id}/pin"),
            None,
        )
        .await
    }

    /// Unpin a post.
    pub async fn post_unpin(&self, post_id: &str) -> Result<StatusResponse, MattermostError> {
        self.request_as(
            Method::POST,
            Api::Platform,
            &format!("/posts/{post_id}/unpin"),
            None,
        )
        .await
    }

    /// List the pinned posts of a channel.
    pub async fn post_get_pinned(&self, channel_id: &str) -> Result<PostList, MattermostError> {
        self.request_as(
            Method::GET,
            Api::Platform,
            &format!("/channels/{channel_id}/pinned"),
            None,
        )
        .await
    }

    /// Add an emoji reaction to a post.
    pub async fn reaction_add(
        &self,
        user_id: &str,
        post_id: &str,
        emoji_name: &str,
    ) -> Result<Reaction, MattermostError> {
        self.request_as(
            Method::POST,
            Api::Platform,
            "/reactions",
            Some(json!({
                "user_id": user_id,
                "post_id": post_id,
                "emoji_name": emoji_name,
            })),
        )
        .await
    }

    /// Remove an emoji reaction from a post.
    pub async fn reaction_remove(
        &self,
        user_id: &str,
        post_id: &str,
        emoji_name: &str,
    ) -> Result<StatusResponse, MattermostError> {
        self.request_as(
            Method::DELETE,
            Api::Platform,
            &format!("/users/{user_id}/posts/{post_id}/reactions/{emoji_name}"),
            None,
        )
        .await
    }

    /// List the reactions on a post.
    pub async fn reaction_get(&self, post_id: &str) -> Result<Vec<Reaction>, MattermostError> {
        self.request_as(
            Method::GET,
            Api::Platform,
            &format!("/posts/{post_id}/reactions"),
            None,
        )
        .await
    }
}
