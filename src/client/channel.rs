//! Channel operations.

use super::{to_body, Api, MattermostClient, MattermostError};
use crate::models::{Channel, ChannelMember, StatusResponse};
use reqwest::Method;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::collections::HashMap;
use tracing::instrument;

/// Fields accepted when creating a channel.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateChannelParams {
    pub team_id: String,
    /// URL slug of the channel.
    pub name: String,
    pub display_name: String,
    /// "O" public (default) or "P" private.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub channel_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub header: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub purpose: Option<String>,
}

/// Fields accepted by the channel patch endpoint. `props` is deliberately
/// absent (see [`MattermostClient::channel_update_props`]).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChannelPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub header: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub purpose: Option<String>,
}

impl MattermostClient {
    /// Fetch a channel by id.
    pub async fn channel_get(&self, channel_id: &str) -> Result<Channel, MattermostError> {
        self.request_as(
            Method::GET,
            Api::Platform,
            &format!("/channels/{channel_id}"),
            None,
        )
        .await
    }

    /// Fetch a channel by name within a team.
    pub async fn channel_get_by_name(
        &self,
        team_id: &str,
        name: &str,
    ) -> Result<Channel, MattermostError> {
        self.request_as(
            Method::GET,
            Api::Platform,
            &format!("/teams/{team_id}/channels/name/{name}"),
            None,
        )
        .await
    }

    /// List the public channels of a team.
    pub async fn channel_list(&self, team_id: &str) -> Result<Vec<Channel>, MattermostError> {
        self.request_as(
            Method::GET,
            Api::Platform,
            &format!("/teams/{team_id}/channels"),
            None,
        )
        .await
    }

    /// Search channels in a team by term.
    pub async fn channel_search(
        &self,
        team_id: &str,
        term: &str,
    ) -> Result<Vec<Channel>, MattermostError> {
        self.request_as(
            Method::POST,
            Api::Platform,
            "/channels/search",
            Some(json!({ "team_id": team_id, "term": term })),
        )
        .await
    }

    /// Create a new channel.
    pub async fn channel_create(
        &self,
        channel: &CreateChannelParams,
    ) -> Result<Channel, MattermostError> {
        self.request_as(Method::POST, Api::Platform, "/channels", Some(to_body(channel)))
            .await
    }

    /// Patch channel fields (header, purpose, display name).
    pub async fn channel_update(
        &self,
        channel_id: &str,
        patch: &ChannelPatch,
    ) -> Result<Channel, MattermostError> {
        self.request_as(
            Method::PUT,
            Api::Platform,
            &format!("/channels/{channel_id}/patch"),
            Some(to_body(patch)),
        )
        .await
    }

    /// Merge props into a channel and write the full entity back.
    ///
    /// The patch endpoint ignores `props`, so this reads the channel, merges
    /// the given keys and replaces the whole object with a PUT.
    #[instrument(skip(self, props))]
    pub async fn channel_update_props(
        &self,
        channel_id: &str,
        props: &HashMap<String, String>,
    ) -> Result<Channel, MattermostError> {
        let updated = self
            .merge_props(&format!("/channels/{channel_id}"), props)
            .await?;
        serde_json::from_value(updated).map_err(|e| MattermostError::InvalidResponse(e.to_string()))
    }

    /// Archive a channel (soft delete on the remote side).
    pub async fn channel_delete(&self, channel_id: &str) -> Result<StatusResponse, MattermostError> {
        self.request_as(
            Method::DELETE,
            Api::Platform,
            &format!("/channels/{channel_id}"),
            None,
        )
        .await
    }

    /// List the members of a channel.
    pub async fn channel_get_members(
        &self,
        channel_id: &str,
    ) -> Result<Vec<ChannelMember>, MattermostError> {
        self.request_as(
            Method::GET,
            Api::Platform,
            &format!("/channels/{channel_id}/members"),
            None,
        )
        .await
    }

    /// Add a user to a channel.
    pub async fn channel_add_member(
        &self,
        channel_id: &str,
        user_id: &str,
    ) -> Result<ChannelMember, MattermostError> {
        self.request_as(
            Method::POST,
            Api::Platform,
            &format!("/channels/{channel_id}/members"),
            Some(json!({ "user_id": user_id })),
        )
        .await
    }

    /// Remove a user from a channel.
    pub async fn channel_remove_member(
        &self,
        channel_id: &str,
        user_id: &str,
    ) -> Result<StatusResponse, MattermostError> {
        self.request_as(
            Method::DELETE,
            Api::Platform,
            &format!("/channels/{channel_id}/members/{user_id}"),
            None,
        )
        .await
    }
}
