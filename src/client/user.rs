//! User operations.

use super::{to_body, Api, MattermostClient, MattermostError};
use crate::models::User;
use reqwest::Method;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::collections::HashMap;
use tracing::instrument;

/// Fields accepted when creating a user. Requires admin permission on the
/// remote side.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUserParams {
    pub username: String,
    pub email: String,
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nickname: Option<String>,
}

/// Profile fields accepted by the user patch endpoint. Only the provided
/// fields are sent; `props` is deliberately absent (see
/// [`MattermostClient::user_update_props`]).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nickname: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
}

impl MattermostClient {
    /// Fetch a user by id.
    pub async fn user_get(&self, user_id: &str) -> Result<User, MattermostError> {
        self.request_as(Method::GET, Api::Platform, &format!("/users/{user_id}"), None)
            .await
    }

    /// Fetch a user by username (without the leading `@`).
    pub async fn user_get_by_username(&self, username: &str) -> Result<User, MattermostError> {
        self.request_as(
            Method::GET,
            Api::Platform,
            &format!("/users/username/{username}"),
            None,
        )
        .await
    }

    /// Search users by term, optionally scoped to a team.
    pub async fn user_search(
        &self,
        term: &str,
        team_id: Option<&str>,
    ) -> Result<Vec<User>, MattermostError> {
        self.request_as(
            Method::POST,
            Api::Platform,
            "/users/search",
            Some(json!({ "term": term, "team_id": team_id })),
        )
        .await
    }

    /// Create a new user account.
    pub async fn user_create(&self, user: &CreateUserParams) -> Result<User, MattermostError> {
        self.request_as(
            Method::POST,
            Api::Platform,
            "/users",
            Some(to_body(user)),
        )
        .await
    }

    /// Patch profile fields (nickname, position, names).
    pub async fn user_update(
        &self,
        user_id: &str,
        patch: &UserPatch,
    ) -> Result<User, MattermostError> {
        self.request_as(
            Method::PUT,
            Api::Platform,
            &format!("/users/{user_id}/patch"),
            Some(to_body(patch)),
        )
        .await
    }

    /// Merge props into a user and write the full entity back.
    ///
    /// The patch endpoint ignores `props`, so this reads the user, merges
    /// the given keys and replaces the whole object with a PUT.
    #[instrument(skip(self, props))]
    pub async fn user_update_props(
        &self,
        user_id: &str,
        props: &HashMap<String, String>,
    ) -> Result<User, MattermostError> {
        let updated = self.merge_props(&format!("/users/{user_id}"), props).await?;
        serde_json::from_value(updated).map_err(|e| MattermostError::InvalidResponse(e.to_string()))
    }
}
