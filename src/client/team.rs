//! Team operations.

use super::{Api, MattermostClient, MattermostError};
use crate::models::{StatusResponse, Team, TeamMember};
use reqwest::Method;
use serde_json::json;
use std::collections::HashMap;
use tracing::instrument;

impl MattermostClient {
    /// Fetch a team by id.
    pub async fn team_get(&self, team_id: &str) -> Result<Team, MattermostError> {
        self.request_as(Method::GET, Api::Platform, &format!("/teams/{team_id}"), None)
            .await
    }

    /// Fetch a team by name.
    pub async fn team_get_by_name(&self, name: &str) -> Result<Team, MattermostError> {
        self.request_as(
            Method::GET,
            Api::Platform,
            &format!("/teams/name/{name}"),
            None,
        )
        .await
    }

    /// List all teams visible to the token.
    pub async fn team_list(&self) -> Result<Vec<Team>, MattermostError> {
        self.request_as(Method::GET, Api::Platform, "/teams", None).await
    }

    /// Merge props into a team and write the full entity back.
    ///
    /// The patch endpoint ignores `props`, so this reads the team, merges
    /// the given keys and replaces the whole object with a PUT.
    #[instrument(skip(self, props))]
    pub async fn team_update_props(
        &self,
        team_id: &str,
        props: &HashMap<String, String>,
    ) -> Result<Team, MattermostError> {
        let updated = self.merge_props(&format!("/teams/{team_id}"), props).await?;
        serde_json::from_value(updated).map_err(|e| MattermostError::InvalidResponse(e.to_string()))
    }

    /// List the members of a team.
    pub async fn team_get_members(&self, team_id: &str) -> Result<Vec<TeamMember>, MattermostError> {
        self.request_as(
            Method::GET,
            Api::Platform,
            &format!("/teams/{team_id}/members"),
            None,
        )
        .await
    }

    /// Add a user to a team.
    pub async fn team_add_member(
        &self,
        team_id: &str,
        user_id: &str,
    ) -> Result<TeamMember, MattermostError> {
        self.request_as(
            Method::POST,
            Api::Platform,
            &format!("/teams/{team_id}/members"),
            Some(json!({ "team_id": team_id, "user_id": user_id })),
        )
        .await
    }

    /// Remove a user from a team.
    pub async fn team_remove_member(
        &self,
        team_id: &str,
        user_id: &str,
    ) -> Result<StatusResponse, MattermostError> {
        self.request_as(
            Method::DELETE,
            Api::Platform,
            &format!("/teams/{team_id}/members/{user_id}"),
            None,
        )
        .await
    }
}
