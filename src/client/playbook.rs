//! Playbook template operations (Playbooks plugin API).

use super::{to_body, Api, MattermostClient, MattermostError};
use crate::models::{Playbook, PlaybookCreated, PlaybookList, PropertyField, StatusResponse};
use reqwest::Method;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::instrument;

/// A checklist as accepted by the playbook creation endpoint. The input
/// shape is narrower than the [`crate::models::Checklist`] the API returns:
/// ids, ordering and timestamps are assigned remotely.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChecklistInput {
    pub title: String,
    pub items: Vec<ChecklistItemInput>,
}

/// One checklist item in a playbook creation payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChecklistItemInput {
    pub title: String,
    #[serde(default)]
    pub description: String,
}

/// Fields sent when creating a playbook.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePlaybookParams {
    pub team_id: String,
    pub title: String,
    pub description: String,
    pub public: bool,
    pub create_public_playbook_run: bool,
    pub reminder_timer_default_seconds: i64,
    pub checklists: Vec<ChecklistInput>,
}

/// Fields accepted when creating a custom property field.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePropertyFieldParams {
    pub name: String,
    /// "text", "select" or "multiselect".
    #[serde(rename = "type")]
    pub field_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Fields accepted when updating a custom property field.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PropertyFieldPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub field_type: Option<String>,
}

impl MattermostClient {
    /// Fetch a playbook by id, checklists included.
    pub async fn playbook_get(&self, playbook_id: &str) -> Result<Playbook, MattermostError> {
        self.request_as(
            Method::GET,
            Api::Playbooks,
            &format!("/playbooks/{playbook_id}"),
            None,
        )
        .await
    }

    /// List the playbooks of a team.
    pub async fn playbook_list(&self, team_id: &str) -> Result<PlaybookList, MattermostError> {
        self.request_as(
            Method::GET,
            Api::Playbooks,
            &format!("/playbooks?team_id={team_id}"),
            None,
        )
        .await
    }

    /// Create a playbook. Returns the new playbook's id.
    pub async fn playbook_create(
        &self,
        playbook: &CreatePlaybookParams,
    ) -> Result<PlaybookCreated, MattermostError> {
        self.request_as(
            Method::POST,
            Api::Playbooks,
            "/playbooks",
            Some(to_body(playbook)),
        )
        .await
    }

    /// Merge updates into a playbook and write the full object back.
    ///
    /// The Playbooks API requires the complete playbook on every PUT, so
    /// this reads the current state as raw JSON, overlays the given
    /// top-level fields and replaces the whole object. Best effort: a
    /// concurrent update on the same playbook can be lost.
    #[instrument(skip(self, updates))]
    pub async fn playbook_update(
        &self,
        playbook_id: &str,
        updates: &Value,
    ) -> Result<StatusResponse, MattermostError> {
        let endpoint = format!("/playbooks/{playbook_id}");
        let mut playbook = self.request(Method::GET, Api::Playbooks, &endpoint, None).await?;

        let (Some(current), Some(patch)) = (playbook.as_object_mut(), updates.as_object()) else {
            return Err(MattermostError::InvalidResponse(format!(
                "expected JSON objects when updating playbook {playbook_id}"
            )));
        };
        for (key, value) in patch {
            current.insert(key.clone(), value.clone());
        }

        self.request_as(Method::PUT, Api::Playbooks, &endpoint, Some(playbook))
            .await
    }

    /// Archive a playbook (soft delete on the remote side).
    pub async fn playbook_delete(
        &self,
        playbook_id: &str,
    ) -> Result<StatusResponse, MattermostError> {
        self.request_as(
            Method::DELETE,
            Api::Playbooks,
            &format!("/playbooks/{playbook_id}"),
            None,
        )
        .await
    }

    /// List the custom property fields of a playbook.
    pub async fn playbook_field_list(
        &self,
        playbook_id: &str,
    ) -> Result<Vec<PropertyField>, MattermostError> {
        self.request_as(
            Method::GET,
            Api::Playbooks,
            &format!("/playbooks/{playbook_id}/property_fields"),
            None,
        )
        .await
    }

    /// Create a custom property field on a playbook.
    pub async fn playbook_field_create(
        &self,
        playbook_id: &str,
        field: &CreatePropertyFieldParams,
    ) -> Result<PropertyField, MattermostError> {
        self.request_as(
            Method::POST,
            Api::Playbooks,
            &format!("/playbooks/{playbook_id}/property_fields"),
            Some(to_body(field)),
        )
        .await
    }

    /// Update a custom property field.
    pub async fn playbook_field_update(
        &self,
        playbook_id: &str,
        field_id: &str,
        patch: &PropertyFieldPatch,
    ) -> Result<PropertyField, MattermostError> {
        self.request_as(
            Method::PUT,
            Api::Playbooks,
            &format!("/playbooks/{playbook_id}/property_fields/{field_id}"),
            Some(to_body(patch)),
        )
        .await
    }

    /// Delete a custom property field.
    pub async fn playbook_field_delete(
        &self,
        playbook_id: &str,
        field_id: &str,
    ) -> Result<StatusResponse, MattermostError> {
        self.request_as(
            Method::DELETE,
            Api::Playbooks,
            &format!("/playbooks/{playbook_id}/property_fields/{field_id}"),
            None,
        )
        .await
    }
}
