//! Playbook run operations (Playbooks plugin API).

use super::{to_body, Api, MattermostClient, MattermostError};
use crate::models::{
    PropertyField, PropertyValue, Run, RunList, RunProperties, RunStatus, StatusResponse,
};
use reqwest::Method;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::instrument;

/// Filters accepted by the run listing endpoint.
#[derive(Debug, Clone, Default)]
pub struct RunListFilter {
    /// Restrict to the given statuses; empty means all.
    pub statuses: Vec<RunStatus>,
    /// Restrict to runs owned by this user.
    pub owner_user_id: Option<String>,
}

/// Fields sent when starting a run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StartRunParams {
    pub name: String,
    pub playbook_id: String,
    pub owner_user_id: String,
    pub team_id: String,
    /// Link an existing channel instead of creating one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub channel_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Fields accepted by the run partial-update endpoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RunPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl MattermostClient {
    /// Fetch a run by id, checklists and task states included.
    pub async fn run_get(&self, run_id: &str) -> Result<Run, MattermostError> {
        self.request_as(Method::GET, Api::Playbooks, &format!("/runs/{run_id}"), None)
            .await
    }

    /// Fetch the run bound to a channel.
    pub async fn run_get_by_channel(&self, channel_id: &str) -> Result<Run, MattermostError> {
        self.request_as(
            Method::GET,
            Api::Playbooks,
            &format!("/runs/channel/{channel_id}"),
            None,
        )
        .await
    }

    /// List the runs of a team, optionally filtered by status and owner.
    pub async fn run_list(
        &self,
        team_id: &str,
        filter: &RunListFilter,
    ) -> Result<RunList, MattermostError> {
        let mut endpoint = format!("/runs?team_id={team_id}");
        for status in &filter.statuses {
            endpoint.push_str("&statuses=");
            endpoint.push_str(status.as_str());
        }
        if let Some(owner) = &filter.owner_user_id {
            endpoint.push_str("&owner_user_id=");
            endpoint.push_str(owner);
        }

        self.request_as(Method::GET, Api::Playbooks, &endpoint, None).await
    }

    /// Start a new run from a playbook.
    pub async fn run_start(&self, run: &StartRunParams) -> Result<Run, MattermostError> {
        self.request_as(Method::POST, Api::Playbooks, "/runs", Some(to_body(run)))
            .await
    }

    /// Partially update a run (name, description).
    pub async fn run_update(
        &self,
        run_id: &str,
        patch: &RunPatch,
    ) -> Result<StatusResponse, MattermostError> {
        self.request_as(
            Method::PATCH,
            Api::Playbooks,
            &format!("/runs/{run_id}"),
            Some(to_body(patch)),
        )
        .await
    }

    /// Mark a run as finished.
    pub async fn run_finish(&self, run_id: &str) -> Result<StatusResponse, MattermostError> {
        self.request_as(
            Method::PUT,
            Api::Playbooks,
            &format!("/runs/{run_id}/finish"),
            None,
        )
        .await
    }

    /// End a run.
    pub async fn run_end(&self, run_id: &str) -> Result<StatusResponse, MattermostError> {
        self.request_as(
            Method::PUT,
            Api::Playbooks,
            &format!("/runs/{run_id}/end"),
            None,
        )
        .await
    }

    /// Restart an ended run.
    pub async fn run_restart(&self, run_id: &str) -> Result<StatusResponse, MattermostError> {
        self.request_as(
            Method::PUT,
            Api::Playbooks,
            &format!("/runs/{run_id}/restart"),
            None,
        )
        .await
    }

    /// Post a status update to the run's channel, optionally scheduling the
    /// next reminder in seconds.
    pub async fn run_status_update(
        &self,
        run_id: &str,
        message: &str,
        reminder: Option<i64>,
    ) -> Result<StatusResponse, MattermostError> {
        self.request_as(
            Method::POST,
            Api::Playbooks,
            &format!("/runs/{run_id}/status"),
            Some(json!({ "message": message, "reminder": reminder })),
        )
        .await
    }

    /// Hand the run over to a new owner.
    pub async fn run_change_owner(
        &self,
        run_id: &str,
        owner_id: &str,
    ) -> Result<StatusResponse, MattermostError> {
        self.request_as(
            Method::POST,
            Api::Playbooks,
            &format!("/runs/{run_id}/owner"),
            Some(json!({ "owner_id": owner_id })),
        )
        .await
    }

    /// Fetch the run's property fields and values concurrently.
    #[instrument(skip(self))]
    pub async fn run_property_list(&self, run_id: &str) -> Result<RunProperties, MattermostError> {
        let fields_endpoint = format!("/runs/{run_id}/property_fields");
        let values_endpoint = format!("/runs/{run_id}/property_values");

        let (fields, values) = tokio::try_join!(
            self.request_as::<Vec<PropertyField>>(Method::GET, Api::Playbooks, &fields_endpoint, None),
            self.request_as::<Vec<PropertyValue>>(Method::GET, Api::Playbooks, &values_endpoint, None),
        )?;

        Ok(RunProperties { fields, values })
    }

    /// Fetch the value of one property field. Returns `None` when the field
    /// has no value on this run.
    pub async fn run_property_get(
        &self,
        run_id: &str,
        field_id: &str,
    ) -> Result<Option<PropertyValue>, MattermostError> {
        let properties = self.run_property_list(run_id).await?;
        Ok(properties
            .values
            .into_iter()
            .find(|value| value.field_id == field_id))
    }

    /// Set the value of a property field.
    pub async fn run_property_set(
        &self,
        run_id: &str,
        field_id: &str,
        value: &str,
    ) -> Result<PropertyValue, MattermostError> {
        self.request_as(
            Method::PUT,
            Api::Playbooks,
            &format!("/runs/{run_id}/property_fields/{field_id}/value"),
            Some(json!({ "value": value })),
        )
        .await
    }
}
