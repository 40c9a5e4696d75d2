//! Incoming and outgoing webhook operations.

use super::{to_body, Api, MattermostClient, MattermostError};
use crate::models::{IncomingWebhook, OutgoingWebhook, StatusResponse};
use reqwest::Method;
use serde::{Deserialize, Serialize};

/// Fields accepted when creating an outgoing webhook (Mattermost firing
/// towards an external callback).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateOutgoingWebhookParams {
    pub team_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub channel_id: Option<String>,
    pub display_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trigger_words: Option<Vec<String>>,
    pub callback_urls: Vec<String>,
}

/// Fields accepted when updating an outgoing webhook.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutgoingWebhookPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub callback_urls: Option<Vec<String>>,
}

/// Fields accepted when creating an incoming webhook (an URL external
/// services can post through).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateIncomingWebhookParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub team_id: Option<String>,
    pub channel_id: String,
    pub display_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Fields accepted when updating an incoming webhook.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IncomingWebhookPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub channel_id: Option<String>,
}

impl MattermostClient {
    /// Create an outgoing webhook.
    pub async fn webhook_outgoing_create(
        &self,
        webhook: &CreateOutgoingWebhookParams,
    ) -> Result<OutgoingWebhook, MattermostError> {
        self.request_as(
            Method::POST,
            Api::Platform,
            "/hooks/outgoing",
            Some(to_body(webhook)),
        )
        .await
    }

    /// List the outgoing webhooks of a team.
    pub async fn webhook_outgoing_list(
        &self,
        team_id: &str,
    ) -> Result<Vec<OutgoingWebhook>, MattermostError> {
        self.request_as(
            Method::GET,
            Api::Platform,
            &format!("/hooks/outgoing?team_id={team_id}"),
            None,
        )
        .await
    }

    /// Fetch an outgoing webhook by id.
    pub async fn webhook_outgoing_get(
        &self,
        hook_id: &str,
    ) -> Result<OutgoingWebhook, MattermostError> {
        self.request_as(
            Method::GET,
            Api::Platform,
            &format!("/hooks/outgoing/{hook_id}"),
            None,
        )
        .await
    }

    /// Update an outgoing webhook.
    pub async fn webhook_outgoing_update(
        &self,
        hook_id: &str,
        patch: &OutgoingWebhookPatch,
    ) -> Result<OutgoingWebhook, MattermostError> {
        self.request_as(
            Method::PUT,
            Api::Platform,
            &format!("/hooks/outgoing/{hook_id}"),
            Some(to_body(patch)),
        )
        .await
    }

    /// Delete an outgoing webhook.
    pub async fn webhook_outgoing_delete(
        &self,
        hook_id: &str,
    ) -> Result<StatusResponse, MattermostError> {
        self.request_as(
            Method::DELETE,
            Api::Platform,
            &format!("/hooks/outgoing/{hook_id}"),
            None,
        )
        .await
    }

    /// Create an incoming webhook.
    pub async fn webhook_incoming_create(
        &self,
        webhook: &CreateIncomingWebhookParams,
    ) -> Result<IncomingWebhook, MattermostError> {
        self.request_as(
            Method::POST,
            Api::Platform,
            "/hooks/incoming",
            Some(to_body(webhook)),
        )
        .await
    }

    /// List the incoming webhooks of a team.
    pub async fn webhook_incoming_list(
        &self,
        team_id: &str,
    ) -> Result<Vec<IncomingWebhook>, MattermostError> {
        self.request_as(
            Method::GET,
            Api::Platform,
            &format!("/hooks/incoming?team_id={team_id}"),
            None,
        )
        .await
    }

    /// Fetch an incoming webhook by id.
    pub async fn webhook_incoming_get(
        &self,
        hook_id: &str,
    ) -> Result<IncomingWebhook, MattermostError> {
        self.request_as(
            Method::GET,
            Api::Platform,
            &format!("/hooks/incoming/{hook_id}"),
            None,
        )
        .await
    }

    /// Update an incoming webhook.
    pub async fn webhook_incoming_update(
        &self,
        hook_id: &str,
        patch: &IncomingWebhookPatch,
    ) -> Result<IncomingWebhook, MattermostError> {
        self.request_as(
            Method::PUT,
            Api::Platform,
            &format!("/hooks/incoming/{hook_id}"),
            Some(to_body(patch)),
        )
        .await
    }

    /// Delete an incoming webhook.
    pub async fn webhook_incoming_delete(
        &self,
        hook_id: &str,
    ) -> Result<StatusResponse, MattermostError> {
        self.request_as(
            Method::DELETE,
            Api::Platform,
            &format!("/hooks/incoming/{hook_id}"),
            None,
        )
        .await
    }
}
