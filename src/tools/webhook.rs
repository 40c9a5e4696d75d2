//! Webhook tools.

use super::{json_result, params, tool};
use crate::client::webhook::{
    CreateIncomingWebhookParams, CreateOutgoingWebhookParams, IncomingWebhookPatch,
    OutgoingWebhookPatch,
};
use crate::client::MattermostClient;
use crate::schema::{FieldType, InputSchema};
use crate::server::Tool;
use crate::types::ToolDefinition;
use serde::Deserialize;
use std::sync::Arc;

#[derive(Debug, Deserialize)]
struct TeamArgs {
    team_id: String,
}

#[derive(Debug, Deserialize)]
struct HookArgs {
    hook_id: String,
}

#[derive(Debug, Deserialize)]
struct OutgoingUpdateArgs {
    hook_id: String,
    #[serde(flatten)]
    patch: OutgoingWebhookPatch,
}

#[derive(Debug, Deserialize)]
struct IncomingUpdateArgs {
    hook_id: String,
    #[serde(flatten)]
    patch: IncomingWebhookPatch,
}

/// Tools for the WEBHOOK group.
pub fn webhook_tools(client: Arc<MattermostClient>) -> Vec<Arc<dyn Tool>> {
    vec![
        {
            let client = client.clone();
            tool(
                ToolDefinition::new(
                    "mm_webhook_outgoing_create",
                    "Create a webhook that fires towards an external URL when something happens in Mattermost.",
                )
                .with_schema(
                    InputSchema::new()
                        .required("team_id", FieldType::Text, "Team id")
                        .optional("channel_id", FieldType::Text, "Channel id")
                        .required("display_name", FieldType::Text, "Webhook name")
                        .optional("trigger_words", FieldType::TextArray, "Trigger words")
                        .required("callback_urls", FieldType::TextArray, "Callback URLs"),
                ),
                move |args| {
                    let client = client.clone();
                    async move {
                        let p: CreateOutgoingWebhookParams = params(args)?;
                        json_result(&client.webhook_outgoing_create(&p).await?)
                    }
                },
            )
        },
        {
            let client = client.clone();
            tool(
                ToolDefinition::new("mm_webhook_outgoing_list", "List a team's outgoing webhooks.")
                    .with_schema(InputSchema::new().required("team_id", FieldType::Text, "Team id")),
                move |args| {
                    let client = client.clone();
                    async move {
                        let p: TeamArgs = params(args)?;
                        json_result(&client.webhook_outgoing_list(&p.team_id).await?)
                    }
                },
            )
        },
        {
            let client = client.clone();
            tool(
                ToolDefinition::new("mm_webhook_outgoing_get", "Fetch an outgoing webhook by id.")
                    .with_schema(InputSchema::new().required("hook_id", FieldType::Text, "Webhook id")),
                move |args| {
                    let client = client.clone();
                    async move {
                        let p: HookArgs = params(args)?;
                        json_result(&client.webhook_outgoing_get(&p.hook_id).await?)
                    }
                },
            )
        },
        {
            let client = client.clone();
            tool(
                ToolDefinition::new("mm_webhook_outgoing_update", "Update an outgoing webhook.")
                    .with_schema(
                        InputSchema::new()
                            .required("hook_id", FieldType::Text, "Webhook id")
                            .optional("display_name", FieldType::Text, "Webhook name")
                            .optional("callback_urls", FieldType::TextArray, "Callback URLs"),
                    ),
                move |args| {
                    let client = client.clone();
                    async move {
                        let p: OutgoingUpdateArgs = params(args)?;
                        json_result(&client.webhook_outgoing_update(&p.hook_id, &p.patch).await?)
                    }
                },
            )
        },
        {
            let client = client.clone();
            tool(
                ToolDefinition::new("mm_webhook_outgoing_delete", "Remove an outgoing webhook.")
                    .with_schema(InputSchema::new().required("hook_id", FieldType::Text, "Webhook id")),
                move |args| {
                    let client = client.clone();
                    async move {
                        let p: HookArgs = params(args)?;
                        json_result(&client.webhook_outgoing_delete(&p.hook_id).await?)
                    }
                },
            )
        },
        {
            let client = client.clone();
            tool(
                ToolDefinition::new(
                    "mm_webhook_incoming_create",
                    "Create an URL external services can use to post into Mattermost.",
                )
                .with_schema(
                    InputSchema::new()
                        .required("team_id", FieldType::Text, "Team id")
                        .required("channel_id", FieldType::Text, "Target channel id")
                        .required("display_name", FieldType::Text, "Webhook name")
                        .optional("description", FieldType::Text, "Description"),
                ),
                move |args| {
                    let client = client.clone();
                    async move {
                        let p: CreateIncomingWebhookParams = params(args)?;
                        json_result(&client.webhook_incoming_create(&p).await?)
                    }
                },
            )
        },
        {
            let client = client.clone();
            tool(
                ToolDefinition::new("mm_webhook_incoming_list", "List a team's incoming webhooks.")
                    .with_schema(InputSchema::new().required("team_id", FieldType::Text, "Team id")),
                move |args| {
                    let client = client.clone();
                    async move {
                        let p: TeamArgs = params(args)?;
                        json_result(&client.webhook_incoming_list(&p.team_id).await?)
                    }
                },
            )
        },
        {
            let client = client.clone();
            tool(
                ToolDefinition::new("mm_webhook_incoming_get", "Fetch an incoming webhook by id.")
                    .with_schema(InputSchema::new().required("hook_id", FieldType::Text, "Webhook id")),
                move |args| {
                    let client = client.clone();
                    async move {
                        let p: HookArgs = params(args)?;
                        json_result(&client.webhook_incoming_get(&p.hook_id).await?)
                    }
                },
            )
        },
        {
            let client = client.clone();
            tool(
                ToolDefinition::new("mm_webhook_incoming_update", "Update an incoming webhook.")
                    .with_schema(
                        InputSchema::new()
                            .required("hook_id", FieldType::Text, "Webhook id")
                            .optional("display_name", FieldType::Text, "Webhook name")
                            .optional("channel_id", FieldType::Text, "Target channel id"),
                    ),
                move |args| {
                    let client = client.clone();
                    async move {
                        let p: IncomingUpdateArgs = params(args)?;
                        json_result(&client.webhook_incoming_update(&p.hook_id, &p.patch).await?)
                    }
                },
            )
        },
        {
            let client = client.clone();
            tool(
                ToolDefinition::new("mm_webhook_incoming_delete", "Remove an incoming webhook.")
                    .with_schema(InputSchema::new().required("hook_id", FieldType::Text, "Webhook id")),
                move |args| {
                    let client = client.clone();
                    async move {
                        let p: HookArgs = params(args)?;
                        json_result(&client.webhook_incoming_delete(&p.hook_id).await?)
                    }
                },
            )
        },
    ]
}
