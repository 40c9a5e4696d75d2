//! Playbook tools.

use super::{json_result, params, tool};
use crate::client::playbook::{
    ChecklistInput, ChecklistItemInput, CreatePlaybookParams, CreatePropertyFieldParams,
    PropertyFieldPatch,
};
use crate::client::MattermostClient;
use crate::schema::{FieldType, InputSchema};
use crate::server::Tool;
use crate::types::ToolDefinition;
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;

#[derive(Debug, Deserialize)]
struct PlaybookArgs {
    playbook_id: String,
}

#[derive(Debug, Deserialize)]
struct PlaybookListArgs {
    team_id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PlaybookCreateArgs {
    team_id: String,
    title: String,
    description: Option<String>,
    public: Option<bool>,
    checklists: Option<Vec<ChecklistInput>>,
    reminder_timer_default_seconds: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct PlaybookUpdateArgs {
    playbook_id: String,
    title: Option<String>,
    description: Option<String>,
    webhook_on_creation_urls: Option<Vec<String>>,
    webhook_on_status_update_urls: Option<Vec<String>>,
    channel_mode: Option<String>,
    channel_id: Option<String>,
    message_on_join: Option<String>,
    run_summary_template: Option<String>,
}

impl PlaybookUpdateArgs {
    /// Collect the provided fields into the update overlay. Webhook URL
    /// lists also switch their enable flags, matching what the web client
    /// sends.
    fn into_updates(self) -> Value {
        let mut updates = serde_json::Map::new();
        if let Some(title) = self.title {
            updates.insert("title".into(), json!(title));
        }
        if let Some(description) = self.description {
            updates.insert("description".into(), json!(description));
        }
        if let Some(urls) = self.webhook_on_creation_urls {
            updates.insert("webhook_on_creation_enabled".into(), json!(!urls.is_empty()));
            updates.insert("webhook_on_creation_urls".into(), json!(urls));
        }
        if let Some(urls) = self.webhook_on_status_update_urls {
            updates.insert(
                "webhook_on_status_update_enabled".into(),
                json!(!urls.is_empty()),
            );
            updates.insert("webhook_on_status_update_urls".into(), json!(urls));
        }
        if let Some(mode) = self.channel_mode {
            updates.insert("channel_mode".into(), json!(mode));
        }
        if let Some(channel_id) = self.channel_id {
            updates.insert("channel_id".into(), json!(channel_id));
        }
        if let Some(message) = self.message_on_join {
            updates.insert("message_on_join".into(), json!(message));
        }
        if let Some(template) = self.run_summary_template {
            updates.insert("run_summary_template".into(), json!(template));
        }
        Value::Object(updates)
    }
}

#[derive(Debug, Deserialize)]
struct FieldListArgs {
    playbook_id: String,
}

#[derive(Debug, Deserialize)]
struct FieldCreateArgs {
    playbook_id: String,
    #[serde(flatten)]
    field: CreatePropertyFieldParams,
}

#[derive(Debug, Deserialize)]
struct FieldUpdateArgs {
    playbook_id: String,
    field_id: String,
    #[serde(flatten)]
    patch: PropertyFieldPatch,
}

#[derive(Debug, Deserialize)]
struct FieldArgs {
    playbook_id: String,
    field_id: String,
}

/// Tools for the PLAYBOOK group.
pub fn playbook_tools(client: Arc<MattermostClient>) -> Vec<Arc<dyn Tool>> {
    vec![
        {
            let client = client.clone();
            tool(
                ToolDefinition::new("mm_playbook_get", "Fetch a playbook by id, checklists and config included.")
                    .with_schema(
                        InputSchema::new().required("playbook_id", FieldType::Text, "Playbook id"),
                    ),
                move |args| {
                    let client = client.clone();
                    async move {
                        let p: PlaybookArgs = params(args)?;
                        json_result(&client.playbook_get(&p.playbook_id).await?)
                    }
                },
            )
        },
        {
            let client = client.clone();
            tool(
                ToolDefinition::new("mm_playbook_list", "List a team's playbooks.").with_schema(
                    InputSchema::new().optional(
                        "team_id",
                        FieldType::Text,
                        "Team id (defaults to the configured default team)",
                    ),
                ),
                move |args| {
                    let client = client.clone();
                    async move {
                        let p: PlaybookListArgs = params(args)?;
                        let team_id = client.resolve_team_id(p.team_id).await?;
                        json_result(&client.playbook_list(&team_id).await?)
                    }
                },
            )
        },
        {
            let client = client.clone();
            tool(
                ToolDefinition::new(
                    "mm_playbook_create",
                    "Create a playbook, optionally seeded with checklists of tasks.",
                )
                .with_schema(
                    InputSchema::new()
                        .required("team_id", FieldType::Text, "Team id")
                        .required("title", FieldType::Text, "Playbook title")
                        .optional("description", FieldType::Text, "Description")
                        .optional("public", FieldType::Boolean, "Public playbook (default true)")
                        .optional(
                            "checklists",
                            FieldType::ObjectArray,
                            "Checklists as {title, items: [{title, description?}]}",
                        )
                        .optional(
                            "reminder_timer_default_seconds",
                            FieldType::Integer,
                            "Status reminder interval in seconds (default 86400)",
                        ),
                ),
                move |args| {
                    let client = client.clone();
                    async move {
                        let p: PlaybookCreateArgs = params(args)?;
                        let payload = CreatePlaybookParams {
                            team_id: p.team_id,
                            title: p.title,
                            description: p.description.unwrap_or_default(),
                            public: p.public.unwrap_or(true),
                            create_public_playbook_run: true,
                            reminder_timer_default_seconds: p
                                .reminder_timer_default_seconds
                                .unwrap_or(86400),
                            checklists: p.checklists.unwrap_or_else(|| {
                                vec![ChecklistInput {
                                    title: "Checklist".to_string(),
                                    items: vec![ChecklistItemInput {
                                        title: "First task".to_string(),
                                        description: String::new(),
                                    }],
                                }]
                            }),
                        };
                        json_result(&client.playbook_create(&payload).await?)
                    }
                },
            )
        },
        {
            let client = client.clone();
            tool(
                ToolDefinition::new(
                    "mm_playbook_update",
                    "Update a playbook (webhooks, channel mode, templates). The full object is re-written.",
                )
                .with_schema(
                    InputSchema::new()
                        .required("playbook_id", FieldType::Text, "Playbook id")
                        .optional("title", FieldType::Text, "Title")
                        .optional("description", FieldType::Text, "Description")
                        .optional(
                            "webhook_on_creation_urls",
                            FieldType::TextArray,
                            "Webhooks fired when a run is created",
                        )
                        .optional(
                            "webhook_on_status_update_urls",
                            FieldType::TextArray,
                            "Webhooks fired on status updates",
                        )
                        .optional(
                            "channel_mode",
                            FieldType::TextEnum(&["create_new_channel", "link_existing_channel"]),
                            "Channel-linking mode",
                        )
                        .optional("channel_id", FieldType::Text, "Channel id when linking an existing channel")
                        .optional("message_on_join", FieldType::Text, "Message shown on join")
                        .optional("run_summary_template", FieldType::Text, "Run summary template"),
                ),
                move |args| {
                    let client = client.clone();
                    async move {
                        let p: PlaybookUpdateArgs = params(args)?;
                        let playbook_id = p.playbook_id.clone();
                        json_result(&client.playbook_update(&playbook_id, &p.into_updates()).await?)
                    }
                },
            )
        },
        {
            let client = client.clone();
            tool(
                ToolDefinition::new("mm_playbook_delete", "Archive a playbook (soft delete).")
                    .with_schema(
                        InputSchema::new().required("playbook_id", FieldType::Text, "Playbook id"),
                    ),
                move |args| {
                    let client = client.clone();
                    async move {
                        let p: PlaybookArgs = params(args)?;
                        json_result(&client.playbook_delete(&p.playbook_id).await?)
                    }
                },
            )
        },
        {
            let client = client.clone();
            tool(
                ToolDefinition::new("mm_playbook_field_list", "List a playbook's custom property fields.")
                    .with_schema(
                        InputSchema::new().required("playbook_id", FieldType::Text, "Playbook id"),
                    ),
                move |args| {
                    let client = client.clone();
                    async move {
                        let p: FieldListArgs = params(args)?;
                        json_result(&client.playbook_field_list(&p.playbook_id).await?)
                    }
                },
            )
        },
        {
            let client = client.clone();
            tool(
                ToolDefinition::new("mm_playbook_field_create", "Create a custom property field on a playbook.")
                    .with_schema(
                        InputSchema::new()
                            .required("playbook_id", FieldType::Text, "Playbook id")
                            .required("name", FieldType::Text, "Field name")
                            .required(
                                "type",
                                FieldType::TextEnum(&["text", "select", "multiselect"]),
                                "Field type",
                            )
                            .optional("description", FieldType::Text, "Description"),
                    ),
                move |args| {
                    let client = client.clone();
                    async move {
                        let p: FieldCreateArgs = params(args)?;
                        json_result(&client.playbook_field_create(&p.playbook_id, &p.field).await?)
                    }
                },
            )
        },
        {
            let client = client.clone();
            tool(
                ToolDefinition::new("mm_playbook_field_update", "Update a custom property field.")
                    .with_schema(
                        InputSchema::new()
                            .required("playbook_id", FieldType::Text, "Playbook id")
                            .required("field_id", FieldType::Text, "Field id")
                            .optional("name", FieldType::Text, "Field name")
                            .optional(
                                "type",
                                FieldType::TextEnum(&["text", "select", "multiselect"]),
                                "Field type",
                            ),
                    ),
                move |args| {
                    let client = client.clone();
                    async move {
                        let p: FieldUpdateArgs = params(args)?;
                        json_result(
                            &client
                                .playbook_field_update(&p.playbook_id, &p.field_id, &p.patch)
                                .await?,
                        )
                    }
                },
            )
        },
        {
            let client = client.clone();
            tool(
                ToolDefinition::new("mm_playbook_field_delete", "Remove a custom property field.")
                    .with_schema(
                        InputSchema::new()
                            .required("playbook_id", FieldType::Text, "Playbook id")
                            .required("field_id", FieldType::Text, "Field id"),
                    ),
                move |args| {
                    let client = client.clone();
                    async move {
                        let p: FieldArgs = params(args)?;
                        json_result(&client.playbook_field_delete(&p.playbook_id, &p.field_id).await?)
                    }
                },
            )
        },
    ]
}
