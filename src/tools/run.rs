//! Run tools.

use super::{json_result, params, tool};
use crate::client::run::{RunListFilter, RunPatch, StartRunParams};
use crate::client::MattermostClient;
use crate::models::RunStatus;
use crate::schema::{FieldType, InputSchema};
use crate::server::Tool;
use crate::types::ToolDefinition;
use serde::Deserialize;
use std::sync::Arc;

#[derive(Debug, Deserialize)]
struct RunArgs {
    run_id: String,
}

#[derive(Debug, Deserialize)]
struct ChannelArgs {
    channel_id: String,
}

#[derive(Debug, Deserialize)]
struct RunListArgs {
    team_id: Option<String>,
    #[serde(default)]
    statuses: Vec<RunStatus>,
    owner_user_id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RunStartArgs {
    playbook_id: String,
    name: String,
    owner_user_id: Option<String>,
    team_id: String,
    channel_id: Option<String>,
    description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RunUpdateArgs {
    run_id: String,
    #[serde(flatten)]
    patch: RunPatch,
}

#[derive(Debug, Deserialize)]
struct StatusUpdateArgs {
    run_id: String,
    message: String,
    reminder: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct ChangeOwnerArgs {
    run_id: String,
    owner_id: String,
}

#[derive(Debug, Deserialize)]
struct PropertyGetArgs {
    run_id: String,
    field_id: String,
}

#[derive(Debug, Deserialize)]
struct PropertySetArgs {
    run_id: String,
    field_id: String,
    value: String,
}

/// Tools for the RUN group.
pub fn run_tools(client: Arc<MattermostClient>) -> Vec<Arc<dyn Tool>> {
    vec![
        {
            let client = client.clone();
            tool(
                ToolDefinition::new("mm_run_get", "Fetch a run by id, checklists and task states included.")
                    .with_schema(InputSchema::new().required("run_id", FieldType::Text, "Run id")),
                move |args| {
                    let client = client.clone();
                    async move {
                        let p: RunArgs = params(args)?;
                        json_result(&client.run_get(&p.run_id).await?)
                    }
                },
            )
        },
        {
            let client = client.clone();
            tool(
                ToolDefinition::new("mm_run_get_by_channel", "Fetch the run bound to a channel.")
                    .with_schema(
                        InputSchema::new().required("channel_id", FieldType::Text, "Channel id"),
                    ),
                move |args| {
                    let client = client.clone();
                    async move {
                        let p: ChannelArgs = params(args)?;
                        json_result(&client.run_get_by_channel(&p.channel_id).await?)
                    }
                },
            )
        },
        {
            let client = client.clone();
            tool(
                ToolDefinition::new("mm_run_list", "List a team's runs.").with_schema(
                    InputSchema::new()
                        .optional(
                            "team_id",
                            FieldType::Text,
                            "Team id (defaults to the configured default team)",
                        )
                        .optional(
                            "statuses",
                            FieldType::EnumArray(RunStatus::VALUES),
                            "Restrict to these statuses",
                        )
                        .optional("owner_user_id", FieldType::Text, "Restrict to runs owned by this user"),
                ),
                move |args| {
                    let client = client.clone();
                    async move {
                        let p: RunListArgs = params(args)?;
                        let team_id = client.resolve_team_id(p.team_id).await?;
                        let filter = RunListFilter {
                            statuses: p.statuses,
                            owner_user_id: p.owner_user_id,
                        };
                        json_result(&client.run_list(&team_id, &filter).await?)
                    }
                },
            )
        },
        {
            let client = client.clone();
            tool(
                ToolDefinition::new(
                    "mm_run_start",
                    "Start a run from a playbook, optionally linking an existing channel.",
                )
                .with_schema(
                    InputSchema::new()
                        .required("playbook_id", FieldType::Text, "Playbook id")
                        .required("name", FieldType::Text, "Run name")
                        .optional(
                            "owner_user_id",
                            FieldType::Text,
                            "Owner user id (defaults to the token's user)",
                        )
                        .required("team_id", FieldType::Text, "Team id")
                        .optional("channel_id", FieldType::Text, "Existing channel to link")
                        .optional("description", FieldType::Text, "Description"),
                ),
                move |args| {
                    let client = client.clone();
                    async move {
                        let p: RunStartArgs = params(args)?;
                        let owner_user_id = client.resolve_user_id(p.owner_user_id).await?;
                        let run = StartRunParams {
                            name: p.name,
                            playbook_id: p.playbook_id,
                            owner_user_id,
                            team_id: p.team_id,
                            channel_id: p.channel_id,
                            description: p.description,
                        };
                        json_result(&client.run_start(&run).await?)
                    }
                },
            )
        },
        {
            let client = client.clone();
            tool(
                ToolDefinition::new("mm_run_update", "Update a run's name or description.").with_schema(
                    InputSchema::new()
                        .required("run_id", FieldType::Text, "Run id")
                        .optional("name", FieldType::Text, "Run name")
                        .optional("description", FieldType::Text, "Description"),
                ),
                move |args| {
                    let client = client.clone();
                    async move {
                        let p: RunUpdateArgs = params(args)?;
                        json_result(&client.run_update(&p.run_id, &p.patch).await?)
                    }
                },
            )
        },
        {
            let client = client.clone();
            tool(
                ToolDefinition::new("mm_run_finish", "Mark a run as finished.")
                    .with_schema(InputSchema::new().required("run_id", FieldType::Text, "Run id")),
                move |args| {
                    let client = client.clone();
                    async move {
                        let p: RunArgs = params(args)?;
                        json_result(&client.run_finish(&p.run_id).await?)
                    }
                },
            )
        },
        {
            let client = client.clone();
            tool(
                ToolDefinition::new("mm_run_end", "End a run.")
                    .with_schema(InputSchema::new().required("run_id", FieldType::Text, "Run id")),
                move |args| {
                    let client = client.clone();
                    async move {
                        let p: RunArgs = params(args)?;
                        json_result(&client.run_end(&p.run_id).await?)
                    }
                },
            )
        },
        {
            let client = client.clone();
            tool(
                ToolDefinition::new("mm_run_restart", "Restart an ended run.")
                    .with_schema(InputSchema::new().required("run_id", FieldType::Text, "Run id")),
                move |args| {
                    let client = client.clone();
                    async move {
                        let p: RunArgs = params(args)?;
                        json_result(&client.run_restart(&p.run_id).await?)
                    }
                },
            )
        },
        {
            let client = client.clone();
            tool(
                ToolDefinition::new("mm_run_status_update", "Post a status update to the run's channel.")
                    .with_schema(
                        InputSchema::new()
                            .required("run_id", FieldType::Text, "Run id")
                            .required("message", FieldType::Text, "Status message")
                            .optional("reminder", FieldType::Integer, "Next reminder in seconds"),
                    ),
                move |args| {
                    let client = client.clone();
                    async move {
                        let p: StatusUpdateArgs = params(args)?;
                        json_result(&client.run_status_update(&p.run_id, &p.message, p.reminder).await?)
                    }
                },
            )
        },
        {
            let client = client.clone();
            tool(
                ToolDefinition::new("mm_run_change_owner", "Hand the run over to a new owner.").with_schema(
                    InputSchema::new()
                        .required("run_id", FieldType::Text, "Run id")
                        .required("owner_id", FieldType::Text, "New owner's user id"),
                ),
                move |args| {
                    let client = client.clone();
                    async move {
                        let p: ChangeOwnerArgs = params(args)?;
                        json_result(&client.run_change_owner(&p.run_id, &p.owner_id).await?)
                    }
                },
            )
        },
        {
            let client = client.clone();
            tool(
                ToolDefinition::new("mm_run_property_list", "List a run's property fields and values.")
                    .with_schema(InputSchema::new().required("run_id", FieldType::Text, "Run id")),
                move |args| {
                    let client = client.clone();
                    async move {
                        let p: RunArgs = params(args)?;
                        json_result(&client.run_property_list(&p.run_id).await?)
                    }
                },
            )
        },
        {
            let client = client.clone();
            tool(
                ToolDefinition::new(
                    "mm_run_property_get",
                    "Fetch the value of one property field. Returns null when the field has no value.",
                )
                .with_schema(
                    InputSchema::new()
                        .required("run_id", FieldType::Text, "Run id")
                        .required("field_id", FieldType::Text, "Field id"),
                ),
                move |args| {
                    let client = client.clone();
                    async move {
                        let p: PropertyGetArgs = params(args)?;
                        json_result(&client.run_property_get(&p.run_id, &p.field_id).await?)
                    }
                },
            )
        },
        {
            let client = client.clone();
            tool(
                ToolDefinition::new(
                    "mm_run_property_set",
                    "Set the value of a property field. Values allow large JSON strings.",
                )
                .with_schema(
                    InputSchema::new()
                        .required("run_id", FieldType::Text, "Run id")
                        .required("field_id", FieldType::Text, "Field id")
                        .required("value", FieldType::Text, "Value to store"),
                ),
                move |args| {
                    let client = client.clone();
                    async move {
                        let p: PropertySetArgs = params(args)?;
                        json_result(&client.run_property_set(&p.run_id, &p.field_id, &p.value).await?)
                    }
                },
            )
        },
    ]
}
