//! Channel tools.

use super::{json_result, params, tool};
use crate::client::channel::{ChannelPatch, CreateChannelParams};
use crate::client::MattermostClient;
use crate::schema::{FieldType, InputSchema};
use crate::server::Tool;
use crate::types::ToolDefinition;
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::Arc;

#[derive(Debug, Deserialize)]
struct ChannelArgs {
    channel_id: String,
}

#[derive(Debug, Deserialize)]
struct ChannelByNameArgs {
    team_id: String,
    name: String,
}

#[derive(Debug, Deserialize)]
struct TeamArgs {
    team_id: String,
}

#[derive(Debug, Deserialize)]
struct ChannelSearchArgs {
    team_id: String,
    term: String,
}

#[derive(Debug, Deserialize)]
struct ChannelUpdateArgs {
    channel_id: String,
    #[serde(flatten)]
    patch: ChannelPatch,
}

#[derive(Debug, Deserialize)]
struct ChannelPropsArgs {
    channel_id: String,
    props: HashMap<String, String>,
}

#[derive(Debug, Deserialize)]
struct ChannelMemberArgs {
    channel_id: String,
    user_id: String,
}

/// Tools for the CHANNEL group.
pub fn channel_tools(client: Arc<MattermostClient>) -> Vec<Arc<dyn Tool>> {
    vec![
        {
            let client = client.clone();
            tool(
                ToolDefinition::new("mm_channel_get", "Fetch a channel by id, props included.")
                    .with_schema(
                        InputSchema::new().required("channel_id", FieldType::Text, "Channel id"),
                    ),
                move |args| {
                    let client = client.clone();
                    async move {
                        let p: ChannelArgs = params(args)?;
                        json_result(&client.channel_get(&p.channel_id).await?)
                    }
                },
            )
        },
        {
            let client = client.clone();
            tool(
                ToolDefinition::new("mm_channel_get_by_name", "Fetch a channel by name within a team.")
                    .with_schema(
                        InputSchema::new()
                            .required("team_id", FieldType::Text, "Team id")
                            .required("name", FieldType::Text, "Channel name (slug)"),
                    ),
                move |args| {
                    let client = client.clone();
                    async move {
                        let p: ChannelByNameArgs = params(args)?;
                        json_result(&client.channel_get_by_name(&p.team_id, &p.name).await?)
                    }
                },
            )
        },
        {
            let client = client.clone();
            tool(
                ToolDefinition::new("mm_channel_list", "List a team's public channels.")
                    .with_schema(InputSchema::new().required("team_id", FieldType::Text, "Team id")),
                move |args| {
                    let client = client.clone();
                    async move {
                        let p: TeamArgs = params(args)?;
                        json_result(&client.channel_list(&p.team_id).await?)
                    }
                },
            )
        },
        {
            let client = client.clone();
            tool(
                ToolDefinition::new("mm_channel_search", "Search channels in a team by term.")
                    .with_schema(
                        InputSchema::new()
                            .required("team_id", FieldType::Text, "Team id")
                            .required("term", FieldType::Text, "Search term"),
                    ),
                move |args| {
                    let client = client.clone();
                    async move {
                        let p: ChannelSearchArgs = params(args)?;
                        json_result(&client.channel_search(&p.team_id, &p.term).await?)
                    }
                },
            )
        },
        {
            let client = client.clone();
            tool(
                ToolDefinition::new("mm_channel_create", "Create a new channel.").with_schema(
                    InputSchema::new()
                        .required("team_id", FieldType::Text, "Team id")
                        .required("name", FieldType::Text, "Channel name (slug)")
                        .required("display_name", FieldType::Text, "Display name")
                        .optional("type", FieldType::TextEnum(&["O", "P"]), "O=public, P=private")
                        .optional("header", FieldType::Text, "Channel header")
                        .optional("purpose", FieldType::Text, "Channel purpose"),
                ),
                move |args| {
                    let client = client.clone();
                    async move {
                        let p: CreateChannelParams = params(args)?;
                        json_result(&client.channel_create(&p).await?)
                    }
                },
            )
        },
        {
            let client = client.clone();
            tool(
                ToolDefinition::new("mm_channel_update", "Patch a channel (header, purpose, display name).")
                    .with_schema(
                        InputSchema::new()
                            .required("channel_id", FieldType::Text, "Channel id")
                            .optional("header", FieldType::Text, "Channel header")
                            .optional("purpose", FieldType::Text, "Channel purpose")
                            .optional("display_name", FieldType::Text, "Display name"),
                    ),
                move |args| {
                    let client = client.clone();
                    async move {
                        let p: ChannelUpdateArgs = params(args)?;
                        json_result(&client.channel_update(&p.channel_id, &p.patch).await?)
                    }
                },
            )
        },
        {
            let client = client.clone();
            tool(
                ToolDefinition::new(
                    "mm_channel_update_props",
                    "Merge props into a channel (flat string-to-string map). Existing keys not mentioned are preserved.",
                )
                .with_schema(
                    InputSchema::new()
                        .required("channel_id", FieldType::Text, "Channel id")
                        .required("props", FieldType::TextMap, "Keys to merge"),
                ),
                move |args| {
                    let client = client.clone();
                    async move {
                        let p: ChannelPropsArgs = params(args)?;
                        json_result(&client.channel_update_props(&p.channel_id, &p.props).await?)
                    }
                },
            )
        },
        {
            let client = client.clone();
            tool(
                ToolDefinition::new("mm_channel_delete", "Archive a channel (soft delete).")
                    .with_schema(
                        InputSchema::new().required("channel_id", FieldType::Text, "Channel id"),
                    ),
                move |args| {
                    let client = client.clone();
                    async move {
                        let p: ChannelArgs = params(args)?;
                        json_result(&client.channel_delete(&p.channel_id).await?)
                    }
                },
            )
        },
        {
            let client = client.clone();
            tool(
                ToolDefinition::new("mm_channel_get_members", "List the members of a channel.")
                    .with_schema(
                        InputSchema::new().required("channel_id", FieldType::Text, "Channel id"),
                    ),
                move |args| {
                    let client = client.clone();
                    async move {
                        let p: ChannelArgs = params(args)?;
                        json_result(&client.channel_get_members(&p.channel_id).await?)
                    }
                },
            )
        },
        {
            let client = client.clone();
            tool(
                ToolDefinition::new("mm_channel_add_member", "Add a user to a channel.").with_schema(
                    InputSchema::new()
                        .required("channel_id", FieldType::Text, "Channel id")
                        .required("user_id", FieldType::Text, "User id"),
                ),
                move |args| {
                    let client = client.clone();
                    async move {
                        let p: ChannelMemberArgs = params(args)?;
                        json_result(&client.channel_add_member(&p.channel_id, &p.user_id).await?)
                    }
                },
            )
        },
        {
            let client = client.clone();
            tool(
                ToolDefinition::new("mm_channel_remove_member", "Remove a user from a channel.")
                    .with_schema(
                        InputSchema::new()
                            .required("channel_id", FieldType::Text, "Channel id")
                            .required("user_id", FieldType::Text, "User id"),
                    ),
                move |args| {
                    let client = client.clone();
                    async move {
                        let p: ChannelMemberArgs = params(args)?;
                        json_result(&client.channel_remove_member(&p.channel_id, &p.user_id).await?)
                    }
                },
            )
        },
    ]
}
