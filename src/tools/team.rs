//! Team tools.

use super::{json_result, params, tool};
use crate::client::MattermostClient;
use crate::schema::{FieldType, InputSchema};
use crate::server::Tool;
use crate::types::ToolDefinition;
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::Arc;

#[derive(Debug, Deserialize)]
struct TeamArgs {
    team_id: String,
}

#[derive(Debug, Deserialize)]
struct TeamByNameArgs {
    name: String,
}

#[derive(Debug, Deserialize)]
struct TeamPropsArgs {
    team_id: String,
    props: HashMap<String, String>,
}

#[derive(Debug, Deserialize)]
struct TeamMemberArgs {
    team_id: String,
    user_id: String,
}

/// Tools for the TEAM group.
pub fn team_tools(client: Arc<MattermostClient>) -> Vec<Arc<dyn Tool>> {
    vec![
        {
            let client = client.clone();
            tool(
                ToolDefinition::new("mm_team_get", "Fetch a team by id.")
                    .with_schema(InputSchema::new().required("team_id", FieldType::Text, "Team id")),
                move |args| {
                    let client = client.clone();
                    async move {
                        let p: TeamArgs = params(args)?;
                        json_result(&client.team_get(&p.team_id).await?)
                    }
                },
            )
        },
        {
            let client = client.clone();
            tool(
                ToolDefinition::new("mm_team_get_by_name", "Fetch a team by name.")
                    .with_schema(InputSchema::new().required("name", FieldType::Text, "Team name")),
                move |args| {
                    let client = client.clone();
                    async move {
                        let p: TeamByNameArgs = params(args)?;
                        json_result(&client.team_get_by_name(&p.name).await?)
                    }
                },
            )
        },
        {
            let client = client.clone();
            tool(
                ToolDefinition::new("mm_team_list", "List all teams visible to the token."),
                move |_args| {
                    let client = client.clone();
                    async move { json_result(&client.team_list().await?) }
                },
            )
        },
        {
            let client = client.clone();
            tool(
                ToolDefinition::new(
                    "mm_team_update_props",
                    "Merge props into a team (flat string-to-string map). Existing keys not mentioned are preserved.",
                )
                .with_schema(
                    InputSchema::new()
                        .required("team_id", FieldType::Text, "Team id")
                        .required("props", FieldType::TextMap, "Keys to merge"),
                ),
                move |args| {
                    let client = client.clone();
                    async move {
                        let p: TeamPropsArgs = params(args)?;
                        json_result(&client.team_update_props(&p.team_id, &p.props).await?)
                    }
                },
            )
        },
        {
            let client = client.clone();
            tool(
                ToolDefinition::new("mm_team_get_members", "List the members of a team.")
                    .with_schema(InputSchema::new().required("team_id", FieldType::Text, "Team id")),
                move |args| {
                    let client = client.clone();
                    async move {
                        let p: TeamArgs = params(args)?;
                        json_result(&client.team_get_members(&p.team_id).await?)
                    }
                },
            )
        },
        {
            let client = client.clone();
            tool(
                ToolDefinition::new("mm_team_add_member", "Add a user to a team.").with_schema(
                    InputSchema::new()
                        .required("team_id", FieldType::Text, "Team id")
                        .required("user_id", FieldType::Text, "User id"),
                ),
                move |args| {
                    let client = client.clone();
                    async move {
                        let p: TeamMemberArgs = params(args)?;
                        json_result(&client.team_add_member(&p.team_id, &p.user_id).await?)
                    }
                },
            )
        },
        {
            let client = client.clone();
            tool(
                ToolDefinition::new("mm_team_remove_member", "Remove a user from a team.").with_schema(
                    InputSchema::new()
                        .required("team_id", FieldType::Text, "Team id")
                        .required("user_id", FieldType::Text, "User id"),
                ),
                move |args| {
                    let client = client.clone();
                    async move {
                        let p: TeamMemberArgs = params(args)?;
                        json_result(&client.team_remove_member(&p.team_id, &p.user_id).await?)
                    }
                },
            )
        },
    ]
}
