//! User tools.

use super::{json_result, params, tool};
use crate::client::user::{CreateUserParams, UserPatch};
use crate::client::MattermostClient;
use crate::schema::{FieldType, InputSchema};
use crate::server::Tool;
use crate::types::ToolDefinition;
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::Arc;

#[derive(Debug, Deserialize)]
struct UserGetArgs {
    user_id: String,
}

#[derive(Debug, Deserialize)]
struct UserByUsernameArgs {
    username: String,
}

#[derive(Debug, Deserialize)]
struct UserSearchArgs {
    term: String,
    team_id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct UserUpdateArgs {
    user_id: String,
    #[serde(flatten)]
    patch: UserPatch,
}

#[derive(Debug, Deserialize)]
struct UserPropsArgs {
    user_id: String,
    props: HashMap<String, String>,
}

/// Tools for the USER group.
pub fn user_tools(client: Arc<MattermostClient>) -> Vec<Arc<dyn Tool>> {
    vec![
        {
            let client = client.clone();
            tool(
                ToolDefinition::new("mm_user_get", "Fetch a user by id. Returns the full profile plus props.")
                    .with_schema(InputSchema::new().required("user_id", FieldType::Text, "User id")),
                move |args| {
                    let client = client.clone();
                    async move {
                        let p: UserGetArgs = params(args)?;
                        json_result(&client.user_get(&p.user_id).await?)
                    }
                },
            )
        },
        {
            let client = client.clone();
            tool(
                ToolDefinition::new("mm_user_get_by_username", "Fetch a user by @username.")
                    .with_schema(InputSchema::new().required(
                        "username",
                        FieldType::Text,
                        "Username without the leading @",
                    )),
                move |args| {
                    let client = client.clone();
                    async move {
                        let p: UserByUsernameArgs = params(args)?;
                        json_result(&client.user_get_by_username(&p.username).await?)
                    }
                },
            )
        },
        {
            let client = client.clone();
            tool(
                ToolDefinition::new("mm_user_search", "Search users by term.").with_schema(
                    InputSchema::new()
                        .required("term", FieldType::Text, "Search term")
                        .optional("team_id", FieldType::Text, "Restrict to a team"),
                ),
                move |args| {
                    let client = client.clone();
                    async move {
                        let p: UserSearchArgs = params(args)?;
                        json_result(&client.user_search(&p.term, p.team_id.as_deref()).await?)
                    }
                },
            )
        },
        {
            let client = client.clone();
            tool(
                ToolDefinition::new("mm_user_create", "Create a new user. Requires admin permission.")
                    .with_schema(
                        InputSchema::new()
                            .required("username", FieldType::Text, "Username")
                            .required("email", FieldType::Text, "Email address")
                            .required("password", FieldType::Text, "Password")
                            .optional("nickname", FieldType::Text, "Nickname"),
                    ),
                move |args| {
                    let client = client.clone();
                    async move {
                        let p: CreateUserParams = params(args)?;
                        json_result(&client.user_create(&p).await?)
                    }
                },
            )
        },
        {
            let client = client.clone();
            tool(
                ToolDefinition::new("mm_user_update", "Patch profile fields (nickname, position, names).")
                    .with_schema(
                        InputSchema::new()
                            .required("user_id", FieldType::Text, "User id")
                            .optional("nickname", FieldType::Text, "Nickname")
                            .optional("position", FieldType::Text, "Job title")
                            .optional("first_name", FieldType::Text, "First name")
                            .optional("last_name", FieldType::Text, "Last name"),
                    ),
                move |args| {
                    let client = client.clone();
                    async move {
                        let p: UserUpdateArgs = params(args)?;
                        json_result(&client.user_update(&p.user_id, &p.patch).await?)
                    }
                },
            )
        },
        {
            let client = client.clone();
            tool(
                ToolDefinition::new(
                    "mm_user_update_props",
                    "Merge props into a user (flat string-to-string map). Existing keys not mentioned are preserved.",
                )
                .with_schema(
                    InputSchema::new()
                        .required("user_id", FieldType::Text, "User id")
                        .required("props", FieldType::TextMap, "Keys to merge"),
                ),
                move |args| {
                    let client = client.clone();
                    async move {
                        let p: UserPropsArgs = params(args)?;
                        json_result(&client.user_update_props(&p.user_id, &p.props).await?)
                    }
                },
            )
        },
    ]
}
