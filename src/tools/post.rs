//! Post and reaction tools.

use super::{json_result, params, tool};
use crate::client::post::CreatePostParams;
use crate::client::MattermostClient;
use crate::schema::{FieldType, InputSchema};
use crate::server::Tool;
use crate::types::ToolDefinition;
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::Arc;

#[derive(Debug, Deserialize)]
struct PostArgs {
    post_id: String,
}

#[derive(Debug, Deserialize)]
struct ChannelArgs {
    channel_id: String,
}

#[derive(Debug, Deserialize)]
struct PostChannelArgs {
    channel_id: String,
    #[serde(default)]
    page: u32,
    #[serde(default = "default_per_page")]
    per_page: u32,
}

fn default_per_page() -> u32 {
    60
}

#[derive(Debug, Deserialize)]
struct PostSearchArgs {
    team_id: String,
    terms: String,
}

#[derive(Debug, Deserialize)]
struct PostUpdateArgs {
    post_id: String,
    message: String,
}

#[derive(Debug, Deserialize)]
struct PostPropsArgs {
    post_id: String,
    props: HashMap<String, String>,
}

#[derive(Debug, Deserialize)]
struct ReactionArgs {
    user_id: String,
    post_id: String,
    emoji_name: String,
}

/// Tools for the POST group.
pub fn post_tools(client: Arc<MattermostClient>) -> Vec<Arc<dyn Tool>> {
    vec![
        {
            let client = client.clone();
            tool(
                ToolDefinition::new("mm_post_get", "Fetch a post by id, props and metadata included.")
                    .with_schema(InputSchema::new().required("post_id", FieldType::Text, "Post id")),
                move |args| {
                    let client = client.clone();
                    async move {
                        let p: PostArgs = params(args)?;
                        json_result(&client.post_get(&p.post_id).await?)
                    }
                },
            )
        },
        {
            let client = client.clone();
            tool(
                ToolDefinition::new("mm_post_get_channel", "Page through a channel's posts, newest first.")
                    .with_schema(
                        InputSchema::new()
                            .required("channel_id", FieldType::Text, "Channel id")
                            .optional("page", FieldType::Integer, "Page number (default 0)")
                            .optional("per_page", FieldType::Integer, "Posts per page (default 60)"),
                    ),
                move |args| {
                    let client = client.clone();
                    async move {
                        let p: PostChannelArgs = params(args)?;
                        json_result(
                            &client
                                .post_get_channel(&p.channel_id, p.page, p.per_page)
                                .await?,
                        )
                    }
                },
            )
        },
        {
            let client = client.clone();
            tool(
                ToolDefinition::new("mm_post_get_thread", "Fetch the full thread a post belongs to.")
                    .with_schema(
                        InputSchema::new().required("post_id", FieldType::Text, "Root post id"),
                    ),
                move |args| {
                    let client = client.clone();
                    async move {
                        let p: PostArgs = params(args)?;
                        json_result(&client.post_get_thread(&p.post_id).await?)
                    }
                },
            )
        },
        {
            let client = client.clone();
            tool(
                ToolDefinition::new("mm_post_search", "Search posts in a team.").with_schema(
                    InputSchema::new()
                        .required("team_id", FieldType::Text, "Team id")
                        .required("terms", FieldType::Text, "Search terms"),
                ),
                move |args| {
                    let client = client.clone();
                    async move {
                        let p: PostSearchArgs = params(args)?;
                        json_result(&client.post_search(&p.team_id, &p.terms).await?)
                    }
                },
            )
        },
        {
            let client = client.clone();
            tool(
                ToolDefinition::new(
                    "mm_post_create",
                    "Create a post. Props carry invisible metadata (flat string-to-string map).",
                )
                .with_schema(
                    InputSchema::new()
                        .required("channel_id", FieldType::Text, "Channel id")
                        .required("message", FieldType::Text, "Message text")
                        .optional("props", FieldType::TextMap, "Invisible metadata")
                        .optional("root_id", FieldType::Text, "Parent post id for a reply"),
                ),
                move |args| {
                    let client = client.clone();
                    async move {
                        let p: CreatePostParams = params(args)?;
                        json_result(&client.post_create(&p).await?)
                    }
                },
            )
        },
        {
            let client = client.clone();
            tool(
                ToolDefinition::new("mm_post_update", "Update the message of a post.").with_schema(
                    InputSchema::new()
                        .required("post_id", FieldType::Text, "Post id")
                        .required("message", FieldType::Text, "New message text"),
                ),
                move |args| {
                    let client = client.clone();
                    async move {
                        let p: PostUpdateArgs = params(args)?;
                        json_result(&client.post_update(&p.post_id, &p.message).await?)
                    }
                },
            )
        },
        {
            let client = client.clone();
            tool(
                ToolDefinition::new(
                    "mm_post_update_props",
                    "Merge props into a post (flat string-to-string map). Existing keys not mentioned are preserved.",
                )
                .with_schema(
                    InputSchema::new()
                        .required("post_id", FieldType::Text, "Post id")
                        .required("props", FieldType::TextMap, "Keys to merge"),
                ),
                move |args| {
                    let client = client.clone();
                    async move {
                        let p: PostPropsArgs = params(args)?;
                        json_result(&client.post_update_props(&p.post_id, &p.props).await?)
                    }
                },
            )
        },
        {
            let client = client.clone();
            tool(
                ToolDefinition::new("mm_post_delete", "Delete a post.")
                    .with_schema(InputSchema::new().required("post_id", FieldType::Text, "Post id")),
                move |args| {
                    let client = client.clone();
                    async move {
                        let p: PostArgs = params(args)?;
                        json_result(&client.post_delete(&p.post_id).await?)
                    }
                },
            )
        },
        {
            let client = client.clone();
            tool(
                ToolDefinition::new("mm_post_pin", "Pin a post to its channel.")
                    .with_schema(InputSchema::new().required("post_id", FieldType::Text, "Post id")),
                move |args| {
                    let client = client.clone();
                    async move {
                        let p: PostArgs = params(args)?;
                        json_result(&client.post_pin(&p.post_id).await?)
                    }
                },
            )
        },
        {
            let client = client.clone();
            tool(
                ToolDefinition::new("mm_post_unpin", "Unpin a post.")
                    .with_schema(InputSchema::new().required("post_id", FieldType::Text, "Post id")),
                move |args| {
                    let client = client.clone();
                    async move {
                        let p: PostArgs = params(args)?;
                        json_result(&client.post_unpin(&p.post_id).await?)
                    }
                },
            )
        },
        {
            let client = client.clone();
            tool(
                ToolDefinition::new("mm_post_get_pinned", "List the pinned posts of a channel.")
                    .with_schema(
                        InputSchema::new().required("channel_id", FieldType::Text, "Channel id"),
                    ),
                move |args| {
                    let client = client.clone();
                    async move {
                        let p: ChannelArgs = params(args)?;
                        json_result(&client.post_get_pinned(&p.channel_id).await?)
                    }
                },
            )
        },
        {
            let client = client.clone();
            tool(
                ToolDefinition::new("mm_post_reaction_add", "Add an emoji reaction to a post.")
                    .with_schema(
                        InputSchema::new()
                            .required("user_id", FieldType::Text, "Reacting user id")
                            .required("post_id", FieldType::Text, "Post id")
                            .required("emoji_name", FieldType::Text, "Emoji name, e.g. \"white_check_mark\""),
                    ),
                move |args| {
                    let client = client.clone();
                    async move {
                        let p: ReactionArgs = params(args)?;
                        json_result(
                            &client
                                .reaction_add(&p.user_id, &p.post_id, &p.emoji_name)
                                .await?,
                        )
                    }
                },
            )
        },
        {
            let client = client.clone();
            tool(
                ToolDefinition::new("mm_post_reaction_remove", "Remove an emoji reaction from a post.")
                    .with_schema(
                        InputSchema::new()
                            .required("user_id", FieldType::Text, "Reacting user id")
                            .required("post_id", FieldType::Text, "Post id")
                            .required("emoji_name", FieldType::Text, "Emoji name"),
                    ),
                move |args| {
                    let client = client.clone();
                    async move {
                        let p: ReactionArgs = params(args)?;
                        json_result(
                            &client
                                .reaction_remove(&p.user_id, &p.post_id, &p.emoji_name)
                                .await?,
                        )
                    }
                },
            )
        },
        {
            let client = client.clone();
            tool(
                ToolDefinition::new("mm_post_reaction_get", "List the reactions on a post.")
                    .with_schema(InputSchema::new().required("post_id", FieldType::Text, "Post id")),
                move |args| {
                    let client = client.clone();
                    async move {
                        let p: PostArgs = params(args)?;
                        json_result(&client.reaction_get(&p.post_id).await?)
                    }
                },
            )
        },
    ]
}
