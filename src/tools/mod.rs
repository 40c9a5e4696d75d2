//! Mattermost MCP tools.
//!
//! Each resource group contributes a `*_tools()` constructor returning its
//! tools closed over a shared [`MattermostClient`]. [`all_tools`] aggregates
//! the full registry: 82 domain tools across 8 groups plus the 9 help
//! tools.

pub mod channel;
pub mod playbook;
pub mod post;
pub mod run;
pub mod task;
pub mod team;
pub mod user;
pub mod webhook;

pub use channel::channel_tools;
pub use playbook::playbook_tools;
pub use post::post_tools;
pub use run::run_tools;
pub use task::task_tools;
pub use team::team_tools;
pub use user::user_tools;
pub use webhook::webhook_tools;

use crate::client::MattermostClient;
use crate::help;
use crate::server::{FunctionTool, McpServerError, McpServerResult, Tool};
use crate::types::{ToolDefinition, ToolResult};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::future::Future;
use std::sync::Arc;

/// Wrap a definition and an async handler into a registrable tool.
pub(crate) fn tool<F, Fut>(definition: ToolDefinition, handler: F) -> Arc<dyn Tool>
where
    F: Fn(serde_json::Value) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = McpServerResult<ToolResult>> + Send + 'static,
{
    Arc::new(FunctionTool::new(definition, handler))
}

/// Deserialize schema-validated arguments into a handler's param struct.
pub(crate) fn params<T: DeserializeOwned>(args: serde_json::Value) -> McpServerResult<T> {
    serde_json::from_value(args).map_err(|e| McpServerError::InvalidParams(e.to_string()))
}

/// Serialize a handler's return value into the text envelope.
pub(crate) fn json_result<T: Serialize>(value: &T) -> McpServerResult<ToolResult> {
    Ok(ToolResult::json(serde_json::to_value(value)?))
}

/// Get all available MCP tools.
///
/// # Example
///
/// ```rust,no_run
/// use mattermost_mcp::{tools::all_tools, Config, MattermostClient};
/// use std::sync::Arc;
///
/// let client = Arc::new(MattermostClient::new(Config::new("https://chat.example.com", "token")));
/// let tools = all_tools(client);
/// println!("Available tools: {}", tools.len());
/// ```
pub fn all_tools(client: Arc<MattermostClient>) -> Vec<Arc<dyn Tool>> {
    let mut tools = help_tools();

    tools.extend(user_tools(client.clone()));
    tools.extend(webhook_tools(client.clone()));
    tools.extend(team_tools(client.clone()));
    tools.extend(channel_tools(client.clone()));
    tools.extend(post_tools(client.clone()));
    tools.extend(playbook_tools(client.clone()));
    tools.extend(run_tools(client.clone()));
    tools.extend(task_tools(client));

    tools
}

/// The static help tools: one index plus one per group.
fn help_tools() -> Vec<Arc<dyn Tool>> {
    let pages: [(&str, &str, &'static str); 9] = [
        ("mm_help", "List the 8 available tool groups.", help::HELP_INDEX),
        ("mm_user_help", "Help for the USER group.", help::HELP_USER),
        ("mm_webhook_help", "Help for the WEBHOOK group.", help::HELP_WEBHOOK),
        ("mm_team_help", "Help for the TEAM group.", help::HELP_TEAM),
        ("mm_channel_help", "Help for the CHANNEL group.", help::HELP_CHANNEL),
        ("mm_post_help", "Help for the POST group.", help::HELP_POST),
        ("mm_playbook_help", "Help for the PLAYBOOK group.", help::HELP_PLAYBOOK),
        ("mm_run_help", "Help for the RUN group.", help::HELP_RUN),
        ("mm_task_help", "Help for the TASK group.", help::HELP_TASK),
    ];

    pages
        .into_iter()
        .map(|(name, description, text)| {
            tool(ToolDefinition::new(name, description), move |_args| async move {
                Ok(ToolResult::text(text))
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    fn test_client() -> Arc<MattermostClient> {
        Arc::new(MattermostClient::new(Config::new(
            "https://chat.example.com",
            "test-token",
        )))
    }

    #[test]
    fn test_all_tools_count() {
        let tools = all_tools(test_client());
        // 82 domain tools + 9 help tools
        assert_eq!(tools.len(), 91, "Expected 91 total tools");
    }

    #[test]
    fn test_all_tools_unique_names() {
        let tools = all_tools(test_client());
        let mut names = std::collections::HashSet::new();

        for tool in tools {
            let def = tool.definition();
            assert!(
                names.insert(def.name.clone()),
                "Duplicate tool name: {}",
                def.name
            );
        }
    }

    #[test]
    fn test_group_counts() {
        let client = test_client();
        assert_eq!(user_tools(client.clone()).len(), 6);
        assert_eq!(webhook_tools(client.clone()).len(), 10);
        assert_eq!(team_tools(client.clone()).len(), 7);
        assert_eq!(channel_tools(client.clone()).len(), 11);
        assert_eq!(post_tools(client.clone()).len(), 14);
        assert_eq!(playbook_tools(client.clone()).len(), 9);
        assert_eq!(run_tools(client.clone()).len(), 13);
        assert_eq!(task_tools(client).len(), 12);
    }

    #[tokio::test]
    async fn test_help_tool_serves_text() {
        let tools = help_tools();
        let index = tools
            .iter()
            .find(|t| t.definition().name == "mm_help")
            .unwrap();

        let result = index.execute(serde_json::json!({})).await.unwrap();
        assert!(!result.is_error);
        assert!(result.first_text().unwrap().contains("8 groups"));
    }
}
