//! # Mattermost MCP
//!
//! This crate provides an MCP (Model Context Protocol) server for a
//! Mattermost deployment, exposing the platform REST API and the Playbooks
//! plugin API as callable tools.
//!
//! ## Overview
//!
//! The crate handles:
//! - **Client**: an authenticated HTTP client for the two Mattermost API
//!   surfaces (`/api/v4` and the Playbooks plugin under
//!   `/plugins/playbooks/api/v0`)
//! - **Tools**: tool definitions and handlers for eight resource groups
//! - **Schemas**: declarative input schemas with a generic argument validator
//! - **JSON-RPC**: the MCP protocol surface (`initialize`, `tools/list`,
//!   `tools/call`)
//!
//! ## Tool Groups
//!
//! - `mm_user_*` — users, profiles and props
//! - `mm_webhook_*` — incoming/outgoing webhooks
//! - `mm_team_*` — teams and team membership
//! - `mm_channel_*` — channels, membership and props
//! - `mm_post_*` — posts, props and reactions
//! - `mm_playbook_*` — playbook templates and property fields
//! - `mm_run_*` — playbook runs and property values
//! - `mm_task_*` — checklist items inside a run
//!
//! Each group also ships an `mm_<group>_help` tool serving static usage
//! notes, plus a top-level `mm_help` index.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use mattermost_mcp::{build_server, Config, MattermostClient};
//! use std::sync::Arc;
//!
//! async fn setup() {
//!     let config = Config::new("https://mattermost.example.com", "token");
//!     let client = Arc::new(MattermostClient::new(config));
//!     let server = build_server(client).await;
//!
//!     let tools = server.list_tools().await;
//!     println!("Registered {} tools", tools.len());
//! }
//! ```
//!
//! Every tool call returns a uniform envelope
//! (`{content: [{type: "text", text}], isError?}`); errors raised anywhere
//! in validation or handling are folded into that envelope rather than
//! propagated, so one malformed call can never take down the dispatch loop.

pub mod client;
pub mod config;
pub mod help;
pub mod models;
pub mod schema;
pub mod server;
pub mod tools;
pub mod types;

use std::sync::Arc;

// Re-export main types
pub use client::{IdentityCache, MattermostClient, MattermostError};
pub use config::{Config, ConfigError};
pub use schema::{FieldSpec, FieldType, InputSchema};
pub use server::{FunctionTool, McpServer, McpServerError, McpServerResult, Tool};
pub use types::{
    ContentBlock, McpError, McpRequest, McpResponse, RequestId, ServerInfo, ToolCall,
    ToolDefinition, ToolResult,
};

/// Build an [`McpServer`] with the full Mattermost tool set registered.
pub async fn build_server(client: Arc<MattermostClient>) -> McpServer {
    let server = McpServer::new("mattermost-mcp", env!("CARGO_PKG_VERSION"));
    server.register_tools(tools::all_tools(client)).await;
    server
}
