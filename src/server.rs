//! MCP server implementation
//!
//! This module provides the tool registry and dispatcher. The registry is a
//! closed set of tools bound at initialization; dispatch validates caller
//! arguments against each tool's declared schema before the handler runs.
//!
//! The central contract lives in [`McpServer::call_tool`]: it is total. An
//! unknown tool name, a validation failure or an error raised inside a
//! handler all come back as an error-flagged [`ToolResult`] envelope — never
//! as a propagated error. A malformed call for one tool must not crash the
//! dispatch loop or affect other tools.

use crate::client::MattermostError;
use crate::types::*;
use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::warn;

/// MCP server error types.
#[derive(Debug, Error)]
pub enum McpServerError {
    /// Tool not found
    #[error("Tool not found: {0}")]
    ToolNotFound(String),

    /// Invalid parameters
    #[error("Invalid parameters: {0}")]
    InvalidParams(String),

    /// Tool execution failed
    #[error("Tool execution failed: {0}")]
    ExecutionError(String),
}

impl From<MattermostError> for McpServerError {
    fn from(err: MattermostError) -> Self {
        McpServerError::ExecutionError(err.to_string())
    }
}

impl From<serde_json::Error> for McpServerError {
    fn from(err: serde_json::Error) -> Self {
        McpServerError::ExecutionError(err.to_string())
    }
}

/// Result type for MCP server operations.
pub type McpServerResult<T> = Result<T, McpServerError>;

/// Trait for tool implementations.
#[async_trait]
pub trait Tool: Send + Sync {
    /// Get the tool definition.
    fn definition(&self) -> &ToolDefinition;

    /// Execute the tool with validated arguments.
    async fn execute(&self, args: Value) -> McpServerResult<ToolResult>;
}

type HandlerFuture = Pin<Box<dyn Future<Output = McpServerResult<ToolResult>> + Send + 'static>>;
type Handler = Box<dyn Fn(Value) -> HandlerFuture + Send + Sync + 'static>;

/// Tool backed by an async closure, typically one closed over an
/// `Arc<MattermostClient>`.
pub struct FunctionTool {
    definition: ToolDefinition,
    handler: Handler,
}

impl FunctionTool {
    /// Create a new function-based tool.
    pub fn new<F, Fut>(definition: ToolDefinition, handler: F) -> Self
    where
        F: Fn(Value) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = McpServerResult<ToolResult>> + Send + 'static,
    {
        Self {
            definition,
            handler: Box::new(move |args| Box::pin(handler(args))),
        }
    }
}

#[async_trait]
impl Tool for FunctionTool {
    fn definition(&self) -> &ToolDefinition {
        &self.definition
    }

    async fn execute(&self, args: Value) -> McpServerResult<ToolResult> {
        (self.handler)(args).await
    }
}

/// MCP server: tool registry plus dispatcher.
pub struct McpServer {
    /// Server info
    info: ServerInfo,

    /// Server capabilities
    capabilities: ServerCapabilities,

    /// Registered tools
    tools: Arc<RwLock<HashMap<String, Arc<dyn Tool>>>>,
}

impl McpServer {
    /// Create a new MCP server.
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            info: ServerInfo {
                name: name.into(),
                version: version.into(),
            },
            capabilities: ServerCapabilities {
                tools: Some(ToolCapabilities {
                    list_changed: false,
                }),
            },
            tools: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Register a tool.
    pub async fn register_tool(&self, tool: Arc<dyn Tool>) {
        let name = tool.definition().name.clone();
        let mut tools = self.tools.write().await;
        tools.insert(name, tool);
    }

    /// Register multiple tools.
    pub async fn register_tools(&self, tools: Vec<Arc<dyn Tool>>) {
        for tool in tools {
            self.register_tool(tool).await;
        }
    }

    /// Get all tool definitions. Pure and deterministic: no I/O happens
    /// here, only a read of the registry built at startup.
    pub async fn list_tools(&self) -> Vec<ToolDefinition> {
        let tools = self.tools.read().await;
        let mut definitions: Vec<ToolDefinition> =
            tools.values().map(|t| t.definition().clone()).collect();
        definitions.sort_by(|a, b| a.name.cmp(&b.name));
        definitions
    }

    /// Execute a tool. Total: every failure mode is folded into an
    /// error-flagged envelope.
    pub async fn call_tool(&self, name: &str, arguments: Value) -> ToolResult {
        match self.dispatch(name, arguments).await {
            Ok(result) => result,
            Err(e) => {
                warn!(tool = name, error = %e, "tool call failed");
                ToolResult::error(format!("Error: {e}"))
            }
        }
    }

    /// Fallible dispatch path: lookup, validate, execute.
    async fn dispatch(&self, name: &str, arguments: Value) -> McpServerResult<ToolResult> {
        let tool = {
            let tools = self.tools.read().await;
            tools
                .get(name)
                .cloned()
                .ok_or_else(|| McpServerError::ToolNotFound(name.to_string()))?
        };

        // Absent arguments are treated as an empty object.
        let args = if arguments.is_null() {
            Value::Object(serde_json::Map::new())
        } else {
            arguments
        };

        tool.definition()
            .schema
            .validate(&args)
            .map_err(McpServerError::InvalidParams)?;

        tool.execute(args).await
    }

    /// Handle an MCP request.
    pub async fn handle_request(&self, request: McpRequest) -> McpResponse {
        match request.method.as_str() {
            "initialize" => self.handle_initialize(request.id),
            "tools/list" => self.handle_tools_list(request.id).await,
            "tools/call" => self.handle_tools_call(request.id, request.params).await,
            _ => McpResponse::error(request.id, McpError::method_not_found(&request.method)),
        }
    }

    fn handle_initialize(&self, id: RequestId) -> McpResponse {
        McpResponse::success(
            id,
            serde_json::json!({
                "protocolVersion": "2024-11-05",
                "capabilities": self.capabilities,
                "serverInfo": self.info
            }),
        )
    }

    async fn handle_tools_list(&self, id: RequestId) -> McpResponse {
        let tools = self.list_tools().await;
        McpResponse::success(id, serde_json::json!({ "tools": tools }))
    }

    async fn handle_tools_call(&self, id: RequestId, params: Option<Value>) -> McpResponse {
        let params = match params {
            Some(p) => p,
            None => return McpResponse::error(id, McpError::invalid_params("Missing params")),
        };

        let call: ToolCall = match serde_json::from_value(params) {
            Ok(c) => c,
            Err(e) => return McpResponse::error(id, McpError::invalid_params(e.to_string())),
        };

        // Tool failures travel in-band inside the envelope, so this is
        // always a JSON-RPC success response.
        let result = self.call_tool(&call.name, call.arguments).await;
        McpResponse::success(id, serde_json::to_value(result).unwrap())
    }

    /// Get server info.
    pub fn info(&self) -> &ServerInfo {
        &self.info
    }

    /// Get server capabilities.
    pub fn capabilities(&self) -> &ServerCapabilities {
        &self.capabilities
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{FieldType, InputSchema};
    use serde_json::json;

    fn echo_tool() -> Arc<dyn Tool> {
        Arc::new(FunctionTool::new(
            ToolDefinition::new("echo", "Echo the message back").with_schema(
                InputSchema::new().required("message", FieldType::Text, "Message to echo"),
            ),
            |args| async move {
                let message = args["message"].as_str().unwrap_or_default().to_string();
                Ok(ToolResult::text(message))
            },
        ))
    }

    fn failing_tool() -> Arc<dyn Tool> {
        Arc::new(FunctionTool::new(
            ToolDefinition::new("always_fails", "Fails unconditionally"),
            |_args| async move {
                Err(McpServerError::ExecutionError("handler exploded".into()))
            },
        ))
    }

    #[tokio::test]
    async fn test_list_tools_sorted() {
        let server = McpServer::new("test", "0.0.0");
        server.register_tools(vec![failing_tool(), echo_tool()]).await;

        let tools = server.list_tools().await;
        assert_eq!(tools.len(), 2);
        assert_eq!(tools[0].name, "always_fails");
        assert_eq!(tools[1].name, "echo");
    }

    #[tokio::test]
    async fn test_call_tool_success() {
        let server = McpServer::new("test", "0.0.0");
        server.register_tool(echo_tool()).await;

        let result = server.call_tool("echo", json!({"message": "hi"})).await;
        assert!(!result.is_error);
        assert_eq!(result.first_text(), Some("hi"));
    }

    #[tokio::test]
    async fn test_unknown_tool_is_contained() {
        let server = McpServer::new("test", "0.0.0");

        let result = server.call_tool("nope", json!({})).await;
        assert!(result.is_error);
        assert!(result.first_text().unwrap().contains("Tool not found"));
    }

    #[tokio::test]
    async fn test_validation_failure_is_contained() {
        let server = McpServer::new("test", "0.0.0");
        server.register_tool(echo_tool()).await;

        let result = server.call_tool("echo", json!({})).await;
        assert!(result.is_error);
        assert!(result.first_text().unwrap().contains("message"));
    }

    #[tokio::test]
    async fn test_handler_error_is_contained() {
        let server = McpServer::new("test", "0.0.0");
        server.register_tool(failing_tool()).await;

        let result = server.call_tool("always_fails", json!(null)).await;
        assert!(result.is_error);
        assert!(result.first_text().unwrap().contains("handler exploded"));
    }

    #[tokio::test]
    async fn test_handle_request_initialize() {
        let server = McpServer::new("test", "0.0.0");

        let resp = server.handle_request(McpRequest::new("1", "initialize")).await;
        assert!(resp.result.is_some());
        assert!(resp.error.is_none());
    }

    #[tokio::test]
    async fn test_handle_tools_call_unknown_tool_in_band() {
        let server = McpServer::new("test", "0.0.0");

        let req = McpRequest::new(1, "tools/call")
            .with_params(json!({"name": "missing", "arguments": {}}));
        let resp = server.handle_request(req).await;

        // JSON-RPC level success; failure is flagged inside the envelope.
        let result = resp.result.expect("in-band result");
        assert_eq!(result["isError"], true);
    }

    #[tokio::test]
    async fn test_unknown_method() {
        let server = McpServer::new("test", "0.0.0");

        let resp = server.handle_request(McpRequest::new("1", "resources/list")).await;
        assert!(resp.error.is_some());
    }
}
