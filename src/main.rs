//! Stdio JSON-RPC entry point.
//!
//! Speaks newline-delimited MCP JSON-RPC on stdin/stdout; logs go to stderr
//! so they never corrupt the protocol stream. Configuration is entirely
//! environment-variable driven (see [`mattermost_mcp::Config::from_env`]).

use mattermost_mcp::{build_server, Config, MattermostClient, McpRequest};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let config = Config::from_env()?;
    let client = Arc::new(MattermostClient::new(config));
    let server = build_server(client).await;

    let tool_count = server.list_tools().await.len();
    info!(tools = tool_count, "mattermost-mcp ready");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();

    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }

        let parsed: serde_json::Value = match serde_json::from_str(&line) {
            Ok(value) => value,
            Err(e) => {
                warn!(error = %e, "dropping unparseable frame");
                continue;
            }
        };

        // Notifications carry no id and expect no reply.
        if parsed.get("id").is_none() {
            debug!(method = parsed["method"].as_str().unwrap_or(""), "notification");
            continue;
        }

        let request: McpRequest = match serde_json::from_value(parsed) {
            Ok(request) => request,
            Err(e) => {
                warn!(error = %e, "dropping malformed request");
                continue;
            }
        };

        let response = server.handle_request(request).await;
        let mut frame = serde_json::to_vec(&response)?;
        frame.push(b'\n');
        stdout.write_all(&frame).await?;
        stdout.flush().await?;
    }

    Ok(())
}
