//! End-to-end tests for tool dispatch.
//!
//! These drive the full path a frontend would: registry lookup, schema
//! validation, handler execution against a wiremock deployment, and the
//! uniform result envelope. The central property under test is containment:
//! no failure mode escapes `call_tool` as anything but an error-flagged
//! envelope.

use mattermost_mcp::{build_server, Config, MattermostClient, McpRequest, McpServer};
use serde_json::{json, Value};
use std::sync::Arc;
use wiremock::matchers::{body_partial_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

struct TestFixture {
    server: MockServer,
    mcp: McpServer,
}

impl TestFixture {
    async fn new() -> Self {
        let server = MockServer::start().await;
        let config = Config::new(server.uri(), "test-token").with_default_team("qa");
        let client = Arc::new(MattermostClient::new(config));
        let mcp = build_server(client).await;
        Self { server, mcp }
    }
}

/// Parse the envelope text as JSON.
fn text_json(result: &mattermost_mcp::ToolResult) -> Value {
    serde_json::from_str(result.first_text().expect("text content")).expect("JSON text")
}

#[tokio::test]
async fn test_unknown_tool_returns_error_envelope() {
    let fixture = TestFixture::new().await;

    let result = fixture.mcp.call_tool("mm_does_not_exist", json!({})).await;
    assert!(result.is_error);
    assert!(result.first_text().unwrap().contains("Tool not found"));
}

#[tokio::test]
async fn test_missing_required_field_rejected_before_network() {
    let fixture = TestFixture::new().await;

    // No mocks are mounted: a network attempt would error differently than
    // the validation message asserted here.
    let result = fixture.mcp.call_tool("mm_user_get", json!({})).await;
    assert!(result.is_error);
    assert!(result.first_text().unwrap().contains("user_id"));
}

#[tokio::test]
async fn test_wrong_type_rejected() {
    let fixture = TestFixture::new().await;

    let result = fixture
        .mcp
        .call_tool("mm_task_get", json!({"run_id": "r1", "checklist_index": "zero", "item_index": 0}))
        .await;
    assert!(result.is_error);
    assert!(result.first_text().unwrap().contains("checklist_index"));
}

#[tokio::test]
async fn test_closed_state_set_rejected() {
    let fixture = TestFixture::new().await;

    let result = fixture
        .mcp
        .call_tool(
            "mm_task_set_state",
            json!({"run_id": "r1", "checklist_index": 0, "item_index": 0, "state": "done"}),
        )
        .await;
    assert!(result.is_error);
    assert!(result.first_text().unwrap().contains("in_progress"));
}

#[tokio::test]
async fn test_props_with_nested_values_rejected() {
    let fixture = TestFixture::new().await;

    let result = fixture
        .mcp
        .call_tool(
            "mm_team_update_props",
            json!({"team_id": "t1", "props": {"config": {"db": "mongo"}}}),
        )
        .await;
    assert!(result.is_error);
    assert!(result.first_text().unwrap().contains("string-to-string"));
}

#[tokio::test]
async fn test_valid_call_returns_json_text() {
    let fixture = TestFixture::new().await;

    Mock::given(method("GET"))
        .and(path("/api/v4/users/u1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "u1",
            "username": "agent",
            "props": {"role": "worker"}
        })))
        .expect(1)
        .mount(&fixture.server)
        .await;

    let result = fixture.mcp.call_tool("mm_user_get", json!({"user_id": "u1"})).await;
    assert!(!result.is_error);

    let user = text_json(&result);
    assert_eq!(user["id"], "u1");
    assert_eq!(user["props"]["role"], "worker");
}

#[tokio::test]
async fn test_remote_error_becomes_error_envelope() {
    let fixture = TestFixture::new().await;

    Mock::given(method("GET"))
        .and(path("/api/v4/users/gone"))
        .respond_with(ResponseTemplate::new(403).set_body_string("forbidden"))
        .expect(1)
        .mount(&fixture.server)
        .await;

    let result = fixture.mcp.call_tool("mm_user_get", json!({"user_id": "gone"})).await;
    assert!(result.is_error);
    let text = result.first_text().unwrap();
    assert!(text.contains("403"));
    assert!(text.contains("forbidden"));
}

#[tokio::test]
async fn test_help_tools_need_no_arguments() {
    let fixture = TestFixture::new().await;

    let result = fixture.mcp.call_tool("mm_task_help", json!(null)).await;
    assert!(!result.is_error);
    assert!(result.first_text().unwrap().contains("mm_task_check_checklist"));
}

#[tokio::test]
async fn test_task_get_out_of_bounds_is_null_not_error() {
    let fixture = TestFixture::new().await;

    Mock::given(method("GET"))
        .and(path("/plugins/playbooks/api/v0/runs/r1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "r1",
            "checklists": [{"title": "Only", "items": [{"title": "One", "state": ""}]}]
        })))
        .expect(1)
        .mount(&fixture.server)
        .await;

    let result = fixture
        .mcp
        .call_tool("mm_task_get", json!({"run_id": "r1", "checklist_index": 0, "item_index": 9}))
        .await;

    assert!(!result.is_error);
    assert!(text_json(&result).is_null());
}

#[tokio::test]
async fn test_check_checklist_reports_count() {
    let fixture = TestFixture::new().await;

    Mock::given(method("GET"))
        .and(path("/plugins/playbooks/api/v0/runs/r1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "r1",
            "checklists": [{"title": "Fix", "items": [
                {"title": "A", "state": ""},
                {"title": "B", "state": "closed"},
                {"title": "C", "state": "in_progress"}
            ]}]
        })))
        .expect(1)
        .mount(&fixture.server)
        .await;

    Mock::given(method("PUT"))
        .and(body_partial_json(json!({"new_state": "closed"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "ok"})))
        .expect(2)
        .mount(&fixture.server)
        .await;

    let result = fixture
        .mcp
        .call_tool("mm_task_check_checklist", json!({"run_id": "r1", "checklist_index": 0}))
        .await;

    assert!(!result.is_error);
    assert_eq!(text_json(&result)["checked_count"], 2);
}

#[tokio::test]
async fn test_run_start_owner_defaults_to_token_user() {
    let fixture = TestFixture::new().await;

    Mock::given(method("GET"))
        .and(path("/api/v4/users/me"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "me-1"})))
        .expect(1)
        .mount(&fixture.server)
        .await;

    Mock::given(method("POST"))
        .and(path("/plugins/playbooks/api/v0/runs"))
        .and(body_partial_json(json!({
            "owner_user_id": "me-1",
            "playbook_id": "pb1",
            "team_id": "t1"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": "run-1",
            "name": "Incident",
            "owner_user_id": "me-1"
        })))
        .expect(1)
        .mount(&fixture.server)
        .await;

    let result = fixture
        .mcp
        .call_tool(
            "mm_run_start",
            json!({"playbook_id": "pb1", "name": "Incident", "team_id": "t1"}),
        )
        .await;

    assert!(!result.is_error);
    assert_eq!(text_json(&result)["owner_user_id"], "me-1");
}

#[tokio::test]
async fn test_playbook_list_falls_back_to_default_team() {
    let fixture = TestFixture::new().await;

    Mock::given(method("GET"))
        .and(path("/api/v4/teams/name/qa"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "team-qa"})))
        .expect(1)
        .mount(&fixture.server)
        .await;

    Mock::given(method("GET"))
        .and(path("/plugins/playbooks/api/v0/playbooks"))
        .and(query_param("team_id", "team-qa"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"items": []})))
        .expect(1)
        .mount(&fixture.server)
        .await;

    let result = fixture.mcp.call_tool("mm_playbook_list", json!({})).await;
    assert!(!result.is_error);
    assert!(text_json(&result)["items"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_tools_list_over_json_rpc() {
    let fixture = TestFixture::new().await;

    let resp = fixture
        .mcp
        .handle_request(McpRequest::new("1", "tools/list"))
        .await;

    let result = resp.result.expect("tools/list result");
    let tools = result["tools"].as_array().expect("tools array");
    assert_eq!(tools.len(), 91);

    for tool in tools {
        assert!(tool["name"].is_string());
        assert!(tool["description"].is_string());
        assert_eq!(tool["inputSchema"]["type"], "object");
    }
}

#[tokio::test]
async fn test_tools_call_over_json_rpc_wraps_envelope() {
    let fixture = TestFixture::new().await;

    let req = McpRequest::new(7, "tools/call")
        .with_params(json!({"name": "mm_help", "arguments": {}}));
    let resp = fixture.mcp.handle_request(req).await;

    let result = resp.result.expect("in-band result");
    assert!(result.get("isError").is_none());
    assert_eq!(result["content"][0]["type"], "text");
}
