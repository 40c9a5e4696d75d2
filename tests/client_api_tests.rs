//! End-to-end tests for the Mattermost API client.
//!
//! These tests verify the transport contract (auth headers, response
//! normalization, error surfacing) and the composite operations (props
//! merge-update, bulk checklist completion, identity memoization) against a
//! wiremock server standing in for the deployment.

use mattermost_mcp::models::{RunStatus, TaskState};
use mattermost_mcp::{Config, MattermostClient, MattermostError};
use serde_json::json;
use std::collections::HashMap;
use wiremock::matchers::{body_json, body_partial_json, header, method, path, path_regex, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Test fixture: one mock deployment and a client pointed at it.
struct TestFixture {
    server: MockServer,
    client: MattermostClient,
}

impl TestFixture {
    async fn new() -> Self {
        let server = MockServer::start().await;
        let config = Config::new(server.uri(), "test-token").with_default_team("qa");
        let client = MattermostClient::new(config);
        Self { server, client }
    }
}

fn props(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

// =============================================================================
// Transport contract
// =============================================================================

/// Every request carries the bearer token and a JSON content type.
#[tokio::test]
async fn test_request_carries_bearer_and_content_type() {
    let fixture = TestFixture::new().await;

    Mock::given(method("GET"))
        .and(path("/api/v4/users/u1"))
        .and(header("Authorization", "Bearer test-token"))
        .and(header("Content-Type", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "u1",
            "username": "agent"
        })))
        .expect(1)
        .mount(&fixture.server)
        .await;

    let user = fixture.client.user_get("u1").await.expect("Should fetch user");
    assert_eq!(user.id, "u1");
    assert_eq!(user.username, "agent");
}

/// HTTP 204 normalizes to `{"status": "ok"}`.
#[tokio::test]
async fn test_no_content_normalizes_to_ok() {
    let fixture = TestFixture::new().await;

    Mock::given(method("POST"))
        .and(path("/api/v4/posts/p1/pin"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&fixture.server)
        .await;

    let status = fixture.client.post_pin("p1").await.expect("Should pin");
    assert_eq!(status.status, "ok");
}

/// An empty body on a 200 behaves exactly like a 204.
#[tokio::test]
async fn test_empty_body_normalizes_to_ok() {
    let fixture = TestFixture::new().await;

    Mock::given(method("POST"))
        .and(path("/api/v4/posts/p1/unpin"))
        .respond_with(ResponseTemplate::new(200).set_body_string(""))
        .expect(1)
        .mount(&fixture.server)
        .await;

    let status = fixture.client.post_unpin("p1").await.expect("Should unpin");
    assert_eq!(status.status, "ok");
}

/// A non-JSON body on a successful call is not a parse error.
#[tokio::test]
async fn test_non_json_success_body_normalizes_to_ok() {
    let fixture = TestFixture::new().await;

    Mock::given(method("DELETE"))
        .and(path("/api/v4/posts/p1"))
        .respond_with(ResponseTemplate::new(200).set_body_string("OK"))
        .expect(1)
        .mount(&fixture.server)
        .await;

    let status = fixture.client.post_delete("p1").await.expect("Should delete");
    assert_eq!(status.status, "ok");
}

/// Non-success statuses surface as a typed error carrying status and body.
#[tokio::test]
async fn test_api_error_carries_status_and_body() {
    let fixture = TestFixture::new().await;

    Mock::given(method("GET"))
        .and(path("/api/v4/users/u404"))
        .respond_with(ResponseTemplate::new(404).set_body_string("user not found"))
        .expect(1)
        .mount(&fixture.server)
        .await;

    let err = fixture.client.user_get("u404").await.unwrap_err();
    match err {
        MattermostError::ApiError { status, body } => {
            assert_eq!(status, 404);
            assert!(body.contains("user not found"));
        }
        other => panic!("Expected ApiError, got {other:?}"),
    }
}

// =============================================================================
// Props merge-update
// =============================================================================

/// Merging new keys preserves the keys (and every other field) the entity
/// already carried, and writes via full PUT rather than PATCH.
#[tokio::test]
async fn test_props_merge_preserves_existing_keys() {
    let fixture = TestFixture::new().await;

    Mock::given(method("GET"))
        .and(path("/api/v4/teams/t1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "t1",
            "name": "core",
            "display_name": "Core",
            "props": {"x": "1"}
        })))
        .expect(1)
        .mount(&fixture.server)
        .await;

    // Only a full PUT is mounted; a PATCH attempt would 404 and fail the
    // test. The body must contain the merged map and the untouched fields.
    Mock::given(method("PUT"))
        .and(path("/api/v4/teams/t1"))
        .and(body_partial_json(json!({
            "name": "core",
            "display_name": "Core",
            "props": {"x": "1", "y": "2"}
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "t1",
            "name": "core",
            "props": {"x": "1", "y": "2"}
        })))
        .expect(1)
        .mount(&fixture.server)
        .await;

    let team = fixture
        .client
        .team_update_props("t1", &props(&[("y", "2")]))
        .await
        .expect("Should merge props");

    assert_eq!(team.props.get("x"), Some(&json!("1")));
    assert_eq!(team.props.get("y"), Some(&json!("2")));
}

/// Applying the same merge twice produces the same write both times.
#[tokio::test]
async fn test_props_merge_is_idempotent() {
    let fixture = TestFixture::new().await;

    Mock::given(method("GET"))
        .and(path("/api/v4/channels/c1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "c1",
            "props": {"a": "1"}
        })))
        .expect(2)
        .mount(&fixture.server)
        .await;

    Mock::given(method("PUT"))
        .and(path("/api/v4/channels/c1"))
        .and(body_partial_json(json!({"props": {"a": "1"}})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "c1",
            "props": {"a": "1"}
        })))
        .expect(2)
        .mount(&fixture.server)
        .await;

    let merge = props(&[("a", "1")]);
    let first = fixture.client.channel_update_props("c1", &merge).await.unwrap();
    let second = fixture.client.channel_update_props("c1", &merge).await.unwrap();

    assert_eq!(first.props, second.props);
}

/// Entities with no props object yet get one created by the merge.
#[tokio::test]
async fn test_props_merge_handles_absent_props() {
    let fixture = TestFixture::new().await;

    Mock::given(method("GET"))
        .and(path("/api/v4/users/u1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "u1",
            "username": "agent"
        })))
        .expect(1)
        .mount(&fixture.server)
        .await;

    Mock::given(method("PUT"))
        .and(path("/api/v4/users/u1"))
        .and(body_partial_json(json!({"props": {"k": "v"}})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "u1",
            "username": "agent",
            "props": {"k": "v"}
        })))
        .expect(1)
        .mount(&fixture.server)
        .await;

    let user = fixture
        .client
        .user_update_props("u1", &props(&[("k", "v")]))
        .await
        .expect("Should create props");
    assert_eq!(user.props.get("k"), Some(&json!("v")));
}

// =============================================================================
// Playbook fetch-merge-replace
// =============================================================================

/// Playbook updates overlay the given fields on the fetched object and PUT
/// the whole thing back.
#[tokio::test]
async fn test_playbook_update_round_trips_unmentioned_fields() {
    let fixture = TestFixture::new().await;

    Mock::given(method("GET"))
        .and(path("/plugins/playbooks/api/v0/playbooks/pb1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "pb1",
            "title": "Release checklist",
            "team_id": "t1",
            "channel_mode": "create_new_channel",
            "checklists": [{"title": "Prep", "items": []}]
        })))
        .expect(1)
        .mount(&fixture.server)
        .await;

    Mock::given(method("PUT"))
        .and(path("/plugins/playbooks/api/v0/playbooks/pb1"))
        .and(body_partial_json(json!({
            "title": "Hotfix checklist",
            "team_id": "t1",
            "channel_mode": "create_new_channel"
        })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&fixture.server)
        .await;

    let status = fixture
        .client
        .playbook_update("pb1", &json!({"title": "Hotfix checklist"}))
        .await
        .expect("Should update playbook");
    assert_eq!(status.status, "ok");
}

// =============================================================================
// Identity memoization
// =============================================================================

/// Two sequential resolutions issue exactly one `/users/me` call.
#[tokio::test]
async fn test_current_user_id_memoized() {
    let fixture = TestFixture::new().await;

    Mock::given(method("GET"))
        .and(path("/api/v4/users/me"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "me-1",
            "username": "bot"
        })))
        .expect(1)
        .mount(&fixture.server)
        .await;

    let first = fixture.client.current_user_id().await.unwrap();
    let second = fixture.client.current_user_id().await.unwrap();
    assert_eq!(first, "me-1");
    assert_eq!(first, second);
}

/// The default-team fallback resolves the configured name once and reuses
/// the id afterwards.
#[tokio::test]
async fn test_default_team_memoized() {
    let fixture = TestFixture::new().await;

    Mock::given(method("GET"))
        .and(path("/api/v4/teams/name/qa"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "team-qa",
            "name": "qa"
        })))
        .expect(1)
        .mount(&fixture.server)
        .await;

    let first = fixture.client.resolve_team_id(None).await.unwrap();
    let second = fixture.client.resolve_team_id(None).await.unwrap();
    assert_eq!(first, "team-qa");
    assert_eq!(first, second);

    // An explicit id never consults the cache or the network.
    let explicit = fixture.client.resolve_team_id(Some("t9".into())).await.unwrap();
    assert_eq!(explicit, "t9");
}

/// Without a configured default team the fallback is an error, not a guess.
#[tokio::test]
async fn test_no_default_team_is_an_error() {
    let server = MockServer::start().await;
    let client = MattermostClient::new(Config::new(server.uri(), "test-token"));

    let err = client.resolve_team_id(None).await.unwrap_err();
    assert!(matches!(err, MattermostError::NoDefaultTeam));
}

// =============================================================================
// Task positional operations
// =============================================================================

fn run_with_checklists() -> serde_json::Value {
    json!({
        "id": "r1",
        "name": "Incident 42",
        "current_status": "InProgress",
        "checklists": [
            {"title": "Triage", "items": [{"title": "Page on-call", "state": "closed"}]},
            {"title": "Fix", "items": [
                {"title": "Identify cause", "state": ""},
                {"title": "Patch", "state": "in_progress"},
                {"title": "Verify", "state": "closed"}
            ]}
        ]
    })
}

/// Out-of-bounds indices are a normal negative result, not an error.
#[tokio::test]
async fn test_task_get_out_of_bounds_returns_none() {
    let fixture = TestFixture::new().await;

    Mock::given(method("GET"))
        .and(path("/plugins/playbooks/api/v0/runs/r1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(run_with_checklists()))
        .mount(&fixture.server)
        .await;

    assert!(fixture.client.task_get("r1", 1, 5).await.unwrap().is_none());
    assert!(fixture.client.task_get("r1", 5, 0).await.unwrap().is_none());

    let task = fixture.client.task_get("r1", 1, 1).await.unwrap().unwrap();
    assert_eq!(task.title, "Patch");
    assert_eq!(task.state, TaskState::InProgress);
}

/// Bulk completion issues one state change per item not already closed and
/// reports the count.
#[tokio::test]
async fn test_check_checklist_skips_closed_items() {
    let fixture = TestFixture::new().await;

    Mock::given(method("GET"))
        .and(path("/plugins/playbooks/api/v0/runs/r1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(run_with_checklists()))
        .mount(&fixture.server)
        .await;

    // Checklist 1 has 3 items, 1 already closed: exactly 2 state changes.
    Mock::given(method("PUT"))
        .and(path_regex(r"^/plugins/playbooks/api/v0/runs/r1/checklists/1/item/\d+/state$"))
        .and(body_json(json!({"new_state": "closed"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "ok"})))
        .expect(2)
        .mount(&fixture.server)
        .await;

    let result = fixture.client.task_check_checklist("r1", 1).await.unwrap();
    assert_eq!(result.checked_count, 2);

    // A missing checklist is an error for this mutation, and issues no
    // state changes (the PUT expectation above stays at 2).
    let err = fixture.client.task_check_checklist("r1", 9).await.unwrap_err();
    assert!(matches!(err, MattermostError::NotFound(_)));
}

/// `task_check` then `task_uncheck` writes "closed" then "" in order.
#[tokio::test]
async fn test_task_state_round_trip() {
    let fixture = TestFixture::new().await;

    Mock::given(method("PUT"))
        .and(path("/plugins/playbooks/api/v0/runs/r1/checklists/0/item/0/state"))
        .and(body_json(json!({"new_state": "closed"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "ok"})))
        .expect(1)
        .mount(&fixture.server)
        .await;

    Mock::given(method("PUT"))
        .and(path("/plugins/playbooks/api/v0/runs/r1/checklists/0/item/0/state"))
        .and(body_json(json!({"new_state": ""})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "ok"})))
        .expect(1)
        .mount(&fixture.server)
        .await;

    fixture.client.task_check("r1", 0, 0).await.unwrap();
    fixture.client.task_uncheck("r1", 0, 0).await.unwrap();
}

// =============================================================================
// Run listing and properties
// =============================================================================

/// Listing filters land in the query string.
#[tokio::test]
async fn test_run_list_query_parameters() {
    let fixture = TestFixture::new().await;

    Mock::given(method("GET"))
        .and(path("/plugins/playbooks/api/v0/runs"))
        .and(query_param("team_id", "t1"))
        .and(query_param("statuses", "InProgress"))
        .and(query_param("owner_user_id", "u1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"items": []})))
        .expect(1)
        .mount(&fixture.server)
        .await;

    let filter = mattermost_mcp::client::run::RunListFilter {
        statuses: vec![RunStatus::InProgress],
        owner_user_id: Some("u1".to_string()),
    };
    let runs = fixture.client.run_list("t1", &filter).await.unwrap();
    assert!(runs.items.is_empty());
}

/// Property lookup filters values client-side and returns None for a field
/// with no value.
#[tokio::test]
async fn test_run_property_get_filters_by_field() {
    let fixture = TestFixture::new().await;

    Mock::given(method("GET"))
        .and(path("/plugins/playbooks/api/v0/runs/r1/property_fields"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": "f1", "name": "context", "type": "text"}
        ])))
        .mount(&fixture.server)
        .await;

    Mock::given(method("GET"))
        .and(path("/plugins/playbooks/api/v0/runs/r1/property_values"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": "v1", "field_id": "f1", "value": "alpha"}
        ])))
        .mount(&fixture.server)
        .await;

    let value = fixture.client.run_property_get("r1", "f1").await.unwrap();
    assert_eq!(value.unwrap().value, "alpha");

    let missing = fixture.client.run_property_get("r1", "f2").await.unwrap();
    assert!(missing.is_none());
}
