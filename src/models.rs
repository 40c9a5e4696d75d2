//! Mattermost domain models.
//!
//! All entities are owned by the remote deployment; these types exist to
//! give the client typed returns and to let the task operations index into
//! run checklists. Every container is deserialization-tolerant
//! (`#[serde(default)]`) because several endpoints reply with partial
//! objects, and some successful calls carry no body at all (normalized to
//! `{"status": "ok"}` by the client).

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;

/// Flat metadata map attached to users, teams, channels and posts.
///
/// The remote API only persists string values here; nested objects, arrays
/// and bare numbers are rejected with a 400. Input validation enforces the
/// flat shape before any request is made.
pub type Props = Map<String, Value>;

/// State of a checklist item. The open state is the empty string on the
/// wire, which is why this is a closed enum rather than a plain string.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaskState {
    /// Open (serialized as `""`).
    #[default]
    #[serde(rename = "")]
    Open,

    /// Work has started.
    #[serde(rename = "in_progress")]
    InProgress,

    /// Done.
    #[serde(rename = "closed")]
    Closed,
}

impl TaskState {
    /// Wire representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskState::Open => "",
            TaskState::InProgress => "in_progress",
            TaskState::Closed => "closed",
        }
    }

    /// The closed set of accepted wire values.
    pub const VALUES: &'static [&'static str] = &["", "in_progress", "closed"];
}

/// Status of a playbook run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunStatus {
    #[default]
    InProgress,
    Finished,
}

impl RunStatus {
    /// Wire representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            RunStatus::InProgress => "InProgress",
            RunStatus::Finished => "Finished",
        }
    }

    /// The closed set of accepted wire values.
    pub const VALUES: &'static [&'static str] = &["InProgress", "Finished"];
}

/// A Mattermost user account.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct User {
    pub id: String,
    pub username: String,
    pub email: String,
    pub nickname: String,
    pub first_name: String,
    pub last_name: String,
    pub position: String,
    pub roles: String,
    pub props: Props,
    pub notify_props: Props,
    pub create_at: i64,
    pub update_at: i64,
    pub delete_at: i64,
}

/// A team.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Team {
    pub id: String,
    pub name: String,
    pub display_name: String,
    pub description: String,
    /// "O" (open) or "I" (invite-only).
    #[serde(rename = "type")]
    pub team_type: String,
    pub props: Props,
    pub create_at: i64,
    pub update_at: i64,
    pub delete_at: i64,
}

/// Membership of a user in a team.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TeamMember {
    pub team_id: String,
    pub user_id: String,
    pub roles: String,
    pub scheme_admin: bool,
    pub scheme_user: bool,
}

/// A channel.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Channel {
    pub id: String,
    pub team_id: String,
    pub name: String,
    pub display_name: String,
    /// "O" public, "P" private, "D" direct, "G" group.
    #[serde(rename = "type")]
    pub channel_type: String,
    pub header: String,
    pub purpose: String,
    pub props: Props,
    pub creator_id: String,
    pub create_at: i64,
    pub update_at: i64,
    pub delete_at: i64,
}

/// Membership of a user in a channel.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ChannelMember {
    pub channel_id: String,
    pub user_id: String,
    pub roles: String,
    pub scheme_admin: bool,
    pub scheme_user: bool,
}

/// A post in a channel.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Post {
    pub id: String,
    pub channel_id: String,
    pub user_id: String,
    pub root_id: String,
    pub message: String,
    #[serde(rename = "type")]
    pub post_type: String,
    pub props: Props,
    pub file_ids: Vec<String>,
    pub pending_post_id: String,
    pub metadata: Option<Value>,
    pub create_at: i64,
    pub update_at: i64,
    pub edit_at: i64,
    pub delete_at: i64,
}

/// An emoji reaction on a post.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Reaction {
    pub user_id: String,
    pub post_id: String,
    pub emoji_name: String,
    pub create_at: i64,
}

/// An ordered page of posts, as returned by the channel/thread/search
/// endpoints.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PostList {
    pub order: Vec<String>,
    pub posts: HashMap<String, Post>,
    pub next_post_id: Option<String>,
    pub prev_post_id: Option<String>,
}

/// A webhook that lets external services post into Mattermost.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct IncomingWebhook {
    pub id: String,
    pub channel_id: String,
    pub team_id: String,
    pub display_name: String,
    pub description: String,
    pub username: Option<String>,
    pub icon_url: Option<String>,
    pub create_at: i64,
    pub update_at: i64,
    pub delete_at: i64,
}

/// A webhook Mattermost fires towards an external callback URL.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OutgoingWebhook {
    pub id: String,
    pub team_id: String,
    pub channel_id: String,
    pub creator_id: String,
    pub display_name: String,
    pub description: String,
    pub trigger_words: Vec<String>,
    /// 0 = exact match, 1 = starts with.
    pub trigger_when: i64,
    pub callback_urls: Vec<String>,
    pub content_type: String,
    pub token: String,
    pub create_at: i64,
    pub update_at: i64,
    pub delete_at: i64,
}

/// A playbook: a reusable checklist-of-checklists template.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Playbook {
    pub id: String,
    pub title: String,
    pub description: String,
    pub team_id: String,
    pub public: bool,
    pub create_public_playbook_run: bool,
    pub message_on_join: String,
    pub message_on_join_enabled: bool,
    pub run_summary_template: String,
    pub run_summary_template_enabled: bool,
    pub channel_name_template: String,
    pub retrospective_template: String,
    pub retrospective_enabled: bool,
    pub reminder_message_template: String,
    pub reminder_timer_default_seconds: i64,
    pub webhook_on_creation_urls: Vec<String>,
    pub webhook_on_creation_enabled: bool,
    pub webhook_on_status_update_urls: Vec<String>,
    pub webhook_on_status_update_enabled: bool,
    /// "create_new_channel" or "link_existing_channel".
    pub channel_mode: String,
    pub channel_id: String,
    pub checklists: Vec<Checklist>,
    pub member_ids: Vec<String>,
    pub invited_user_ids: Vec<String>,
    pub invited_group_ids: Vec<String>,
    pub create_at: i64,
    pub update_at: i64,
    pub delete_at: i64,
}

/// A custom property field on a playbook or run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PropertyField {
    pub id: String,
    pub name: String,
    /// "text", "select" or "multiselect".
    #[serde(rename = "type")]
    pub field_type: String,
    pub description: Option<String>,
    pub attrs: Option<Value>,
    pub create_at: i64,
    pub update_at: i64,
    pub delete_at: i64,
}

/// The value of a property field on a run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PropertyValue {
    pub id: String,
    pub field_id: String,
    pub value: String,
    pub create_at: i64,
    pub update_at: i64,
    pub delete_at: i64,
}

/// A live execution of a playbook, bound to a channel.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Run {
    pub id: String,
    pub name: String,
    pub description: String,
    pub team_id: String,
    pub channel_id: String,
    pub playbook_id: String,
    pub owner_user_id: String,
    pub current_status: RunStatus,
    pub checklists: Vec<Checklist>,
    pub create_at: i64,
    pub end_at: i64,
    pub delete_at: i64,
}

/// One checklist inside a playbook or run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Checklist {
    pub id: String,
    pub title: String,
    pub items: Vec<ChecklistItem>,
    pub items_order: Vec<String>,
    pub update_at: i64,
}

/// One actionable item inside a run's checklist.
///
/// Items are addressed by `(checklist_index, item_index)` position in all
/// mutation calls; the indices are only valid against the run's current
/// ordering, so a concurrent reorder on the remote side invalidates them.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ChecklistItem {
    pub id: String,
    pub title: String,
    pub description: String,
    pub state: TaskState,
    pub state_modified: i64,
    pub assignee_id: String,
    pub assignee_modified: i64,
    pub command: String,
    pub command_last_run: i64,
    pub due_date: i64,
    pub task_actions: Vec<Value>,
    pub update_at: i64,
}

/// Canonical "no content" reply. HTTP 204, empty bodies and non-JSON
/// bodies on successful calls all normalize to `{"status": "ok"}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StatusResponse {
    pub status: String,
    pub message: Option<String>,
}

/// Paginated playbook listing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaybookList {
    pub items: Vec<Playbook>,
    pub total_count: i64,
    pub page_count: i64,
    pub has_more: bool,
}

/// Paginated run listing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RunList {
    pub items: Vec<Run>,
    pub total_count: i64,
    pub page_count: i64,
    pub has_more: bool,
}

/// Id of a newly created playbook.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaybookCreated {
    pub id: String,
}

/// Property fields and values of a run, fetched together.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RunProperties {
    pub fields: Vec<PropertyField>,
    pub values: Vec<PropertyValue>,
}

/// Result of a bulk checklist completion.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CheckedCount {
    pub checked_count: u32,
}

/// Trigger id returned when a task's slash command is executed.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TriggerId {
    pub trigger_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_task_state_wire_format() {
        assert_eq!(serde_json::to_value(TaskState::Open).unwrap(), json!(""));
        assert_eq!(
            serde_json::to_value(TaskState::InProgress).unwrap(),
            json!("in_progress")
        );
        assert_eq!(
            serde_json::from_value::<TaskState>(json!("closed")).unwrap(),
            TaskState::Closed
        );
    }

    #[test]
    fn test_run_parses_partial_reply() {
        let run: Run = serde_json::from_value(json!({
            "id": "run1",
            "name": "Release 1.2",
            "current_status": "Finished",
            "checklists": [
                {"title": "Prep", "items": [{"title": "Cut branch", "state": "closed"}]}
            ]
        }))
        .unwrap();

        assert_eq!(run.current_status, RunStatus::Finished);
        assert_eq!(run.checklists.len(), 1);
        assert_eq!(run.checklists[0].items[0].state, TaskState::Closed);
        assert!(run.team_id.is_empty());
    }

    #[test]
    fn test_status_response_accepts_ok() {
        let status: StatusResponse = serde_json::from_value(json!({"status": "ok"})).unwrap();
        assert_eq!(status.status, "ok");
    }
}
