//! Task (checklist item) operations (Playbooks plugin API).
//!
//! Tasks have no stable addressing id on the mutation endpoints: every call
//! takes a `(checklist_index, item_index)` coordinate pair that is only
//! valid against the run's current ordering. A concurrent reorder on the
//! remote side invalidates previously obtained indices; nothing here papers
//! over that.

use super::{to_body, Api, MattermostClient, MattermostError};
use crate::models::{CheckedCount, ChecklistItem, StatusResponse, TaskState, TriggerId};
use reqwest::Method;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{debug, instrument};

/// Fields accepted when adding a task to a checklist.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddTaskParams {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub command: Option<String>,
}

/// Fields accepted by the task update endpoint (title and slash command;
/// the description has its own endpoint).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TaskPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub command: Option<String>,
}

impl MattermostClient {
    /// Fetch one task by position, out of the full run.
    ///
    /// Returns `None` when either index is out of bounds — an absent task is
    /// a normal negative lookup result, not an error.
    pub async fn task_get(
        &self,
        run_id: &str,
        checklist_index: usize,
        item_index: usize,
    ) -> Result<Option<ChecklistItem>, MattermostError> {
        let run = self.run_get(run_id).await?;
        Ok(run
            .checklists
            .get(checklist_index)
            .and_then(|checklist| checklist.items.get(item_index))
            .cloned())
    }

    /// Append a task to a checklist.
    pub async fn task_add(
        &self,
        run_id: &str,
        checklist_index: usize,
        task: &AddTaskParams,
    ) -> Result<StatusResponse, MattermostError> {
        self.request_as(
            Method::POST,
            Api::Playbooks,
            &format!("/runs/{run_id}/checklists/{checklist_index}/add"),
            Some(to_body(task)),
        )
        .await
    }

    /// Update a task's title and/or slash command.
    pub async fn task_update(
        &self,
        run_id: &str,
        checklist_index: usize,
        item_index: usize,
        patch: &TaskPatch,
    ) -> Result<StatusResponse, MattermostError> {
        self.request_as(
            Method::PUT,
            Api::Playbooks,
            &format!("/runs/{run_id}/checklists/{checklist_index}/item/{item_index}"),
            Some(to_body(patch)),
        )
        .await
    }

    /// Replace a task's description.
    pub async fn task_update_description(
        &self,
        run_id: &str,
        checklist_index: usize,
        item_index: usize,
        description: &str,
    ) -> Result<StatusResponse, MattermostError> {
        self.request_as(
            Method::PUT,
            Api::Playbooks,
            &format!(
                "/runs/{run_id}/checklists/{checklist_index}/item/{item_index}/description"
            ),
            Some(json!({ "description": description })),
        )
        .await
    }

    /// Remove a task from its checklist.
    pub async fn task_delete(
        &self,
        run_id: &str,
        checklist_index: usize,
        item_index: usize,
    ) -> Result<StatusResponse, MattermostError> {
        self.request_as(
            Method::DELETE,
            Api::Playbooks,
            &format!("/runs/{run_id}/checklists/{checklist_index}/item/{item_index}"),
            None,
        )
        .await
    }

    /// Set a task's state. May fire the task's configured actions on the
    /// remote side.
    pub async fn task_set_state(
        &self,
        run_id: &str,
        checklist_index: usize,
        item_index: usize,
        state: TaskState,
    ) -> Result<StatusResponse, MattermostError> {
        self.request_as(
            Method::PUT,
            Api::Playbooks,
            &format!("/runs/{run_id}/checklists/{checklist_index}/item/{item_index}/state"),
            Some(json!({ "new_state": state })),
        )
        .await
    }

    /// Shortcut: mark a task closed.
    pub async fn task_check(
        &self,
        run_id: &str,
        checklist_index: usize,
        item_index: usize,
    ) -> Result<StatusResponse, MattermostError> {
        self.task_set_state(run_id, checklist_index, item_index, TaskState::Closed)
            .await
    }

    /// Shortcut: reopen a task (state back to `""`).
    pub async fn task_uncheck(
        &self,
        run_id: &str,
        checklist_index: usize,
        item_index: usize,
    ) -> Result<StatusResponse, MattermostError> {
        self.task_set_state(run_id, checklist_index, item_index, TaskState::Open)
            .await
    }

    /// Assign a task to a user.
    pub async fn task_set_assignee(
        &self,
        run_id: &str,
        checklist_index: usize,
        item_index: usize,
        assignee_id: &str,
    ) -> Result<StatusResponse, MattermostError> {
        self.request_as(
            Method::PUT,
            Api::Playbooks,
            &format!("/runs/{run_id}/checklists/{checklist_index}/item/{item_index}/assignee"),
            Some(json!({ "assignee_id": assignee_id })),
        )
        .await
    }

    /// Execute the slash command configured on a task.
    pub async fn task_run_command(
        &self,
        run_id: &str,
        checklist_index: usize,
        item_index: usize,
    ) -> Result<TriggerId, MattermostError> {
        self.request_as(
            Method::PUT,
            Api::Playbooks,
            &format!("/runs/{run_id}/checklists/{checklist_index}/item/{item_index}/run"),
            None,
        )
        .await
    }

    /// Move a task to a new position within its checklist.
    pub async fn task_reorder(
        &self,
        run_id: &str,
        checklist_index: usize,
        item_index: usize,
        new_index: usize,
    ) -> Result<StatusResponse, MattermostError> {
        self.request_as(
            Method::PUT,
            Api::Playbooks,
            &format!("/runs/{run_id}/checklists/{checklist_index}/reorder"),
            Some(json!({ "item_num": item_index, "new_location": new_index })),
        )
        .await
    }

    /// Close every open task in a checklist, one state-change call per item
    /// not already closed. Returns how many items were changed.
    ///
    /// Not atomic: a failure partway leaves the earlier items closed and the
    /// rest untouched, and the error reflects only the call that failed.
    #[instrument(skip(self))]
    pub async fn task_check_checklist(
        &self,
        run_id: &str,
        checklist_index: usize,
    ) -> Result<CheckedCount, MattermostError> {
        let run = self.run_get(run_id).await?;
        let checklist = run.checklists.get(checklist_index).ok_or_else(|| {
            MattermostError::NotFound(format!(
                "checklist {checklist_index} in run {run_id}"
            ))
        })?;

        let mut checked_count = 0;
        for (item_index, item) in checklist.items.iter().enumerate() {
            if item.state != TaskState::Closed {
                self.task_check(run_id, checklist_index, item_index).await?;
                checked_count += 1;
            }
        }

        debug!(checked_count, "bulk checklist completion done");
        Ok(CheckedCount { checked_count })
    }
}
