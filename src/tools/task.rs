//! Task tools.
//!
//! Tasks are addressed by `(checklist_index, item_index)` against the run's
//! current checklist ordering.

use super::{json_result, params, tool};
use crate::client::task::{AddTaskParams, TaskPatch};
use crate::client::MattermostClient;
use crate::models::TaskState;
use crate::schema::{FieldType, InputSchema};
use crate::server::Tool;
use crate::types::ToolDefinition;
use serde::Deserialize;
use std::sync::Arc;

#[derive(Debug, Deserialize)]
struct TaskCoords {
    run_id: String,
    checklist_index: usize,
    item_index: usize,
}

#[derive(Debug, Deserialize)]
struct ChecklistCoords {
    run_id: String,
    checklist_index: usize,
}

#[derive(Debug, Deserialize)]
struct TaskAddArgs {
    run_id: String,
    checklist_index: usize,
    #[serde(flatten)]
    task: AddTaskParams,
}

#[derive(Debug, Deserialize)]
struct TaskUpdateArgs {
    run_id: String,
    checklist_index: usize,
    item_index: usize,
    #[serde(flatten)]
    patch: TaskPatch,
}

#[derive(Debug, Deserialize)]
struct TaskDescriptionArgs {
    run_id: String,
    checklist_index: usize,
    item_index: usize,
    description: String,
}

#[derive(Debug, Deserialize)]
struct TaskStateArgs {
    run_id: String,
    checklist_index: usize,
    item_index: usize,
    state: TaskState,
}

#[derive(Debug, Deserialize)]
struct TaskAssigneeArgs {
    run_id: String,
    checklist_index: usize,
    item_index: usize,
    assignee_id: String,
}

#[derive(Debug, Deserialize)]
struct TaskReorderArgs {
    run_id: String,
    checklist_index: usize,
    item_index: usize,
    new_index: usize,
}

fn coords_schema() -> InputSchema {
    InputSchema::new()
        .required("run_id", FieldType::Text, "Run id")
        .required("checklist_index", FieldType::Integer, "Checklist index (0, 1, 2...)")
        .required("item_index", FieldType::Integer, "Task index (0, 1, 2...)")
}

/// Tools for the TASK group.
pub fn task_tools(client: Arc<MattermostClient>) -> Vec<Arc<dyn Tool>> {
    vec![
        {
            let client = client.clone();
            tool(
                ToolDefinition::new(
                    "mm_task_get",
                    "Fetch one task by position. Returns null when either index is out of bounds.",
                )
                .with_schema(coords_schema()),
                move |args| {
                    let client = client.clone();
                    async move {
                        let p: TaskCoords = params(args)?;
                        json_result(
                            &client
                                .task_get(&p.run_id, p.checklist_index, p.item_index)
                                .await?,
                        )
                    }
                },
            )
        },
        {
            let client = client.clone();
            tool(
                ToolDefinition::new("mm_task_add", "Append a task to a checklist.").with_schema(
                    InputSchema::new()
                        .required("run_id", FieldType::Text, "Run id")
                        .required("checklist_index", FieldType::Integer, "Checklist index")
                        .required("title", FieldType::Text, "Task title")
                        .optional("description", FieldType::Text, "Task description")
                        .optional("command", FieldType::Text, "Slash command"),
                ),
                move |args| {
                    let client = client.clone();
                    async move {
                        let p: TaskAddArgs = params(args)?;
                        json_result(&client.task_add(&p.run_id, p.checklist_index, &p.task).await?)
                    }
                },
            )
        },
        {
            let client = client.clone();
            tool(
                ToolDefinition::new(
                    "mm_task_update",
                    "Update a task's title or slash command. Use mm_task_update_description for the description.",
                )
                .with_schema(
                    InputSchema::new()
                        .required("run_id", FieldType::Text, "Run id")
                        .required("checklist_index", FieldType::Integer, "Checklist index")
                        .required("item_index", FieldType::Integer, "Task index")
                        .optional("title", FieldType::Text, "New title")
                        .optional("command", FieldType::Text, "New slash command"),
                ),
                move |args| {
                    let client = client.clone();
                    async move {
                        let p: TaskUpdateArgs = params(args)?;
                        json_result(
                            &client
                                .task_update(&p.run_id, p.checklist_index, p.item_index, &p.patch)
                                .await?,
                        )
                    }
                },
            )
        },
        {
            let client = client.clone();
            tool(
                ToolDefinition::new(
                    "mm_task_update_description",
                    "Replace a task's description. Suited for long prompt text.",
                )
                .with_schema(
                    InputSchema::new()
                        .required("run_id", FieldType::Text, "Run id")
                        .required("checklist_index", FieldType::Integer, "Checklist index")
                        .required("item_index", FieldType::Integer, "Task index")
                        .required("description", FieldType::Text, "New description"),
                ),
                move |args| {
                    let client = client.clone();
                    async move {
                        let p: TaskDescriptionArgs = params(args)?;
                        json_result(
                            &client
                                .task_update_description(
                                    &p.run_id,
                                    p.checklist_index,
                                    p.item_index,
                                    &p.description,
                                )
                                .await?,
                        )
                    }
                },
            )
        },
        {
            let client = client.clone();
            tool(
                ToolDefinition::new("mm_task_delete", "Remove a task from its checklist.")
                    .with_schema(coords_schema()),
                move |args| {
                    let client = client.clone();
                    async move {
                        let p: TaskCoords = params(args)?;
                        json_result(
                            &client
                                .task_delete(&p.run_id, p.checklist_index, p.item_index)
                                .await?,
                        )
                    }
                },
            )
        },
        {
            let client = client.clone();
            tool(
                ToolDefinition::new(
                    "mm_task_set_state",
                    "Set a task's state. May fire the task's configured actions.",
                )
                .with_schema(coords_schema().required(
                    "state",
                    FieldType::TextEnum(TaskState::VALUES),
                    "State: \"\" (open), \"in_progress\" or \"closed\"",
                )),
                move |args| {
                    let client = client.clone();
                    async move {
                        let p: TaskStateArgs = params(args)?;
                        json_result(
                            &client
                                .task_set_state(&p.run_id, p.checklist_index, p.item_index, p.state)
                                .await?,
                        )
                    }
                },
            )
        },
        {
            let client = client.clone();
            tool(
                ToolDefinition::new("mm_task_check", "Shortcut: mark a task closed.")
                    .with_schema(coords_schema()),
                move |args| {
                    let client = client.clone();
                    async move {
                        let p: TaskCoords = params(args)?;
                        json_result(
                            &client
                                .task_check(&p.run_id, p.checklist_index, p.item_index)
                                .await?,
                        )
                    }
                },
            )
        },
        {
            let client = client.clone();
            tool(
                ToolDefinition::new("mm_task_uncheck", "Shortcut: reopen a task (state back to \"\").")
                    .with_schema(coords_schema()),
                move |args| {
                    let client = client.clone();
                    async move {
                        let p: TaskCoords = params(args)?;
                        json_result(
                            &client
                                .task_uncheck(&p.run_id, p.checklist_index, p.item_index)
                                .await?,
                        )
                    }
                },
            )
        },
        {
            let client = client.clone();
            tool(
                ToolDefinition::new("mm_task_set_assignee", "Assign a task to a user.").with_schema(
                    coords_schema().required("assignee_id", FieldType::Text, "Assignee's user id"),
                ),
                move |args| {
                    let client = client.clone();
                    async move {
                        let p: TaskAssigneeArgs = params(args)?;
                        json_result(
                            &client
                                .task_set_assignee(
                                    &p.run_id,
                                    p.checklist_index,
                                    p.item_index,
                                    &p.assignee_id,
                                )
                                .await?,
                        )
                    }
                },
            )
        },
        {
            let client = client.clone();
            tool(
                ToolDefinition::new("mm_task_run_command", "Execute the slash command configured on a task.")
                    .with_schema(coords_schema()),
                move |args| {
                    let client = client.clone();
                    async move {
                        let p: TaskCoords = params(args)?;
                        json_result(
                            &client
                                .task_run_command(&p.run_id, p.checklist_index, p.item_index)
                                .await?,
                        )
                    }
                },
            )
        },
        {
            let client = client.clone();
            tool(
                ToolDefinition::new("mm_task_reorder", "Move a task to a new position within its checklist.")
                    .with_schema(coords_schema().required(
                        "new_index",
                        FieldType::Integer,
                        "New position",
                    )),
                move |args| {
                    let client = client.clone();
                    async move {
                        let p: TaskReorderArgs = params(args)?;
                        json_result(
                            &client
                                .task_reorder(&p.run_id, p.checklist_index, p.item_index, p.new_index)
                                .await?,
                        )
                    }
                },
            )
        },
        {
            let client = client.clone();
            tool(
                ToolDefinition::new(
                    "mm_task_check_checklist",
                    "Close every open task in a checklist. Reports how many were changed; not atomic on failure.",
                )
                .with_schema(
                    InputSchema::new()
                        .required("run_id", FieldType::Text, "Run id")
                        .required("checklist_index", FieldType::Integer, "Checklist index"),
                ),
                move |args| {
                    let client = client.clone();
                    async move {
                        let p: ChecklistCoords = params(args)?;
                        json_result(&client.task_check_checklist(&p.run_id, p.checklist_index).await?)
                    }
                },
            )
        },
    ]
}
