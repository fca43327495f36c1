//! Task Commands
//!
//! Frontend bindings for task endpoints.

use serde::Serialize;

use super::{get, post, post_json, Api};
use crate::error::ApiError;
use crate::models::{Ack, CreatedTask, TabId, Task, TaskId, TaskListResponse, ToggledResponse, UNTITLED};

// ========================
// Argument Structs
// ========================

#[derive(Serialize)]
struct CreateTaskArgs<'a> {
    task: &'a str,
    #[serde(rename = "tabId", skip_serializing_if = "Option::is_none")]
    tab_id: Option<TabId>,
}

#[derive(Serialize)]
pub(crate) struct RenameArgs<'a> {
    pub(crate) new_name: &'a str,
}

#[derive(Serialize)]
struct OrderArgs<'a> {
    order: &'a [TaskId],
}

// ========================
// Commands
// ========================

pub async fn fetch_tasks(api: &Api) -> Result<Vec<Task>, ApiError> {
    let list: TaskListResponse = get(api, "/fetch_tasks").await?;
    Ok(list.todos)
}

/// Create an "untitled" task filed under `tab_id`
pub async fn create_task(api: &Api, tab_id: Option<TabId>) -> Result<CreatedTask, ApiError> {
    post_json(api, "/add_task", &CreateTaskArgs { task: UNTITLED, tab_id }).await
}

/// Returns the server's new completion state
pub async fn toggle_task(api: &Api, id: TaskId) -> Result<bool, ApiError> {
    let toggled: ToggledResponse = post(api, &format!("/toggle_task/{id}")).await?;
    Ok(toggled.completed)
}

pub async fn delete_task(api: &Api, id: TaskId) -> Result<(), ApiError> {
    let _: Ack = post(api, &format!("/delete_task/{id}")).await?;
    Ok(())
}

pub async fn rename_task(api: &Api, id: TaskId, new_name: &str) -> Result<(), ApiError> {
    let _: Ack = post_json(api, &format!("/edit_task/{id}"), &RenameArgs { new_name }).await?;
    Ok(())
}

pub async fn update_task_order(api: &Api, order: &[TaskId]) -> Result<(), ApiError> {
    let _: Ack = post_json(api, "/update_task_order", &OrderArgs { order }).await?;
    Ok(())
}
