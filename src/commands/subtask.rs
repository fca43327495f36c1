//! Subtask Commands
//!
//! Frontend bindings for subtask endpoints.

use serde::Serialize;

use super::task::RenameArgs;
use super::{post, post_json, Api};
use crate::error::ApiError;
use crate::models::{Ack, CreatedSubtask, SubtaskId, TaskId, ToggledResponse, UNTITLED};

#[derive(Serialize)]
struct CreateSubtaskArgs<'a> {
    subtask: &'a str,
}

pub async fn create_subtask(api: &Api, task_id: TaskId) -> Result<CreatedSubtask, ApiError> {
    post_json(api, &format!("/add_subtask/{task_id}"), &CreateSubtaskArgs { subtask: UNTITLED }).await
}

pub async fn toggle_subtask(api: &Api, id: SubtaskId) -> Result<bool, ApiError> {
    let toggled: ToggledResponse = post(api, &format!("/toggle_subtask/{id}")).await?;
    Ok(toggled.completed)
}

pub async fn delete_subtask(api: &Api, id: SubtaskId) -> Result<(), ApiError> {
    let _: Ack = post(api, &format!("/delete_subtask/{id}")).await?;
    Ok(())
}

pub async fn rename_subtask(api: &Api, id: SubtaskId, new_name: &str) -> Result<(), ApiError> {
    let _: Ack = post_json(api, &format!("/edit_subtask/{id}"), &RenameArgs { new_name }).await?;
    Ok(())
}
