//! Frontend Models
//!
//! Data structures matching the backend's JSON payloads.

use serde::{Deserialize, Serialize};

pub type TaskId = u32;
pub type SubtaskId = u32;
pub type TabId = u32;

/// Display name used for new or emptied tasks and subtasks
pub const UNTITLED: &str = "untitled";

/// Name shown for a task or subtask
pub fn display_name(name: &str) -> &str {
    if name.is_empty() {
        UNTITLED
    } else {
        name
    }
}

/// Label of a completion toggle button
pub fn toggle_icon(completed: bool) -> &'static str {
    if completed {
        "x"
    } else {
        "⠀"
    }
}

/// Subtask data structure (matches backend)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subtask {
    pub id: SubtaskId,
    pub name: String,
    pub completed: bool,
}

/// Task data structure (matches backend)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    #[serde(rename = "task")]
    pub name: String,
    pub completed: bool,
    /// None means the task only shows under "all"
    #[serde(rename = "tabId", alias = "tab_id", default)]
    pub tab_id: Option<TabId>,
    #[serde(default)]
    pub subtasks: Vec<Subtask>,
}

/// Tab data structure (matches backend)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tab {
    pub id: TabId,
    pub name: String,
}

/// Element whose name is being renamed
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EditTarget {
    Task(TaskId),
    Subtask(SubtaskId),
}

// ========================
// Response Bodies
// ========================

#[derive(Debug, Clone, Deserialize)]
pub struct TaskListResponse {
    pub todos: Vec<Task>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreatedTask {
    pub id: TaskId,
    #[serde(default)]
    pub task: String,
    #[serde(default)]
    pub completed: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ToggledResponse {
    pub completed: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreatedSubtask {
    pub subtask_id: SubtaskId,
    #[serde(default)]
    pub subtask: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreatedTab {
    #[serde(rename = "tabId", alias = "tab_id")]
    pub tab_id: TabId,
}

/// Body of responses that only carry the success flag
#[derive(Debug, Clone, Deserialize)]
pub struct Ack {}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_task_accepts_both_tab_field_names() {
        let camel: Task = serde_json::from_value(json!({
            "id": 1, "task": "a", "completed": false, "tabId": 7, "subtasks": []
        }))
        .unwrap();
        let snake: Task = serde_json::from_value(json!({
            "id": 1, "task": "a", "completed": false, "tab_id": 7, "subtasks": []
        }))
        .unwrap();
        assert_eq!(camel.tab_id, Some(7));
        assert_eq!(camel, snake);
    }

    #[test]
    fn test_task_defaults_missing_tab_and_subtasks() {
        let task: Task = serde_json::from_value(json!({
            "id": 3, "task": "b", "completed": true, "tabId": null
        }))
        .unwrap();
        assert_eq!(task.tab_id, None);
        assert!(task.subtasks.is_empty());
    }

    #[test]
    fn test_display_name_falls_back_to_untitled() {
        assert_eq!(display_name(""), "untitled");
        assert_eq!(display_name("milk"), "milk");
    }
}
