//! Task Board State
//!
//! Ordered active/completed lists plus an id -> task mapping. Every
//! optimistic mutation returns a ticket holding exactly what is needed to
//! put the board back the way it was.

use std::collections::HashMap;

use crate::models::{EditTarget, Subtask, SubtaskId, TabId, Task, TaskId, UNTITLED};
use crate::tabs::TabFilter;

/// The two containers a task can live in
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ListKind {
    Active,
    Completed,
}

impl ListKind {
    pub fn for_completed(completed: bool) -> Self {
        if completed {
            ListKind::Completed
        } else {
            ListKind::Active
        }
    }

    /// Key used for the sortable list container
    pub fn key(self) -> &'static str {
        match self {
            ListKind::Active => "active",
            ListKind::Completed => "completed",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "active" => Some(ListKind::Active),
            "completed" => Some(ListKind::Completed),
            _ => None,
        }
    }

    pub fn class(self) -> &'static str {
        match self {
            ListKind::Active => "active-tasks draglist",
            ListKind::Completed => "completed-tasks draglist",
        }
    }
}

/// Undo information for an optimistic task toggle
#[derive(Clone, Debug, PartialEq)]
pub struct TaskToggle {
    pub id: TaskId,
    pub list: ListKind,
    pub index: usize,
}

impl TaskToggle {
    /// List the task was moved into
    pub fn destination(&self) -> ListKind {
        match self.list {
            ListKind::Active => ListKind::Completed,
            ListKind::Completed => ListKind::Active,
        }
    }
}

/// Undo information for an optimistic subtask toggle
#[derive(Clone, Debug, PartialEq)]
pub struct SubtaskToggle {
    pub id: SubtaskId,
    pub was_completed: bool,
}

/// A task taken off the board, with its former slot
#[derive(Clone, Debug, PartialEq)]
pub struct RemovedTask {
    pub task: Task,
    pub list: ListKind,
    pub index: usize,
}

/// A subtask taken off its task, with its former slot
#[derive(Clone, Debug, PartialEq)]
pub struct RemovedSubtask {
    pub subtask: Subtask,
    pub task_id: TaskId,
    pub index: usize,
}

/// Result of committing a rename
#[derive(Clone, Debug, PartialEq)]
pub enum RenameCommit {
    /// Non-empty name that must be sent to the server
    Send(String),
    /// Name was blank and has been reset locally
    ResetUntitled,
}

#[derive(Clone, Debug, Default)]
pub struct Board {
    tasks: HashMap<TaskId, Task>,
    subtask_owner: HashMap<SubtaskId, TaskId>,
    active: Vec<TaskId>,
    completed: Vec<TaskId>,
    /// Toggle reverts that arrived while their task was deleted
    pending_reverts: HashMap<TaskId, TaskToggle>,
}

impl Board {
    /// Build a board from a fetched snapshot, preserving server order
    pub fn from_snapshot(todos: Vec<Task>) -> Self {
        let mut board = Board::default();
        for task in todos {
            board.list_mut(ListKind::for_completed(task.completed)).push(task.id);
            board.index_subtasks(&task);
            board.tasks.insert(task.id, task);
        }
        board
    }

    /// Tasks of one list in display order
    #[cfg(test)]
    pub fn list_tasks(&self, kind: ListKind) -> Vec<Task> {
        self.list(kind)
            .iter()
            .filter_map(|id| self.tasks.get(id).cloned())
            .collect()
    }

    pub fn list(&self, kind: ListKind) -> &[TaskId] {
        match kind {
            ListKind::Active => &self.active,
            ListKind::Completed => &self.completed,
        }
    }

    fn list_mut(&mut self, kind: ListKind) -> &mut Vec<TaskId> {
        match kind {
            ListKind::Active => &mut self.active,
            ListKind::Completed => &mut self.completed,
        }
    }

    fn locate(&self, id: TaskId) -> Option<(ListKind, usize)> {
        [ListKind::Active, ListKind::Completed]
            .into_iter()
            .find_map(|kind| self.list(kind).iter().position(|t| *t == id).map(|i| (kind, i)))
    }

    fn index_subtasks(&mut self, task: &Task) {
        for subtask in &task.subtasks {
            self.subtask_owner.insert(subtask.id, task.id);
        }
    }

    pub fn task(&self, id: TaskId) -> Option<&Task> {
        self.tasks.get(&id)
    }

    pub fn subtask(&self, id: SubtaskId) -> Option<&Subtask> {
        let owner = self.subtask_owner.get(&id)?;
        self.tasks.get(owner)?.subtasks.iter().find(|s| s.id == id)
    }

    fn subtask_mut(&mut self, id: SubtaskId) -> Option<&mut Subtask> {
        let owner = *self.subtask_owner.get(&id)?;
        self.tasks.get_mut(&owner)?.subtasks.iter_mut().find(|s| s.id == id)
    }

    pub fn subtask_ids(&self, task_id: TaskId) -> Vec<SubtaskId> {
        self.tasks
            .get(&task_id)
            .map(|t| t.subtasks.iter().map(|s| s.id).collect())
            .unwrap_or_default()
    }

    pub fn name_of(&self, target: EditTarget) -> Option<&str> {
        match target {
            EditTarget::Task(id) => self.task(id).map(|t| t.name.as_str()),
            EditTarget::Subtask(id) => self.subtask(id).map(|s| s.name.as_str()),
        }
    }

    /// Whether the task passes the tab filter. Unknown ids are hidden.
    pub fn is_visible(&self, id: TaskId, filter: TabFilter) -> bool {
        self.tasks.get(&id).map(|t| filter.matches(t.tab_id)).unwrap_or(false)
    }

    // ========================
    // Creation
    // ========================

    /// Put a freshly created task at the front of its list
    pub fn insert_created(&mut self, task: Task) {
        self.list_mut(ListKind::for_completed(task.completed)).insert(0, task.id);
        self.index_subtasks(&task);
        self.tasks.insert(task.id, task);
    }

    /// Append a subtask to its task. False if the task is gone.
    pub fn append_subtask(&mut self, task_id: TaskId, subtask: Subtask) -> bool {
        let Some(task) = self.tasks.get_mut(&task_id) else {
            return false;
        };
        self.subtask_owner.insert(subtask.id, task_id);
        task.subtasks.push(subtask);
        true
    }

    // ========================
    // Toggle
    // ========================

    /// Flip a task's completion and move it: to the front of the completed
    /// list, or to the end of the active list.
    pub fn begin_task_toggle(&mut self, id: TaskId) -> Option<TaskToggle> {
        let (list, index) = self.locate(id)?;
        let task = self.tasks.get_mut(&id)?;
        task.completed = !task.completed;
        self.list_mut(list).remove(index);
        let ticket = TaskToggle { id, list, index };
        match ticket.destination() {
            ListKind::Completed => self.completed.insert(0, id),
            ListKind::Active => self.active.push(id),
        }
        Some(ticket)
    }

    /// Put a toggled task back in its original list, slot and state.
    /// If the task is currently deleted, the revert is applied when it is
    /// restored.
    pub fn rollback_task_toggle(&mut self, ticket: &TaskToggle) {
        let Some(task) = self.tasks.get_mut(&ticket.id) else {
            self.pending_reverts.insert(ticket.id, ticket.clone());
            return;
        };
        task.completed = ticket.list == ListKind::Completed;
        if let Some((list, index)) = self.locate(ticket.id) {
            self.list_mut(list).remove(index);
        }
        let original = self.list_mut(ticket.list);
        let index = ticket.index.min(original.len());
        original.insert(index, ticket.id);
    }

    pub fn begin_subtask_toggle(&mut self, id: SubtaskId) -> Option<SubtaskToggle> {
        let subtask = self.subtask_mut(id)?;
        let was_completed = subtask.completed;
        subtask.completed = !was_completed;
        Some(SubtaskToggle { id, was_completed })
    }

    pub fn rollback_subtask_toggle(&mut self, ticket: &SubtaskToggle) {
        if let Some(subtask) = self.subtask_mut(ticket.id) {
            subtask.completed = ticket.was_completed;
        }
    }

    // ========================
    // Delete
    // ========================

    pub fn remove_task(&mut self, id: TaskId) -> Option<RemovedTask> {
        let (list, index) = self.locate(id)?;
        self.list_mut(list).remove(index);
        let task = self.tasks.remove(&id)?;
        for subtask in &task.subtasks {
            self.subtask_owner.remove(&subtask.id);
        }
        Some(RemovedTask { task, list, index })
    }

    pub fn restore_task(&mut self, removed: RemovedTask) {
        let RemovedTask { mut task, mut list, mut index } = removed;
        if let Some(revert) = self.pending_reverts.remove(&task.id) {
            task.completed = revert.list == ListKind::Completed;
            list = revert.list;
            index = revert.index;
        }
        let ids = self.list_mut(list);
        let index = index.min(ids.len());
        ids.insert(index, task.id);
        self.index_subtasks(&task);
        self.tasks.insert(task.id, task);
    }

    /// Drop state kept for a task the server confirmed as deleted
    pub fn forget_task(&mut self, id: TaskId) {
        self.pending_reverts.remove(&id);
    }

    pub fn remove_subtask(&mut self, id: SubtaskId) -> Option<RemovedSubtask> {
        let task_id = *self.subtask_owner.get(&id)?;
        let task = self.tasks.get_mut(&task_id)?;
        let index = task.subtasks.iter().position(|s| s.id == id)?;
        let subtask = task.subtasks.remove(index);
        self.subtask_owner.remove(&id);
        Some(RemovedSubtask { subtask, task_id, index })
    }

    /// Re-insert a removed subtask. False if its task no longer exists.
    pub fn restore_subtask(&mut self, removed: RemovedSubtask) -> bool {
        let Some(task) = self.tasks.get_mut(&removed.task_id) else {
            return false;
        };
        let index = removed.index.min(task.subtasks.len());
        self.subtask_owner.insert(removed.subtask.id, removed.task_id);
        task.subtasks.insert(index, removed.subtask);
        true
    }

    // ========================
    // Rename / Reorder
    // ========================

    /// Apply a typed name. A blank name resets to "untitled" and must not
    /// reach the server.
    pub fn commit_rename(&mut self, target: EditTarget, raw: &str) -> Option<RenameCommit> {
        let trimmed = raw.trim();
        let name = match target {
            EditTarget::Task(id) => &mut self.tasks.get_mut(&id)?.name,
            EditTarget::Subtask(id) => &mut self.subtask_mut(id)?.name,
        };
        if trimmed.is_empty() {
            *name = UNTITLED.to_string();
            Some(RenameCommit::ResetUntitled)
        } else {
            *name = trimmed.to_string();
            Some(RenameCommit::Send(trimmed.to_string()))
        }
    }

    /// Move a task within its list and return the list's new order
    pub fn move_within(&mut self, kind: ListKind, from: usize, to: usize) -> Option<Vec<TaskId>> {
        let list = self.list_mut(kind);
        if !leptos_dragdrop::move_item(list, from, to) {
            return None;
        }
        Some(list.clone())
    }

    pub fn tab_of(&self, id: TaskId) -> Option<TabId> {
        self.tasks.get(&id).and_then(|t| t.tab_id)
    }
}
