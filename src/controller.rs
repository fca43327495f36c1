//! Task Controller
//!
//! Async operations behind every task, subtask and tab action. Toggles and
//! deletes are applied to the store first and reverted when the request
//! fails; creations only render once the server has assigned an id.

use std::collections::HashSet;

use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_dragdrop::DropMove;
use wasm_bindgen::JsValue;

use crate::board::{Board, ListKind, RenameCommit, SubtaskToggle, TaskToggle};
use crate::commands::{self, Api};
use crate::models::{display_name, EditTarget, Subtask, SubtaskId, Tab, Task, TaskId};
use crate::store::{AppStateStoreFields, AppStore};
use crate::tabs::{query_with_tab, tab_from_query, TabFilter};

/// Identity a toggle is serialized on
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ToggleKey {
    Task(TaskId),
    Subtask(SubtaskId),
}

/// Ids with a toggle in flight or cooling down
#[derive(Debug, Default)]
pub struct ToggleGuard {
    in_flight: HashSet<ToggleKey>,
}

impl ToggleGuard {
    /// False while a toggle for `key` is outstanding
    pub fn try_acquire(&mut self, key: ToggleKey) -> bool {
        self.in_flight.insert(key)
    }

    pub fn release(&mut self, key: ToggleKey) {
        self.in_flight.remove(&key);
    }

    #[cfg(test)]
    pub fn is_held(&self, key: ToggleKey) -> bool {
        self.in_flight.contains(&key)
    }
}

#[derive(Clone, Copy)]
pub struct TodoController {
    store: AppStore,
    api: StoredValue<Api>,
    guard: StoredValue<ToggleGuard>,
    cooldown_ms: u32,
}

impl TodoController {
    pub fn new(store: AppStore, api: Api, cooldown_ms: u32) -> Self {
        Self {
            store,
            api: StoredValue::new(api),
            guard: StoredValue::new(ToggleGuard::default()),
            cooldown_ms,
        }
    }

    fn api(self) -> Api {
        self.api.get_value()
    }

    /// Replace both lists with the server's snapshot
    pub async fn load(self) {
        match commands::fetch_tasks(&self.api()).await {
            Ok(todos) => {
                tracing::info!(count = todos.len(), "loaded tasks");
                self.store.board().set(Board::from_snapshot(todos));
            }
            Err(err) => tracing::error!(error = %err, "fetch_tasks failed"),
        }
    }

    // ========================
    // Create
    // ========================

    pub async fn create_task(self) {
        let tab_id = self.store.tabs().with_untracked(|t| t.active.tab_id());
        match commands::create_task(&self.api(), tab_id).await {
            Ok(created) => {
                tracing::info!(id = created.id, ?tab_id, "task created");
                let task = Task {
                    id: created.id,
                    name: display_name(&created.task).to_string(),
                    completed: created.completed,
                    tab_id,
                    subtasks: Vec::new(),
                };
                self.store.board().update(|b| b.insert_created(task));
                self.begin_rename(EditTarget::Task(created.id));
            }
            Err(err) => tracing::warn!(error = %err, "create task failed"),
        }
    }

    pub async fn create_subtask(self, task_id: TaskId) {
        match commands::create_subtask(&self.api(), task_id).await {
            Ok(created) => {
                let subtask = Subtask {
                    id: created.subtask_id,
                    name: display_name(&created.subtask).to_string(),
                    completed: false,
                };
                let mut added = false;
                self.store.board().update(|b| added = b.append_subtask(task_id, subtask));
                if added {
                    tracing::info!(task_id, id = created.subtask_id, "subtask created");
                    self.begin_rename(EditTarget::Subtask(created.subtask_id));
                }
            }
            Err(err) => tracing::warn!(task_id, error = %err, "create subtask failed"),
        }
    }

    // ========================
    // Toggle
    // ========================

    fn acquire(self, key: ToggleKey) -> bool {
        let mut acquired = false;
        self.guard.update_value(|g| acquired = g.try_acquire(key));
        acquired
    }

    fn release(self, key: ToggleKey) {
        self.guard.update_value(|g| g.release(key));
    }

    async fn release_after_cooldown(self, key: ToggleKey) {
        if self.cooldown_ms > 0 {
            TimeoutFuture::new(self.cooldown_ms).await;
        }
        self.release(key);
    }

    /// Take the guard for `id` and flip the task on the board.
    /// None while a toggle for `id` is outstanding or the task is unknown.
    fn start_task_toggle(self, id: TaskId) -> Option<TaskToggle> {
        let key = ToggleKey::Task(id);
        if !self.acquire(key) {
            tracing::debug!(id, "toggle already in flight");
            return None;
        }
        let mut ticket = None;
        self.store.board().update(|b| ticket = b.begin_task_toggle(id));
        if ticket.is_none() {
            self.release(key);
        }
        ticket
    }

    pub async fn toggle_task(self, id: TaskId) {
        let key = ToggleKey::Task(id);
        let Some(ticket) = self.start_task_toggle(id) else { return };

        match commands::toggle_task(&self.api(), id).await {
            Ok(completed) => {
                tracing::info!(id, completed, "task toggled");
                spawn_local(self.persist_after_toggle(ticket.destination()));
            }
            Err(err) => {
                tracing::warn!(id, error = %err, "toggle failed, reverting");
                self.store.board().update(|b| b.rollback_task_toggle(&ticket));
                commands::alert(&format!("Failed to update task: {err}"));
            }
        }
        self.release_after_cooldown(key).await;
    }

    // A failure here only alerts; the toggle itself already succeeded.
    async fn persist_after_toggle(self, kind: ListKind) {
        let order = self.store.board().with_untracked(|b| b.list(kind).to_vec());
        if let Err(err) = commands::update_task_order(&self.api(), &order).await {
            tracing::warn!(list = kind.key(), error = %err, "order after toggle not saved");
            commands::alert(&format!("Failed to save task order: {err}"));
        }
    }

    fn start_subtask_toggle(self, id: SubtaskId) -> Option<SubtaskToggle> {
        let key = ToggleKey::Subtask(id);
        if !self.acquire(key) {
            tracing::debug!(id, "subtask toggle already in flight");
            return None;
        }
        let mut ticket = None;
        self.store.board().update(|b| ticket = b.begin_subtask_toggle(id));
        if ticket.is_none() {
            self.release(key);
        }
        ticket
    }

    pub async fn toggle_subtask(self, id: SubtaskId) {
        let key = ToggleKey::Subtask(id);
        let Some(ticket) = self.start_subtask_toggle(id) else { return };

        match commands::toggle_subtask(&self.api(), id).await {
            Ok(completed) => tracing::info!(id, completed, "subtask toggled"),
            Err(err) => {
                tracing::warn!(id, error = %err, "subtask toggle failed, reverting");
                self.store.board().update(|b| b.rollback_subtask_toggle(&ticket));
                commands::alert(&format!("Failed to update subtask: {err}"));
            }
        }
        self.release_after_cooldown(key).await;
    }

    // ========================
    // Delete
    // ========================

    pub async fn delete_task(self, id: TaskId) {
        let mut removed = None;
        self.store.board().update(|b| removed = b.remove_task(id));
        let Some(removed) = removed else { return };

        if let Err(err) = commands::delete_task(&self.api(), id).await {
            tracing::warn!(id, error = %err, "delete failed, restoring");
            self.store.board().update(|b| b.restore_task(removed));
            commands::alert(&format!("Failed to delete task: {err}"));
        } else {
            tracing::info!(id, "task deleted");
            self.store.board().update(|b| b.forget_task(id));
        }
    }

    pub async fn delete_subtask(self, id: SubtaskId) {
        let mut removed = None;
        self.store.board().update(|b| removed = b.remove_subtask(id));
        let Some(removed) = removed else { return };

        if let Err(err) = commands::delete_subtask(&self.api(), id).await {
            tracing::warn!(id, error = %err, "subtask delete failed, restoring");
            let mut restored = false;
            self.store.board().update(|b| restored = b.restore_subtask(removed));
            if !restored {
                tracing::warn!(id, "owning task is gone, subtask not restored");
            }
            commands::alert(&format!("Failed to delete subtask: {err}"));
        } else {
            tracing::info!(id, "subtask deleted");
        }
    }

    // ========================
    // Rename
    // ========================

    pub fn begin_rename(self, target: EditTarget) {
        self.store.editing().set(Some(target));
    }

    /// Apply the typed name for `target` and send it in the background.
    ///
    /// Tasks leave rename mode right away. Subtasks leave it once the server
    /// accepts the name, or right away when the name was blank.
    pub fn commit_rename(self, target: EditTarget, raw: &str) -> Option<RenameCommit> {
        let commit = self.apply_rename(target, raw)?;
        if let RenameCommit::Send(name) = &commit {
            spawn_local(self.send_rename(target, name.clone()));
        }
        Some(commit)
    }

    /// Board and rename-mode half of a commit. Ignored unless `target` is
    /// the name in rename mode.
    fn apply_rename(self, target: EditTarget, raw: &str) -> Option<RenameCommit> {
        if self.store.editing().get_untracked() != Some(target) {
            return None;
        }
        let mut outcome = None;
        self.store.board().update(|b| outcome = b.commit_rename(target, raw));
        let Some(commit) = outcome else {
            self.store.editing().set(None);
            return None;
        };

        let awaits_server = matches!(
            (target, &commit),
            (EditTarget::Subtask(_), RenameCommit::Send(_))
        );
        if !awaits_server {
            self.store.editing().set(None);
        }
        Some(commit)
    }

    /// A subtask still in rename mode leaves it once its name is saved
    fn rename_saved(self, target: EditTarget) {
        let still_editing = self.store.editing().get_untracked() == Some(target);
        if matches!(target, EditTarget::Subtask(_)) && still_editing {
            self.store.editing().set(None);
        }
    }

    async fn send_rename(self, target: EditTarget, name: String) {
        let result = match target {
            EditTarget::Task(id) => commands::rename_task(&self.api(), id, &name).await,
            EditTarget::Subtask(id) => commands::rename_subtask(&self.api(), id, &name).await,
        };
        match result {
            Ok(()) => {
                tracing::info!(?target, "renamed");
                self.rename_saved(target);
            }
            Err(err) => tracing::warn!(?target, error = %err, "rename not saved"),
        }
    }

    // ========================
    // Reorder
    // ========================

    /// Apply a finished drag and persist the list's new order.
    /// A failed save is logged only; the list keeps the dropped order.
    pub async fn reorder(self, mv: DropMove) {
        let Some(kind) = ListKind::from_key(mv.list) else { return };
        let mut order = None;
        self.store.board().update(|b| {
            let from = b.list(kind).iter().position(|id| *id == mv.item_id);
            order = from.and_then(|from| b.move_within(kind, from, mv.to));
        });
        let Some(order) = order else { return };

        tracing::debug!(list = kind.key(), id = mv.item_id, to = mv.to, "persisting order");
        match commands::update_task_order(&self.api(), &order).await {
            Ok(()) => tracing::info!(list = kind.key(), "order updated"),
            Err(err) => tracing::error!(list = kind.key(), error = %err, "error updating order"),
        }
    }

    // ========================
    // Tabs
    // ========================

    pub fn select_tab(self, filter: TabFilter) {
        self.store.tabs().update(|t| t.activate(filter));
        sync_tab_query(filter);
    }

    /// Activate the tab named by the page's `tab` query parameter
    pub fn restore_tab_from_url(self) {
        let search = web_sys::window()
            .and_then(|win| win.location().search().ok())
            .unwrap_or_default();
        self.restore_tab(&search);
    }

    fn restore_tab(self, search: &str) {
        let wanted = tab_from_query(search);
        let filter = self
            .store
            .tabs()
            .with_untracked(|t| TabFilter::resolve(wanted.as_deref(), &t.tabs));
        self.store.tabs().update(|t| t.activate(filter));
    }

    pub async fn create_tab(self) {
        let Some(name) = commands::prompt("Enter tab name:") else { return };
        let name = name.trim().to_string();
        if name.is_empty() {
            return;
        }
        match commands::create_tab(&self.api(), &name).await {
            Ok(id) => {
                tracing::info!(id, name = %name, "tab created");
                sync_tab_query(self.tab_created(Tab { id, name }));
            }
            Err(err) => {
                tracing::warn!(error = %err, "create tab failed");
                commands::alert(&format!("Error creating tab: {err}"));
            }
        }
    }

    fn tab_created(self, tab: Tab) -> TabFilter {
        let filter = TabFilter::Tab(tab.id);
        self.store.tabs().update(|t| t.add_and_activate(tab));
        filter
    }
}

/// Rewrite the address bar's `tab` parameter without reloading
fn sync_tab_query(filter: TabFilter) {
    let Some(win) = web_sys::window() else { return };
    let location = win.location();
    let (Ok(path), Ok(search)) = (location.pathname(), location.search()) else {
        return;
    };
    let hash = location.hash().unwrap_or_default();
    let url = format!("{path}{}{hash}", query_with_tab(&search, &filter.query_value()));
    if let Ok(history) = win.history() {
        let _ = history.replace_state_with_url(&JsValue::NULL, "", Some(&url));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guard_rejects_reentrant_toggle() {
        let mut guard = ToggleGuard::default();
        let key = ToggleKey::Task(1);
        assert!(guard.try_acquire(key));
        for _ in 0..5 {
            assert!(!guard.try_acquire(key));
        }
        assert!(guard.is_held(key));
        guard.release(key);
        assert!(!guard.is_held(key));
        assert!(guard.try_acquire(key));
    }

    #[test]
    fn test_guard_ids_are_independent() {
        let mut guard = ToggleGuard::default();
        assert!(guard.try_acquire(ToggleKey::Task(1)));
        assert!(guard.try_acquire(ToggleKey::Task(2)));
        // subtask ids live in their own space
        assert!(guard.try_acquire(ToggleKey::Subtask(1)));
        guard.release(ToggleKey::Task(2));
        assert!(guard.is_held(ToggleKey::Task(1)));
        assert!(guard.is_held(ToggleKey::Subtask(1)));
    }

    // ========================
    // Controller (native store)
    // ========================

    use std::future::Future;
    use std::pin::pin;
    use std::task::{Context, Poll, Waker};

    use reactive_stores::Store;

    use crate::store::AppState;
    use crate::tabs::TabStrip;

    fn sample_state() -> AppState {
        let task = Task {
            id: 1,
            name: "Groceries".into(),
            completed: false,
            tab_id: None,
            subtasks: vec![Subtask {
                id: 10,
                name: "milk".into(),
                completed: false,
            }],
        };
        let tabs = TabStrip::new(vec![Tab { id: 7, name: "Work".into() }]);
        AppState {
            board: Board::from_snapshot(vec![task]),
            ..AppState::new(tabs)
        }
    }

    fn controller() -> TodoController {
        TodoController::new(Store::new(sample_state()), Api::default(), 0)
    }

    fn editing(c: TodoController) -> Option<EditTarget> {
        c.store.editing().get_untracked()
    }

    fn held(c: TodoController, key: ToggleKey) -> bool {
        c.guard.with_value(|g| g.is_held(key))
    }

    #[test]
    fn test_task_rename_leaves_rename_mode_at_once() {
        let owner = Owner::new();
        owner.set();
        let c = controller();
        let target = EditTarget::Task(1);

        c.begin_rename(target);
        assert_eq!(
            c.apply_rename(target, " Weekly shop "),
            Some(RenameCommit::Send("Weekly shop".into()))
        );
        assert_eq!(editing(c), None);
        assert_eq!(
            c.store.board().with_untracked(|b| b.name_of(target).map(str::to_owned)),
            Some("Weekly shop".into())
        );
    }

    #[test]
    fn test_subtask_rename_waits_for_save() {
        let owner = Owner::new();
        owner.set();
        let c = controller();
        let target = EditTarget::Subtask(10);

        c.begin_rename(target);
        assert_eq!(c.apply_rename(target, "oat milk"), Some(RenameCommit::Send("oat milk".into())));
        assert_eq!(editing(c), Some(target));

        c.rename_saved(target);
        assert_eq!(editing(c), None);
    }

    #[test]
    fn test_saved_subtask_does_not_end_other_rename() {
        let owner = Owner::new();
        owner.set();
        let c = controller();

        c.begin_rename(EditTarget::Subtask(10));
        assert!(c.apply_rename(EditTarget::Subtask(10), "oat milk").is_some());
        c.begin_rename(EditTarget::Task(1));
        c.rename_saved(EditTarget::Subtask(10));
        assert_eq!(editing(c), Some(EditTarget::Task(1)));
    }

    #[test]
    fn test_blank_rename_sends_nothing() {
        let owner = Owner::new();
        owner.set();
        let c = controller();

        for target in [EditTarget::Task(1), EditTarget::Subtask(10)] {
            c.begin_rename(target);
            assert_eq!(c.apply_rename(target, "  \n"), Some(RenameCommit::ResetUntitled));
            assert_eq!(editing(c), None);
            assert_eq!(
                c.store.board().with_untracked(|b| b.name_of(target).map(str::to_owned)),
                Some("untitled".into())
            );
        }
    }

    #[test]
    fn test_commit_outside_rename_mode_is_ignored() {
        let owner = Owner::new();
        owner.set();
        let c = controller();

        assert_eq!(c.apply_rename(EditTarget::Task(1), "x"), None);
        c.begin_rename(EditTarget::Subtask(10));
        assert_eq!(c.apply_rename(EditTarget::Task(1), "x"), None);
        assert_eq!(editing(c), Some(EditTarget::Subtask(10)));
        assert_eq!(
            c.store.board().with_untracked(|b| b.name_of(EditTarget::Task(1)).map(str::to_owned)),
            Some("Groceries".into())
        );
    }

    #[test]
    fn test_toggle_guard_held_until_released() {
        let owner = Owner::new();
        owner.set();
        let c = controller();
        let key = ToggleKey::Task(1);

        let ticket = c.start_task_toggle(1).unwrap();
        assert_eq!(ticket.destination(), ListKind::Completed);
        assert!(held(c, key));
        // re-entrant toggle leaves the board alone
        assert!(c.start_task_toggle(1).is_none());
        assert_eq!(c.store.board().with_untracked(|b| b.list(ListKind::Completed).to_vec()), vec![1]);

        let mut release = pin!(c.release_after_cooldown(key));
        let mut cx = Context::from_waker(Waker::noop());
        assert!(release.as_mut().poll(&mut cx).is_ready());
        assert!(!held(c, key));
        assert!(c.start_task_toggle(1).is_some());
    }

    #[test]
    fn test_toggle_of_unknown_id_frees_guard() {
        let owner = Owner::new();
        owner.set();
        let c = controller();

        assert!(c.start_task_toggle(99).is_none());
        assert!(!held(c, ToggleKey::Task(99)));
        assert!(c.start_subtask_toggle(10).is_some());
        assert!(held(c, ToggleKey::Subtask(10)));
        assert!(!held(c, ToggleKey::Task(10)));
    }

    #[test]
    fn test_created_tab_becomes_active_and_url_value() {
        let owner = Owner::new();
        owner.set();
        let c = controller();

        let filter = c.tab_created(Tab { id: 9, name: "Errands".into() });
        let active = c.store.tabs().with_untracked(|t| t.active);
        assert_eq!(active, filter);
        assert_eq!(active, TabFilter::Tab(9));
        assert_eq!(query_with_tab("?x=1", &active.query_value()), "?x=1&tab=9");
    }

    #[test]
    fn test_restore_tab_from_search() {
        let owner = Owner::new();
        owner.set();
        let c = controller();

        c.restore_tab("?tab=7");
        assert_eq!(c.store.tabs().with_untracked(|t| t.active), TabFilter::Tab(7));
        c.restore_tab("?tab=42");
        assert_eq!(c.store.tabs().with_untracked(|t| t.active), TabFilter::All);
    }
}
