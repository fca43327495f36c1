//! Task Row Component
//!
//! One draggable task with its subtasks.

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_dragdrop::{is_dragging, make_on_mousedown};

use crate::board::ListKind;
use crate::components::{EditableName, SubtaskRow};
use crate::context::use_app_context;
use crate::models::{toggle_icon, EditTarget, TaskId};
use crate::store::{use_app_store, AppStateStoreFields};

#[component]
pub fn TaskRow(id: TaskId, kind: ListKind, order: Signal<Vec<TaskId>>) -> impl IntoView {
    let store = use_app_store();
    let ctx = use_app_context();
    let controller = ctx.controller;

    let completed = move || {
        store
            .board()
            .with(|b| b.task(id).map(|t| t.completed).unwrap_or(false))
    };
    let tab_attr = move || {
        store
            .board()
            .with(|b| b.tab_of(id))
            .map(|tab| tab.to_string())
            .unwrap_or_default()
    };
    // Hidden rows stay in the list so a saved order still covers them
    let visible = move || {
        let filter = store.tabs().with(|t| t.active);
        store.board().with(|b| b.is_visible(id, filter))
    };
    let subtask_ids = move || store.board().with(|b| b.subtask_ids(id));

    let on_mousedown = make_on_mousedown(ctx.sortable, kind.key(), id, order);

    let row_class = move || {
        let mut c = String::from("task-item draggable");
        if completed() {
            c.push_str(" completed");
        }
        if is_dragging(ctx.sortable, id) {
            c.push_str(" drag");
        }
        c
    };

    view! {
        <li
            class=row_class
            data-sortable-id=id.to_string()
            data-task-id=id.to_string()
            data-tab-id=tab_attr
            style:display=move || if visible() { "" } else { "none" }
            on:mousedown=on_mousedown
        >
            <div class="task-wrapper">
                <div class="main-taskbar">
                    <span class="drag-handle" data-drag-handle="">"⋮⋮"</span>
                    <button class="toggle-task" on:click=move |_| spawn_local(controller.toggle_task(id))>
                        {move || toggle_icon(completed())}
                    </button>
                    <EditableName target=EditTarget::Task(id) name_class="task-name" />
                    <div class="options">
                        <button class="add-subtask" on:click=move |_| spawn_local(controller.create_subtask(id))>
                            "➕"
                        </button>
                        <button class="delete-task" on:click=move |_| spawn_local(controller.delete_task(id))>
                            "🗑️"
                        </button>
                    </div>
                </div>
                <ul class="subtasks">
                    <For
                        each=subtask_ids
                        key=|sid| *sid
                        children=move |sid| view! { <SubtaskRow id=sid /> }
                    />
                </ul>
            </div>
        </li>
    }
}
