//! Subtask Row Component

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::components::EditableName;
use crate::context::use_app_context;
use crate::models::{toggle_icon, EditTarget, SubtaskId};
use crate::store::{use_app_store, AppStateStoreFields};

#[component]
pub fn SubtaskRow(id: SubtaskId) -> impl IntoView {
    let store = use_app_store();
    let controller = use_app_context().controller;

    let completed = move || {
        store
            .board()
            .with(|b| b.subtask(id).map(|s| s.completed).unwrap_or(false))
    };

    view! {
        <li
            class=move || if completed() { "subtask-item completed" } else { "subtask-item" }
            data-subtask-id=id.to_string()
        >
            <button class="toggle-subtask" on:click=move |_| spawn_local(controller.toggle_subtask(id))>
                {move || toggle_icon(completed())}
            </button>
            <EditableName target=EditTarget::Subtask(id) name_class="subtask-name" />
            <button class="delete-subtask" on:click=move |_| spawn_local(controller.delete_subtask(id))>
                "🗑️"
            </button>
        </li>
    }
}
