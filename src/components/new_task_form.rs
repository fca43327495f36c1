//! New Task Form Component
//!
//! Creates an "untitled" task in the active tab and opens it for renaming.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::context::use_app_context;

#[component]
pub fn NewTaskForm() -> impl IntoView {
    let controller = use_app_context().controller;

    let create_task = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        spawn_local(controller.create_task());
    };

    view! {
        <form id="todo-form" class="new-task-form" on:submit=create_task>
            <button type="submit">"Add task"</button>
        </form>
    }
}
