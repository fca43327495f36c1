//! To-do Frontend App
//!
//! Tab bar on top, then the active and completed task lists.

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_dragdrop::{bind_global_handlers, create_sortable_signals};
use reactive_stores::Store;

use crate::board::ListKind;
use crate::commands::Api;
use crate::components::{NewTaskForm, TabBar, TaskList};
use crate::config::ClientConfig;
use crate::context::AppContext;
use crate::controller::TodoController;
use crate::store::{AppState, AppStateStoreFields};
use crate::tabs::TabStrip;

#[component]
pub fn App() -> impl IntoView {
    let config = ClientConfig::load();
    let store = Store::new(AppState::new(TabStrip::new(config.tabs.clone())));
    provide_context(store);

    let api = Api::new(&config.api_base);
    let controller = TodoController::new(store, api, config.toggle_cooldown_ms);
    let sortable = create_sortable_signals();
    provide_context(AppContext::new(controller, sortable));

    controller.restore_tab_from_url();

    bind_global_handlers(
        sortable,
        config.scroll(),
        move |list| {
            ListKind::from_key(list)
                .map(|kind| store.board().with_untracked(|b| b.list(kind).to_vec()))
                .unwrap_or_default()
        },
        move |mv| {
            tracing::debug!(list = mv.list, id = mv.item_id, from = mv.from, to = mv.to, "drop");
            spawn_local(controller.reorder(mv));
        },
    );

    // Initial load
    Effect::new(move |_| {
        spawn_local(controller.load());
    });

    view! {
        <div class="todo-app">
            <TabBar />

            <NewTaskForm />

            <h2>"Tasks"</h2>
            <TaskList kind=ListKind::Active />

            <h2>"Completed"</h2>
            <TaskList kind=ListKind::Completed />
        </div>
    }
}
