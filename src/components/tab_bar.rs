//! Tab Bar Component
//!
//! Tab controls for filtering tasks, plus the "add tab" control.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::context::use_app_context;
use crate::store::{use_app_store, AppStateStoreFields};
use crate::tabs::TabFilter;

/// Tab bar component
#[component]
pub fn TabBar() -> impl IntoView {
    let store = use_app_store();
    let controller = use_app_context().controller;

    let tab_class = move |filter: TabFilter| {
        move || {
            if store.tabs().with(|t| t.is_active(filter)) {
                "tab active"
            } else {
                "tab"
            }
        }
    };

    view! {
        <div class="tab-bar">
            <button
                class=tab_class(TabFilter::All)
                data-tab-id=TabFilter::All.query_value()
                on:click=move |_| controller.select_tab(TabFilter::All)
            >
                "All"
            </button>

            <For
                each=move || store.tabs().with(|t| t.tabs.clone())
                key=|tab| tab.id
                children=move |tab| {
                    let filter = TabFilter::Tab(tab.id);
                    view! {
                        <button
                            class=tab_class(filter)
                            data-tab-id=filter.query_value()
                            on:click=move |_| controller.select_tab(filter)
                        >
                            {tab.name}
                        </button>
                    }
                }
            />

            // New tabs are appended above, so this stays last
            <button
                class="add-tab"
                on:click=move |_| spawn_local(controller.create_tab())
            >
                "+"
            </button>
        </div>
    }
}
