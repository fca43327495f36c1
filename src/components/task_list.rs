//! Task List Component
//!
//! One sortable list (active or completed). While a drag is active in this
//! list, a placeholder slot is rendered at the prospective drop position.

use leptos::prelude::*;
use leptos_dragdrop::{layout_slots, SortSlot};

use crate::board::ListKind;
use crate::components::TaskRow;
use crate::context::use_app_context;
use crate::store::{use_app_store, AppStateStoreFields};

#[component]
pub fn TaskList(kind: ListKind) -> impl IntoView {
    let store = use_app_store();
    let ctx = use_app_context();

    let order = Signal::derive(move || store.board().with(|b| b.list(kind).to_vec()));
    let slots = move || {
        let session = ctx.sortable.session_read.get();
        order.with(|ids| layout_slots(ids, session, kind.key()))
    };

    view! {
        <ul class=kind.class() data-sortable-list=kind.key()>
            <For
                each=slots
                key=|slot| *slot
                children=move |slot| match slot {
                    SortSlot::Item(id) => view! { <TaskRow id=id kind=kind order=order /> }.into_any(),
                    SortSlot::Placeholder => view! { <li class="placeholder"></li> }.into_any(),
                }
            />
        </ul>
    }
}
