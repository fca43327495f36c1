//! Editable Name Component
//!
//! Task/subtask name that turns content-editable in rename mode.
//! Blur commits; Enter commits without inserting a newline.

use leptos::html::Span;
use leptos::prelude::*;

use crate::board::RenameCommit;
use crate::context::use_app_context;
use crate::models::{display_name, EditTarget, UNTITLED};
use crate::store::{use_app_store, AppStateStoreFields};

#[component]
pub fn EditableName(target: EditTarget, name_class: &'static str) -> impl IntoView {
    let store = use_app_store();
    let controller = use_app_context().controller;
    let node = NodeRef::<Span>::new();

    // Memo so typing is not clobbered by unrelated board updates
    let name = Memo::new(move |_| {
        store
            .board()
            .with(|b| b.name_of(target).map(|n| display_name(n).to_string()))
            .unwrap_or_default()
    });
    let editing = move || store.editing().with(|e| *e == Some(target));

    // Focus on entering rename mode
    Effect::new(move |_| {
        if editing() {
            if let Some(el) = node.get() {
                let _ = el.focus();
            }
        }
    });

    let commit = move || {
        let Some(el) = node.get_untracked() else { return };
        let raw = el.inner_text();
        // The name may already read "untitled", so the memo would not fire
        if let Some(RenameCommit::ResetUntitled) = controller.commit_rename(target, &raw) {
            el.set_inner_text(UNTITLED);
        }
    };

    view! {
        <span
            class=name_class
            node_ref=node
            contenteditable=move || if editing() { "true" } else { "false" }
            prop:textContent=move || name.get()
            on:click=move |_| {
                if !editing() {
                    controller.begin_rename(target);
                }
            }
            on:blur=move |_| commit()
            on:keydown=move |ev: web_sys::KeyboardEvent| {
                if ev.key() == "Enter" {
                    ev.prevent_default();
                    if let Some(el) = node.get_untracked() {
                        let _ = el.blur();
                    }
                }
            }
        ></span>
    }
}
