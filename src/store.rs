//! Global Application State Store
//!
//! Uses Leptos reactive_stores for fine-grained reactivity.

use leptos::prelude::*;
use reactive_stores::Store;

use crate::board::Board;
use crate::models::EditTarget;
use crate::tabs::TabStrip;

/// Global application state with field-level reactivity
#[derive(Clone, Debug, Default, Store)]
pub struct AppState {
    /// Active and completed tasks with their subtasks
    pub board: Board,
    /// Known tabs and the active filter
    pub tabs: TabStrip,
    /// Name currently in rename mode
    pub editing: Option<EditTarget>,
}

impl AppState {
    pub fn new(tabs: TabStrip) -> Self {
        Self {
            tabs,
            ..Default::default()
        }
    }
}

/// Type alias for the store
pub type AppStore = Store<AppState>;

/// Get the app store from context
pub fn use_app_store() -> AppStore {
    expect_context::<AppStore>()
}
