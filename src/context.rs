//! Application Context
//!
//! Handles shared with every component via the Leptos Context API.

use leptos::prelude::*;
use leptos_dragdrop::SortableSignals;

use crate::controller::TodoController;

#[derive(Clone, Copy)]
pub struct AppContext {
    /// Task/subtask/tab operations
    pub controller: TodoController,
    /// Drag state shared by both task lists
    pub sortable: SortableSignals,
}

impl AppContext {
    pub fn new(controller: TodoController, sortable: SortableSignals) -> Self {
        Self { controller, sortable }
    }
}

pub fn use_app_context() -> AppContext {
    expect_context::<AppContext>()
}
