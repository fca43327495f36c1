//! UI Components
//!
//! Leptos components for the tab bar and the task lists.

mod tab_bar;
mod new_task_form;
mod task_list;
mod task_row;
mod subtask_row;
mod editable_name;

pub use tab_bar::TabBar;
pub use new_task_form::NewTaskForm;
pub use task_list::TaskList;
pub use task_row::TaskRow;
pub use subtask_row::SubtaskRow;
pub use editable_name::EditableName;
