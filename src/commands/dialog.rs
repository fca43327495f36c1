//! Browser Dialogs
//!
//! Blocking notices and prompts shown to the user.

/// Show a blocking notice
pub fn alert(message: &str) {
    if let Some(win) = web_sys::window() {
        let _ = win.alert_with_message(message);
    }
}

/// Ask for a line of text. None when cancelled.
pub fn prompt(message: &str) -> Option<String> {
    web_sys::window()?.prompt_with_message(message).ok().flatten()
}
