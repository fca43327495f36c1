//! Client Configuration
//!
//! Read once at start-up from the `window.__TODO_CONFIG__` object the page
//! template emits. Every field is optional.

use leptos_dragdrop::ScrollConfig;
use serde::Deserialize;

use crate::models::Tab;

/// Global the server template may define
const CONFIG_GLOBAL: &str = "__TODO_CONFIG__";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ClientConfig {
    /// Prefix for every endpoint path
    pub api_base: String,
    /// Tabs that already exist for the user
    pub tabs: Vec<Tab>,
    pub scroll_margin: f64,
    pub scroll_step: f64,
    /// Delay after a toggle settles before the same id may toggle again
    pub toggle_cooldown_ms: u32,
}

impl Default for ClientConfig {
    fn default() -> Self {
        let scroll = ScrollConfig::default();
        Self {
            api_base: String::new(),
            tabs: Vec::new(),
            scroll_margin: scroll.margin,
            scroll_step: scroll.step,
            toggle_cooldown_ms: 200,
        }
    }
}

impl ClientConfig {
    pub fn load() -> Self {
        let Some(win) = web_sys::window() else {
            return Self::default();
        };
        let raw = match js_sys::Reflect::get(&win, &CONFIG_GLOBAL.into()) {
            Ok(raw) if !raw.is_undefined() && !raw.is_null() => raw,
            _ => return Self::default(),
        };
        match serde_wasm_bindgen::from_value(raw) {
            Ok(config) => config,
            Err(err) => {
                tracing::warn!(error = %err, "ignoring malformed {CONFIG_GLOBAL}");
                Self::default()
            }
        }
    }

    pub fn scroll(&self) -> ScrollConfig {
        ScrollConfig {
            margin: self.scroll_margin,
            step: self.scroll_step,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_partial_config_keeps_defaults() {
        let config: ClientConfig = serde_json::from_value(json!({
            "apiBase": "/todo",
            "tabs": [{ "id": 7, "name": "Work" }]
        }))
        .unwrap();
        assert_eq!(config.api_base, "/todo");
        assert_eq!(config.tabs, vec![Tab { id: 7, name: "Work".into() }]);
        assert_eq!(config.scroll_margin, 50.0);
        assert_eq!(config.scroll_step, 5.0);
        assert_eq!(config.toggle_cooldown_ms, 200);
    }

    #[test]
    fn test_empty_config_is_default() {
        let config: ClientConfig = serde_json::from_value(json!({})).unwrap();
        assert_eq!(config, ClientConfig::default());
        assert_eq!(config.scroll(), ScrollConfig::default());
    }
}
