//! Tab Strip
//!
//! Tab filtering and the shareable `tab` query parameter.

use url::form_urlencoded;

use crate::models::{Tab, TabId};

/// Query parameter holding the active tab
pub const TAB_PARAM: &str = "tab";
/// Query value of the tab that matches every task
pub const ALL_TABS: &str = "all";

/// Which tasks are displayed
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum TabFilter {
    #[default]
    All,
    Tab(TabId),
}

impl TabFilter {
    pub fn matches(self, tab_id: Option<TabId>) -> bool {
        match self {
            TabFilter::All => true,
            TabFilter::Tab(id) => tab_id == Some(id),
        }
    }

    /// Tab a newly created task is filed under
    pub fn tab_id(self) -> Option<TabId> {
        match self {
            TabFilter::All => None,
            TabFilter::Tab(id) => Some(id),
        }
    }

    pub fn query_value(self) -> String {
        match self {
            TabFilter::All => ALL_TABS.to_string(),
            TabFilter::Tab(id) => id.to_string(),
        }
    }

    /// Resolve a query value against known tabs, comparing ids as strings.
    /// Anything unmatched falls back to "all".
    pub fn resolve(value: Option<&str>, tabs: &[Tab]) -> Self {
        value
            .and_then(|v| tabs.iter().find(|tab| tab.id.to_string() == v))
            .map(|tab| TabFilter::Tab(tab.id))
            .unwrap_or_default()
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct TabStrip {
    pub tabs: Vec<Tab>,
    pub active: TabFilter,
}

impl TabStrip {
    pub fn new(tabs: Vec<Tab>) -> Self {
        Self {
            tabs,
            active: TabFilter::All,
        }
    }

    pub fn is_active(&self, filter: TabFilter) -> bool {
        self.active == filter
    }

    pub fn activate(&mut self, filter: TabFilter) {
        self.active = filter;
    }

    /// Append a created tab and make it the active one
    pub fn add_and_activate(&mut self, tab: Tab) {
        let filter = TabFilter::Tab(tab.id);
        if !self.tabs.iter().any(|t| t.id == tab.id) {
            self.tabs.push(tab);
        }
        self.activate(filter);
    }
}

// ========================
// Query String
// ========================

/// Value of the `tab` parameter in a `?a=b&c=d` search string
pub fn tab_from_query(search: &str) -> Option<String> {
    form_urlencoded::parse(search.trim_start_matches('?').as_bytes())
        .find(|(key, _)| *key == TAB_PARAM)
        .map(|(_, value)| value.into_owned())
}

/// Search string with the `tab` parameter set to `value`, other
/// parameters kept in place.
pub fn query_with_tab(search: &str, value: &str) -> String {
    let mut replaced = false;
    let mut serializer = form_urlencoded::Serializer::new(String::new());
    for (key, current) in form_urlencoded::parse(search.trim_start_matches('?').as_bytes()) {
        if key != TAB_PARAM {
            serializer.append_pair(&key, &current);
        } else if !replaced {
            serializer.append_pair(TAB_PARAM, value);
            replaced = true;
        }
    }
    if !replaced {
        serializer.append_pair(TAB_PARAM, value);
    }
    format!("?{}", serializer.finish())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tabs() -> Vec<Tab> {
        vec![
            Tab { id: 3, name: "Home".into() },
            Tab { id: 7, name: "Work".into() },
        ]
    }

    #[test]
    fn test_filter_all_matches_everything() {
        assert!(TabFilter::All.matches(None));
        assert!(TabFilter::All.matches(Some(3)));
        assert!(TabFilter::Tab(3).matches(Some(3)));
        assert!(!TabFilter::Tab(3).matches(None));
        assert!(!TabFilter::Tab(3).matches(Some(7)));
    }

    #[test]
    fn test_filtering_twice_is_filtering_once() {
        let tab_ids = [Some(3), None, Some(7), Some(3), None];
        let mut strip = TabStrip::new(tabs());
        strip.activate(TabFilter::Tab(3));
        let once: Vec<bool> = tab_ids.iter().map(|t| strip.active.matches(*t)).collect();
        strip.activate(strip.active);
        let twice: Vec<bool> = tab_ids.iter().map(|t| strip.active.matches(*t)).collect();
        assert_eq!(once, twice);
        assert_eq!(once, vec![true, false, false, true, false]);
    }

    #[test]
    fn test_resolve_falls_back_to_all() {
        assert_eq!(TabFilter::resolve(Some("7"), &tabs()), TabFilter::Tab(7));
        assert_eq!(TabFilter::resolve(Some("9"), &tabs()), TabFilter::All);
        assert_eq!(TabFilter::resolve(Some("all"), &tabs()), TabFilter::All);
        assert_eq!(TabFilter::resolve(None, &tabs()), TabFilter::All);
    }

    #[test]
    fn test_created_tab_becomes_active() {
        let mut strip = TabStrip::new(tabs());
        strip.add_and_activate(Tab { id: 9, name: "Errands".into() });
        assert_eq!(strip.tabs.last().map(|t| t.name.as_str()), Some("Errands"));
        assert!(strip.is_active(TabFilter::Tab(9)));
        assert!(!strip.is_active(TabFilter::Tab(3)));
        assert_eq!(strip.active.query_value(), "9");
    }

    #[test]
    fn test_tab_from_query() {
        assert_eq!(tab_from_query("?tab=7"), Some("7".into()));
        assert_eq!(tab_from_query("?x=1&tab=all&y=2"), Some("all".into()));
        assert_eq!(tab_from_query("?tab=a%20b"), Some("a b".into()));
        assert_eq!(tab_from_query("?tab=a+b"), Some("a b".into()));
        assert_eq!(tab_from_query(""), None);
        assert_eq!(tab_from_query("?x=1"), None);
    }

    #[test]
    fn test_query_with_tab_replaces_or_appends() {
        assert_eq!(query_with_tab("", "7"), "?tab=7");
        assert_eq!(query_with_tab("?tab=3", "7"), "?tab=7");
        assert_eq!(query_with_tab("?x=1&tab=3&y=2", "all"), "?x=1&tab=all&y=2");
        assert_eq!(query_with_tab("?x=1", "7"), "?x=1&tab=7");
        assert_eq!(query_with_tab("?tab=1&tab=2", "7"), "?tab=7");
        assert_eq!(query_with_tab("?q=a%20b", "all"), "?q=a+b&tab=all");
    }
}
