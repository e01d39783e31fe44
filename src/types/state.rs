use std::sync::Arc;

use super::tab::TabRecord;
use super::window::WindowRecord;

/// Immutable snapshot of the tab and window collections.
///
/// Cloning is cheap. Store operations take a snapshot by reference and
/// return a new one; untouched collections stay shared between the two.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppState {
    tabs: Arc<Vec<TabRecord>>,
    windows: Arc<Vec<WindowRecord>>,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_parts(tabs: Vec<TabRecord>, windows: Vec<WindowRecord>) -> Self {
        Self {
            tabs: Arc::new(tabs),
            windows: Arc::new(windows),
        }
    }

    /// Tabs in display order.
    pub fn tabs(&self) -> &[TabRecord] {
        &self.tabs
    }

    /// Windows in insertion order.
    pub fn windows(&self) -> &[WindowRecord] {
        &self.windows
    }

    /// Returns a copy of this snapshot with the tab collection edited by `f`.
    pub fn with_tabs(&self, f: impl FnOnce(&mut Vec<TabRecord>)) -> Self {
        let mut next = self.clone();
        f(Arc::make_mut(&mut next.tabs));
        next
    }

    /// Returns a copy of this snapshot with the window collection edited by `f`.
    pub fn with_windows(&self, f: impl FnOnce(&mut Vec<WindowRecord>)) -> Self {
        let mut next = self.clone();
        f(Arc::make_mut(&mut next.windows));
        next
    }

    /// True when both snapshots share the same tab collection allocation.
    pub fn shares_tabs_with(&self, other: &AppState) -> bool {
        Arc::ptr_eq(&self.tabs, &other.tabs)
    }
}
