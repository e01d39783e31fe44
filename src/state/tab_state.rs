//! Tab Store.
//!
//! Ordered tab collection with lookups by live `TabId`, durable uuid and
//! window. Collection order is display order; updates never move a record.
//!
//! Writes recompute `window_uuid` from the record's `window_id` through the
//! Window Store. Window-side uuid changes are not pushed to tabs, so the
//! derived value can lag until the tab's next write.

use tracing::debug;

use super::window_state;
use crate::types::identity::{TabId, WindowId};
use crate::types::state::AppState;
use crate::types::tab::{TabPatch, TabRecord};
use crate::types::window::WindowRecord;

pub fn tab_index_by_tab_id(state: &AppState, tab_id: TabId) -> Option<usize> {
    state.tabs().iter().position(|t| t.tab_id == Some(tab_id))
}

pub fn tab_index_by_tab_uuid(state: &AppState, uuid: &str) -> Option<usize> {
    state
        .tabs()
        .iter()
        .position(|t| t.uuid.as_deref() == Some(uuid))
}

/// Appends a tab. Duplicate ids are not checked.
pub fn insert_tab(state: &AppState, mut tab: TabRecord) -> AppState {
    sync_window_uuid(state, &mut tab);
    debug!(event = "tab_inserted", tab_id = ?tab.tab_id, uuid = ?tab.uuid);
    state.with_tabs(|tabs| tabs.push(tab))
}

/// Merges `patch` into the tab with the same live id, keeping its position.
///
/// No-op when the patch carries no id or no record has it.
pub fn update_tab(state: &AppState, patch: TabPatch) -> AppState {
    match patch.tab_id.and_then(|id| tab_index_by_tab_id(state, id)) {
        Some(index) => merge_at(state, index, patch),
        None => state.clone(),
    }
}

/// Updates the tab matching `tab.tab_id`, or failing that `tab.uuid`;
/// inserts it when neither matches.
///
/// The live id wins because it is authoritative within this process; the
/// uuid covers records that have not been assigned a live id yet. A uuid
/// match takes over the incoming live id.
pub fn upsert_tab(state: &AppState, tab: TabRecord) -> AppState {
    let index = tab
        .tab_id
        .and_then(|id| tab_index_by_tab_id(state, id))
        .or_else(|| {
            tab.uuid
                .as_deref()
                .and_then(|uuid| tab_index_by_tab_uuid(state, uuid))
        });
    match index {
        Some(index) => merge_at(state, index, tab.into()),
        None => insert_tab(state, tab),
    }
}

fn merge_at(state: &AppState, index: usize, patch: TabPatch) -> AppState {
    let mut merged = state.tabs()[index].clone();
    merged.apply(patch);
    sync_window_uuid(state, &mut merged);
    if merged == state.tabs()[index] {
        return state.clone();
    }
    state.with_tabs(|tabs| tabs[index] = merged)
}

fn sync_window_uuid(state: &AppState, tab: &mut TabRecord) {
    if let Some(window_id) = tab.window_id {
        tab.window_uuid = window_state::window_uuid_for_window_id(state, window_id);
    }
}

pub fn remove_tab_by_tab_id(state: &AppState, tab_id: TabId) -> AppState {
    match tab_index_by_tab_id(state, tab_id) {
        Some(index) => remove_tab_by_index(state, index),
        None => state.clone(),
    }
}

/// Removes the tab at `index`; out-of-range indices are a no-op.
pub fn remove_tab_by_index(state: &AppState, index: usize) -> AppState {
    if index >= state.tabs().len() {
        return state.clone();
    }
    state.with_tabs(|tabs| {
        tabs.remove(index);
    })
}

/// The stored tab, or a placeholder holding only `tab_id`.
pub fn get_or_create_by_tab_id(state: &AppState, tab_id: TabId) -> TabRecord {
    get_by_tab_id(state, tab_id)
        .cloned()
        .unwrap_or_else(|| TabRecord::placeholder(tab_id))
}

pub fn get_by_tab_id(state: &AppState, tab_id: TabId) -> Option<&TabRecord> {
    state.tabs().iter().find(|t| t.tab_id == Some(tab_id))
}

pub fn get_by_tab_uuid<'a>(state: &'a AppState, uuid: &str) -> Option<&'a TabRecord> {
    state.tabs().iter().find(|t| t.uuid.as_deref() == Some(uuid))
}

/// First tab in the window with live id `window_id`.
pub fn get_by_window_id(state: &AppState, window_id: WindowId) -> Option<&TabRecord> {
    state.tabs().iter().find(|t| t.window_id == Some(window_id))
}

/// First tab in the window with durable id `window_uuid`.
pub fn get_by_window_uuid<'a>(state: &'a AppState, window_uuid: &str) -> Option<&'a TabRecord> {
    state
        .tabs()
        .iter()
        .find(|t| t.window_uuid.as_deref() == Some(window_uuid))
}

pub fn get_tabs_by_window_id(state: &AppState, window_id: WindowId) -> Vec<&TabRecord> {
    state
        .tabs()
        .iter()
        .filter(|t| t.window_id == Some(window_id))
        .collect()
}

pub fn get_tabs_by_window_uuid<'a>(state: &'a AppState, window_uuid: &str) -> Vec<&'a TabRecord> {
    state
        .tabs()
        .iter()
        .filter(|t| t.window_uuid.as_deref() == Some(window_uuid))
        .collect()
}

/// Tabs matching either of the window's ids.
pub fn get_tabs_for_window<'a>(state: &'a AppState, window: &WindowRecord) -> Vec<&'a TabRecord> {
    state
        .tabs()
        .iter()
        .filter(|t| {
            (window.window_id.is_some() && t.window_id == window.window_id)
                || (window.window_uuid.is_some() && t.window_uuid == window.window_uuid)
        })
        .collect()
}

pub fn get_tabs(state: &AppState) -> &[TabRecord] {
    state.tabs()
}

/// Replaces the whole tab collection.
pub fn set_tabs(state: &AppState, tabs: Vec<TabRecord>) -> AppState {
    state.with_tabs(|current| *current = tabs)
}
