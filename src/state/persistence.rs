//! Persisted snapshot of the stores.
//!
//! Only durable ids are written. Incognito tabs are never persisted, and
//! records lacking a uuid cannot be addressed after a restart so they are
//! skipped too.

use tracing::info;

use super::{tab_state, window_state};
use crate::types::errors::PersistenceError;
use crate::types::session::{PersistedState, PersistedTab, PersistedWindow};
use crate::types::state::AppState;
use crate::types::tab::TabRecord;
use crate::types::window::WindowRecord;

/// Builds the snapshot that should be written to disk.
pub fn persistent_state(state: &AppState) -> PersistedState {
    let tabs = state
        .tabs()
        .iter()
        .filter(|t| t.incognito != Some(true))
        .filter_map(|t| {
            Some(PersistedTab {
                uuid: t.uuid.clone()?,
                url: t.url.clone(),
                title: t.title.clone(),
                favicon_url: t.favicon_url.clone(),
                active: t.active.unwrap_or(false),
                pinned: t.pinned.unwrap_or(false),
                window_uuid: t.window_uuid.clone(),
                history: t.history.clone().unwrap_or_default(),
            })
        })
        .collect();

    let windows = state
        .windows()
        .iter()
        .filter_map(|w| {
            Some(PersistedWindow {
                window_uuid: w.window_uuid.clone()?,
                bounds: w.bounds,
                state: w.state,
            })
        })
        .collect();

    PersistedState { tabs, windows }
}

/// Re-adds persisted windows and tabs to `state` without live ids.
///
/// Records already present under the same uuid are merged rather than
/// duplicated.
pub fn restore_state(state: &AppState, persisted: PersistedState) -> AppState {
    let window_count = persisted.windows.len();
    let tab_count = persisted.tabs.len();

    let mut next = state.clone();
    for window in persisted.windows {
        next = window_state::upsert_window(
            &next,
            WindowRecord {
                window_uuid: Some(window.window_uuid),
                bounds: window.bounds,
                state: window.state,
                ..WindowRecord::default()
            },
        );
    }
    for tab in persisted.tabs {
        next = tab_state::upsert_tab(&next, restored_tab_record(tab));
    }

    info!(event = "state_restored", windows = window_count, tabs = tab_count);
    next
}

/// The store record for a persisted tab, before any live view exists.
pub fn restored_tab_record(tab: PersistedTab) -> TabRecord {
    TabRecord {
        uuid: Some(tab.uuid),
        url: tab.url,
        title: tab.title,
        favicon_url: tab.favicon_url,
        active: Some(tab.active),
        pinned: Some(tab.pinned),
        window_uuid: tab.window_uuid,
        history: Some(tab.history),
        ..TabRecord::default()
    }
}

pub fn to_json(persisted: &PersistedState) -> Result<String, PersistenceError> {
    serde_json::to_string_pretty(persisted)
        .map_err(|e| PersistenceError::SerializationError(e.to_string()))
}

pub fn from_json(json: &str) -> Result<PersistedState, PersistenceError> {
    serde_json::from_str(json).map_err(|e| PersistenceError::SerializationError(e.to_string()))
}
