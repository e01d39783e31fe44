//! Window Store.
//!
//! Ordered window collection resolved by live `WindowId` or durable uuid.

use tracing::debug;

use crate::types::identity::{generate_uuid, WindowId};
use crate::types::state::AppState;
use crate::types::window::WindowRecord;

/// Appends a window, generating a uuid when it has none.
pub fn add_window(state: &AppState, mut window: WindowRecord) -> AppState {
    if window.window_uuid.is_none() {
        window.window_uuid = Some(generate_uuid());
    }
    debug!(event = "window_added", window_id = ?window.window_id, window_uuid = ?window.window_uuid);
    state.with_windows(|windows| windows.push(window))
}

/// Updates the window matching `window.window_id`, falling back to its uuid,
/// or adds it when neither matches.
pub fn upsert_window(state: &AppState, window: WindowRecord) -> AppState {
    let index = window
        .window_id
        .and_then(|id| window_index_by_window_id(state, id))
        .or_else(|| {
            window
                .window_uuid
                .as_deref()
                .and_then(|uuid| window_index_by_window_uuid(state, uuid))
        });
    match index {
        Some(index) => merge_at(state, index, window),
        None => add_window(state, window),
    }
}

/// Merges `window` into the stored record with the same live id, in place.
///
/// No-op when no record has that id.
pub fn update_window(state: &AppState, window: WindowRecord) -> AppState {
    match window
        .window_id
        .and_then(|id| window_index_by_window_id(state, id))
    {
        Some(index) => merge_at(state, index, window),
        None => state.clone(),
    }
}

fn merge_at(state: &AppState, index: usize, window: WindowRecord) -> AppState {
    state.with_windows(|windows| windows[index].apply(window))
}

pub fn remove_window_by_window_id(state: &AppState, window_id: WindowId) -> AppState {
    match window_index_by_window_id(state, window_id) {
        Some(index) => remove_window_by_index(state, index),
        None => state.clone(),
    }
}

/// Removes the window at `index`; out-of-range indices are a no-op.
pub fn remove_window_by_index(state: &AppState, index: usize) -> AppState {
    if index >= state.windows().len() {
        return state.clone();
    }
    state.with_windows(|windows| {
        windows.remove(index);
    })
}

pub fn get_by_window_id(state: &AppState, window_id: WindowId) -> Option<&WindowRecord> {
    state
        .windows()
        .iter()
        .find(|w| w.window_id == Some(window_id))
}

pub fn get_by_window_uuid<'a>(state: &'a AppState, window_uuid: &str) -> Option<&'a WindowRecord> {
    state
        .windows()
        .iter()
        .find(|w| w.window_uuid.as_deref() == Some(window_uuid))
}

pub fn window_index_by_window_id(state: &AppState, window_id: WindowId) -> Option<usize> {
    state
        .windows()
        .iter()
        .position(|w| w.window_id == Some(window_id))
}

pub fn window_index_by_window_uuid(state: &AppState, window_uuid: &str) -> Option<usize> {
    state
        .windows()
        .iter()
        .position(|w| w.window_uuid.as_deref() == Some(window_uuid))
}

/// The durable id of the window currently holding `window_id`.
pub fn window_uuid_for_window_id(state: &AppState, window_id: WindowId) -> Option<String> {
    get_by_window_id(state, window_id).and_then(|w| w.window_uuid.clone())
}

pub fn get_windows(state: &AppState) -> &[WindowRecord] {
    state.windows()
}
