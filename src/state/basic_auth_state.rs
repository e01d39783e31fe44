//! Basic-auth challenge bookkeeping on tab records.

use super::tab_state;
use crate::types::identity::TabId;
use crate::types::state::AppState;
use crate::types::tab::{LoginRequiredDetail, TabPatch};

/// Records the pending challenge for a tab, replacing any earlier one.
///
/// An absent or empty detail clears the challenge. Unknown tabs are a no-op.
pub fn set_login_required_detail(
    state: &AppState,
    tab_id: TabId,
    detail: Option<LoginRequiredDetail>,
) -> AppState {
    if tab_state::get_by_tab_id(state, tab_id).is_none() {
        return state.clone();
    }
    let cleared = clear_detail(state, tab_id);
    match detail.filter(|d| !d.is_empty()) {
        Some(detail) => tab_state::update_tab(
            &cleared,
            TabPatch {
                login_required_detail: Some(Some(detail)),
                ..TabPatch::for_tab(tab_id)
            },
        ),
        None => cleared,
    }
}

pub fn get_login_required_detail(state: &AppState, tab_id: TabId) -> Option<&LoginRequiredDetail> {
    tab_state::get_by_tab_id(state, tab_id).and_then(|t| t.login_required_detail.as_ref())
}

/// The challenge was answered; drops it from the tab.
pub fn set_login_response_detail(state: &AppState, tab_id: TabId) -> AppState {
    clear_detail(state, tab_id)
}

fn clear_detail(state: &AppState, tab_id: TabId) -> AppState {
    tab_state::update_tab(
        state,
        TabPatch {
            login_required_detail: Some(None),
            ..TabPatch::for_tab(tab_id)
        },
    )
}
