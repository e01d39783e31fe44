//! Application actions and the store reducer.
//!
//! Actions are record-shaped so they can arrive from any transport. Most of
//! them are pure store writes handled by [`reduce`]; the ones that must talk
//! to the content host (`NewTab`, `CloseTab`, `SetAudioMuted`) are routed by
//! `App` to the tab actions instead.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::state::{basic_auth_state, tab_state, window_state};
use crate::types::create::CreateProperties;
use crate::types::identity::{TabId, WindowId};
use crate::types::state::AppState;
use crate::types::tab::{LoginRequiredDetail, TabRecord};
use crate::types::window::WindowRecord;

/// Frame properties as sent by the UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FrameProps {
    pub tab_id: TabId,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "actionType", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum AppAction {
    /// A view was observed for the first time.
    TabCreated { tab_value: TabRecord },
    /// A view's attributes changed.
    TabUpdated { tab_value: TabRecord },
    /// A view went away.
    TabClosed { tab_id: TabId },
    NewTab { create_properties: CreateProperties },
    CloseTab { tab_id: TabId },
    CloseFrame { frame_props: FrameProps },
    /// Drops the record only; the view, if any, is left alone.
    RemoveTab { tab_id: TabId },
    SetAudioMuted { frame_props: FrameProps, muted: bool },
    WindowCreated { window_value: WindowRecord },
    WindowUpdated { window_value: WindowRecord },
    WindowClosed { window_id: WindowId },
    SetLoginRequiredDetail {
        tab_id: TabId,
        #[serde(default)]
        detail: Option<LoginRequiredDetail>,
    },
    SetLoginResponseDetail { tab_id: TabId },
}

/// Applies a pure store action. Host-bound actions leave the state as is.
pub fn reduce(state: &AppState, action: AppAction) -> AppState {
    match action {
        AppAction::TabCreated { tab_value } => tab_state::upsert_tab(state, tab_value),
        AppAction::TabUpdated { tab_value } => tab_state::update_tab(state, tab_value.into()),
        AppAction::TabClosed { tab_id } | AppAction::RemoveTab { tab_id } => {
            tab_state::remove_tab_by_tab_id(state, tab_id)
        }
        AppAction::CloseFrame { frame_props } => {
            tab_state::remove_tab_by_tab_id(state, frame_props.tab_id)
        }
        AppAction::WindowCreated { window_value } => window_state::upsert_window(state, window_value),
        AppAction::WindowUpdated { window_value } => window_state::update_window(state, window_value),
        AppAction::WindowClosed { window_id } => {
            window_state::remove_window_by_window_id(state, window_id)
        }
        AppAction::SetLoginRequiredDetail { tab_id, detail } => {
            basic_auth_state::set_login_required_detail(state, tab_id, detail)
        }
        AppAction::SetLoginResponseDetail { tab_id } => {
            basic_auth_state::set_login_response_detail(state, tab_id)
        }
        action @ (AppAction::NewTab { .. }
        | AppAction::CloseTab { .. }
        | AppAction::SetAudioMuted { .. }) => {
            debug!(event = "host_action_not_reduced", action = ?action);
            state.clone()
        }
    }
}
