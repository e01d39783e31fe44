use serde::{Deserialize, Serialize};

use super::tab::HistoryEntry;
use super::window::{WindowBounds, WindowShowState};

/// Application state as written to disk: durable ids only.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PersistedState {
    #[serde(default)]
    pub tabs: Vec<PersistedTab>,
    #[serde(default)]
    pub windows: Vec<PersistedWindow>,
}

/// A tab's state as stored in a session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedTab {
    pub uuid: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub favicon_url: Option<String>,
    #[serde(default)]
    pub active: bool,
    #[serde(default)]
    pub pinned: bool,
    #[serde(default, rename = "windowUUID", skip_serializing_if = "Option::is_none")]
    pub window_uuid: Option<String>,
    #[serde(default)]
    pub history: Vec<HistoryEntry>,
}

/// A window as stored in a session; the live id is never written.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedWindow {
    #[serde(rename = "windowUUID")]
    pub window_uuid: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bounds: Option<WindowBounds>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<WindowShowState>,
}
