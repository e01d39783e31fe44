use serde::{Deserialize, Serialize};

use super::identity::WindowId;

/// Window position and size.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowBounds {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

/// Show state of a top-level window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WindowShowState {
    Normal,
    Minimized,
    Maximized,
    Fullscreen,
}

/// A window as held in the store.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WindowRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub window_id: Option<WindowId>,
    #[serde(default, rename = "windowUUID", skip_serializing_if = "Option::is_none")]
    pub window_uuid: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub focused: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bounds: Option<WindowBounds>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<WindowShowState>,
}

impl WindowRecord {
    pub fn with_id(window_id: WindowId) -> Self {
        Self {
            window_id: Some(window_id),
            ..Self::default()
        }
    }

    /// Applies `other` field by field; fields `other` leaves unset are kept.
    pub fn apply(&mut self, other: WindowRecord) {
        if other.window_id.is_some() {
            self.window_id = other.window_id;
        }
        if other.window_uuid.is_some() {
            self.window_uuid = other.window_uuid;
        }
        if other.focused.is_some() {
            self.focused = other.focused;
        }
        if other.bounds.is_some() {
            self.bounds = other.bounds;
        }
        if other.state.is_some() {
            self.state = other.state;
        }
    }
}
