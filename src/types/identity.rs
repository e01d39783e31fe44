//! Identifier policy for tabs and windows.
//!
//! Two identifier spaces coexist. Ephemeral ids (`TabId`, `WindowId`) are
//! assigned by the content host and only mean something for the current
//! process. Durable ids (uuids) are generated once per record and are what
//! survives a restart.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Process-lifetime id of a content view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TabId(pub i32);

impl TabId {
    /// Sentinel the host uses for "no live view yet".
    pub const UNASSIGNED: TabId = TabId(-1);

    pub fn is_assigned(self) -> bool {
        self.0 >= 0
    }
}

impl fmt::Display for TabId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Process-lifetime id of a top-level window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WindowId(pub i32);

impl WindowId {
    /// Callers pass this to mean "whichever window is current".
    pub const CURRENT: WindowId = WindowId(-2);

    /// Live window ids are strictly positive; zero and the sentinels are not.
    pub fn is_live(self) -> bool {
        self.0 > 0
    }
}

impl fmt::Display for WindowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Correlation id handed out by the content host for a guest attachment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GuestInstanceId(pub u64);

/// Generates a fresh durable identifier.
pub fn generate_uuid() -> String {
    Uuid::new_v4().to_string()
}

/// Normalizes an optional tab id: the unassigned sentinel reads as absent.
pub fn live_tab_id(id: Option<TabId>) -> Option<TabId> {
    id.filter(|id| id.is_assigned())
}

/// Normalizes an optional window reference: sentinels and zero read as absent.
pub fn live_window_id(id: Option<WindowId>) -> Option<WindowId> {
    id.filter(|id| id.is_live())
}
