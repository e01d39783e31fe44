//! Content-hosting subsystem seam.
//!
//! The engine that actually creates, renders and destroys views lives behind
//! `ContentHost` and `ContentView`. Per-view lifecycle signals are delivered
//! to each subscriber on its own unbounded queue, so a slow subscriber never
//! loses a signal. A subscriber only sees signals sent after it subscribed,
//! so subscribe before triggering anything you want to observe.

pub mod memory;

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

use crate::types::create::Disposition;
use crate::types::errors::ContentError;
use crate::types::identity::{GuestInstanceId, TabId, WindowId};
use crate::types::tab::TabRecord;

pub type ViewHandle = Arc<dyn ContentView>;

/// Called synchronously by the host for every view it creates.
pub type ViewCreatedHandler = Arc<dyn Fn(ViewHandle) + Send + Sync>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(pub u64);

/// A storage partition. Views sharing a session share cookies and storage.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Session {
    partition: String,
}

impl Session {
    pub const DEFAULT_PARTITION: &'static str = "persist:default";

    pub fn new(partition: impl Into<String>) -> Self {
        Self {
            partition: partition.into(),
        }
    }

    pub fn partition(&self) -> &str {
        &self.partition
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(Self::DEFAULT_PARTITION)
    }
}

/// Settings a view is created with.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewSettings {
    #[serde(default)]
    pub is_guest: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub embedder: Option<WindowId>,
    #[serde(default)]
    pub session: Session,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guest_instance_id: Option<GuestInstanceId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delayed_load_url: Option<String>,
    /// Engine preferences carried through untouched (javascript, plugins...).
    #[serde(flatten)]
    pub preferences: BTreeMap<String, serde_json::Value>,
}

impl ViewSettings {
    /// Lays `overrides` over `self`. The override wins for the guest flag and
    /// session, for every other field that it sets, and for each preference key.
    pub fn overlay(mut self, overrides: ViewSettings) -> ViewSettings {
        self.is_guest = overrides.is_guest;
        self.session = overrides.session;
        if overrides.embedder.is_some() {
            self.embedder = overrides.embedder;
        }
        if overrides.guest_instance_id.is_some() {
            self.guest_instance_id = overrides.guest_instance_id;
        }
        if overrides.delayed_load_url.is_some() {
            self.delayed_load_url = overrides.delayed_load_url;
        }
        self.preferences.extend(overrides.preferences);
        self
    }
}

/// Payload of a failed load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoadFailure {
    pub error_code: i32,
    pub error_description: String,
    pub validated_url: String,
    pub is_main_frame: bool,
}

/// Lifecycle signals emitted by a view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewEvent {
    Attached,
    Detached,
    SetActive(bool),
    FaviconUpdated(Vec<String>),
    TitleUpdated(String),
    LoadStart {
        url: String,
        is_main_frame: bool,
        is_error_page: bool,
    },
    DidFailProvisionalLoad(LoadFailure),
    DidFailLoad(LoadFailure),
    DidFinishLoad,
    DidStopLoading,
    NavigationEntryCommitted(String),
    DidNavigate(String),
    Destroyed,
    Crashed,
    Close,
}

impl ViewEvent {
    /// Signals that conclude a load attempt.
    pub fn is_terminal_load(&self) -> bool {
        matches!(
            self,
            ViewEvent::DidFailProvisionalLoad(_) | ViewEvent::DidFailLoad(_) | ViewEvent::DidFinishLoad
        )
    }

    /// Signals after which the view is gone.
    pub fn is_teardown(&self) -> bool {
        matches!(self, ViewEvent::Destroyed | ViewEvent::Crashed | ViewEvent::Close)
    }
}

/// A live content view owned by the host.
pub trait ContentView: Send + Sync {
    fn id(&self) -> TabId;
    fn is_destroyed(&self) -> bool;
    /// Extension background pages are views but never tabs.
    fn is_background_page(&self) -> bool;
    /// The window embedding this view, if it is a guest.
    fn host_window(&self) -> Option<WindowId>;
    fn session(&self) -> Session;
    fn settings(&self) -> ViewSettings;
    /// Current tab attributes as the host sees them.
    fn snapshot(&self) -> TabRecord;
    fn set_favicon_url(&self, url: &str);
    fn set_audio_muted(&self, muted: bool);
    fn close(&self) -> Result<(), ContentError>;
    /// Every signal emitted from now on, in order. The stream ends once the
    /// view is torn down.
    fn subscribe(&self) -> mpsc::UnboundedReceiver<ViewEvent>;
}

impl fmt::Debug for dyn ContentView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContentView")
            .field("id", &self.id())
            .field("host_window", &self.host_window())
            .finish()
    }
}

/// Request to attach a registered guest to its embedder.
#[derive(Debug, Clone)]
pub struct AttachRequest {
    pub view: ViewHandle,
    pub opener: Option<ViewHandle>,
    pub url: String,
    pub frame_name: String,
    pub disposition: Disposition,
    pub settings: ViewSettings,
}

/// The engine that creates and hosts views.
pub trait ContentHost: Send + Sync {
    /// Hands out the correlation id for the next guest attachment.
    fn next_guest_instance_id(&self) -> GuestInstanceId;
    fn create_view(&self, settings: ViewSettings) -> Result<ViewHandle, ContentError>;
    fn register_guest(&self, view: &ViewHandle, guest_instance_id: GuestInstanceId) -> Result<(), ContentError>;
    fn attach_view(&self, request: AttachRequest) -> Result<(), ContentError>;
    fn focused_window(&self) -> Option<WindowId>;
    fn has_window(&self, window_id: WindowId) -> bool;
    fn default_session(&self) -> Session;
    fn on_view_created(&self, handler: ViewCreatedHandler) -> ListenerId;
    fn remove_view_created(&self, listener: ListenerId);
}
