//! Headless in-process content host.
//!
//! Views hold plain attributes instead of rendering anything. Signals are
//! driven by hand through [`MemoryView::emit`], which first applies the
//! attribute change the real engine would make and then fans the signal out
//! to every subscriber.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::mpsc;
use tracing::debug;

use super::{
    AttachRequest, ContentHost, ContentView, ListenerId, Session, ViewCreatedHandler, ViewEvent,
    ViewHandle, ViewSettings,
};
use crate::types::create::Disposition;
use crate::types::errors::ContentError;
use crate::types::identity::{GuestInstanceId, TabId, WindowId};
use crate::types::tab::{TabRecord, TabStatus};

#[derive(Debug, Default)]
struct ViewAttrs {
    url: Option<String>,
    title: Option<String>,
    favicon_url: Option<String>,
    active: bool,
    audio_muted: bool,
    attached: bool,
    destroyed: bool,
    status: Option<TabStatus>,
}

/// A view living in a [`MemoryHost`].
pub struct MemoryView {
    id: TabId,
    settings: ViewSettings,
    background_page: bool,
    attrs: Mutex<ViewAttrs>,
    subscribers: Mutex<Vec<mpsc::UnboundedSender<ViewEvent>>>,
}

impl MemoryView {
    fn new(id: TabId, settings: ViewSettings, background_page: bool) -> Self {
        Self {
            id,
            settings,
            background_page,
            attrs: Mutex::new(ViewAttrs::default()),
            subscribers: Mutex::new(Vec::new()),
        }
    }

    /// Applies the attribute change implied by `event`, then delivers it to
    /// every live subscriber. A teardown signal ends every stream.
    pub fn emit(&self, event: ViewEvent) {
        {
            let mut attrs = self.attrs.lock();
            match &event {
                ViewEvent::Attached => attrs.attached = true,
                ViewEvent::Detached => attrs.attached = false,
                ViewEvent::SetActive(active) => attrs.active = *active,
                ViewEvent::TitleUpdated(title) => attrs.title = Some(title.clone()),
                ViewEvent::LoadStart {
                    url, is_main_frame, ..
                } if *is_main_frame => {
                    attrs.url = Some(url.clone());
                    attrs.status = Some(TabStatus::Loading);
                }
                ViewEvent::DidFinishLoad | ViewEvent::DidStopLoading => {
                    attrs.status = Some(TabStatus::Complete);
                }
                ViewEvent::DidNavigate(url) | ViewEvent::NavigationEntryCommitted(url) => {
                    attrs.url = Some(url.clone());
                }
                ViewEvent::Destroyed | ViewEvent::Crashed | ViewEvent::Close => {
                    attrs.destroyed = true;
                }
                _ => {}
            }
        }
        let mut subscribers = self.subscribers.lock();
        subscribers.retain(|tx| tx.send(event.clone()).is_ok());
        if event.is_teardown() {
            subscribers.clear();
        }
    }

    /// Tears the view down the way a renderer exit would.
    pub fn destroy(&self) {
        self.emit(ViewEvent::Destroyed);
    }

    pub fn is_attached(&self) -> bool {
        self.attrs.lock().attached
    }

    pub fn is_active(&self) -> bool {
        self.attrs.lock().active
    }

    pub fn is_audio_muted(&self) -> bool {
        self.attrs.lock().audio_muted
    }

    fn mark_attached(&self, url: Option<String>) {
        let mut attrs = self.attrs.lock();
        if url.is_some() {
            attrs.url = url;
        }
        attrs.attached = true;
    }
}

impl ContentView for MemoryView {
    fn id(&self) -> TabId {
        self.id
    }

    fn is_destroyed(&self) -> bool {
        self.attrs.lock().destroyed
    }

    fn is_background_page(&self) -> bool {
        self.background_page
    }

    fn host_window(&self) -> Option<WindowId> {
        self.settings.embedder
    }

    fn session(&self) -> Session {
        self.settings.session.clone()
    }

    fn settings(&self) -> ViewSettings {
        self.settings.clone()
    }

    fn snapshot(&self) -> TabRecord {
        let attrs = self.attrs.lock();
        TabRecord {
            tab_id: Some(self.id),
            window_id: if attrs.attached { self.settings.embedder } else { None },
            url: attrs.url.clone(),
            title: attrs.title.clone(),
            favicon_url: attrs.favicon_url.clone(),
            active: Some(attrs.active),
            audio_muted: Some(attrs.audio_muted),
            audible: Some(false),
            status: attrs.status,
            incognito: Some(!self.settings.session.partition().starts_with("persist:")),
            ..TabRecord::default()
        }
    }

    fn set_favicon_url(&self, url: &str) {
        self.attrs.lock().favicon_url = Some(url.to_string());
    }

    fn set_audio_muted(&self, muted: bool) {
        self.attrs.lock().audio_muted = muted;
    }

    fn close(&self) -> Result<(), ContentError> {
        if self.is_destroyed() {
            return Err(ContentError::Destroyed(self.id));
        }
        self.emit(ViewEvent::Close);
        self.emit(ViewEvent::Destroyed);
        Ok(())
    }

    fn subscribe(&self) -> mpsc::UnboundedReceiver<ViewEvent> {
        let (tx, rx) = mpsc::unbounded_channel();
        // Checked under the subscriber lock so a concurrent teardown cannot
        // leave this stream open.
        let mut subscribers = self.subscribers.lock();
        if !self.is_destroyed() {
            subscribers.push(tx);
        }
        rx
    }
}

/// What the host was asked to attach, for inspection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttachRecord {
    pub view: TabId,
    pub opener: Option<TabId>,
    pub url: String,
    pub disposition: Disposition,
}

#[derive(Default)]
struct HostInner {
    next_view_id: i32,
    next_instance_id: u64,
    next_listener_id: u64,
    windows: Vec<WindowId>,
    focused: Option<WindowId>,
    views: HashMap<TabId, Arc<MemoryView>>,
    guests: HashMap<GuestInstanceId, TabId>,
    listeners: Vec<(ListenerId, ViewCreatedHandler)>,
    attach_log: Vec<AttachRecord>,
    fail_next_attach: Option<String>,
}

impl HostInner {
    fn prune_destroyed(&mut self) {
        self.views.retain(|_, view| !view.is_destroyed());
        let views = &self.views;
        self.guests.retain(|_, tab_id| views.contains_key(tab_id));
    }
}

/// In-memory [`ContentHost`].
///
/// Destroyed views and their guest instance ids are dropped from the host's
/// tables on the next view creation or listing.
pub struct MemoryHost {
    inner: Mutex<HostInner>,
}

impl Default for MemoryHost {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryHost {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(HostInner {
                next_view_id: 1,
                next_instance_id: 1,
                next_listener_id: 1,
                ..HostInner::default()
            }),
        }
    }

    pub fn add_window(&self, window_id: WindowId) {
        let mut inner = self.inner.lock();
        if !inner.windows.contains(&window_id) {
            inner.windows.push(window_id);
        }
    }

    pub fn remove_window(&self, window_id: WindowId) {
        let mut inner = self.inner.lock();
        inner.windows.retain(|w| *w != window_id);
        if inner.focused == Some(window_id) {
            inner.focused = None;
        }
    }

    pub fn focus_window(&self, window_id: Option<WindowId>) {
        self.inner.lock().focused = window_id;
    }

    pub fn view(&self, tab_id: TabId) -> Option<Arc<MemoryView>> {
        self.inner.lock().views.get(&tab_id).cloned()
    }

    /// Ids of every view still alive, in creation order.
    pub fn view_ids(&self) -> Vec<TabId> {
        let mut inner = self.inner.lock();
        inner.prune_destroyed();
        let mut ids: Vec<TabId> = inner.views.keys().copied().collect();
        ids.sort();
        ids
    }

    pub fn guest_for_instance(&self, guest_instance_id: GuestInstanceId) -> Option<TabId> {
        self.inner.lock().guests.get(&guest_instance_id).copied()
    }

    pub fn attach_log(&self) -> Vec<AttachRecord> {
        self.inner.lock().attach_log.clone()
    }

    /// Makes the next attach request fail with `reason`.
    pub fn fail_next_attach(&self, reason: impl Into<String>) {
        self.inner.lock().fail_next_attach = Some(reason.into());
    }

    /// Creates an extension background page in `window_id`.
    pub fn create_background_page(&self, window_id: WindowId) -> Arc<MemoryView> {
        let settings = ViewSettings {
            embedder: Some(window_id),
            ..ViewSettings::default()
        };
        self.spawn_view(settings, true)
    }

    fn spawn_view(&self, settings: ViewSettings, background_page: bool) -> Arc<MemoryView> {
        let (view, listeners) = {
            let mut inner = self.inner.lock();
            inner.prune_destroyed();
            let id = TabId(inner.next_view_id);
            inner.next_view_id += 1;
            let view = Arc::new(MemoryView::new(id, settings, background_page));
            inner.views.insert(id, view.clone());
            let listeners: Vec<ViewCreatedHandler> =
                inner.listeners.iter().map(|(_, h)| h.clone()).collect();
            (view, listeners)
        };
        debug!(event = "view_created", tab_id = %view.id, background_page);
        for listener in listeners {
            let handle: ViewHandle = view.clone();
            listener(handle);
        }
        view
    }
}

impl ContentHost for MemoryHost {
    fn next_guest_instance_id(&self) -> GuestInstanceId {
        let mut inner = self.inner.lock();
        let id = GuestInstanceId(inner.next_instance_id);
        inner.next_instance_id += 1;
        id
    }

    fn create_view(&self, settings: ViewSettings) -> Result<ViewHandle, ContentError> {
        if let Some(window_id) = settings.embedder {
            if !self.has_window(window_id) {
                return Err(ContentError::UnknownWindow(window_id));
            }
        }
        Ok(self.spawn_view(settings, false))
    }

    fn register_guest(&self, view: &ViewHandle, guest_instance_id: GuestInstanceId) -> Result<(), ContentError> {
        if view.is_destroyed() {
            return Err(ContentError::Destroyed(view.id()));
        }
        self.inner.lock().guests.insert(guest_instance_id, view.id());
        Ok(())
    }

    fn attach_view(&self, request: AttachRequest) -> Result<(), ContentError> {
        let view = {
            let mut inner = self.inner.lock();
            if let Some(reason) = inner.fail_next_attach.take() {
                return Err(ContentError::AttachFailed(reason));
            }
            let view = inner
                .views
                .get(&request.view.id())
                .cloned()
                .ok_or(ContentError::Destroyed(request.view.id()))?;
            if let Some(window_id) = request.settings.embedder {
                if !inner.windows.contains(&window_id) {
                    return Err(ContentError::UnknownWindow(window_id));
                }
            }
            inner.attach_log.push(AttachRecord {
                view: request.view.id(),
                opener: request.opener.as_ref().map(|o| o.id()),
                url: request.url.clone(),
                disposition: request.disposition,
            });
            view
        };
        if view.is_destroyed() {
            return Err(ContentError::Destroyed(view.id));
        }
        view.mark_attached(Some(request.url));
        view.emit(ViewEvent::Attached);
        Ok(())
    }

    fn focused_window(&self) -> Option<WindowId> {
        self.inner.lock().focused
    }

    fn has_window(&self, window_id: WindowId) -> bool {
        self.inner.lock().windows.contains(&window_id)
    }

    fn default_session(&self) -> Session {
        Session::default()
    }

    fn on_view_created(&self, handler: ViewCreatedHandler) -> ListenerId {
        let mut inner = self.inner.lock();
        let id = ListenerId(inner.next_listener_id);
        inner.next_listener_id += 1;
        inner.listeners.push((id, handler));
        id
    }

    fn remove_view_created(&self, listener: ListenerId) {
        self.inner.lock().listeners.retain(|(id, _)| *id != listener);
    }
}
