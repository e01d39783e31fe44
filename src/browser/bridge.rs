//! Lifecycle Event Bridge.
//!
//! Observes every guest view the host creates and turns its lifecycle
//! signals into store actions. Handlers never touch state: they read the
//! view's current attributes and enqueue an `AppAction`, and the single
//! consumer in `App` applies them in order on a later turn.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::mpsc;
use tokio::task::AbortHandle;
use tracing::{debug, info};

use crate::actions::AppAction;
use crate::content::{ContentHost, ContentView, ListenerId, ViewCreatedHandler, ViewEvent, ViewHandle};
use crate::types::identity::{generate_uuid, TabId};
use crate::types::tab::TabRecord;

struct TrackedView {
    view: ViewHandle,
    watcher: Option<AbortHandle>,
}

/// Live views by tab id plus the process-wide active view.
///
/// Locked because watchers may run on any runtime worker.
#[derive(Default)]
pub struct ViewRegistry {
    views: Mutex<HashMap<TabId, TrackedView>>,
    active: Mutex<Option<ViewHandle>>,
}

impl ViewRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, tab_id: TabId) -> Option<ViewHandle> {
        self.views.lock().get(&tab_id).map(|t| t.view.clone())
    }

    pub fn contains(&self, tab_id: TabId) -> bool {
        self.views.lock().contains_key(&tab_id)
    }

    pub fn len(&self) -> usize {
        self.views.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.views.lock().is_empty()
    }

    /// The most recently activated view, unless it has since been destroyed.
    pub fn active(&self) -> Option<ViewHandle> {
        self.active
            .lock()
            .as_ref()
            .filter(|v| !v.is_destroyed())
            .cloned()
    }

    pub fn active_tab_id(&self) -> Option<TabId> {
        self.active().map(|v| v.id())
    }

    fn track(&self, view: ViewHandle) {
        self.views.lock().insert(
            view.id(),
            TrackedView {
                view,
                watcher: None,
            },
        );
    }

    fn set_watcher(&self, tab_id: TabId, watcher: AbortHandle) {
        match self.views.lock().get_mut(&tab_id) {
            Some(tracked) => tracked.watcher = Some(watcher),
            // Already torn down before the handle was stored.
            None => watcher.abort(),
        }
    }

    fn untrack(&self, tab_id: TabId) {
        self.views.lock().remove(&tab_id);
        let mut active = self.active.lock();
        if active.as_ref().map(|v| v.id()) == Some(tab_id) {
            *active = None;
        }
    }

    fn set_active(&self, view: ViewHandle) {
        *self.active.lock() = Some(view);
    }

    fn clear(&self) {
        for (_, tracked) in self.views.lock().drain() {
            if let Some(watcher) = tracked.watcher {
                watcher.abort();
            }
        }
        *self.active.lock() = None;
    }
}

/// Current attributes of `view` as a store record.
pub fn tab_value(view: &dyn ContentView) -> TabRecord {
    let mut tab = view.snapshot();
    // Navigation history is not read from the host yet.
    tab.history = Some(Vec::new());
    tab
}

/// Subscription to the host's view lifecycle, torn down with [`shutdown`].
///
/// [`shutdown`]: LifecycleBridge::shutdown
pub struct LifecycleBridge {
    host: Arc<dyn ContentHost>,
    registry: Arc<ViewRegistry>,
    listener: Mutex<Option<ListenerId>>,
}

impl LifecycleBridge {
    /// Starts observing view creation on `host`. Actions go to `sender`.
    ///
    /// Views are created from within a tokio runtime, since each tracked
    /// view gets a watcher task.
    pub fn start(host: Arc<dyn ContentHost>, sender: mpsc::UnboundedSender<AppAction>) -> Self {
        let registry = Arc::new(ViewRegistry::new());
        let handler_registry = registry.clone();
        let handler: ViewCreatedHandler =
            Arc::new(move |view: ViewHandle| on_view_created(&handler_registry, &sender, view));
        let listener = host.on_view_created(handler);
        info!(event = "bridge_started");
        Self {
            host,
            registry,
            listener: Mutex::new(Some(listener)),
        }
    }

    pub fn registry(&self) -> Arc<ViewRegistry> {
        self.registry.clone()
    }

    /// Stops observing and drops all per-view bookkeeping. Idempotent.
    pub fn shutdown(&self) {
        if let Some(listener) = self.listener.lock().take() {
            self.host.remove_view_created(listener);
            self.registry.clear();
            info!(event = "bridge_stopped");
        }
    }
}

impl Drop for LifecycleBridge {
    fn drop(&mut self) {
        self.shutdown();
    }
}

fn on_view_created(
    registry: &Arc<ViewRegistry>,
    sender: &mpsc::UnboundedSender<AppAction>,
    view: ViewHandle,
) {
    if view.is_background_page() || view.host_window().is_none() {
        return;
    }
    let tab_id = view.id();
    let events = view.subscribe();
    registry.track(view.clone());
    let watcher = tokio::spawn(watch_view(
        registry.clone(),
        sender.clone(),
        view.clone(),
        events,
    ));
    registry.set_watcher(tab_id, watcher.abort_handle());

    let mut tab = tab_value(view.as_ref());
    if tab.uuid.is_none() {
        tab.uuid = Some(generate_uuid());
    }
    debug!(event = "view_observed", tab_id = %tab_id);
    enqueue(sender, AppAction::TabCreated { tab_value: tab });
}

async fn watch_view(
    registry: Arc<ViewRegistry>,
    sender: mpsc::UnboundedSender<AppAction>,
    view: ViewHandle,
    mut events: mpsc::UnboundedReceiver<ViewEvent>,
) {
    let tab_id = view.id();
    loop {
        let Some(event) = events.recv().await else {
            cleanup(&registry, &sender, tab_id);
            return;
        };

        match event {
            ViewEvent::SetActive(active) => {
                if active {
                    registry.set_active(view.clone());
                }
                refresh(&registry, &sender, tab_id);
            }
            ViewEvent::FaviconUpdated(favicons) => {
                if let Some(first) = favicons.first() {
                    view.set_favicon_url(first);
                    refresh(&registry, &sender, tab_id);
                }
            }
            ViewEvent::LoadStart { is_main_frame, .. } => {
                if is_main_frame {
                    refresh(&registry, &sender, tab_id);
                }
            }
            ViewEvent::Destroyed | ViewEvent::Crashed | ViewEvent::Close => {
                cleanup(&registry, &sender, tab_id);
                return;
            }
            ViewEvent::Attached
            | ViewEvent::Detached
            | ViewEvent::TitleUpdated(_)
            | ViewEvent::DidFailLoad(_)
            | ViewEvent::DidFailProvisionalLoad(_)
            | ViewEvent::DidStopLoading
            | ViewEvent::NavigationEntryCommitted(_)
            | ViewEvent::DidNavigate(_)
            | ViewEvent::DidFinishLoad => refresh(&registry, &sender, tab_id),
        }
    }
}

fn refresh(registry: &ViewRegistry, sender: &mpsc::UnboundedSender<AppAction>, tab_id: TabId) {
    if let Some(view) = registry.get(tab_id) {
        enqueue(
            sender,
            AppAction::TabUpdated {
                tab_value: tab_value(view.as_ref()),
            },
        );
    }
}

fn cleanup(registry: &ViewRegistry, sender: &mpsc::UnboundedSender<AppAction>, tab_id: TabId) {
    registry.untrack(tab_id);
    debug!(event = "view_gone", tab_id = %tab_id);
    enqueue(sender, AppAction::TabClosed { tab_id });
}

fn enqueue(sender: &mpsc::UnboundedSender<AppAction>, action: AppAction) {
    if sender.send(action).is_err() {
        debug!(event = "action_dropped", reason = "consumer gone");
    }
}
