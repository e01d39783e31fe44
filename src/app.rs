//! App Core.
//!
//! Owns the current `AppState`, the lifecycle bridge and the tab actions,
//! and is the single consumer of the action queue. Every state change goes
//! through [`App::dispatch`], so mutations are applied one at a time in
//! arrival order.

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::actions::{reduce, AppAction};
use crate::browser::bridge::{LifecycleBridge, ViewRegistry};
use crate::browser::creation::{AttachCallback, PendingTab};
use crate::browser::tabs::Tabs;
use crate::content::ContentHost;
use crate::state::persistence;
use crate::types::create::CreateProperties;
use crate::types::session::PersistedState;
use crate::types::settings::TabSettings;
use crate::types::state::AppState;

/// Idle polls `run_until_idle` waits out before concluding the queue is quiet.
const IDLE_ROUNDS: usize = 3;

pub struct App {
    state: AppState,
    bridge: LifecycleBridge,
    tabs: Tabs,
    sender: mpsc::UnboundedSender<AppAction>,
    receiver: mpsc::UnboundedReceiver<AppAction>,
}

impl App {
    /// Subscribes the lifecycle bridge to `host` and adopts `state` as is.
    ///
    /// Saved tabs are not given live views here; see [`App::restore`].
    pub fn initialize(host: Arc<dyn ContentHost>, settings: TabSettings, state: AppState) -> Self {
        let (sender, receiver) = mpsc::unbounded_channel();
        let bridge = LifecycleBridge::start(host.clone(), sender.clone());
        let tabs = Tabs::new(host, bridge.registry(), settings);
        info!(event = "app_initialized", tabs = state.tabs().len(), windows = state.windows().len());
        Self {
            state,
            bridge,
            tabs,
            sender,
            receiver,
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn tabs(&self) -> &Tabs {
        &self.tabs
    }

    pub fn registry(&self) -> Arc<ViewRegistry> {
        self.bridge.registry()
    }

    /// Queue handle for collaborators that want to post actions.
    pub fn sender(&self) -> mpsc::UnboundedSender<AppAction> {
        self.sender.clone()
    }

    /// Applies one action to the current state.
    pub fn dispatch(&mut self, action: AppAction) {
        let next = match action {
            AppAction::NewTab { create_properties } => {
                self.tabs.new_tab(&self.state, &create_properties)
            }
            AppAction::CloseTab { tab_id } => self.tabs.close_tab(&self.state, tab_id),
            AppAction::SetAudioMuted { frame_props, muted } => {
                self.tabs.set_audio_muted(&self.state, frame_props.tab_id, muted)
            }
            action => reduce(&self.state, action),
        };
        self.state = next;
    }

    /// Creates a tab and hands back its deferred result without touching
    /// the store; the bridge records the view once it is observed.
    pub fn create(&self, props: &CreateProperties, callback: Option<AttachCallback>) -> PendingTab {
        self.tabs.create(props, callback)
    }

    /// Applies every action already queued. Returns how many were applied.
    pub fn drain_pending(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(action) = self.receiver.try_recv() {
            self.dispatch(action);
            applied += 1;
        }
        if applied > 0 {
            debug!(event = "actions_applied", count = applied);
        }
        applied
    }

    /// Waits for the next queued action and applies it.
    ///
    /// Returns `false` once every sender is gone; `App` holds one itself, so
    /// in practice this only waits.
    pub async fn process_next(&mut self) -> bool {
        match self.receiver.recv().await {
            Some(action) => {
                self.dispatch(action);
                true
            }
            None => false,
        }
    }

    /// Yields to other tasks and drains the queue until it stays empty.
    pub async fn run_until_idle(&mut self) {
        let mut idle = 0;
        while idle < IDLE_ROUNDS {
            tokio::task::yield_now().await;
            if self.drain_pending() == 0 {
                idle += 1;
            } else {
                idle = 0;
            }
        }
    }

    /// Snapshot of the current state for writing to disk.
    pub fn persistent_state(&self) -> PersistedState {
        persistence::persistent_state(&self.state)
    }

    /// Loads a persisted snapshot and gives each restored tab a live view.
    pub fn restore(&mut self, persisted: PersistedState) {
        let restored = persistence::restore_state(&self.state, persisted);
        self.state = self.tabs.restore_tabs(&restored);
    }

    /// Stops the bridge. Queued actions are discarded.
    pub fn shutdown(&mut self) {
        self.bridge.shutdown();
        while self.receiver.try_recv().is_ok() {}
        info!(event = "app_shutdown");
    }
}
