//! Tab actions that need the content host.

use std::sync::Arc;

use tracing::{debug, error, info, warn};

use super::bridge::{tab_value, ViewRegistry};
use super::creation::{create_internal, AttachCallback, PendingTab};
use super::registration::{register_guest, register_restored_guest};
use crate::content::ContentHost;
use crate::state::{tab_state, window_state};
use crate::types::create::CreateProperties;
use crate::types::errors::CreationError;
use crate::types::identity::{generate_uuid, live_tab_id, TabId};
use crate::types::settings::TabSettings;
use crate::types::state::AppState;
use crate::types::tab::TabRecord;

pub struct Tabs {
    host: Arc<dyn ContentHost>,
    registry: Arc<ViewRegistry>,
    settings: TabSettings,
}

impl Tabs {
    pub fn new(host: Arc<dyn ContentHost>, registry: Arc<ViewRegistry>, settings: TabSettings) -> Self {
        Self {
            host,
            registry,
            settings,
        }
    }

    /// Current attributes of a live view, if it is tracked.
    pub fn tab_value(&self, tab_id: TabId) -> Option<TabRecord> {
        self.registry.get(tab_id).map(|view| tab_value(view.as_ref()))
    }

    /// Registers a guest and starts its creation without waiting on it, then
    /// inserts a placeholder keyed by a fresh uuid and the live id.
    ///
    /// A registration failure is logged and leaves `state` unchanged.
    pub fn new_tab(&self, state: &AppState, props: &CreateProperties) -> AppState {
        let guest = match register_guest(
            self.host.as_ref(),
            &self.registry,
            props,
            &self.settings.default_url,
        ) {
            Ok(guest) => guest,
            Err(err) => {
                error!(event = "new_tab_failed", error = %err);
                return state.clone();
            }
        };

        let tab_id = guest.view.id();
        let pending = create_internal(self.host.as_ref(), props, guest, None);
        tokio::spawn(async move {
            match pending.await {
                Ok(created) => {
                    debug!(event = "new_tab_settled", tab_id = %tab_id, outcome = ?created.outcome)
                }
                Err(err) => error!(event = "new_tab_creation_failed", tab_id = %tab_id, error = %err),
            }
        });

        let placeholder = TabRecord {
            uuid: Some(generate_uuid()),
            ..TabRecord::placeholder(tab_id)
        };
        tab_state::insert_tab(state, placeholder)
    }

    /// Asks the live view to close, then removes the record.
    ///
    /// A view that is already gone is not an error.
    pub fn close_tab(&self, state: &AppState, tab_id: TabId) -> AppState {
        if let Some(view) = self.registry.get(tab_id) {
            if !view.is_destroyed() {
                if let Err(err) = view.close() {
                    debug!(event = "close_ignored", tab_id = %tab_id, error = %err);
                }
            }
        }
        tab_state::remove_tab_by_tab_id(state, tab_id)
    }

    /// Mutes or unmutes the live view and refreshes its record.
    pub fn set_audio_muted(&self, state: &AppState, tab_id: TabId, muted: bool) -> AppState {
        match self.registry.get(tab_id) {
            Some(view) => {
                view.set_audio_muted(muted);
                tab_state::update_tab(state, tab_value(view.as_ref()).into())
            }
            None => state.clone(),
        }
    }

    /// Registers a guest and returns its creation result directly.
    ///
    /// On a registration failure `callback` is invoked with `None` and the
    /// result is already rejected.
    pub fn create(&self, props: &CreateProperties, callback: Option<AttachCallback>) -> PendingTab {
        match register_guest(
            self.host.as_ref(),
            &self.registry,
            props,
            &self.settings.default_url,
        ) {
            Ok(guest) => create_internal(self.host.as_ref(), props, guest, callback),
            Err(err) => {
                warn!(event = "create_failed", error = %err);
                if let Some(callback) = callback {
                    callback(None);
                }
                PendingTab::rejected(err)
            }
        }
    }

    /// Gives a saved tab a fresh live view and returns the record carrying
    /// its new live id. The view embeds in the saved window when that window
    /// is live in `state`.
    pub fn restore_tab(&self, state: &AppState, saved: &TabRecord) -> Result<TabRecord, CreationError> {
        let embedder = saved
            .window_uuid
            .as_deref()
            .and_then(|uuid| window_state::get_by_window_uuid(state, uuid))
            .and_then(|w| w.window_id);
        let guest = register_restored_guest(
            self.host.as_ref(),
            saved.url.as_deref(),
            embedder,
            &self.settings.default_url,
        )?;
        Ok(TabRecord {
            tab_id: Some(guest.view.id()),
            window_id: guest.view.host_window(),
            ..saved.clone()
        })
    }

    /// Restores a live view for every tab that lacks one. Failures are logged
    /// and leave the saved record in place.
    pub fn restore_tabs(&self, state: &AppState) -> AppState {
        let saved: Vec<TabRecord> = state
            .tabs()
            .iter()
            .filter(|t| live_tab_id(t.tab_id).is_none())
            .cloned()
            .collect();

        let mut next = state.clone();
        for tab in saved {
            let Some(uuid) = tab.uuid.clone() else {
                continue;
            };
            match self.restore_tab(&next, &tab) {
                Ok(restored) => {
                    next = tab_state::upsert_tab(&next, restored);
                }
                Err(err) => warn!(event = "restore_tab_failed", uuid = %uuid, error = %err),
            }
        }
        info!(event = "tabs_restored", tabs = next.tabs().len());
        next
    }
}
