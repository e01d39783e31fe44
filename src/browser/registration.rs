//! Guest Registration.
//!
//! Acquires a fresh guest view for a new tab: resolves the target window,
//! validates the opener, picks the browsing session and composes the view
//! settings, then registers the guest with the host under a fresh
//! correlation id.

use tracing::info;

use super::bridge::ViewRegistry;
use crate::content::{ContentHost, ViewHandle, ViewSettings};
use crate::types::create::CreateProperties;
use crate::types::errors::CreationError;
use crate::types::identity::{live_tab_id, live_window_id, WindowId};

/// A registered but not yet attached guest.
#[derive(Debug, Clone)]
pub struct RegisteredGuest {
    pub view: ViewHandle,
    /// The explicitly requested opener, when there was one.
    pub opener: Option<ViewHandle>,
}

/// Registers a guest view for `props`.
///
/// The requested window is used when it is live, otherwise the focused one.
/// An opener must be tracked and embedded in that same window. The session
/// comes from the opener, else the active view, else the host default, and
/// the opener's settings seed the new view's.
pub fn register_guest(
    host: &dyn ContentHost,
    registry: &ViewRegistry,
    props: &CreateProperties,
    default_url: &str,
) -> Result<RegisteredGuest, CreationError> {
    let guest_instance_id = host.next_guest_instance_id();

    let window_id = resolve_window(host, props.window_id).ok_or(CreationError::NoTargetWindow)?;

    let opener = match live_tab_id(props.opener_tab_id) {
        Some(opener_id) => {
            let opener = registry
                .get(opener_id)
                .ok_or(CreationError::NoSuchOpener(opener_id))?;
            if opener.host_window() != Some(window_id) {
                return Err(CreationError::OpenerWindowMismatch {
                    opener: opener_id,
                    window: window_id,
                });
            }
            Some(opener)
        }
        None => None,
    };

    let session = opener
        .as_ref()
        .map(|o| o.session())
        .or_else(|| registry.active().map(|a| a.session()))
        .unwrap_or_else(|| host.default_session());

    let overrides = ViewSettings {
        is_guest: true,
        embedder: Some(window_id),
        session,
        guest_instance_id: Some(guest_instance_id),
        delayed_load_url: Some(
            props
                .url
                .clone()
                .unwrap_or_else(|| default_url.to_string()),
        ),
        ..ViewSettings::default()
    };
    let settings = match &opener {
        Some(opener) => opener.settings().overlay(overrides),
        None => overrides,
    };

    let view = host.create_view(settings)?;
    host.register_guest(&view, guest_instance_id)?;

    info!(
        event = "guest_registered",
        tab_id = %view.id(),
        window_id = %window_id,
        opener = ?opener.as_ref().map(|o| o.id())
    );
    Ok(RegisteredGuest { view, opener })
}

/// Registers a guest for a tab coming back from persisted state.
///
/// Skips window and opener checks; the view uses the host's default session
/// and is embedded in `embedder` when one is given.
pub fn register_restored_guest(
    host: &dyn ContentHost,
    url: Option<&str>,
    embedder: Option<WindowId>,
    default_url: &str,
) -> Result<RegisteredGuest, CreationError> {
    let guest_instance_id = host.next_guest_instance_id();
    let settings = ViewSettings {
        is_guest: true,
        embedder: live_window_id(embedder).filter(|id| host.has_window(*id)),
        session: host.default_session(),
        guest_instance_id: Some(guest_instance_id),
        delayed_load_url: Some(url.unwrap_or(default_url).to_string()),
        ..ViewSettings::default()
    };
    let view = host.create_view(settings)?;
    host.register_guest(&view, guest_instance_id)?;
    info!(event = "guest_restored", tab_id = %view.id(), embedder = ?embedder);
    Ok(RegisteredGuest { view, opener: None })
}

fn resolve_window(host: &dyn ContentHost, requested: Option<WindowId>) -> Option<WindowId> {
    live_window_id(requested)
        .filter(|id| host.has_window(*id))
        .or_else(|| host.focused_window())
}
