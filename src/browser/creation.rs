//! Tab Creation Protocol.
//!
//! Attaches a registered guest and settles exactly once on the first
//! terminal load signal. The attach callback fires on `Attached` and does
//! not settle anything.
//!
//! ```text
//! registered -> attach-requested -> attached -> loaded | failed
//!                                \-> failed-provisionally
//! ```

use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use tokio::sync::{mpsc, oneshot};
use tracing::{debug, warn};

use super::registration::RegisteredGuest;
use crate::content::{AttachRequest, ContentHost, LoadFailure, ViewEvent, ViewHandle};
use crate::types::create::{CreateProperties, Disposition};
use crate::types::errors::CreationError;

/// Invoked once: with the view on attach, or with `None` if the creation
/// failed before the view ever attached.
pub type AttachCallback = Box<dyn FnOnce(Option<ViewHandle>) + Send>;

/// How the load attempt concluded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    Finished,
    Failed(LoadFailure),
    ProvisionalFailed(LoadFailure),
}

impl LoadOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, LoadOutcome::Finished)
    }
}

/// Settlement value of a creation.
#[derive(Debug, Clone)]
pub struct CreatedTab {
    pub view: ViewHandle,
    pub outcome: LoadOutcome,
}

/// Deferred result of a creation. Dropping it abandons the result only;
/// the watcher still runs until the view reaches a terminal signal.
pub struct PendingTab {
    rx: oneshot::Receiver<Result<CreatedTab, CreationError>>,
}

impl PendingTab {
    /// An already rejected creation.
    pub fn rejected(err: CreationError) -> Self {
        let (tx, rx) = oneshot::channel();
        let _ = tx.send(Err(err));
        Self { rx }
    }
}

impl Future for PendingTab {
    type Output = Result<CreatedTab, CreationError>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        match Pin::new(&mut self.rx).poll(cx) {
            Poll::Ready(Ok(result)) => Poll::Ready(result),
            Poll::Ready(Err(_)) => Poll::Ready(Err(CreationError::Abandoned)),
            Poll::Pending => Poll::Pending,
        }
    }
}

/// Requests attachment of `guest` and returns its deferred result.
///
/// Subscribes to the view before the attach request so no signal is missed.
/// A rejected attach request invokes `callback` with `None` right away and
/// rejects the result. Must be called from within a tokio runtime.
pub fn create_internal(
    host: &dyn ContentHost,
    props: &CreateProperties,
    guest: RegisteredGuest,
    callback: Option<AttachCallback>,
) -> PendingTab {
    let RegisteredGuest { view, opener } = guest;
    let events = view.subscribe();
    let settings = view.settings();
    let request = AttachRequest {
        view: view.clone(),
        opener,
        url: settings
            .delayed_load_url
            .clone()
            .unwrap_or_else(|| "about:blank".to_string()),
        frame_name: String::new(),
        disposition: Disposition::for_properties(props),
        settings,
    };

    if let Err(err) = host.attach_view(request) {
        warn!(event = "attach_failed", tab_id = %view.id(), error = %err);
        if let Some(callback) = callback {
            callback(None);
        }
        return PendingTab::rejected(err.into());
    }

    let (tx, rx) = oneshot::channel();
    tokio::spawn(settle(view, events, callback, tx));
    PendingTab { rx }
}

async fn settle(
    view: ViewHandle,
    mut events: mpsc::UnboundedReceiver<ViewEvent>,
    mut callback: Option<AttachCallback>,
    tx: oneshot::Sender<Result<CreatedTab, CreationError>>,
) {
    let tab_id = view.id();
    let result = loop {
        match events.recv().await {
            Some(ViewEvent::Attached) => {
                if let Some(callback) = callback.take() {
                    callback(Some(view.clone()));
                }
            }
            Some(ViewEvent::DidFinishLoad) => break Ok(LoadOutcome::Finished),
            Some(ViewEvent::DidFailLoad(failure)) => break Ok(LoadOutcome::Failed(failure)),
            Some(ViewEvent::DidFailProvisionalLoad(failure)) => {
                break Ok(LoadOutcome::ProvisionalFailed(failure))
            }
            Some(event) if event.is_teardown() => break Err(CreationError::ViewDestroyed(tab_id)),
            Some(_) => {}
            None => break Err(CreationError::ViewDestroyed(tab_id)),
        }
    };
    // Dropping the receiver here detaches the remaining terminal signals.
    drop(events);

    if result.is_err() {
        if let Some(callback) = callback.take() {
            callback(None);
        }
    }
    debug!(event = "creation_settled", tab_id = %tab_id, ok = result.is_ok());
    if tx.send(result.map(|outcome| CreatedTab { view, outcome })).is_err() {
        debug!(event = "creation_abandoned", tab_id = %tab_id);
    }
}
