use thiserror::Error;

use super::identity::{TabId, WindowId};

// === ContentError ===

/// Errors reported by the content-hosting subsystem.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContentError {
    /// The view has already been destroyed.
    #[error("View already destroyed: {0}")]
    Destroyed(TabId),
    /// The host refused to create a view.
    #[error("View creation failed: {0}")]
    CreateFailed(String),
    /// The host could not attach a view to its embedder.
    #[error("View attach failed: {0}")]
    AttachFailed(String),
    /// A window reference did not resolve on the host.
    #[error("Unknown window: {0}")]
    UnknownWindow(WindowId),
}

// === CreationError ===

/// Errors that abort or fail a tab creation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CreationError {
    /// Neither the requested window nor a focused window exists.
    #[error("Could not find a window for new tab")]
    NoTargetWindow,
    /// The requested opener is not a live view.
    #[error("Opener does not exist: {0}")]
    NoSuchOpener(TabId),
    /// The opener lives in a different window than the new tab.
    #[error("Opener {opener} must be in the same window as new tab (window {window})")]
    OpenerWindowMismatch { opener: TabId, window: WindowId },
    /// The view went away before any terminal load signal.
    #[error("View destroyed before load settled: {0}")]
    ViewDestroyed(TabId),
    /// The settlement channel was dropped without a result.
    #[error("Tab creation abandoned")]
    Abandoned,
    /// The content host rejected a request.
    #[error(transparent)]
    Content(#[from] ContentError),
}

// === SettingsError ===

/// Errors related to loading and saving settings.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// An I/O error occurred while reading or writing settings.
    #[error("Settings I/O error: {0}")]
    IoError(String),
    /// Failed to serialize or deserialize settings.
    #[error("Settings serialization error: {0}")]
    SerializationError(String),
}

// === PersistenceError ===

/// Errors related to encoding and decoding persisted state.
#[derive(Debug, Error)]
pub enum PersistenceError {
    /// Failed to serialize or deserialize the persisted snapshot.
    #[error("Persisted state serialization error: {0}")]
    SerializationError(String),
}
