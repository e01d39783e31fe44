use tabstate::types::errors::*;
use tabstate::types::identity::{TabId, WindowId};

// === CreationError Tests ===

#[test]
fn creation_error_no_target_window_display() {
    assert_eq!(
        CreationError::NoTargetWindow.to_string(),
        "Could not find a window for new tab"
    );
}

#[test]
fn creation_error_opener_display_variants() {
    assert_eq!(
        CreationError::NoSuchOpener(TabId(4)).to_string(),
        "Opener does not exist: 4"
    );
    assert_eq!(
        CreationError::OpenerWindowMismatch {
            opener: TabId(4),
            window: WindowId(2)
        }
        .to_string(),
        "Opener 4 must be in the same window as new tab (window 2)"
    );
}

#[test]
fn creation_error_wraps_content_error_transparently() {
    let err: CreationError = ContentError::AttachFailed("no embedder".to_string()).into();
    assert_eq!(err, CreationError::Content(ContentError::AttachFailed("no embedder".to_string())));
    assert_eq!(err.to_string(), "View attach failed: no embedder");
}

#[test]
fn creation_error_implements_error_trait() {
    let err: Box<dyn std::error::Error> = Box::new(CreationError::ViewDestroyed(TabId(1)));
    assert_eq!(err.to_string(), "View destroyed before load settled: 1");
}

// === ContentError Tests ===

#[test]
fn content_error_display_variants() {
    assert_eq!(ContentError::Destroyed(TabId(9)).to_string(), "View already destroyed: 9");
    assert_eq!(
        ContentError::CreateFailed("oom".to_string()).to_string(),
        "View creation failed: oom"
    );
    assert_eq!(ContentError::UnknownWindow(WindowId(3)).to_string(), "Unknown window: 3");
}

// === SettingsError / PersistenceError Tests ===

#[test]
fn settings_error_display_variants() {
    assert_eq!(
        SettingsError::IoError("denied".to_string()).to_string(),
        "Settings I/O error: denied"
    );
    assert_eq!(
        SettingsError::SerializationError("bad json".to_string()).to_string(),
        "Settings serialization error: bad json"
    );
}

#[test]
fn persistence_error_display() {
    assert_eq!(
        PersistenceError::SerializationError("eof".to_string()).to_string(),
        "Persisted state serialization error: eof"
    );
}
