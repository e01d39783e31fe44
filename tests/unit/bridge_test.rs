use std::sync::Arc;

use tabstate::app::App;
use tabstate::content::memory::{MemoryHost, MemoryView};
use tabstate::content::{ContentHost, ContentView, ViewEvent, ViewSettings};
use tabstate::state::tab_state;
use tabstate::types::identity::WindowId;
use tabstate::types::settings::TabSettings;
use tabstate::types::state::AppState;
use tabstate::types::tab::TabStatus;

fn setup() -> (Arc<MemoryHost>, App) {
    let host = Arc::new(MemoryHost::new());
    host.add_window(WindowId(1));
    host.focus_window(Some(WindowId(1)));
    let app = App::initialize(host.clone(), TabSettings::default(), AppState::new());
    (host, app)
}

fn guest_view(host: &MemoryHost) -> Arc<MemoryView> {
    let view = host
        .create_view(ViewSettings {
            is_guest: true,
            embedder: Some(WindowId(1)),
            ..ViewSettings::default()
        })
        .unwrap();
    host.view(view.id()).unwrap()
}

async fn settle_watchers() {
    for _ in 0..3 {
        tokio::task::yield_now().await;
    }
}

#[tokio::test]
async fn test_new_view_is_recorded_with_uuid() {
    let (host, mut app) = setup();
    let view = guest_view(&host);
    app.run_until_idle().await;

    let tab = tab_state::get_by_tab_id(app.state(), view.id()).unwrap();
    assert!(tab.uuid.is_some());
    assert_eq!(tab.incognito, Some(false));
    assert_eq!(tab.history, Some(Vec::new()));
    assert!(app.registry().contains(view.id()));
}

#[tokio::test]
async fn test_background_pages_are_not_tabs() {
    let (host, mut app) = setup();
    let page = host.create_background_page(WindowId(1));
    app.run_until_idle().await;

    assert!(app.state().tabs().is_empty());
    assert!(!app.registry().contains(page.id()));
}

#[tokio::test]
async fn test_views_without_embedder_are_not_tabs() {
    let (host, mut app) = setup();
    host.create_view(ViewSettings::default()).unwrap();
    app.run_until_idle().await;

    assert!(app.state().tabs().is_empty());
    assert!(app.registry().is_empty());
}

#[tokio::test]
async fn test_title_update_refreshes_record() {
    let (host, mut app) = setup();
    let view = guest_view(&host);
    app.run_until_idle().await;

    view.emit(ViewEvent::TitleUpdated("Docs".to_string()));
    app.run_until_idle().await;

    let tab = tab_state::get_by_tab_id(app.state(), view.id()).unwrap();
    assert_eq!(tab.title.as_deref(), Some("Docs"));
}

#[tokio::test]
async fn test_only_main_frame_load_start_refreshes() {
    let (host, mut app) = setup();
    let view = guest_view(&host);
    app.run_until_idle().await;

    view.emit(ViewEvent::LoadStart {
        url: "https://ads.test/frame".to_string(),
        is_main_frame: false,
        is_error_page: false,
    });
    settle_watchers().await;
    assert_eq!(app.drain_pending(), 0);

    view.emit(ViewEvent::LoadStart {
        url: "https://example.com/".to_string(),
        is_main_frame: true,
        is_error_page: false,
    });
    settle_watchers().await;
    assert_eq!(app.drain_pending(), 1);

    let tab = tab_state::get_by_tab_id(app.state(), view.id()).unwrap();
    assert_eq!(tab.url.as_deref(), Some("https://example.com/"));
    assert_eq!(tab.status, Some(TabStatus::Loading));
}

#[tokio::test]
async fn test_finish_load_marks_complete() {
    let (host, mut app) = setup();
    let view = guest_view(&host);
    view.emit(ViewEvent::DidNavigate("https://example.com/".to_string()));
    view.emit(ViewEvent::DidFinishLoad);
    app.run_until_idle().await;

    let tab = tab_state::get_by_tab_id(app.state(), view.id()).unwrap();
    assert_eq!(tab.status, Some(TabStatus::Complete));
    assert_eq!(tab.url.as_deref(), Some("https://example.com/"));
}

#[tokio::test]
async fn test_favicon_update_writes_first_url_back() {
    let (host, mut app) = setup();
    let view = guest_view(&host);
    view.emit(ViewEvent::FaviconUpdated(vec![
        "https://example.com/a.ico".to_string(),
        "https://example.com/b.ico".to_string(),
    ]));
    app.run_until_idle().await;

    let tab = tab_state::get_by_tab_id(app.state(), view.id()).unwrap();
    assert_eq!(tab.favicon_url.as_deref(), Some("https://example.com/a.ico"));
    assert_eq!(view.snapshot().favicon_url.as_deref(), Some("https://example.com/a.ico"));
}

#[tokio::test]
async fn test_empty_favicon_list_is_ignored() {
    let (host, mut app) = setup();
    let view = guest_view(&host);
    app.run_until_idle().await;

    view.emit(ViewEvent::FaviconUpdated(Vec::new()));
    settle_watchers().await;
    assert_eq!(app.drain_pending(), 0);
}

#[tokio::test]
async fn test_set_active_moves_active_pointer() {
    let (host, mut app) = setup();
    let first = guest_view(&host);
    let second = guest_view(&host);

    first.emit(ViewEvent::SetActive(true));
    app.run_until_idle().await;
    assert_eq!(app.registry().active_tab_id(), Some(first.id()));

    first.emit(ViewEvent::SetActive(false));
    second.emit(ViewEvent::SetActive(true));
    app.run_until_idle().await;
    assert_eq!(app.registry().active_tab_id(), Some(second.id()));
    let tab = tab_state::get_by_tab_id(app.state(), first.id()).unwrap();
    assert_eq!(tab.active, Some(false));
}

#[tokio::test]
async fn test_destroyed_view_is_removed() {
    let (host, mut app) = setup();
    let view = guest_view(&host);
    view.emit(ViewEvent::SetActive(true));
    app.run_until_idle().await;

    view.destroy();
    app.run_until_idle().await;

    assert!(tab_state::get_by_tab_id(app.state(), view.id()).is_none());
    assert!(!app.registry().contains(view.id()));
    assert!(app.registry().active().is_none());
}

#[tokio::test]
async fn test_crashed_view_is_removed() {
    let (host, mut app) = setup();
    let keep = guest_view(&host);
    let crash = guest_view(&host);
    app.run_until_idle().await;

    crash.emit(ViewEvent::Crashed);
    app.run_until_idle().await;

    let ids: Vec<_> = app.state().tabs().iter().filter_map(|t| t.tab_id).collect();
    assert_eq!(ids, vec![keep.id()]);
    assert_eq!(app.registry().len(), 1);
}

#[tokio::test]
async fn test_repeated_signal_does_not_change_state() {
    let (host, mut app) = setup();
    let view = guest_view(&host);
    view.emit(ViewEvent::TitleUpdated("Same".to_string()));
    app.run_until_idle().await;
    let before = app.state().clone();

    view.emit(ViewEvent::TitleUpdated("Same".to_string()));
    app.run_until_idle().await;

    assert_eq!(app.state(), &before);
    assert!(app.state().shares_tabs_with(&before));
}

#[tokio::test]
async fn test_shutdown_stops_observing() {
    let (host, mut app) = setup();
    let view = guest_view(&host);
    app.run_until_idle().await;
    assert_eq!(app.registry().len(), 1);

    app.shutdown();
    assert!(app.registry().is_empty());

    view.emit(ViewEvent::TitleUpdated("after".to_string()));
    guest_view(&host);
    app.run_until_idle().await;

    assert_eq!(app.state().tabs().len(), 1);
    assert!(app.state().tabs()[0].title.is_none());
    // Idempotent.
    app.shutdown();
}

#[tokio::test]
async fn test_signal_burst_is_applied_in_full() {
    let (host, mut app) = setup();
    let view = guest_view(&host);
    app.run_until_idle().await;

    for i in 0..200 {
        view.emit(ViewEvent::TitleUpdated(format!("title {i}")));
    }
    view.emit(ViewEvent::TitleUpdated("final".to_string()));
    app.run_until_idle().await;

    let tab = tab_state::get_by_tab_id(app.state(), view.id()).unwrap();
    assert_eq!(tab.title.as_deref(), Some("final"));

    view.destroy();
    app.run_until_idle().await;
    assert!(tab_state::get_by_tab_id(app.state(), view.id()).is_none());
    assert!(!app.registry().contains(view.id()));
}
