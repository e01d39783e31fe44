//! Console demo: drives the in-memory content host through a short session.

use std::path::PathBuf;
use std::sync::Arc;

use tabstate::actions::AppAction;
use tabstate::app::App;
use tabstate::content::memory::MemoryHost;
use tabstate::content::ViewEvent;
use tabstate::state::{persistence, tab_state};
use tabstate::types::create::CreateProperties;
use tabstate::types::identity::WindowId;
use tabstate::types::settings::TabSettings;
use tabstate::types::state::AppState;
use tabstate::types::window::WindowRecord;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let settings = match std::env::args().nth(1) {
        Some(path) => TabSettings::load_from(&PathBuf::from(path))?,
        None => TabSettings::default(),
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&settings.log_filter)),
        )
        .init();

    println!();
    println!("tabstate v{} demo", env!("CARGO_PKG_VERSION"));
    println!();

    let host = Arc::new(MemoryHost::new());
    let window = WindowId(1);
    host.add_window(window);
    host.focus_window(Some(window));

    let mut app = App::initialize(host.clone(), settings, AppState::new());
    app.dispatch(AppAction::WindowCreated {
        window_value: WindowRecord::with_id(window),
    });

    section("New tabs");
    app.dispatch(AppAction::NewTab {
        create_properties: CreateProperties::with_url("https://example.com"),
    });
    app.dispatch(AppAction::NewTab {
        create_properties: CreateProperties {
            active: Some(false),
            selected: Some(false),
            ..CreateProperties::with_url("https://example.org")
        },
    });
    app.run_until_idle().await;

    for tab_id in host.view_ids() {
        if let Some(view) = host.view(tab_id) {
            view.emit(ViewEvent::TitleUpdated(format!("Tab {}", tab_id)));
            view.emit(ViewEvent::DidFinishLoad);
        }
    }
    app.run_until_idle().await;
    print_tabs(&app);

    section("Close first tab");
    if let Some(first) = host.view_ids().first().copied() {
        app.dispatch(AppAction::CloseTab { tab_id: first });
    }
    app.run_until_idle().await;
    print_tabs(&app);

    section("Persisted snapshot");
    println!("{}", persistence::to_json(&app.persistent_state())?);

    app.shutdown();
    Ok(())
}

fn section(name: &str) {
    println!("--- {} ---", name);
}

fn print_tabs(app: &App) {
    for tab in tab_state::get_tabs(app.state()) {
        println!(
            "  tab {:?} uuid={} window={:?} url={} title={}",
            tab.tab_id,
            tab.uuid.as_deref().unwrap_or("-"),
            tab.window_uuid,
            tab.url.as_deref().unwrap_or("-"),
            tab.title.as_deref().unwrap_or("-"),
        );
    }
    println!();
}
