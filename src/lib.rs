//! Tab and window state for a multi-window browser host.
//!
//! The stores in [`state`] are pure functions over immutable snapshots. The
//! [`browser`] layer drives the content host behind [`content`] and feeds
//! lifecycle changes back into the stores through the [`app::App`] queue.

pub mod actions;
pub mod app;
pub mod browser;
pub mod content;
pub mod state;
pub mod types;
