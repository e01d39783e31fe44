// Shared type definitions
// Each submodule defines types used across the stores, the content host seam and the browser layer.

pub mod create;
pub mod errors;
pub mod identity;
pub mod session;
pub mod settings;
pub mod state;
pub mod tab;
pub mod window;
