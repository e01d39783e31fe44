// Browser layer
// Drives the content host: registers guests, runs the creation protocol and
// keeps the stores in step with view lifecycle signals.

pub mod bridge;
pub mod creation;
pub mod registration;
pub mod tabs;
