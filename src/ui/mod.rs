//! GUI panels and application state.

pub mod app;
pub mod components;
pub mod create_panel;
pub mod list_panel;

pub use app::App;
