//! User interface - HUD, menus and result dialogs.

pub mod hud;
mod plugin;

pub use plugin::{completion_summary, schedule_next_level, UiPlugin};
