//! Cannon module - aim state, launch ballistics and the cannon model.

mod ballistics;
mod components;
mod controls;
mod model;
mod plugin;

pub use ballistics::*;
pub use components::*;
pub use model::spawn_cannon;
pub use plugin::CannonPlugin;
