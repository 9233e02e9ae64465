//! Artillery module - ammunition, firing, bomb fuses and blasts.

mod components;
mod detonation;
mod effects;
mod firing;
mod plugin;

pub use components::*;
pub use detonation::*;
pub use effects::{Debris, ExplosionFlash};
pub use firing::*;
pub use plugin::ArtilleryPlugin;
