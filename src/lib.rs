//! Cannon Siege - a 3D artillery game in Bevy.
//!
//! Aim a cannon, fire rocks and bombs, and bring down brick structures
//! until every enemy figure is gone. Three levels of rising difficulty.
//!
//! # Architecture
//!
//! The game is organized into plugins, each handling a specific aspect:
//!
//! - **Core**: Game states, global events, config, delayed transitions
//! - **Cannon**: Aiming input, ballistics, the cannon model
//! - **Artillery**: Ammunition, firing, bomb fuses and blasts, effects
//! - **Physics**: Rapier body setup, contact sweep, settling, bounds
//! - **Enemies**: Enemy figures, kills and victory
//! - **World**: Level data, level building and scenery
//! - **Rendering**: Cameras, atmosphere, trajectory preview
//! - **UI**: HUD, menus and result dialogs
//! - **Audio**: Sound cues

pub mod artillery;
pub mod audio;
pub mod cannon;
pub mod core;
pub mod enemies;
pub mod physics;
pub mod rendering;
pub mod ui;
pub mod world;

use bevy::prelude::*;

/// Main game plugin that adds all sub-plugins.
///
/// Expects `RapierPhysicsPlugin` to be added by the app. Without it the
/// levels still load and run in visual-only mode.
pub struct CannonSiegePlugin;

impl Plugin for CannonSiegePlugin {
    fn build(&self, app: &mut App) {
        app
            // Core systems (must be first)
            .add_plugins(core::CorePlugin)

            // Gameplay
            .add_plugins(cannon::CannonPlugin)
            .add_plugins(artillery::ArtilleryPlugin)
            .add_plugins(physics::PhysicsPlugin)
            .add_plugins(enemies::EnemyPlugin)

            // World systems
            .add_plugins(world::WorldPlugin)

            // Presentation
            .add_plugins(rendering::RenderingPlugin)
            .add_plugins(ui::UiPlugin)
            .add_plugins(audio::SfxPlugin);
    }
}
