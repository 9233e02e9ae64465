//! Cannon Siege - Entry Point
//!
//! Controls:
//! - Arrows: Elevation and heading
//! - Q / A: Power
//! - F: Switch rock / bomb
//! - Space: Fire
//! - V: Toggle camera
//! - R: Restart level
//! - Escape: Pause/Unpause

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

fn main() {
    App::new()
        // Bevy default plugins
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Cannon Siege".to_string(),
                resolution: (1280.0, 720.0).into(),
                ..default()
            }),
            ..default()
        }))

        // Physics
        .add_plugins(RapierPhysicsPlugin::<NoUserData>::default())

        // Our game plugin
        .add_plugins(cannon_siege::CannonSiegePlugin)

        .run();
}
