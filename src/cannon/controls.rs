//! Keyboard control of the cannon.

use bevy::prelude::*;

use super::ballistics::{barrel_rotation, heading_rotation};
use super::components::{AimInput, Cannon, CannonAim, CannonBarrel};
use crate::core::{GameConfig, StartLevelEvent};
use crate::world::CurrentLevel;

/// Arrow keys turn and raise the barrel, Q and A change power.
pub fn steer_cannon(
    keyboard: Res<ButtonInput<KeyCode>>,
    time: Res<Time>,
    config: Res<GameConfig>,
    mut cannon_query: Query<&mut CannonAim, With<Cannon>>,
) {
    let input = AimInput::from_keyboard(&keyboard);
    if input.is_idle() {
        return;
    }

    for mut aim in cannon_query.iter_mut() {
        aim.apply(input, time.delta_secs(), &config.aim);
    }
}

/// F switches between rocks and bombs.
pub fn toggle_projectile(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut cannon_query: Query<&mut CannonAim, With<Cannon>>,
) {
    if !keyboard.just_pressed(KeyCode::KeyF) {
        return;
    }

    for mut aim in cannon_query.iter_mut() {
        aim.toggle_projectile();
        info!("Selected {}", aim.selected.label());
    }
}

/// R rebuilds the current level from scratch.
pub fn restart_level(
    keyboard: Res<ButtonInput<KeyCode>>,
    current: Res<CurrentLevel>,
    mut start_events: EventWriter<StartLevelEvent>,
) {
    if keyboard.just_pressed(KeyCode::KeyR) {
        info!("Restarting level {}", current.index + 1);
        start_events.send(StartLevelEvent {
            index: current.index,
        });
    }
}

/// Keep the model's rotation in step with the aim.
pub fn sync_cannon_pose(
    config: Res<GameConfig>,
    mut cannon_query: Query<(&CannonAim, &mut Transform), (With<Cannon>, Changed<CannonAim>)>,
    mut barrel_query: Query<(&Parent, &mut Transform), (With<CannonBarrel>, Without<Cannon>)>,
) {
    for (aim, mut transform) in cannon_query.iter_mut() {
        transform.rotation = heading_rotation(&config.ballistics, aim);
    }

    for (parent, mut transform) in barrel_query.iter_mut() {
        if let Ok((aim, _)) = cannon_query.get(parent.get()) {
            transform.rotation = barrel_rotation(aim);
        }
    }
}
