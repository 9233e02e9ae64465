//! Cannon plugin - aiming controls and pose updates.

use bevy::prelude::*;

use super::controls::{restart_level, steer_cannon, sync_cannon_pose, toggle_projectile};
use crate::core::{GameState, GameplaySet, PlayState};

pub struct CannonPlugin;

impl Plugin for CannonPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            (steer_cannon, toggle_projectile, sync_cannon_pose)
                .chain()
                .in_set(GameplaySet::Input)
                .run_if(in_state(PlayState::Aiming)),
        )
        .add_systems(
            Update,
            restart_level
                .in_set(GameplaySet::Input)
                .run_if(in_state(GameState::InGame))
                .run_if(not(in_state(PlayState::Paused))),
        );
    }
}
