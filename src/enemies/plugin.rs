//! Enemy plugin - removal of defeated enemies and victory detection.

use bevy::prelude::*;

use super::components::EnemyTally;
use super::systems::{apply_kills, check_victory};
use crate::core::{GameState, GameplaySet, PlayState};

/// Enemy plugin - handles enemy removal and win detection.
pub struct EnemyPlugin;

impl Plugin for EnemyPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<EnemyTally>()
            .add_systems(
                Update,
                apply_kills
                    .in_set(GameplaySet::Resolution)
                    .run_if(in_state(GameState::InGame)),
            )
            .add_systems(
                Update,
                check_victory
                    .after(apply_kills)
                    .in_set(GameplaySet::Resolution)
                    .run_if(in_state(PlayState::Aiming)),
            );
    }
}
