//! Physics plugin - Rapier integration, contacts, settling and bounds.

use bevy::prelude::*;
use bevy_rapier3d::prelude::RapierConfiguration;

use super::bodies::{integrate_ballistic, PhysicsMode};
use super::bounds::cull_out_of_bounds;
use super::contacts::detect_contacts;
use super::settle::run_settle_pass;
use crate::core::{GameConfig, GameplaySet, PlayState};

/// Physics plugin - expects `RapierPhysicsPlugin` to be added by the app.
///
/// Without a Rapier world every level runs visual-only.
pub struct PhysicsPlugin;

impl Plugin for PhysicsPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<PhysicsMode>()
            .add_systems(Update, sync_physics_activity)
            .add_systems(
                Update,
                run_settle_pass
                    .in_set(GameplaySet::Simulation)
                    .run_if(in_state(PlayState::Settling)),
            )
            .add_systems(
                Update,
                (integrate_ballistic, detect_contacts)
                    .chain()
                    .in_set(GameplaySet::Simulation)
                    .run_if(in_state(PlayState::Aiming)),
            )
            .add_systems(
                Update,
                cull_out_of_bounds
                    .after(detect_contacts)
                    .in_set(GameplaySet::Simulation)
                    .run_if(in_state(PlayState::Settling).or(in_state(PlayState::Aiming))),
            );
    }
}

/// Step the pipeline only while a level is live, with the configured gravity.
fn sync_physics_activity(
    play_state: Option<Res<State<PlayState>>>,
    config: Option<Res<GameConfig>>,
    mut rapier_config: Query<&mut RapierConfiguration>,
) {
    let active = play_state.is_some_and(|state| state.get().simulates());
    let gravity = config.map(|c| Vec3::NEG_Y * c.ballistics.gravity);

    for mut cfg in rapier_config.iter_mut() {
        if cfg.physics_pipeline_active != active {
            cfg.physics_pipeline_active = active;
        }
        if let Some(gravity) = gravity {
            if cfg.gravity != gravity {
                cfg.gravity = gravity;
            }
        }
    }
}
