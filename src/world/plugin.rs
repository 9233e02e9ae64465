//! World plugin - level loading, rebuilding and teardown.

use bevy::prelude::*;
use bevy_rapier3d::prelude::RapierContext;

use crate::artillery::{Ammo, AmmoUsed, LevelClock, OutOfAmmoWatch};
use crate::core::{
    DelayedTransition, GameConfig, GameState, GameplaySet, PlayState, StartLevelEvent,
};
use crate::enemies::EnemyTally;
use crate::physics::{PhysicsMode, Settling};
use crate::rendering::VisualConfig;

use super::builder::{build_level, LevelEntity};
use super::data::{load_level_definitions, CurrentLevel, LevelRegistry};

/// World plugin - handles level loading and world setup.
pub struct WorldPlugin;

impl Plugin for WorldPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, load_level_definitions)
            .add_systems(OnEnter(GameState::InGame), request_current_level)
            .add_systems(
                Update,
                load_level
                    .before(GameplaySet::Input)
                    .run_if(in_state(GameState::InGame)),
            )
            .add_systems(OnExit(GameState::InGame), cleanup_level);
    }
}

/// Ask for the current level to be built when gameplay starts.
pub fn request_current_level(
    current: Res<CurrentLevel>,
    mut start_events: EventWriter<StartLevelEvent>,
) {
    start_events.send(StartLevelEvent {
        index: current.index,
    });
}

/// Tear down whatever level is loaded and build the requested one.
///
/// Every per-level resource is reset here, and any pending delayed
/// transition is dropped, so nothing from the previous level survives.
#[allow(clippy::too_many_arguments)]
pub fn load_level(
    mut commands: Commands,
    mut start_events: EventReader<StartLevelEvent>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    registry: Res<LevelRegistry>,
    mut current: ResMut<CurrentLevel>,
    config: Res<GameConfig>,
    visual_config: Res<VisualConfig>,
    time: Res<Time>,
    level_query: Query<Entity, With<LevelEntity>>,
    rapier_contexts: Query<(), With<RapierContext>>,
    mut delayed: ResMut<DelayedTransition>,
    mut next_play_state: ResMut<NextState<PlayState>>,
) {
    // Several requests in one frame collapse into the last
    let Some(request) = start_events.read().last().copied() else {
        return;
    };

    let Some(level) = registry.get(request.index) else {
        error!(
            "Level {} not found ({} loaded)",
            request.index,
            registry.len()
        );
        return;
    };

    for entity in level_query.iter() {
        commands.entity(entity).despawn_recursive();
    }
    delayed.cancel();

    let mode = if config.physics.enabled && !rapier_contexts.is_empty() {
        PhysicsMode::Simulated
    } else {
        PhysicsMode::VisualOnly
    };
    if mode == PhysicsMode::VisualOnly {
        warn!("Physics unavailable, level {} runs visual-only", level.name);
    }

    info!(
        "Building level {} ({}): {}",
        request.index + 1,
        level.difficulty,
        level.description
    );

    let summary = build_level(
        &mut commands,
        &mut meshes,
        &mut materials,
        level,
        &config,
        &visual_config,
        mode,
    );
    info!(
        "Level ready: {} bricks ({} movable), {} enemies",
        summary.bricks,
        level.movable_bricks(),
        summary.enemies
    );

    current.index = request.index;
    commands.insert_resource(mode);
    commands.insert_resource(Ammo::new(level.ammo.rock, level.ammo.bomb));
    commands.insert_resource(AmmoUsed::default());
    commands.insert_resource(OutOfAmmoWatch::default());
    commands.insert_resource(LevelClock {
        started_at: time.elapsed_secs(),
    });
    commands.insert_resource(EnemyTally {
        spawned: summary.enemies as u32,
        killed: 0,
    });
    commands.insert_resource(Settling::begin(&config.physics));
    next_play_state.set(PlayState::Settling);
}

/// Clean up level entities when leaving InGame state.
fn cleanup_level(
    mut commands: Commands,
    level_query: Query<Entity, With<LevelEntity>>,
    mut delayed: ResMut<DelayedTransition>,
) {
    for entity in level_query.iter() {
        commands.entity(entity).despawn_recursive();
    }
    delayed.cancel();
}
