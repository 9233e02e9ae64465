//! Enemy removal and the victory check.

use bevy::prelude::*;
use std::collections::HashSet;

use super::components::{Enemy, EnemyTally};
use crate::core::{DelayedTransition, EnemyKilledEvent, GameConfig, PendingAction};

/// Despawn every enemy reported killed this frame, once each.
pub fn apply_kills(
    mut commands: Commands,
    mut kill_events: EventReader<EnemyKilledEvent>,
    enemies: Query<(), With<Enemy>>,
    mut tally: ResMut<EnemyTally>,
) {
    let mut removed = HashSet::new();

    for event in kill_events.read() {
        if enemies.get(event.enemy).is_err() || !removed.insert(event.enemy) {
            continue;
        }

        commands.entity(event.enemy).despawn_recursive();
        tally.killed += 1;
        info!(
            "Enemy down ({:?}), {} left",
            event.cause,
            tally.remaining()
        );
    }
}

/// Schedule the level complete dialog once no enemy is left.
pub fn check_victory(
    enemies: Query<(), With<Enemy>>,
    config: Res<GameConfig>,
    mut delayed: ResMut<DelayedTransition>,
) {
    if !enemies.is_empty() {
        return;
    }

    if delayed.schedule(PendingAction::CompleteLevel, config.timing.victory_delay) {
        info!("All enemies defeated");
    }
}
