//! Removal of bodies that left the playfield.

use bevy::prelude::*;

use crate::artillery::Projectile;
use crate::core::{EnemyKilledEvent, GameConfig, KillCause};
use crate::enemies::Enemy;
use crate::world::Brick;

/// Despawn stray projectiles and bricks; report stray enemies as killed.
pub fn cull_out_of_bounds(
    mut commands: Commands,
    config: Res<GameConfig>,
    projectiles: Query<(Entity, &Transform), With<Projectile>>,
    enemies: Query<(Entity, &Transform), With<Enemy>>,
    bricks: Query<(Entity, &Transform), With<Brick>>,
    mut kill_events: EventWriter<EnemyKilledEvent>,
) {
    let bounds = &config.bounds;

    for (entity, transform) in projectiles.iter() {
        if !bounds.projectiles.contains(transform.translation) {
            debug!("Projectile {:?} left the field", entity);
            commands.entity(entity).despawn_recursive();
        }
    }

    for (entity, transform) in enemies.iter() {
        if !bounds.enemies.contains(transform.translation) {
            kill_events.send(EnemyKilledEvent {
                enemy: entity,
                position: transform.translation,
                cause: KillCause::OutOfBounds,
            });
        }
    }

    for (entity, transform) in bricks.iter() {
        if !bounds.bricks.contains(transform.translation) {
            commands.entity(entity).despawn_recursive();
        }
    }
}
