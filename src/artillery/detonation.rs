//! Bomb arming, fuses and blasts.

use bevy::prelude::*;
use bevy_rapier3d::prelude::{ExternalImpulse, Velocity};

use super::components::{BombFuse, Projectile};
use crate::core::{BlastConfig, BombDetonatedEvent, EnemyKilledEvent, GameConfig, KillCause};
use crate::enemies::Enemy;
use crate::physics::Ballistic;

/// A body that may be affected by a blast.
#[derive(Debug, Clone, Copy)]
pub struct BlastTarget {
    pub entity: Entity,
    pub position: Vec3,
    pub is_enemy: bool,
    /// Only dynamic bodies are pushed.
    pub dynamic: bool,
}

/// Effects of one detonation.
#[derive(Debug, Default, PartialEq)]
pub struct BlastOutcome {
    pub impulses: Vec<(Entity, Vec3)>,
    pub killed: Vec<Entity>,
}

/// Work out impulses and kills for a blast at `center`.
///
/// Dynamic bodies strictly between `min_distance` and `radius` are pushed
/// away with `force * (1 - d / radius)`. Enemies closer than
/// `radius * kill_fraction` are destroyed.
pub fn compute_blast(center: Vec3, targets: &[BlastTarget], config: &BlastConfig) -> BlastOutcome {
    let mut outcome = BlastOutcome::default();
    let kill_radius = config.radius * config.kill_fraction;

    for target in targets {
        let offset = target.position - center;
        let distance = offset.length();

        if target.dynamic && distance > config.min_distance && distance < config.radius {
            let strength = config.force * (1.0 - distance / config.radius);
            outcome.impulses.push((target.entity, offset / distance * strength));
        }

        if target.is_enemy && distance < kill_radius {
            outcome.killed.push(target.entity);
        }
    }

    outcome
}

/// Arm falling bombs once they are close to the ground.
///
/// The bomb is snapped to its resting height and stopped so it sits where
/// it landed for the length of the fuse.
pub fn arm_grounded_bombs(
    config: Res<GameConfig>,
    mut bombs: Query<
        (&mut Transform, &mut BombFuse, Option<&mut Velocity>, Option<&mut Ballistic>),
        With<Projectile>,
    >,
) {
    let blast = &config.blast;

    for (mut transform, mut fuse, velocity, ballistic) in bombs.iter_mut() {
        if fuse.is_armed() || transform.translation.y >= blast.arm_height {
            continue;
        }

        fuse.arm(blast.fuse_seconds);
        transform.translation.y = blast.rest_height;
        if let Some(mut velocity) = velocity {
            *velocity = Velocity::zero();
        }
        if let Some(mut ballistic) = ballistic {
            ballistic.velocity = Vec3::ZERO;
        }
        debug!("Bomb armed at {:?}", transform.translation);
    }
}

/// Burn fuses down and detonate the bombs whose fuse ran out.
#[allow(clippy::type_complexity)]
pub fn tick_bomb_fuses(
    mut commands: Commands,
    time: Res<Time>,
    config: Res<GameConfig>,
    mut bombs: Query<(Entity, &Transform, &mut BombFuse)>,
    mut targets: Query<
        (Entity, &Transform, Has<Enemy>, Option<&mut ExternalImpulse>),
        (Or<(With<Enemy>, With<ExternalImpulse>)>, Without<BombFuse>),
    >,
    mut detonations: EventWriter<BombDetonatedEvent>,
    mut kill_events: EventWriter<EnemyKilledEvent>,
) {
    let mut exploded = Vec::new();
    for (entity, transform, mut fuse) in bombs.iter_mut() {
        if fuse.tick(time.delta()) {
            exploded.push((entity, transform.translation));
        }
    }

    for (bomb, center) in exploded {
        let snapshot: Vec<BlastTarget> = targets
            .iter()
            .map(|(entity, transform, is_enemy, impulse)| BlastTarget {
                entity,
                position: transform.translation,
                is_enemy,
                dynamic: impulse.is_some(),
            })
            .collect();

        let outcome = compute_blast(center, &snapshot, &config.blast);

        for (entity, impulse) in &outcome.impulses {
            if let Ok((_, _, _, Some(mut external))) = targets.get_mut(*entity) {
                external.impulse += *impulse;
            }
        }

        for enemy in &outcome.killed {
            let position = snapshot
                .iter()
                .find(|t| t.entity == *enemy)
                .map(|t| t.position)
                .unwrap_or(center);
            kill_events.send(EnemyKilledEvent {
                enemy: *enemy,
                position,
                cause: KillCause::Blast,
            });
        }

        info!(
            "Bomb exploded at {:.1?}: {} bodies pushed, {} enemies caught",
            center,
            outcome.impulses.len(),
            outcome.killed.len()
        );

        detonations.send(BombDetonatedEvent {
            position: center,
            radius: config.blast.radius,
        });
        commands.entity(bomb).despawn_recursive();
    }
}
