//! Distance-based contact detection between enemies, projectiles and bricks.
//!
//! Rapier handles the rigid-body response; gameplay consequences (kills,
//! arming bombs, knocking bricks away) come from a centre-distance sweep
//! run every frame. Detection and resolution are pure functions so each
//! body is consumed at most once per frame regardless of iteration order.

use bevy::prelude::*;
use bevy_rapier3d::prelude::{ExternalImpulse, Velocity};
use rand::Rng;
use std::collections::HashSet;

use super::bodies::{Ballistic, CollisionRadius};
use crate::artillery::{BombFuse, Projectile, ProjectileKind};
use crate::core::{EnemyKilledEvent, GameConfig, KillCause, PhysicsConfig};
use crate::enemies::Enemy;
use crate::world::{Brick, BrickKind};

/// Position snapshot of a body taking part in the sweep.
#[derive(Debug, Clone, Copy)]
pub struct Tracked {
    pub entity: Entity,
    pub position: Vec3,
    pub radius: f32,
}

#[derive(Debug, Clone, Copy)]
pub struct TrackedProjectile {
    pub body: Tracked,
    pub kind: ProjectileKind,
    pub armed: bool,
}

#[derive(Debug, Clone, Copy)]
pub struct TrackedBrick {
    pub body: Tracked,
    pub movable: bool,
    pub speed: f32,
}

/// A raw overlap found by [`sweep_contacts`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Contact {
    EnemyHit {
        enemy: Entity,
        projectile: Entity,
        kind: ProjectileKind,
    },
    EnemyCrushed {
        enemy: Entity,
        brick: Entity,
    },
    BombTouchedBrick {
        bomb: Entity,
    },
}

/// What the world should do about the contacts of one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ContactOutcome {
    KillEnemy { enemy: Entity, cause: KillCause },
    ConsumeProjectile(Entity),
    ArmBomb(Entity),
    KnockBrick(Entity),
}

fn touching(a: &Tracked, b: &Tracked, margin: f32) -> bool {
    a.position.distance(b.position) < a.radius + b.radius + margin
}

/// Find every overlap between tracked bodies.
///
/// - enemy and projectile within the sum of radii plus `projectile_margin`
/// - enemy and a movable brick moving faster than `brick_kill_speed`
///   within the sum of radii plus `brick_margin`
/// - an unarmed bomb and any brick within the sum of radii
pub fn sweep_contacts(
    enemies: &[Tracked],
    projectiles: &[TrackedProjectile],
    bricks: &[TrackedBrick],
    config: &PhysicsConfig,
) -> Vec<Contact> {
    let mut contacts = Vec::new();

    for enemy in enemies {
        for projectile in projectiles {
            if touching(enemy, &projectile.body, config.projectile_margin) {
                contacts.push(Contact::EnemyHit {
                    enemy: enemy.entity,
                    projectile: projectile.body.entity,
                    kind: projectile.kind,
                });
            }
        }

        for brick in bricks {
            if brick.movable
                && brick.speed > config.brick_kill_speed
                && touching(enemy, &brick.body, config.brick_margin)
            {
                contacts.push(Contact::EnemyCrushed {
                    enemy: enemy.entity,
                    brick: brick.body.entity,
                });
            }
        }
    }

    for projectile in projectiles {
        if projectile.kind != ProjectileKind::Bomb || projectile.armed {
            continue;
        }
        if bricks.iter().any(|brick| touching(&projectile.body, &brick.body, 0.0)) {
            contacts.push(Contact::BombTouchedBrick {
                bomb: projectile.body.entity,
            });
        }
    }

    contacts
}

/// Turn raw contacts into outcomes, applying each at most once.
///
/// A rock is spent on the first enemy it kills. A bomb is never spent by
/// a hit: it kills what it touches and starts its fuse.
pub fn resolve_contacts(contacts: &[Contact]) -> Vec<ContactOutcome> {
    let mut killed = HashSet::new();
    let mut consumed = HashSet::new();
    let mut armed = HashSet::new();
    let mut knocked = HashSet::new();
    let mut outcomes = Vec::new();

    for contact in contacts {
        match *contact {
            Contact::EnemyHit {
                enemy,
                projectile,
                kind,
            } => {
                if consumed.contains(&projectile) || killed.contains(&enemy) {
                    continue;
                }
                killed.insert(enemy);
                outcomes.push(ContactOutcome::KillEnemy {
                    enemy,
                    cause: KillCause::Projectile(kind),
                });
                match kind {
                    ProjectileKind::Rock => {
                        consumed.insert(projectile);
                        outcomes.push(ContactOutcome::ConsumeProjectile(projectile));
                    }
                    ProjectileKind::Bomb => {
                        if armed.insert(projectile) {
                            outcomes.push(ContactOutcome::ArmBomb(projectile));
                        }
                    }
                }
            }
            Contact::EnemyCrushed { enemy, brick } => {
                if !killed.insert(enemy) {
                    continue;
                }
                outcomes.push(ContactOutcome::KillEnemy {
                    enemy,
                    cause: KillCause::MovingBrick,
                });
                if knocked.insert(brick) {
                    outcomes.push(ContactOutcome::KnockBrick(brick));
                }
            }
            Contact::BombTouchedBrick { bomb } => {
                if armed.insert(bomb) {
                    outcomes.push(ContactOutcome::ArmBomb(bomb));
                }
            }
        }
    }

    outcomes
}

/// Random mostly-upward impulse for a brick that just crushed an enemy.
pub fn knock_impulse(rng: &mut impl Rng, magnitude: f32) -> Vec3 {
    let direction = Vec3::new(rng.gen_range(-1.0..1.0), 2.0, rng.gen_range(-1.0..1.0));
    direction.normalize() * magnitude
}

/// Run the sweep and apply its outcomes.
#[allow(clippy::type_complexity)]
pub fn detect_contacts(
    mut commands: Commands,
    config: Res<GameConfig>,
    enemies: Query<(Entity, &Transform, &CollisionRadius), With<Enemy>>,
    mut projectiles: Query<
        (
            Entity,
            &Transform,
            &CollisionRadius,
            &Projectile,
            Option<&mut BombFuse>,
            Option<&mut Velocity>,
            Option<&mut Ballistic>,
        ),
        Without<Brick>,
    >,
    bricks: Query<(Entity, &Transform, &CollisionRadius, &Brick, Option<&Velocity>), Without<Projectile>>,
    mut kill_events: EventWriter<EnemyKilledEvent>,
) {
    let tracked_enemies: Vec<Tracked> = enemies
        .iter()
        .map(|(entity, transform, radius)| Tracked {
            entity,
            position: transform.translation,
            radius: radius.0,
        })
        .collect();

    if tracked_enemies.is_empty() && projectiles.is_empty() {
        return;
    }

    let tracked_projectiles: Vec<TrackedProjectile> = projectiles
        .iter()
        .map(|(entity, transform, radius, projectile, fuse, _, _)| TrackedProjectile {
            body: Tracked {
                entity,
                position: transform.translation,
                radius: radius.0,
            },
            kind: projectile.kind,
            armed: fuse.is_some_and(|f| f.is_armed()),
        })
        .collect();

    let tracked_bricks: Vec<TrackedBrick> = bricks
        .iter()
        .map(|(entity, transform, radius, brick, velocity)| TrackedBrick {
            body: Tracked {
                entity,
                position: transform.translation,
                radius: radius.0,
            },
            movable: brick.kind == BrickKind::Movable,
            speed: velocity.map_or(0.0, |v| v.linvel.length()),
        })
        .collect();

    let contacts = sweep_contacts(
        &tracked_enemies,
        &tracked_projectiles,
        &tracked_bricks,
        &config.physics,
    );
    if contacts.is_empty() {
        return;
    }

    let mut rng = rand::thread_rng();
    for outcome in resolve_contacts(&contacts) {
        match outcome {
            ContactOutcome::KillEnemy { enemy, cause } => {
                let position = enemies
                    .get(enemy)
                    .map(|(_, transform, _)| transform.translation)
                    .unwrap_or_default();
                kill_events.send(EnemyKilledEvent {
                    enemy,
                    position,
                    cause,
                });
            }
            ContactOutcome::ConsumeProjectile(entity) => {
                commands.entity(entity).despawn_recursive();
            }
            ContactOutcome::ArmBomb(entity) => {
                if let Ok((_, _, _, _, Some(mut fuse), velocity, ballistic)) =
                    projectiles.get_mut(entity)
                {
                    if fuse.arm(config.blast.fuse_seconds) {
                        debug!("Bomb {:?} armed on contact", entity);
                        if let Some(mut velocity) = velocity {
                            *velocity = Velocity::zero();
                        }
                        if let Some(mut ballistic) = ballistic {
                            ballistic.velocity = Vec3::ZERO;
                        }
                    }
                }
            }
            ContactOutcome::KnockBrick(entity) => {
                commands.entity(entity).insert(ExternalImpulse {
                    impulse: knock_impulse(&mut rng, config.physics.brick_knock_impulse),
                    torque_impulse: Vec3::ZERO,
                });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body(index: u32, position: Vec3, radius: f32) -> Tracked {
        Tracked {
            entity: Entity::from_raw(index),
            position,
            radius,
        }
    }

    fn rock(index: u32, position: Vec3) -> TrackedProjectile {
        TrackedProjectile {
            body: body(index, position, 0.35),
            kind: ProjectileKind::Rock,
            armed: false,
        }
    }

    fn bomb(index: u32, position: Vec3, armed: bool) -> TrackedProjectile {
        TrackedProjectile {
            body: body(index, position, 0.45),
            kind: ProjectileKind::Bomb,
            armed,
        }
    }

    fn brick(index: u32, position: Vec3, movable: bool, speed: f32) -> TrackedBrick {
        TrackedBrick {
            body: body(index, position, 0.735),
            movable,
            speed,
        }
    }

    #[test]
    fn rock_within_margin_hits_enemy() {
        let config = PhysicsConfig::default();
        let enemies = [body(1, Vec3::ZERO, 0.5)];
        // 0.5 + 0.35 + 0.2 = 1.05
        let near = [rock(2, Vec3::new(1.0, 0.0, 0.0))];
        let far = [rock(3, Vec3::new(1.1, 0.0, 0.0))];

        assert_eq!(sweep_contacts(&enemies, &near, &[], &config).len(), 1);
        assert!(sweep_contacts(&enemies, &far, &[], &config).is_empty());
    }

    #[test]
    fn slow_or_static_bricks_do_not_crush() {
        let config = PhysicsConfig::default();
        let enemies = [body(1, Vec3::ZERO, 0.5)];
        let bricks = [
            brick(2, Vec3::new(1.0, 0.0, 0.0), true, 1.5),
            brick(3, Vec3::new(-1.0, 0.0, 0.0), false, 10.0),
        ];
        assert!(sweep_contacts(&enemies, &[], &bricks, &config).is_empty());

        let fast = [brick(4, Vec3::new(1.0, 0.0, 0.0), true, 3.0)];
        assert_eq!(
            sweep_contacts(&enemies, &[], &fast, &config),
            vec![Contact::EnemyCrushed {
                enemy: Entity::from_raw(1),
                brick: Entity::from_raw(4),
            }]
        );
    }

    #[test]
    fn rock_is_spent_on_first_enemy() {
        let config = PhysicsConfig::default();
        let enemies = [
            body(1, Vec3::new(-0.4, 0.0, 0.0), 0.5),
            body(2, Vec3::new(0.4, 0.0, 0.0), 0.5),
        ];
        let projectiles = [rock(3, Vec3::ZERO)];

        let outcomes = resolve_contacts(&sweep_contacts(&enemies, &projectiles, &[], &config));
        let kills = outcomes
            .iter()
            .filter(|o| matches!(o, ContactOutcome::KillEnemy { .. }))
            .count();
        let consumed = outcomes
            .iter()
            .filter(|o| matches!(o, ContactOutcome::ConsumeProjectile(_)))
            .count();
        assert_eq!(kills, 1);
        assert_eq!(consumed, 1);
    }

    #[test]
    fn bomb_kills_everything_it_touches_and_arms_once() {
        let config = PhysicsConfig::default();
        let enemies = [
            body(1, Vec3::new(-0.4, 0.0, 0.0), 0.5),
            body(2, Vec3::new(0.4, 0.0, 0.0), 0.5),
        ];
        let projectiles = [bomb(3, Vec3::ZERO, false)];
        let bricks = [brick(4, Vec3::new(0.0, -0.9, 0.0), false, 0.0)];

        let outcomes = resolve_contacts(&sweep_contacts(&enemies, &projectiles, &bricks, &config));
        assert_eq!(
            outcomes,
            vec![
                ContactOutcome::KillEnemy {
                    enemy: Entity::from_raw(1),
                    cause: KillCause::Projectile(ProjectileKind::Bomb),
                },
                ContactOutcome::ArmBomb(Entity::from_raw(3)),
                ContactOutcome::KillEnemy {
                    enemy: Entity::from_raw(2),
                    cause: KillCause::Projectile(ProjectileKind::Bomb),
                },
            ]
        );
    }

    #[test]
    fn enemy_is_killed_once_when_hit_twice() {
        let contacts = [
            Contact::EnemyHit {
                enemy: Entity::from_raw(1),
                projectile: Entity::from_raw(2),
                kind: ProjectileKind::Rock,
            },
            Contact::EnemyCrushed {
                enemy: Entity::from_raw(1),
                brick: Entity::from_raw(3),
            },
        ];
        let outcomes = resolve_contacts(&contacts);
        assert_eq!(
            outcomes
                .iter()
                .filter(|o| matches!(o, ContactOutcome::KillEnemy { .. }))
                .count(),
            1
        );
        assert!(!outcomes.contains(&ContactOutcome::KnockBrick(Entity::from_raw(3))));
    }

    #[test]
    fn armed_bomb_ignores_bricks() {
        let config = PhysicsConfig::default();
        let bricks = [brick(2, Vec3::ZERO, true, 0.0)];
        assert!(sweep_contacts(&[], &[bomb(1, Vec3::ZERO, true)], &bricks, &config).is_empty());
        assert_eq!(
            sweep_contacts(&[], &[bomb(1, Vec3::ZERO, false)], &bricks, &config),
            vec![Contact::BombTouchedBrick { bomb: Entity::from_raw(1) }]
        );
    }

    #[test]
    fn knock_impulse_points_up_with_requested_size() {
        let mut rng = rand::thread_rng();
        // Steepest when x and z are both zero, shallowest at the corners
        let min_rise = 2.0 / 6.0_f32.sqrt();
        for _ in 0..200 {
            let impulse = knock_impulse(&mut rng, 8.0);
            assert!(impulse.y >= 8.0 * min_rise - 1e-3);
            assert!((impulse.length() - 8.0).abs() < 1e-3);
        }
    }
}
