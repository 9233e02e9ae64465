//! Rigid-body creation on top of Rapier.
//!
//! Every interactive object goes through [`attach_body`], which picks the
//! material settings for static or dynamic bodies and degrades to a
//! visual-only object when no physics world is available.

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

use crate::artillery::ProjectileKind;
use crate::core::PhysicsConfig;

/// Collision shape of a body.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BodyShape {
    Cuboid { half_extents: Vec3 },
    Ball { radius: f32 },
}

impl BodyShape {
    fn collider(&self) -> Collider {
        match *self {
            BodyShape::Cuboid { half_extents } => {
                Collider::cuboid(half_extents.x, half_extents.y, half_extents.z)
            }
            BodyShape::Ball { radius } => Collider::ball(radius),
        }
    }
}

/// Everything needed to give an entity a rigid body.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodySpec {
    pub shape: BodyShape,
    /// Zero means a static body.
    pub mass: f32,
    pub velocity: Vec3,
    /// Start with heavy damping so stacked structures come to rest.
    pub settle_damping: bool,
    /// Continuous collision detection for fast bodies.
    pub ccd: bool,
}

impl BodySpec {
    pub fn fixed(shape: BodyShape) -> Self {
        Self {
            shape,
            mass: 0.0,
            velocity: Vec3::ZERO,
            settle_damping: false,
            ccd: false,
        }
    }

    pub fn dynamic(shape: BodyShape, mass: f32) -> Self {
        Self {
            mass,
            ..Self::fixed(shape)
        }
    }

    /// A launched rock or bomb.
    pub fn projectile(kind: ProjectileKind, velocity: Vec3) -> Self {
        Self {
            velocity,
            ccd: true,
            ..Self::dynamic(BodyShape::Ball { radius: kind.radius() }, kind.mass())
        }
    }

    pub fn is_static(&self) -> bool {
        self.mass <= 0.0
    }
}

/// Whether bodies are simulated by Rapier or only drawn.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PhysicsMode {
    #[default]
    Simulated,
    /// No physics world: objects are placed but never simulated.
    VisualOnly,
}

/// Gameplay contact radius used by the distance sweep.
///
/// This is independent from the Rapier collider: contacts are judged on
/// centre distance against the sum of two radii.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct CollisionRadius(pub f32);

/// What a tracked body represents, for picking its contact radius.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyRole {
    Enemy,
    Projectile(ProjectileKind),
    Brick,
    Other,
}

/// Contact radius for each kind of tracked body.
pub fn collision_radius_for(role: BodyRole) -> CollisionRadius {
    let radius = match role {
        BodyRole::Enemy => 0.5,
        BodyRole::Projectile(ProjectileKind::Rock) => 0.35,
        BodyRole::Projectile(ProjectileKind::Bomb) => 0.45,
        // Half-diagonal of a 1.2 x 0.6 x 0.6 brick, the same either way up
        BodyRole::Brick => (0.3f32 * 0.3 + 0.6 * 0.6 + 0.3 * 0.3).sqrt(),
        BodyRole::Other => 0.5,
    };
    CollisionRadius(radius)
}

/// Straight-line flight for projectiles when there is no physics world.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Ballistic {
    pub velocity: Vec3,
    pub radius: f32,
}

/// Give `entity` a rigid body described by `spec`.
///
/// In visual-only mode nothing is simulated; a moving body gets a
/// [`Ballistic`] component instead so shots still fly.
pub fn attach_body(
    entity: &mut EntityCommands,
    spec: &BodySpec,
    config: &PhysicsConfig,
    mode: PhysicsMode,
) {
    if mode == PhysicsMode::VisualOnly {
        if spec.velocity != Vec3::ZERO {
            let radius = match spec.shape {
                BodyShape::Ball { radius } => radius,
                BodyShape::Cuboid { half_extents } => half_extents.y,
            };
            entity.insert(Ballistic {
                velocity: spec.velocity,
                radius,
            });
        }
        return;
    }

    if spec.is_static() {
        entity.insert((
            RigidBody::Fixed,
            spec.shape.collider(),
            Friction::coefficient(config.static_friction),
            Restitution::coefficient(config.static_restitution),
        ));
        return;
    }

    let damping = if spec.settle_damping {
        config.settle_damping
    } else {
        0.0
    };

    entity.insert((
        RigidBody::Dynamic,
        spec.shape.collider(),
        ColliderMassProperties::Mass(spec.mass),
        Friction::coefficient(config.dynamic_friction),
        Restitution::coefficient(config.dynamic_restitution),
        Velocity::linear(spec.velocity),
        ExternalImpulse::default(),
        Damping {
            linear_damping: damping,
            angular_damping: damping,
        },
        // Bodies never deactivate, so a late blast still moves them
        Sleeping::disabled(),
    ));

    if spec.ccd {
        entity.insert(Ccd::enabled());
    }
}

/// Advance visual-only projectiles under gravity until they land.
pub fn integrate_ballistic(
    time: Res<Time>,
    config: Res<crate::core::GameConfig>,
    mut query: Query<(&mut Transform, &mut Ballistic)>,
) {
    let dt = time.delta_secs();
    let gravity = config.ballistics.gravity;

    for (mut transform, mut ballistic) in query.iter_mut() {
        if ballistic.velocity == Vec3::ZERO {
            continue;
        }
        transform.translation += ballistic.velocity * dt;
        ballistic.velocity.y -= gravity * dt;

        if transform.translation.y <= ballistic.radius {
            transform.translation.y = ballistic.radius;
            ballistic.velocity = Vec3::ZERO;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn radii_follow_body_role() {
        assert_eq!(collision_radius_for(BodyRole::Enemy).0, 0.5);
        assert_eq!(collision_radius_for(BodyRole::Projectile(ProjectileKind::Rock)).0, 0.35);
        assert_eq!(collision_radius_for(BodyRole::Projectile(ProjectileKind::Bomb)).0, 0.45);
        assert!((collision_radius_for(BodyRole::Brick).0 - 0.7348).abs() < 1e-3);
        assert_eq!(collision_radius_for(BodyRole::Other).0, 0.5);
    }

    #[test]
    fn projectile_spec_is_fast_dynamic_ball() {
        let spec = BodySpec::projectile(ProjectileKind::Bomb, Vec3::new(0.0, 3.0, 20.0));
        assert!(!spec.is_static());
        assert!(spec.ccd);
        assert_eq!(spec.mass, 0.8);
        assert_eq!(spec.shape, BodyShape::Ball { radius: 0.4 });
    }

    #[test]
    fn fixed_spec_is_static() {
        let spec = BodySpec::fixed(BodyShape::Cuboid { half_extents: Vec3::splat(1.0) });
        assert!(spec.is_static());
    }
}
