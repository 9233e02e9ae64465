//! Cannon model: wooden carriage, two wheels and a pivoting iron barrel.

use bevy::prelude::*;
use std::f32::consts::FRAC_PI_2;

use super::ballistics::{barrel_rotation, cannon_origin, heading_rotation};
use super::components::{Cannon, CannonAim, CannonBarrel, CannonMuzzle};
use crate::core::GameConfig;
use crate::physics::{attach_body, BodyShape, BodySpec, PhysicsMode};
use crate::world::{LevelEntity, MaterialRegistry};

const CARRIAGE_SIZE: Vec3 = Vec3::new(1.0, 0.4, 1.2);
const WHEEL_RADIUS: f32 = 0.5;
const BARREL_RADIUS: f32 = 0.18;

/// Spawn the cannon at its configured position with the given aim.
pub fn spawn_cannon(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &MaterialRegistry,
    config: &GameConfig,
    mode: PhysicsMode,
    aim: CannonAim,
) -> Entity {
    let ballistics = &config.ballistics;
    let pivot = Vec3::new(
        ballistics.pivot_offset.0,
        ballistics.pivot_offset.1,
        ballistics.pivot_offset.2,
    );
    let barrel_length = ballistics.barrel_length;

    let carriage = meshes.add(Cuboid::from_size(CARRIAGE_SIZE));
    let wheel = meshes.add(Cylinder::new(WHEEL_RADIUS, 0.15));
    let barrel = meshes.add(Cylinder::new(BARREL_RADIUS, barrel_length + 0.15));
    let muzzle_ring = meshes.add(Cylinder::new(BARREL_RADIUS + 0.04, 0.1));

    let mut root = commands.spawn((
        Cannon,
        aim,
        Transform::from_translation(cannon_origin(ballistics))
            .with_rotation(heading_rotation(ballistics, &aim)),
        Visibility::default(),
        LevelEntity,
    ));

    // Only the carriage collides; the barrel would swallow fresh shots
    attach_body(
        &mut root,
        &BodySpec::fixed(BodyShape::Cuboid {
            half_extents: CARRIAGE_SIZE / 2.0,
        }),
        &config.physics,
        mode,
    );

    root.with_children(|parent| {
        parent.spawn((
            Mesh3d(carriage),
            MeshMaterial3d(materials.wood.clone()),
            Transform::default(),
        ));

        for side in [-1.0, 1.0] {
            parent.spawn((
                Mesh3d(wheel.clone()),
                MeshMaterial3d(materials.wood.clone()),
                Transform::from_xyz(side * (CARRIAGE_SIZE.x / 2.0 + 0.1), 0.0, 0.0)
                    .with_rotation(Quat::from_rotation_z(FRAC_PI_2)),
            ));
        }

        parent
            .spawn((
                CannonBarrel,
                Transform::from_translation(pivot).with_rotation(barrel_rotation(&aim)),
                Visibility::default(),
            ))
            .with_children(|pivot| {
                // Cylinders stand on Y; lay the barrel along +Z
                pivot.spawn((
                    Mesh3d(barrel),
                    MeshMaterial3d(materials.metal.clone()),
                    Transform::from_xyz(0.0, 0.0, (barrel_length - 0.15) / 2.0)
                        .with_rotation(Quat::from_rotation_x(FRAC_PI_2)),
                ));
                pivot.spawn((
                    CannonMuzzle,
                    Mesh3d(muzzle_ring),
                    MeshMaterial3d(materials.metal.clone()),
                    Transform::from_xyz(0.0, 0.0, barrel_length - 0.05)
                        .with_rotation(Quat::from_rotation_x(FRAC_PI_2)),
                ));
            });
    });

    root.id()
}
