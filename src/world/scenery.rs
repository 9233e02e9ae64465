//! Ground slab and the decorative mountain ring.

use bevy::pbr::NotShadowCaster;
use bevy::prelude::*;
use rand::Rng;
use std::f32::consts::TAU;

use super::builder::LevelEntity;
use super::materials::MaterialRegistry;
use crate::core::GameConfig;
use crate::physics::{attach_body, BodyShape, BodySpec, PhysicsMode};

pub const GROUND_SIZE: f32 = 100.0;
const GROUND_DEPTH: f32 = 1.0;

const MOUNTAIN_COUNT: usize = 32;
const MOUNTAIN_RING: std::ops::Range<f32> = 150.0..200.0;

/// Marker for the playfield ground.
#[derive(Component)]
pub struct Ground;

/// Marker for scenery that never takes part in gameplay.
#[derive(Component)]
pub struct Decorative;

/// Spawn the ground as a static slab whose top face is at y = 0.
pub fn spawn_ground(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    mat_registry: &MaterialRegistry,
    config: &GameConfig,
    mode: PhysicsMode,
) {
    let size = Vec3::new(GROUND_SIZE, GROUND_DEPTH, GROUND_SIZE);

    let mut ground = commands.spawn((
        Ground,
        Mesh3d(meshes.add(Cuboid::from_size(size))),
        MeshMaterial3d(mat_registry.ground.clone()),
        Transform::from_xyz(0.0, -GROUND_DEPTH / 2.0, 0.0),
        LevelEntity,
    ));
    attach_body(
        &mut ground,
        &BodySpec::fixed(BodyShape::Cuboid {
            half_extents: size / 2.0,
        }),
        &config.physics,
        mode,
    );
}

/// Placement of one background mountain.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MountainPlacement {
    pub position: Vec3,
    pub radius: f32,
    pub height: f32,
}

/// Scatter mountains around the horizon, evenly spread by angle.
pub fn mountain_ring(rng: &mut impl Rng) -> Vec<MountainPlacement> {
    (0..MOUNTAIN_COUNT)
        .map(|i| {
            let angle = i as f32 / MOUNTAIN_COUNT as f32 * TAU + rng.gen_range(-0.08..0.08);
            let distance = rng.gen_range(MOUNTAIN_RING);
            MountainPlacement {
                position: Vec3::new(angle.cos() * distance, 0.0, angle.sin() * distance),
                radius: rng.gen_range(15.0..30.0),
                height: rng.gen_range(20.0..45.0),
            }
        })
        .collect()
}

/// Spawn snow-capped cones far beyond the playfield.
pub fn spawn_mountains(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    mat_registry: &MaterialRegistry,
) {
    let mut rng = rand::thread_rng();

    for placement in mountain_ring(&mut rng) {
        let height = placement.height;
        let radius = placement.radius;
        let cap_height = height * 0.32;

        commands
            .spawn((
                Decorative,
                Mesh3d(meshes.add(Cone::new(radius, height))),
                MeshMaterial3d(mat_registry.mountain.clone()),
                Transform::from_translation(placement.position + Vec3::Y * height / 2.0),
                NotShadowCaster,
                LevelEntity,
            ))
            .with_children(|mountain| {
                mountain.spawn((
                    Mesh3d(meshes.add(Cone::new(radius * 0.32, cap_height))),
                    MeshMaterial3d(mat_registry.snow.clone()),
                    Transform::from_xyz(0.0, height / 2.0 - cap_height / 2.0 + 0.05, 0.0),
                    NotShadowCaster,
                ));
            });
    }
}
