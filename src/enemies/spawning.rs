//! Enemy figures: a ball-shaped body carrying a simple humanoid model.

use bevy::prelude::*;
use std::f32::consts::{FRAC_PI_4, FRAC_PI_8};

use super::components::Enemy;
use crate::core::GameConfig;
use crate::physics::{attach_body, collision_radius_for, BodyRole, BodyShape, BodySpec, PhysicsMode};
use crate::world::{LevelEntity, MaterialRegistry};

/// Radius of the physics ball carrying the figure.
pub const ENEMY_BODY_RADIUS: f32 = 0.5;
const ENEMY_MASS: f32 = 1.0;

/// Meshes for the figure parts, shared by every enemy in a level.
pub struct EnemyMeshes {
    head: Handle<Mesh>,
    torso: Handle<Mesh>,
    arm: Handle<Mesh>,
    leg: Handle<Mesh>,
}

impl EnemyMeshes {
    pub fn new(meshes: &mut Assets<Mesh>) -> Self {
        Self {
            head: meshes.add(Sphere::new(0.3)),
            torso: meshes.add(Cylinder::new(0.15, 1.0)),
            arm: meshes.add(Cylinder::new(0.05, 0.8)),
            leg: meshes.add(Cylinder::new(0.08, 0.8)),
        }
    }
}

/// Spawn one enemy at `position`.
pub fn spawn_enemy(
    commands: &mut Commands,
    enemy_meshes: &EnemyMeshes,
    materials: &MaterialRegistry,
    config: &GameConfig,
    mode: PhysicsMode,
    position: Vec3,
) -> Entity {
    let mut enemy = commands.spawn((
        Enemy,
        collision_radius_for(BodyRole::Enemy),
        Transform::from_translation(position),
        Visibility::default(),
        LevelEntity,
    ));

    attach_body(
        &mut enemy,
        &BodySpec {
            settle_damping: true,
            ..BodySpec::dynamic(
                BodyShape::Ball {
                    radius: ENEMY_BODY_RADIUS,
                },
                ENEMY_MASS,
            )
        },
        &config.physics,
        mode,
    );

    enemy.with_children(|figure| {
        figure.spawn((
            Mesh3d(enemy_meshes.head.clone()),
            MeshMaterial3d(materials.enemy_head.clone()),
            Transform::from_xyz(0.0, 0.8, 0.0),
        ));
        figure.spawn((
            Mesh3d(enemy_meshes.torso.clone()),
            MeshMaterial3d(materials.enemy_body.clone()),
            Transform::from_xyz(0.0, 0.3, 0.0),
        ));

        for side in [-1.0, 1.0] {
            figure.spawn((
                Mesh3d(enemy_meshes.arm.clone()),
                MeshMaterial3d(materials.enemy_body.clone()),
                Transform::from_xyz(side * 0.4, 0.5, 0.0)
                    .with_rotation(Quat::from_rotation_z(side * FRAC_PI_4)),
            ));
            figure.spawn((
                Mesh3d(enemy_meshes.leg.clone()),
                MeshMaterial3d(materials.enemy_body.clone()),
                Transform::from_xyz(side * 0.15, -0.3, 0.0)
                    .with_rotation(Quat::from_rotation_z(side * FRAC_PI_8)),
            ));
        }
    });

    enemy.id()
}
