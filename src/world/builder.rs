//! Level construction from data definitions.

use bevy::prelude::*;

use super::data::{BrickKind, BrickOrientation, LevelDefinition};
use super::materials::MaterialRegistry;
use super::scenery::{spawn_ground, spawn_mountains};
use crate::cannon::{spawn_cannon, CannonAim};
use crate::core::GameConfig;
use crate::enemies::{spawn_enemy, EnemyMeshes};
use crate::physics::{attach_body, collision_radius_for, BodyRole, BodyShape, BodySpec, PhysicsMode};
use crate::rendering::VisualConfig;

/// Marker for every entity that belongs to the loaded level.
#[derive(Component)]
pub struct LevelEntity;

/// A structural block.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Brick {
    pub kind: BrickKind,
    pub orientation: BrickOrientation,
}

/// What a level build produced.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LevelSummary {
    pub bricks: usize,
    pub enemies: usize,
}

/// Build a level from a level definition.
pub fn build_level(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    level: &LevelDefinition,
    config: &GameConfig,
    visual_config: &VisualConfig,
    mode: PhysicsMode,
) -> LevelSummary {
    let mat_registry = MaterialRegistry::new(materials);

    setup_environment(commands, visual_config);
    spawn_ground(commands, meshes, &mat_registry, config, mode);
    spawn_mountains(commands, meshes, &mat_registry);

    spawn_cannon(
        commands,
        meshes,
        &mat_registry,
        config,
        mode,
        CannonAim::from_config(&config.aim),
    );

    let bricks = spawn_bricks(commands, meshes, &mat_registry, level, config, mode);

    let enemy_meshes = EnemyMeshes::new(meshes);
    for enemy in &level.enemies {
        spawn_enemy(
            commands,
            &enemy_meshes,
            &mat_registry,
            config,
            mode,
            enemy.position(),
        );
    }

    LevelSummary {
        bricks,
        enemies: level.enemies.len(),
    }
}

/// Set up ambient light and the sun.
fn setup_environment(commands: &mut Commands, visual_config: &VisualConfig) {
    commands.insert_resource(AmbientLight {
        color: Color::srgb(
            visual_config.ambient_color.0,
            visual_config.ambient_color.1,
            visual_config.ambient_color.2,
        ),
        brightness: visual_config.ambient_brightness,
    });

    let sun = Vec3::new(
        visual_config.sun_position.0,
        visual_config.sun_position.1,
        visual_config.sun_position.2,
    );
    commands.spawn((
        DirectionalLight {
            illuminance: visual_config.sun_illuminance,
            shadows_enabled: visual_config.shadows,
            ..default()
        },
        Transform::from_translation(sun).looking_at(Vec3::ZERO, Vec3::Y),
        LevelEntity,
    ));
}

fn spawn_bricks(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    mat_registry: &MaterialRegistry,
    level: &LevelDefinition,
    config: &GameConfig,
    mode: PhysicsMode,
) -> usize {
    let horizontal = meshes.add(Cuboid::from_size(BrickOrientation::Horizontal.size()));
    let vertical = meshes.add(Cuboid::from_size(BrickOrientation::Vertical.size()));

    for def in &level.bricks {
        let orientation = def.orientation();
        let (mesh, size) = match orientation {
            BrickOrientation::Horizontal => (horizontal.clone(), BrickOrientation::Horizontal.size()),
            BrickOrientation::Vertical => (vertical.clone(), BrickOrientation::Vertical.size()),
        };
        let material = match def.kind {
            BrickKind::Movable => mat_registry.movable_brick.clone(),
            BrickKind::Immovable => mat_registry.immovable_brick.clone(),
        };

        let mut brick = commands.spawn((
            Brick {
                kind: def.kind,
                orientation,
            },
            collision_radius_for(BodyRole::Brick),
            Mesh3d(mesh),
            MeshMaterial3d(material),
            Transform::from_translation(def.position()),
            LevelEntity,
        ));

        let shape = BodyShape::Cuboid {
            half_extents: size / 2.0,
        };
        let spec = match def.kind {
            BrickKind::Immovable => BodySpec::fixed(shape),
            BrickKind::Movable => BodySpec {
                settle_damping: true,
                ..BodySpec::dynamic(shape, def.kind.mass())
            },
        };
        attach_body(&mut brick, &spec, &config.physics, mode);
    }

    level.bricks.len()
}
