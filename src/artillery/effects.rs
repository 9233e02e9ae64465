//! Short-lived visual effects: blast flashes and enemy debris.

use bevy::prelude::*;
use rand::Rng;
use std::collections::HashSet;

use crate::core::{BombDetonatedEvent, EnemyKilledEvent};
use crate::world::LevelEntity;

const FLASH_START_OPACITY: f32 = 0.7;
/// Opacity lost per second.
const FLASH_FADE_RATE: f32 = 6.0;
/// Scale gained per second.
const FLASH_GROWTH_RATE: f32 = 12.0;

const DEBRIS_COUNT: usize = 8;
const DEBRIS_RADIUS: f32 = 0.08;
const DEBRIS_SPEED: std::ops::Range<f32> = 1.5..3.0;
const DEBRIS_TIME_SCALE: f32 = 4.8;
const DEBRIS_FADE_RATE: f32 = 2.4;

/// Expanding, fading sphere left by a bomb.
#[derive(Component, Debug)]
pub struct ExplosionFlash {
    pub age: f32,
}

/// A fragment thrown off a destroyed enemy.
#[derive(Component, Debug)]
pub struct Debris {
    pub velocity: Vec3,
    pub life: f32,
}

/// Meshes and materials shared by the effects.
#[derive(Resource)]
pub struct EffectAssets {
    pub flash_mesh: Handle<Mesh>,
    pub debris_mesh: Handle<Mesh>,
    pub debris_material: Handle<StandardMaterial>,
}

pub fn setup_effect_assets(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    commands.insert_resource(EffectAssets {
        flash_mesh: meshes.add(Sphere::new(1.0)),
        debris_mesh: meshes.add(Sphere::new(DEBRIS_RADIUS)),
        debris_material: materials.add(StandardMaterial {
            base_color: Color::srgb(0.8, 0.15, 0.12),
            ..default()
        }),
    });
}

/// Random velocity for one debris fragment, in any direction.
pub fn debris_velocity(rng: &mut impl Rng) -> Vec3 {
    let direction = Vec3::new(
        rng.gen_range(-1.0..1.0),
        rng.gen_range(-1.0..1.0),
        rng.gen_range(-1.0..1.0),
    )
    .try_normalize()
    .unwrap_or(Vec3::Y);
    direction * rng.gen_range(DEBRIS_SPEED)
}

pub fn spawn_explosion_flashes(
    mut commands: Commands,
    mut detonations: EventReader<BombDetonatedEvent>,
    assets: Res<EffectAssets>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    for event in detonations.read() {
        // Each flash fades on its own, so it owns its material
        let material = materials.add(StandardMaterial {
            base_color: Color::srgba(1.0, 0.6, 0.1, FLASH_START_OPACITY),
            emissive: LinearRgba::rgb(4.0, 1.6, 0.2),
            alpha_mode: AlphaMode::Blend,
            unlit: true,
            ..default()
        });

        commands.spawn((
            ExplosionFlash { age: 0.0 },
            Mesh3d(assets.flash_mesh.clone()),
            MeshMaterial3d(material),
            Transform::from_translation(event.position),
            LevelEntity,
        ));
    }
}

pub fn animate_explosion_flashes(
    mut commands: Commands,
    time: Res<Time>,
    mut flashes: Query<(
        Entity,
        &mut ExplosionFlash,
        &mut Transform,
        &MeshMaterial3d<StandardMaterial>,
    )>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    for (entity, mut flash, mut transform, material) in flashes.iter_mut() {
        flash.age += time.delta_secs();

        let opacity = FLASH_START_OPACITY - FLASH_FADE_RATE * flash.age;
        if opacity <= 0.0 {
            materials.remove(&material.0);
            commands.entity(entity).despawn_recursive();
            continue;
        }

        transform.scale = Vec3::splat(1.0 + FLASH_GROWTH_RATE * flash.age);
        if let Some(material) = materials.get_mut(&material.0) {
            material.base_color.set_alpha(opacity);
        }
    }
}

pub fn spawn_enemy_debris(
    mut commands: Commands,
    mut kills: EventReader<EnemyKilledEvent>,
    assets: Res<EffectAssets>,
) {
    let mut rng = rand::thread_rng();
    let mut seen = HashSet::new();

    for event in kills.read() {
        if !seen.insert(event.enemy) {
            continue;
        }
        for _ in 0..DEBRIS_COUNT {
            commands.spawn((
                Debris {
                    velocity: debris_velocity(&mut rng),
                    life: 1.0,
                },
                Mesh3d(assets.debris_mesh.clone()),
                MeshMaterial3d(assets.debris_material.clone()),
                Transform::from_translation(event.position),
                LevelEntity,
            ));
        }
    }
}

pub fn animate_debris(
    mut commands: Commands,
    time: Res<Time>,
    mut debris: Query<(Entity, &mut Debris, &mut Transform)>,
) {
    let dt = time.delta_secs();

    for (entity, mut piece, mut transform) in debris.iter_mut() {
        transform.translation += piece.velocity * DEBRIS_TIME_SCALE * dt;
        piece.velocity.y -= DEBRIS_TIME_SCALE * dt;
        piece.life -= DEBRIS_FADE_RATE * dt;

        if piece.life <= 0.0 {
            commands.entity(entity).despawn_recursive();
        } else {
            transform.scale = Vec3::splat(piece.life);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debris_scatters_in_every_direction() {
        let mut rng = rand::thread_rng();
        let velocities: Vec<Vec3> = (0..200).map(|_| debris_velocity(&mut rng)).collect();

        for velocity in &velocities {
            let speed = velocity.length();
            assert!(speed > 1.5 - 1e-4 && speed < 3.0 + 1e-4);
        }
        assert!(velocities.iter().any(|v| v.y < 0.0));
        assert!(velocities.iter().any(|v| v.y > 0.0));
    }
}
