//! Artillery plugin - firing, bombs and their effects.

use bevy::prelude::*;

use super::components::*;
use super::detonation::{arm_grounded_bombs, tick_bomb_fuses};
use super::effects::{
    animate_debris, animate_explosion_flashes, setup_effect_assets, spawn_enemy_debris,
    spawn_explosion_flashes,
};
use super::firing::{fire_projectile, watch_out_of_ammo};
use crate::core::{GameState, GameplaySet, PlayState};
use crate::physics::detect_contacts;

pub struct ArtilleryPlugin;

impl Plugin for ArtilleryPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<Ammo>()
            .init_resource::<AmmoUsed>()
            .init_resource::<LevelClock>()
            .init_resource::<OutOfAmmoWatch>()
            .add_systems(Startup, (setup_projectile_assets, setup_effect_assets))
            .add_systems(
                Update,
                fire_projectile
                    .in_set(GameplaySet::Input)
                    .run_if(in_state(PlayState::Aiming)),
            )
            .add_systems(
                Update,
                (arm_grounded_bombs, tick_bomb_fuses)
                    .chain()
                    .after(detect_contacts)
                    .in_set(GameplaySet::Simulation)
                    .run_if(in_state(PlayState::Aiming)),
            )
            .add_systems(
                Update,
                watch_out_of_ammo
                    .in_set(GameplaySet::Resolution)
                    .run_if(in_state(PlayState::Aiming)),
            )
            .add_systems(
                Update,
                (
                    spawn_explosion_flashes,
                    spawn_enemy_debris,
                    animate_explosion_flashes,
                    animate_debris,
                )
                    .run_if(in_state(GameState::InGame))
                    .run_if(not(in_state(PlayState::Paused))),
            );
    }
}

/// Create the shared rock and bomb meshes and materials.
fn setup_projectile_assets(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    commands.insert_resource(ProjectileAssets {
        rock_mesh: meshes.add(Sphere::new(ProjectileKind::Rock.radius())),
        bomb_mesh: meshes.add(Sphere::new(ProjectileKind::Bomb.radius())),
        rock_material: materials.add(StandardMaterial {
            base_color: Color::srgb(0.45, 0.43, 0.4),
            perceptual_roughness: 0.95,
            ..default()
        }),
        bomb_material: materials.add(StandardMaterial {
            base_color: Color::srgb(0.08, 0.08, 0.08),
            perceptual_roughness: 0.4,
            metallic: 0.6,
            ..default()
        }),
    });
}
