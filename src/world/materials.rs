//! Shared materials for level objects.

use bevy::prelude::*;

/// Material handles for everything a level builds.
///
/// Created once per level load and handed to every spawner, so identical
/// objects share one material.
pub struct MaterialRegistry {
    pub movable_brick: Handle<StandardMaterial>,
    pub immovable_brick: Handle<StandardMaterial>,
    pub enemy_body: Handle<StandardMaterial>,
    pub enemy_head: Handle<StandardMaterial>,
    pub wood: Handle<StandardMaterial>,
    pub metal: Handle<StandardMaterial>,
    pub ground: Handle<StandardMaterial>,
    pub mountain: Handle<StandardMaterial>,
    pub snow: Handle<StandardMaterial>,
}

impl MaterialRegistry {
    pub fn new(materials: &mut Assets<StandardMaterial>) -> Self {
        Self {
            // Brown clay brick
            movable_brick: materials.add(StandardMaterial {
                base_color: Color::srgb(0.55, 0.32, 0.16),
                perceptual_roughness: 0.85,
                ..default()
            }),
            // Grey stone block
            immovable_brick: materials.add(StandardMaterial {
                base_color: Color::srgb(0.5, 0.5, 0.52),
                perceptual_roughness: 0.9,
                ..default()
            }),
            enemy_body: materials.add(StandardMaterial {
                base_color: Color::srgb(0.8, 0.15, 0.12),
                perceptual_roughness: 0.6,
                ..default()
            }),
            enemy_head: materials.add(StandardMaterial {
                base_color: Color::srgb(0.96, 0.8, 0.64),
                perceptual_roughness: 0.7,
                ..default()
            }),
            wood: materials.add(StandardMaterial {
                base_color: Color::srgb(0.4, 0.26, 0.13),
                perceptual_roughness: 0.8,
                ..default()
            }),
            metal: materials.add(StandardMaterial {
                base_color: Color::srgb(0.2, 0.2, 0.22),
                perceptual_roughness: 0.35,
                metallic: 0.8,
                ..default()
            }),
            ground: materials.add(StandardMaterial {
                base_color: Color::srgb(0.3, 0.55, 0.25),
                perceptual_roughness: 1.0,
                ..default()
            }),
            mountain: materials.add(StandardMaterial {
                base_color: Color::srgb(0.42, 0.4, 0.38),
                perceptual_roughness: 1.0,
                ..default()
            }),
            snow: materials.add(StandardMaterial {
                base_color: Color::srgb(0.95, 0.95, 0.97),
                perceptual_roughness: 0.9,
                ..default()
            }),
        }
    }
}
