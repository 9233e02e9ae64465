//! Rendering plugin - camera, sky and the aim preview.

use bevy::prelude::*;

use super::camera::{
    follow_cannon, orbit_camera, reset_to_overview, spawn_camera, toggle_camera_mode, CameraMode,
    OrbitRig,
};
use super::trajectory::draw_trajectory_preview;
use super::visual_config::load_visual_config;
use crate::core::{GameState, PlayState};

pub struct RenderingPlugin;

impl Plugin for RenderingPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<CameraMode>()
            .init_resource::<OrbitRig>()
            .add_systems(Startup, (load_visual_config, spawn_camera).chain())
            .add_systems(OnEnter(GameState::MainMenu), reset_to_overview)
            .add_systems(
                Update,
                (toggle_camera_mode, follow_cannon, orbit_camera)
                    .chain()
                    .run_if(in_state(GameState::InGame)),
            )
            .add_systems(
                Update,
                draw_trajectory_preview.run_if(in_state(PlayState::Aiming)),
            );
    }
}
