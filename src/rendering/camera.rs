//! The game camera: a chase view behind the cannon and a free orbit view.

use bevy::input::mouse::{MouseMotion, MouseScrollUnit, MouseWheel};
use bevy::pbr::{DistanceFog, FogFalloff};
use bevy::prelude::*;
use std::f32::consts::FRAC_PI_2;

use super::visual_config::VisualConfig;
use crate::cannon::{cannon_origin, heading_rotation, Cannon, CannonAim};
use crate::core::{BallisticsConfig, GameConfig};

/// Camera position relative to the cannon, in the cannon's frame.
const CHASE_OFFSET: Vec3 = Vec3::new(-5.0, 5.0, -10.0);
/// How far ahead of the cannon the chase camera looks.
const CHASE_LOOK_AHEAD: f32 = 15.0;

const ORBIT_START: Vec3 = Vec3::new(40.0, 60.0, 40.0);
const MIN_DISTANCE: f32 = 10.0;
const MAX_DISTANCE: f32 = 150.0;
const MIN_POLAR: f32 = 0.05;
const ORBIT_SENSITIVITY: f32 = 0.005;
const ZOOM_STEP: f32 = 4.0;

/// Which view is active; V toggles.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CameraMode {
    #[default]
    Cannon,
    Orbit,
}

impl CameraMode {
    pub fn toggled(self) -> Self {
        match self {
            CameraMode::Cannon => CameraMode::Orbit,
            CameraMode::Orbit => CameraMode::Cannon,
        }
    }
}

/// Marker for the single 3D camera.
#[derive(Component)]
pub struct MainCamera;

/// Spherical coordinates of the orbit camera around its target.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct OrbitRig {
    pub target: Vec3,
    /// Angle around +Y, measured from +Z toward +X.
    pub azimuth: f32,
    /// Angle down from +Y; never below the horizon.
    pub polar: f32,
    pub distance: f32,
}

impl Default for OrbitRig {
    fn default() -> Self {
        Self::from_position(ORBIT_START, Vec3::ZERO)
    }
}

impl OrbitRig {
    pub fn from_position(position: Vec3, target: Vec3) -> Self {
        let offset = position - target;
        let distance = offset.length().clamp(MIN_DISTANCE, MAX_DISTANCE);
        Self {
            target,
            azimuth: offset.x.atan2(offset.z),
            polar: (offset.y / offset.length().max(f32::EPSILON))
                .clamp(-1.0, 1.0)
                .acos()
                .clamp(MIN_POLAR, FRAC_PI_2),
            distance,
        }
    }

    pub fn position(&self) -> Vec3 {
        let (sin_polar, cos_polar) = self.polar.sin_cos();
        let (sin_az, cos_az) = self.azimuth.sin_cos();
        self.target + self.distance * Vec3::new(sin_polar * sin_az, cos_polar, sin_polar * cos_az)
    }

    /// Rotate by a mouse drag in pixels.
    pub fn orbit(&mut self, drag: Vec2) {
        self.azimuth -= drag.x * ORBIT_SENSITIVITY;
        self.polar = (self.polar - drag.y * ORBIT_SENSITIVITY).clamp(MIN_POLAR, FRAC_PI_2);
    }

    /// Move closer for positive `steps`.
    pub fn zoom(&mut self, steps: f32) {
        self.distance = (self.distance - steps * ZOOM_STEP).clamp(MIN_DISTANCE, MAX_DISTANCE);
    }

    pub fn transform(&self) -> Transform {
        Transform::from_translation(self.position()).looking_at(self.target, Vec3::Y)
    }
}

/// Chase view behind the cannon, turning with its yaw.
pub fn cannon_view(config: &BallisticsConfig, aim: &CannonAim) -> Transform {
    let origin = cannon_origin(config);
    let heading = heading_rotation(config, aim);
    let eye = origin + heading * CHASE_OFFSET;
    let focus = origin + heading * Vec3::Z * CHASE_LOOK_AHEAD;
    Transform::from_translation(eye).looking_at(focus, Vec3::Y)
}

pub fn spawn_camera(mut commands: Commands, visual_config: Res<VisualConfig>, rig: Res<OrbitRig>) {
    let mut camera = commands.spawn((Camera3d::default(), rig.transform(), MainCamera));

    if visual_config.fog_enabled {
        camera.insert(DistanceFog {
            color: Color::srgb(
                visual_config.fog_color.0,
                visual_config.fog_color.1,
                visual_config.fog_color.2,
            ),
            falloff: FogFalloff::Linear {
                start: visual_config.fog_start,
                end: visual_config.fog_end,
            },
            ..default()
        });
    }
}

pub fn toggle_camera_mode(keyboard: Res<ButtonInput<KeyCode>>, mut mode: ResMut<CameraMode>) {
    if keyboard.just_pressed(KeyCode::KeyV) {
        *mode = mode.toggled();
        info!("Camera: {:?}", *mode);
    }
}

/// Keep the chase camera behind the cannon.
pub fn follow_cannon(
    mode: Res<CameraMode>,
    config: Res<GameConfig>,
    cannon_query: Query<&CannonAim, With<Cannon>>,
    mut camera_query: Query<&mut Transform, With<MainCamera>>,
) {
    if *mode != CameraMode::Cannon {
        return;
    }
    let Ok(aim) = cannon_query.get_single() else {
        return;
    };
    let Ok(mut transform) = camera_query.get_single_mut() else {
        return;
    };

    *transform = cannon_view(&config.ballistics, aim);
}

/// Left-drag orbits, the wheel zooms.
pub fn orbit_camera(
    mode: Res<CameraMode>,
    mouse_buttons: Res<ButtonInput<MouseButton>>,
    mut mouse_motion: EventReader<MouseMotion>,
    mut mouse_wheel: EventReader<MouseWheel>,
    mut rig: ResMut<OrbitRig>,
    mut camera_query: Query<&mut Transform, With<MainCamera>>,
) {
    if *mode != CameraMode::Orbit {
        mouse_motion.clear();
        mouse_wheel.clear();
        return;
    }

    let mut drag = Vec2::ZERO;
    for event in mouse_motion.read() {
        drag += event.delta;
    }
    if mouse_buttons.pressed(MouseButton::Left) && drag != Vec2::ZERO {
        rig.orbit(drag);
    }

    for event in mouse_wheel.read() {
        let steps = match event.unit {
            MouseScrollUnit::Line => event.y,
            MouseScrollUnit::Pixel => event.y / 40.0,
        };
        rig.zoom(steps);
    }

    if let Ok(mut transform) = camera_query.get_single_mut() {
        *transform = rig.transform();
    }
}

/// Frame the whole field behind the menus.
pub fn reset_to_overview(
    mut rig: ResMut<OrbitRig>,
    mut camera_query: Query<&mut Transform, With<MainCamera>>,
) {
    *rig = OrbitRig::default();
    if let Ok(mut transform) = camera_query.get_single_mut() {
        *transform = rig.transform();
    }
}
