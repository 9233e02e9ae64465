//! Cannon components and aiming state.

use bevy::prelude::*;

use crate::artillery::ProjectileKind;
use crate::core::AimConfig;

/// Marker for the cannon root entity (carriage and wheels).
#[derive(Component)]
pub struct Cannon;

/// The barrel pivot; rotated around X by the elevation.
#[derive(Component)]
pub struct CannonBarrel;

/// The ring at the barrel tip, where shots appear.
#[derive(Component)]
pub struct CannonMuzzle;

/// Current aim of the cannon and the ammunition selected.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct CannonAim {
    /// Radians above the horizon; negative aims down.
    pub elevation: f32,
    /// Radians away from the resting heading; positive turns left.
    pub yaw: f32,
    pub power: f32,
    pub selected: ProjectileKind,
}

impl CannonAim {
    /// Aim restored on every level load.
    pub fn from_config(config: &AimConfig) -> Self {
        Self {
            elevation: config.initial_elevation,
            yaw: 0.0,
            power: config.initial_power,
            selected: ProjectileKind::Rock,
        }
    }

    /// Apply held controls for a frame lasting `dt` seconds.
    ///
    /// Rates in the config are per 1/60 s frame, so movement speed does
    /// not depend on the frame rate.
    pub fn apply(&mut self, input: AimInput, dt: f32, config: &AimConfig) {
        let frames = dt * 60.0;

        if input.raise {
            self.elevation += config.elevation_rate * frames;
        }
        if input.lower {
            self.elevation -= config.elevation_rate * frames;
        }
        if input.left {
            self.yaw += config.yaw_rate * frames;
        }
        if input.right {
            self.yaw -= config.yaw_rate * frames;
        }
        if input.more_power {
            self.power += config.power_rate * frames;
        }
        if input.less_power {
            self.power -= config.power_rate * frames;
        }

        self.elevation = self
            .elevation
            .clamp(config.min_elevation, config.max_elevation);
        self.yaw = self.yaw.clamp(-config.yaw_limit, config.yaw_limit);
        self.power = self.power.clamp(config.min_power, config.max_power);
    }

    pub fn toggle_projectile(&mut self) {
        self.selected = self.selected.toggled();
    }

    /// Elevation in whole degrees, as shown in the HUD.
    pub fn angle_degrees(&self) -> i32 {
        self.elevation.to_degrees().round() as i32
    }

    /// Power as a percentage of `max_power`.
    pub fn power_percent(&self, max_power: f32) -> u32 {
        if max_power <= 0.0 {
            return 0;
        }
        (self.power / max_power * 100.0).round().max(0.0) as u32
    }
}

/// Which aiming keys are held this frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AimInput {
    pub raise: bool,
    pub lower: bool,
    pub left: bool,
    pub right: bool,
    pub more_power: bool,
    pub less_power: bool,
}

impl AimInput {
    /// Arrow keys steer the barrel, Q and A change power.
    pub fn from_keyboard(keyboard: &ButtonInput<KeyCode>) -> Self {
        Self {
            raise: keyboard.pressed(KeyCode::ArrowUp),
            lower: keyboard.pressed(KeyCode::ArrowDown),
            left: keyboard.pressed(KeyCode::ArrowLeft),
            right: keyboard.pressed(KeyCode::ArrowRight),
            more_power: keyboard.pressed(KeyCode::KeyQ),
            less_power: keyboard.pressed(KeyCode::KeyA),
        }
    }

    pub fn is_idle(&self) -> bool {
        *self == Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    #[test]
    fn starts_at_configured_aim() {
        let aim = CannonAim::from_config(&AimConfig::default());
        assert_eq!(aim.angle_degrees(), 45);
        assert_eq!(aim.power, 30.0);
        assert_eq!(aim.yaw, 0.0);
        assert_eq!(aim.selected, ProjectileKind::Rock);
    }

    #[test]
    fn one_frame_moves_by_one_rate_step() {
        let config = AimConfig::default();
        let mut aim = CannonAim::from_config(&config);
        aim.elevation = 0.0;
        aim.apply(
            AimInput { lower: true, more_power: true, left: true, ..default() },
            1.0 / 60.0,
            &config,
        );
        assert!((aim.elevation + 0.0055).abs() < 1e-5);
        assert!((aim.power - 31.0).abs() < 1e-4);
        assert!((aim.yaw - 0.005).abs() < 1e-5);
    }

    #[test]
    fn limits_hold_under_long_presses() {
        let config = AimConfig::default();
        let mut aim = CannonAim::from_config(&config);

        aim.apply(
            AimInput { raise: true, more_power: true, right: true, ..default() },
            100.0,
            &config,
        );
        assert_eq!(aim.elevation, PI / 4.0);
        assert_eq!(aim.power, 100.0);
        assert_eq!(aim.yaw, -PI / 4.0);

        aim.apply(
            AimInput { lower: true, less_power: true, left: true, ..default() },
            100.0,
            &config,
        );
        assert_eq!(aim.elevation, -PI / 12.0);
        assert_eq!(aim.power, 5.0);
        assert_eq!(aim.yaw, PI / 4.0);
    }

    #[test]
    fn power_percent_is_relative_to_max() {
        let config = AimConfig::default();
        let mut aim = CannonAim::from_config(&config);
        assert_eq!(aim.power_percent(100.0), 30);
        aim.power = 50.0;
        assert_eq!(aim.power_percent(200.0), 25);
        assert_eq!(aim.power_percent(0.0), 0);
    }

    #[test]
    fn idle_input_changes_nothing() {
        let config = AimConfig::default();
        let mut aim = CannonAim::from_config(&config);
        let before = aim;
        assert!(AimInput::default().is_idle());
        aim.apply(AimInput::default(), 1.0, &config);
        assert_eq!(aim, before);
    }
}
