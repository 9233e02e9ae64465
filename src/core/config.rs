//! Gameplay tuning loaded from an external RON file.
//!
//! Every constant the aiming, firing, contact and blast systems use lives
//! here so it can be tweaked without recompilation. Each section falls back
//! to its defaults field by field, so a partial file is fine.

use bevy::prelude::*;
use serde::Deserialize;
use std::f32::consts::PI;
use std::fs;

/// Path of the gameplay config file.
pub const GAME_CONFIG_PATH: &str = "assets/data/config/game.ron";

/// Cannon control limits and per-frame rates.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AimConfig {
    pub min_power: f32,
    pub max_power: f32,
    pub initial_power: f32,
    /// Radians
    pub min_elevation: f32,
    pub max_elevation: f32,
    pub initial_elevation: f32,
    /// Maximum yaw away from the cannon's resting heading, either side.
    pub yaw_limit: f32,
    /// Power gained per 1/60 s frame while Q/A is held.
    pub power_rate: f32,
    /// Radians per 1/60 s frame.
    pub elevation_rate: f32,
    pub yaw_rate: f32,
}

impl Default for AimConfig {
    fn default() -> Self {
        Self {
            min_power: 5.0,
            max_power: 100.0,
            initial_power: 30.0,
            min_elevation: -PI / 12.0,
            max_elevation: PI / 4.0,
            initial_elevation: PI / 4.0,
            yaw_limit: PI / 4.0,
            power_rate: 1.0,
            elevation_rate: 0.0055,
            yaw_rate: 0.005,
        }
    }
}

/// Cannon geometry and launch speed.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BallisticsConfig {
    /// Where the cannon sits on the field.
    pub cannon_position: (f32, f32, f32),
    /// Heading of the cannon at yaw 0, radians around +Y.
    pub cannon_heading: f32,
    /// Barrel pivot relative to the cannon origin.
    pub pivot_offset: (f32, f32, f32),
    /// Distance from pivot to muzzle along the barrel.
    pub barrel_length: f32,
    /// Muzzle speed at zero power.
    pub base_speed: f32,
    /// Extra muzzle speed at 100 power.
    pub speed_range: f32,
    /// Multiplier applied to the launch velocity when the body is created.
    pub launch_boost: f32,
    pub gravity: f32,
    /// Seconds between trajectory preview samples.
    pub preview_step: f32,
    /// Seconds of flight covered by the preview.
    pub preview_horizon: f32,
}

impl Default for BallisticsConfig {
    fn default() -> Self {
        Self {
            cannon_position: (0.0, 0.5, -15.0),
            cannon_heading: 0.0,
            pivot_offset: (0.0, 0.45, 0.0),
            barrel_length: 1.05,
            base_speed: 20.0,
            speed_range: 30.0,
            launch_boost: 1.2,
            gravity: 9.8,
            preview_step: 0.1,
            preview_horizon: 8.0,
        }
    }
}

/// Rigid-body material settings and contact thresholds.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    /// When false, every body is spawned visual-only.
    pub enabled: bool,
    pub static_friction: f32,
    pub static_restitution: f32,
    pub dynamic_friction: f32,
    pub dynamic_restitution: f32,
    /// Linear and angular damping for structures that must start at rest.
    pub settle_damping: f32,
    /// Zero-input steps before velocities are cleared.
    pub settle_steps: u32,
    /// Steps after velocities are cleared, before aiming starts.
    pub post_settle_steps: u32,
    /// Extra distance allowed between an enemy and a projectile.
    pub projectile_margin: f32,
    /// Extra distance allowed between an enemy and a movable brick.
    pub brick_margin: f32,
    /// A movable brick kills an enemy only above this speed.
    pub brick_kill_speed: f32,
    /// Magnitude of the impulse that sends a killing brick flying.
    pub brick_knock_impulse: f32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            static_friction: 0.8,
            static_restitution: 0.1,
            dynamic_friction: 0.5,
            dynamic_restitution: 0.4,
            settle_damping: 0.8,
            settle_steps: 120,
            post_settle_steps: 30,
            projectile_margin: 0.2,
            brick_margin: 0.3,
            brick_kill_speed: 2.0,
            brick_knock_impulse: 8.0,
        }
    }
}

/// Bomb fuse and blast settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BlastConfig {
    pub radius: f32,
    pub force: f32,
    /// Enemies closer than `radius * kill_fraction` are destroyed.
    pub kill_fraction: f32,
    /// Bodies closer than this to the centre get no impulse.
    pub min_distance: f32,
    /// Seconds between arming and detonation.
    pub fuse_seconds: f32,
    /// A falling bomb arms below this height.
    pub arm_height: f32,
    /// Height an armed bomb is snapped to.
    pub rest_height: f32,
}

impl Default for BlastConfig {
    fn default() -> Self {
        Self {
            radius: 8.0,
            force: 40.0,
            kill_fraction: 0.7,
            min_distance: 0.1,
            fuse_seconds: 1.0,
            arm_height: 0.5,
            rest_height: 0.2,
        }
    }
}

/// Removal limits for bodies that left the playfield.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq)]
pub struct BoundsLimits {
    pub min_y: f32,
    pub max_horizontal: f32,
}

impl BoundsLimits {
    /// Whether a body at `position` is still inside these limits.
    pub fn contains(&self, position: Vec3) -> bool {
        position.y >= self.min_y
            && position.x.abs() <= self.max_horizontal
            && position.z.abs() <= self.max_horizontal
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BoundsConfig {
    pub projectiles: BoundsLimits,
    pub enemies: BoundsLimits,
    pub bricks: BoundsLimits,
}

impl Default for BoundsConfig {
    fn default() -> Self {
        Self {
            projectiles: BoundsLimits { min_y: -50.0, max_horizontal: 300.0 },
            enemies: BoundsLimits { min_y: -30.0, max_horizontal: 150.0 },
            bricks: BoundsLimits { min_y: -40.0, max_horizontal: 180.0 },
        }
    }
}

/// Delays between gameplay transitions.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    /// Seconds between the last kill and the level complete dialog.
    pub victory_delay: f32,
    /// Seconds between "Next level" and the new level appearing.
    pub next_level_delay: f32,
    /// Seconds after the last shot before an out-of-ammo level is lost.
    pub out_of_ammo_grace: f32,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            victory_delay: 1.0,
            next_level_delay: 1.5,
            out_of_ammo_grace: 4.0,
        }
    }
}

/// All gameplay tuning.
#[derive(Resource, Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub aim: AimConfig,
    pub ballistics: BallisticsConfig,
    pub physics: PhysicsConfig,
    pub blast: BlastConfig,
    pub bounds: BoundsConfig,
    pub timing: TimingConfig,
}

impl GameConfig {
    /// Parse a config from RON text.
    pub fn from_ron_str(contents: &str) -> Result<Self, ron::error::SpannedError> {
        ron::from_str(contents)
    }

    /// Load the config file, falling back to defaults on any failure.
    pub fn load() -> Self {
        match fs::read_to_string(GAME_CONFIG_PATH) {
            Ok(contents) => match Self::from_ron_str(&contents) {
                Ok(config) => {
                    info!("Loaded game config from {}", GAME_CONFIG_PATH);
                    config
                }
                Err(e) => {
                    error!("Failed to parse {}: {}. Using defaults.", GAME_CONFIG_PATH, e);
                    Self::default()
                }
            },
            Err(e) => {
                warn!("Could not read {}: {}. Using defaults.", GAME_CONFIG_PATH, e);
                Self::default()
            }
        }
    }
}

/// System to load the game config at startup.
pub fn load_game_config(mut commands: Commands) {
    commands.insert_resource(GameConfig::load());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_keeps_other_defaults() {
        let config = GameConfig::from_ron_str("(blast: (radius: 5.0))").unwrap();
        assert_eq!(config.blast.radius, 5.0);
        assert_eq!(config.blast.force, 40.0);
        assert_eq!(config.aim.max_power, 100.0);
    }

    #[test]
    fn empty_struct_is_all_defaults() {
        let config = GameConfig::from_ron_str("()").unwrap();
        assert_eq!(config.physics.settle_steps, 120);
        assert_eq!(config.timing.victory_delay, 1.0);
    }

    #[test]
    fn malformed_file_is_an_error() {
        assert!(GameConfig::from_ron_str("(aim: (max_power: \"lots\"))").is_err());
    }

    #[test]
    fn bounds_limits_are_inclusive_box() {
        let limits = BoundsLimits { min_y: -30.0, max_horizontal: 150.0 };
        assert!(limits.contains(Vec3::new(150.0, -30.0, -150.0)));
        assert!(!limits.contains(Vec3::new(0.0, -30.1, 0.0)));
        assert!(!limits.contains(Vec3::new(0.0, 0.0, 150.5)));
        assert!(!limits.contains(Vec3::new(-151.0, 5.0, 0.0)));
    }
}
