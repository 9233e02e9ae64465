//! Visual configuration loaded from external RON file.
//!
//! Allows tweaking sky, light, fog and the aim preview without recompilation.

use bevy::prelude::*;
use serde::Deserialize;
use std::fs;

pub const VISUAL_CONFIG_PATH: &str = "assets/data/rendering/visual_config.ron";

/// Visual configuration loaded from assets/data/rendering/visual_config.ron.
#[derive(Resource, Clone, Deserialize)]
#[serde(default)]
pub struct VisualConfig {
    // Atmosphere
    pub sky_color: (f32, f32, f32),
    pub ambient_color: (f32, f32, f32),
    pub ambient_brightness: f32,
    pub fog_enabled: bool,
    pub fog_color: (f32, f32, f32),
    /// Distance where fog starts and where it is opaque
    pub fog_start: f32,
    pub fog_end: f32,
    // Sun
    pub sun_illuminance: f32,
    /// Direction the sun shines from
    pub sun_position: (f32, f32, f32),
    pub shadows: bool,
    // Aim preview
    pub trajectory_color: (f32, f32, f32),
    pub dash_length: f32,
    pub gap_length: f32,
}

impl Default for VisualConfig {
    fn default() -> Self {
        Self {
            sky_color: (0.53, 0.81, 0.92),
            ambient_color: (1.0, 1.0, 1.0),
            ambient_brightness: 400.0,
            fog_enabled: true,
            fog_color: (0.7, 0.85, 0.95),
            fog_start: 120.0,
            fog_end: 320.0,
            sun_illuminance: 9000.0,
            sun_position: (30.0, 50.0, -20.0),
            shadows: true,
            trajectory_color: (1.0, 1.0, 0.3),
            dash_length: 0.5,
            gap_length: 0.25,
        }
    }
}

impl VisualConfig {
    pub fn sky(&self) -> Color {
        Color::srgb(self.sky_color.0, self.sky_color.1, self.sky_color.2)
    }

    pub fn trajectory(&self) -> Color {
        Color::srgb(
            self.trajectory_color.0,
            self.trajectory_color.1,
            self.trajectory_color.2,
        )
    }

    /// Load visual config from RON file.
    pub fn load() -> Self {
        match fs::read_to_string(VISUAL_CONFIG_PATH) {
            Ok(contents) => match ron::from_str(&contents) {
                Ok(config) => {
                    info!("Loaded visual config from {}", VISUAL_CONFIG_PATH);
                    config
                }
                Err(e) => {
                    error!("Failed to parse {}: {}. Using defaults.", VISUAL_CONFIG_PATH, e);
                    Self::default()
                }
            },
            Err(e) => {
                warn!("Could not read {}: {}. Using defaults.", VISUAL_CONFIG_PATH, e);
                Self::default()
            }
        }
    }
}

/// System to load visual config at startup.
pub fn load_visual_config(mut commands: Commands) {
    let config = VisualConfig::load();
    commands.insert_resource(ClearColor(config.sky()));
    commands.insert_resource(config);
}
