//! Launch geometry and the analytic trajectory used by the aim preview.

use bevy::prelude::*;

use super::components::CannonAim;
use crate::core::BallisticsConfig;

fn vec3(t: (f32, f32, f32)) -> Vec3 {
    Vec3::new(t.0, t.1, t.2)
}

pub fn cannon_origin(config: &BallisticsConfig) -> Vec3 {
    vec3(config.cannon_position)
}

/// Rotation of the whole cannon around +Y.
pub fn heading_rotation(config: &BallisticsConfig, aim: &CannonAim) -> Quat {
    Quat::from_rotation_y(config.cannon_heading + aim.yaw)
}

/// Rotation of the barrel around its pivot; +Z is the barrel axis.
pub fn barrel_rotation(aim: &CannonAim) -> Quat {
    Quat::from_rotation_x(-aim.elevation)
}

/// Unit vector along the barrel: (0, sin e, cos e) turned by the heading.
pub fn launch_direction(config: &BallisticsConfig, aim: &CannonAim) -> Vec3 {
    heading_rotation(config, aim) * barrel_rotation(aim) * Vec3::Z
}

/// Muzzle speed before the launch boost.
pub fn launch_speed(config: &BallisticsConfig, power: f32) -> f32 {
    config.base_speed + power / 100.0 * config.speed_range
}

/// Velocity of a shot as it will actually leave the barrel.
pub fn launch_velocity(config: &BallisticsConfig, aim: &CannonAim) -> Vec3 {
    launch_direction(config, aim) * launch_speed(config, aim.power) * config.launch_boost
}

/// World position of the barrel tip.
pub fn muzzle_position(config: &BallisticsConfig, aim: &CannonAim) -> Vec3 {
    let local = vec3(config.pivot_offset) + barrel_rotation(aim) * Vec3::Z * config.barrel_length;
    cannon_origin(config) + heading_rotation(config, aim) * local
}

/// Sample a drag-free parabola every `step` seconds up to `horizon`.
///
/// Sampling stops at the first point below the ground, which is replaced
/// by the same point projected onto y = 0.
pub fn trajectory_points(
    start: Vec3,
    velocity: Vec3,
    gravity: f32,
    step: f32,
    horizon: f32,
) -> Vec<Vec3> {
    if step <= 0.0 {
        return vec![start];
    }

    let samples = (horizon / step).round() as usize;
    let mut points = Vec::with_capacity(samples + 1);

    for i in 0..=samples {
        let t = i as f32 * step;
        let point = Vec3::new(
            start.x + velocity.x * t,
            start.y + velocity.y * t - 0.5 * gravity * t * t,
            start.z + velocity.z * t,
        );
        if point.y < 0.0 {
            points.push(Vec3::new(point.x, 0.0, point.z));
            break;
        }
        points.push(point);
    }

    points
}

/// The preview path for the current aim.
pub fn predicted_path(config: &BallisticsConfig, aim: &CannonAim) -> Vec<Vec3> {
    trajectory_points(
        muzzle_position(config, aim),
        launch_velocity(config, aim),
        config.gravity,
        config.preview_step,
        config.preview_horizon,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::AimConfig;
    use std::f32::consts::PI;

    fn aim(elevation: f32, yaw: f32, power: f32) -> CannonAim {
        CannonAim {
            elevation,
            yaw,
            power,
            ..CannonAim::from_config(&AimConfig::default())
        }
    }

    #[test]
    fn direction_follows_elevation() {
        let config = BallisticsConfig::default();
        let dir = launch_direction(&config, &aim(PI / 6.0, 0.0, 30.0));
        assert!((dir - Vec3::new(0.0, 0.5, (PI / 6.0).cos())).length() < 1e-5);
    }

    #[test]
    fn positive_yaw_turns_toward_positive_x() {
        let config = BallisticsConfig::default();
        let dir = launch_direction(&config, &aim(0.0, PI / 4.0, 30.0));
        assert!(dir.x > 0.7 && dir.z > 0.7);
        assert!(dir.y.abs() < 1e-6);
    }

    #[test]
    fn speed_scales_with_power() {
        let config = BallisticsConfig::default();
        assert_eq!(launch_speed(&config, 0.0), 20.0);
        assert_eq!(launch_speed(&config, 100.0), 50.0);

        let velocity = launch_velocity(&config, &aim(0.0, 0.0, 100.0));
        assert!((velocity.length() - 60.0).abs() < 1e-3);
    }

    #[test]
    fn muzzle_sits_one_barrel_ahead_of_pivot() {
        let config = BallisticsConfig::default();
        let muzzle = muzzle_position(&config, &aim(0.0, 0.0, 30.0));
        assert!((muzzle - Vec3::new(0.0, 0.95, -13.95)).length() < 1e-4);
    }

    #[test]
    fn trajectory_ends_on_the_ground() {
        let points = trajectory_points(Vec3::new(0.0, 1.0, 0.0), Vec3::new(0.0, 10.0, 20.0), 9.8, 0.1, 8.0);
        let last = *points.last().unwrap();
        assert_eq!(last.y, 0.0);
        assert!(points[..points.len() - 1].iter().all(|p| p.y >= 0.0));
        // Flight time is about 2.14 s, so 22 samples plus the ground point
        assert_eq!(points.len(), 23);
    }

    #[test]
    fn trajectory_stops_at_horizon() {
        let points = trajectory_points(Vec3::new(0.0, 1000.0, 0.0), Vec3::ZERO, 9.8, 0.1, 8.0);
        assert_eq!(points.len(), 81);
    }
}
