//! Dashed preview of where the next shot will go.

use bevy::prelude::*;

use super::camera::CameraMode;
use super::visual_config::VisualConfig;
use crate::cannon::{predicted_path, Cannon, CannonAim};
use crate::core::GameConfig;

/// Shortest dash or gap drawn; tinier values are raised to this.
pub const MIN_DASH_LENGTH: f32 = 0.01;

/// Split a polyline into dashes of `dash` length separated by `gap`.
///
/// The dash pattern carries over from one polyline segment to the next.
/// A non-positive dash or gap yields the polyline as a solid line. Positive
/// lengths below [`MIN_DASH_LENGTH`] are raised to it.
pub fn dash_segments(points: &[Vec3], dash: f32, gap: f32) -> Vec<(Vec3, Vec3)> {
    if dash <= 0.0 || gap <= 0.0 {
        return points.windows(2).map(|pair| (pair[0], pair[1])).collect();
    }
    let dash = dash.max(MIN_DASH_LENGTH);
    let gap = gap.max(MIN_DASH_LENGTH);

    let mut segments = Vec::new();
    let mut drawing = true;
    let mut remaining = dash;

    for pair in points.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        let length = a.distance(b);
        if length <= f32::EPSILON {
            continue;
        }
        let direction = (b - a) / length;

        let mut travelled = 0.0;
        while length - travelled > 1e-6 {
            let step = remaining.min(length - travelled);
            if drawing {
                segments.push((a + direction * travelled, a + direction * (travelled + step)));
            }
            travelled += step;
            remaining -= step;
            if remaining <= 1e-6 {
                drawing = !drawing;
                remaining = if drawing { dash } else { gap };
            }
        }
    }

    segments
}

pub fn draw_trajectory_preview(
    mut gizmos: Gizmos,
    mode: Res<CameraMode>,
    config: Res<GameConfig>,
    visual_config: Res<VisualConfig>,
    cannon_query: Query<&CannonAim, With<Cannon>>,
) {
    if *mode != CameraMode::Cannon {
        return;
    }
    let Ok(aim) = cannon_query.get_single() else {
        return;
    };

    let color = visual_config.trajectory();
    let path = predicted_path(&config.ballistics, aim);
    for (start, end) in dash_segments(&path, visual_config.dash_length, visual_config.gap_length) {
        gizmos.line(start, end, color);
    }
}
