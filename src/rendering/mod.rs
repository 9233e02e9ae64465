//! Rendering module - camera rigs, atmosphere and the trajectory preview.

pub mod camera;
mod plugin;
pub mod trajectory;
pub mod visual_config;

pub use camera::{cannon_view, CameraMode, MainCamera, OrbitRig};
pub use plugin::RenderingPlugin;
pub use trajectory::dash_segments;
pub use visual_config::VisualConfig;
