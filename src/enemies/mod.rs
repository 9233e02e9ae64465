//! Enemies module - enemy figures, their removal and the win condition.

mod components;
mod plugin;
mod spawning;
mod systems;

pub use components::*;
pub use plugin::EnemyPlugin;
pub use spawning::{spawn_enemy, EnemyMeshes, ENEMY_BODY_RADIUS};
pub use systems::*;
