//! World module - level data, level construction and scenery.

mod builder;
mod data;
mod error;
mod materials;
mod plugin;
mod scenery;

pub use builder::{build_level, Brick, LevelEntity, LevelSummary};
pub use data::*;
pub use error::DataLoadError;
pub use materials::MaterialRegistry;
pub use plugin::{load_level, request_current_level, WorldPlugin};
pub use scenery::{Decorative, Ground, GROUND_SIZE};
