//! Core game module - states, events, config, and delayed transitions.
//!
//! This module provides the foundation that all other game systems build upon.

mod config;
mod delay;
mod events;
mod plugin;
mod states;

pub use config::*;
pub use delay::*;
pub use events::*;
pub use plugin::{CorePlugin, GameplaySet};
pub use states::*;
