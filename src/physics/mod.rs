//! Physics module - rigid bodies, contact rules and the settle pass.

mod bodies;
mod bounds;
mod contacts;
mod plugin;
mod settle;

pub use bodies::*;
pub use contacts::*;
pub use plugin::PhysicsPlugin;
pub use settle::*;
