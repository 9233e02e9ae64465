//! Global events used for cross-system communication.
//!
//! The firing system sends `FireEvent`s, the contact sweep and blasts send
//! `EnemyKilledEvent`s, and the enemy, audio and UI systems react to them
//! without knowing who produced them.

use bevy::prelude::*;

use crate::artillery::ProjectileKind;

/// Request to (re)build the level at `index` in the level registry.
#[derive(Event, Debug, Clone, Copy)]
pub struct StartLevelEvent {
    pub index: usize,
}

/// Sent when a projectile leaves the muzzle.
#[derive(Event, Debug, Clone, Copy)]
pub struct FireEvent {
    pub projectile: Entity,
    pub kind: ProjectileKind,
    pub origin: Vec3,
    pub velocity: Vec3,
}

/// What removed an enemy from play.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KillCause {
    /// Direct hit by a projectile
    Projectile(ProjectileKind),
    /// Struck by a movable brick travelling fast enough
    MovingBrick,
    /// Inside the kill radius of a bomb blast
    Blast,
    /// Fell or was thrown off the map
    OutOfBounds,
}

/// Sent when an enemy should be removed.
///
/// Several sources may report the same enemy in one frame; the enemy
/// systems despawn it exactly once.
#[derive(Event, Debug, Clone, Copy)]
pub struct EnemyKilledEvent {
    pub enemy: Entity,
    pub position: Vec3,
    pub cause: KillCause,
}

/// Sent once per bomb when its fuse runs out.
#[derive(Event, Debug, Clone, Copy)]
pub struct BombDetonatedEvent {
    pub position: Vec3,
    pub radius: f32,
}
