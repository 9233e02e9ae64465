//! Enemy-related components.

use bevy::prelude::*;

/// Marker component for all enemies.
#[derive(Component)]
pub struct Enemy;

/// Running tally for the current level.
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct EnemyTally {
    pub spawned: u32,
    pub killed: u32,
}

impl EnemyTally {
    pub fn remaining(&self) -> u32 {
        self.spawned.saturating_sub(self.killed)
    }
}
