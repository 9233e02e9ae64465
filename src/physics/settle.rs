//! Stabilization pass run after a level is built.
//!
//! Freshly stacked bricks jitter and slide for a moment. Input stays off
//! while the simulation runs a fixed number of steps, every velocity is
//! then cleared, and a few more steps let the structures rest before
//! aiming starts.

use bevy::prelude::*;
use bevy_rapier3d::prelude::Velocity;

use super::bodies::PhysicsMode;
use crate::core::{GameConfig, PhysicsConfig, PlayState};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettlePhase {
    /// Free settling before velocities are cleared
    Settling,
    /// Short run after the velocity reset
    Resting,
}

/// What the settle pass wants done after a step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettleProgress {
    Continue,
    ClearVelocities,
    Done,
}

/// Step counter for the current level's settle pass.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Settling {
    pub phase: SettlePhase,
    pub steps_remaining: u32,
}

impl Settling {
    pub fn begin(config: &PhysicsConfig) -> Self {
        Self {
            phase: SettlePhase::Settling,
            steps_remaining: config.settle_steps,
        }
    }

    /// Count one simulation step.
    pub fn advance(&mut self, config: &PhysicsConfig) -> SettleProgress {
        match self.phase {
            SettlePhase::Settling => {
                self.steps_remaining = self.steps_remaining.saturating_sub(1);
                if self.steps_remaining == 0 {
                    self.phase = SettlePhase::Resting;
                    self.steps_remaining = config.post_settle_steps;
                    SettleProgress::ClearVelocities
                } else {
                    SettleProgress::Continue
                }
            }
            SettlePhase::Resting => {
                self.steps_remaining = self.steps_remaining.saturating_sub(1);
                if self.steps_remaining == 0 {
                    SettleProgress::Done
                } else {
                    SettleProgress::Continue
                }
            }
        }
    }
}

/// Drive the settle pass one physics step per frame.
pub fn run_settle_pass(
    config: Res<GameConfig>,
    mode: Res<PhysicsMode>,
    settling: Option<ResMut<Settling>>,
    mut velocities: Query<&mut Velocity>,
    mut next_state: ResMut<NextState<PlayState>>,
) {
    let Some(mut settling) = settling else {
        next_state.set(PlayState::Aiming);
        return;
    };

    if *mode == PhysicsMode::VisualOnly {
        info!("No physics world, skipping settle pass");
        next_state.set(PlayState::Aiming);
        return;
    }

    match settling.advance(&config.physics) {
        SettleProgress::Continue => {}
        SettleProgress::ClearVelocities => {
            let mut count = 0;
            for mut velocity in velocities.iter_mut() {
                *velocity = Velocity::zero();
                count += 1;
            }
            debug!("Settle pass cleared {} velocities", count);
        }
        SettleProgress::Done => {
            info!("Structures settled");
            next_state.set(PlayState::Aiming);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clears_then_rests_then_finishes() {
        let config = PhysicsConfig {
            settle_steps: 3,
            post_settle_steps: 2,
            ..default()
        };
        let mut settling = Settling::begin(&config);

        assert_eq!(settling.advance(&config), SettleProgress::Continue);
        assert_eq!(settling.advance(&config), SettleProgress::Continue);
        assert_eq!(settling.advance(&config), SettleProgress::ClearVelocities);
        assert_eq!(settling.phase, SettlePhase::Resting);
        assert_eq!(settling.advance(&config), SettleProgress::Continue);
        assert_eq!(settling.advance(&config), SettleProgress::Done);
    }

    #[test]
    fn zero_steps_still_clears_once() {
        let config = PhysicsConfig {
            settle_steps: 0,
            post_settle_steps: 0,
            ..default()
        };
        let mut settling = Settling::begin(&config);
        assert_eq!(settling.advance(&config), SettleProgress::ClearVelocities);
        assert_eq!(settling.advance(&config), SettleProgress::Done);
    }
}
