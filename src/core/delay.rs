//! Timer-delayed state transitions.
//!
//! The victory dialog and the next level both appear after a short pause.
//! Only one such transition can be pending, and starting a level drops it,
//! so a restart never gets overtaken by a stale "level complete".

use bevy::prelude::*;

use super::events::StartLevelEvent;
use super::states::PlayState;

/// What to do when a delayed transition fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PendingAction {
    /// Show the level complete dialog
    CompleteLevel,
    /// Build the level at this registry index
    StartLevel(usize),
}

/// The single pending delayed transition, if any.
#[derive(Resource, Default)]
pub struct DelayedTransition {
    pending: Option<(Timer, PendingAction)>,
}

impl DelayedTransition {
    /// Schedule `action` after `seconds`. Returns false and keeps the
    /// existing timer if something is already pending.
    pub fn schedule(&mut self, action: PendingAction, seconds: f32) -> bool {
        if self.pending.is_some() {
            return false;
        }
        self.pending = Some((Timer::from_seconds(seconds, TimerMode::Once), action));
        true
    }

    pub fn cancel(&mut self) {
        self.pending = None;
    }

    pub fn pending(&self) -> Option<PendingAction> {
        self.pending.as_ref().map(|(_, action)| *action)
    }

    /// Advance the timer, returning the action once when it expires.
    pub fn tick(&mut self, delta: std::time::Duration) -> Option<PendingAction> {
        let (timer, action) = self.pending.as_mut()?;
        timer.tick(delta);
        if timer.finished() {
            let action = *action;
            self.pending = None;
            Some(action)
        } else {
            None
        }
    }
}

/// Fire the pending transition when its timer runs out.
pub fn run_delayed_transitions(
    time: Res<Time>,
    mut delayed: ResMut<DelayedTransition>,
    mut next_play_state: ResMut<NextState<PlayState>>,
    mut start_events: EventWriter<StartLevelEvent>,
) {
    match delayed.tick(time.delta()) {
        Some(PendingAction::CompleteLevel) => {
            info!("Level complete");
            next_play_state.set(PlayState::LevelComplete);
        }
        Some(PendingAction::StartLevel(index)) => {
            start_events.send(StartLevelEvent { index });
        }
        None => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn fires_once_after_delay() {
        let mut delayed = DelayedTransition::default();
        assert!(delayed.schedule(PendingAction::CompleteLevel, 1.0));
        assert_eq!(delayed.tick(Duration::from_millis(600)), None);
        assert_eq!(
            delayed.tick(Duration::from_millis(600)),
            Some(PendingAction::CompleteLevel)
        );
        assert_eq!(delayed.tick(Duration::from_secs(5)), None);
    }

    #[test]
    fn second_schedule_does_not_restart_timer() {
        let mut delayed = DelayedTransition::default();
        delayed.schedule(PendingAction::CompleteLevel, 1.0);
        delayed.tick(Duration::from_millis(900));
        assert!(!delayed.schedule(PendingAction::StartLevel(2), 1.0));
        assert_eq!(
            delayed.tick(Duration::from_millis(200)),
            Some(PendingAction::CompleteLevel)
        );
    }

    #[test]
    fn cancel_drops_pending_action() {
        let mut delayed = DelayedTransition::default();
        delayed.schedule(PendingAction::StartLevel(1), 1.5);
        delayed.cancel();
        assert_eq!(delayed.pending(), None);
        assert_eq!(delayed.tick(Duration::from_secs(2)), None);
    }
}
