//! Core plugin that sets up game states, events, and fundamental systems.

use bevy::prelude::*;

use super::config::{load_game_config, GameConfig};
use super::delay::{run_delayed_transitions, DelayedTransition};
use super::events::*;
use super::states::*;
use crate::world::LevelRegistry;

/// Ordering of per-frame gameplay work inside a level.
///
/// Input moves the cannon and fires, Simulation sweeps contacts and ticks
/// fuses, Resolution removes the dead and checks for victory or defeat.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameplaySet {
    Input,
    Simulation,
    Resolution,
}

/// Core plugin - must be added first as other plugins depend on it.
///
/// This plugin sets up:
/// - Game states (Loading, MainMenu, InGame) and the in-level sub-states
/// - Global events (StartLevelEvent, FireEvent, EnemyKilledEvent, ...)
/// - The gameplay config and the delayed transition timer
pub struct CorePlugin;

impl Plugin for CorePlugin {
    fn build(&self, app: &mut App) {
        app
            // Initialize game states
            .init_state::<GameState>()
            .add_sub_state::<PlayState>()

            // Register global events
            .add_event::<StartLevelEvent>()
            .add_event::<FireEvent>()
            .add_event::<EnemyKilledEvent>()
            .add_event::<BombDetonatedEvent>()

            .configure_sets(
                Update,
                (
                    GameplaySet::Input,
                    GameplaySet::Simulation,
                    GameplaySet::Resolution,
                )
                    .chain()
                    .run_if(in_state(GameState::InGame)),
            )

            .init_resource::<DelayedTransition>()
            .add_systems(Startup, load_game_config)

            // Leave Loading once config and levels are in place
            .add_systems(Update, finish_loading.run_if(in_state(GameState::Loading)))

            // Pause/unpause with Escape key
            .add_systems(
                Update,
                handle_pause_input.run_if(
                    in_state(PlayState::Aiming).or(in_state(PlayState::Paused)),
                ),
            )

            // Victory and next-level delays (frozen while paused)
            .add_systems(
                Update,
                run_delayed_transitions
                    .run_if(in_state(GameState::InGame))
                    .run_if(not(in_state(PlayState::Paused))),
            );
    }
}

/// Transition from Loading to MainMenu when the startup data is available.
fn finish_loading(
    config: Option<Res<GameConfig>>,
    levels: Option<Res<LevelRegistry>>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    if config.is_some() && levels.is_some() {
        next_state.set(GameState::MainMenu);
    }
}

/// Handle Escape key to pause/unpause the game.
fn handle_pause_input(
    keyboard: Res<ButtonInput<KeyCode>>,
    current_state: Res<State<PlayState>>,
    mut next_state: ResMut<NextState<PlayState>>,
) {
    if keyboard.just_pressed(KeyCode::Escape) {
        match current_state.get() {
            PlayState::Aiming => next_state.set(PlayState::Paused),
            PlayState::Paused => next_state.set(PlayState::Aiming),
            _ => {}
        }
    }
}
