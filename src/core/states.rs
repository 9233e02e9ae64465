//! Game state definitions that control the overall flow of the game.
//!
//! States determine which systems run at any given time. Aiming input only
//! runs while `PlayState::Aiming`, the settle pass only in `Settling`, and
//! menu systems only in `MainMenu`.

use bevy::prelude::*;

/// Main game states - controls overall game flow.
///
/// - Start in `Loading` to read data files
/// - Move to `MainMenu` when loading completes
/// - Enter `InGame` when the player presses Start
#[derive(States, Debug, Clone, Copy, Eq, PartialEq, Hash, Default)]
pub enum GameState {
    /// Initial state - loading level and config data
    #[default]
    Loading,
    /// Title screen with Start and Controls
    MainMenu,
    /// A level is loaded (playing, paused or showing a result dialog)
    InGame,
}

/// Sub-states for a loaded level - only active when `GameState::InGame`.
///
/// The level stays in the world through every sub-state, so the result
/// dialogs are drawn on top of the final scene.
#[derive(SubStates, Debug, Clone, Copy, Eq, PartialEq, Hash, Default)]
#[source(GameState = GameState::InGame)]
pub enum PlayState {
    /// Structures are settling under physics before input is enabled
    #[default]
    Settling,
    /// Player controls the cannon
    Aiming,
    /// Simulation frozen, pause overlay shown
    Paused,
    /// Every enemy is gone, waiting for "Next level"
    LevelComplete,
    /// Ammo ran out with enemies left
    GameOver,
}

impl PlayState {
    /// Whether the physics pipeline should step in this state.
    pub fn simulates(&self) -> bool {
        matches!(self, PlayState::Settling | PlayState::Aiming)
    }
}
