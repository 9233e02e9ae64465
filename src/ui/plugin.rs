//! UI plugin - menus, result dialogs and the HUD.

use bevy::prelude::*;

use super::hud;
use crate::artillery::{AmmoUsed, LevelClock};
use crate::core::{
    DelayedTransition, GameConfig, GameState, PendingAction, PlayState, StartLevelEvent,
};
use crate::world::{CurrentLevel, LevelRegistry};

const BUTTON_IDLE: Color = Color::srgb(0.15, 0.15, 0.2);
const BUTTON_HOVERED: Color = Color::srgb(0.25, 0.25, 0.3);
const BUTTON_PRESSED: Color = Color::srgb(0.3, 0.3, 0.35);

const CONTROLS_HELP: [&str; 9] = [
    "Up / Down - raise / lower the barrel",
    "Left / Right - turn the cannon",
    "Q / A - more / less power",
    "F - switch between rock and bomb",
    "Space - fire",
    "V - toggle cannon / orbit camera",
    "Mouse drag and wheel - orbit and zoom",
    "R - restart the level",
    "Esc - pause",
];

/// UI plugin - handles all user interface.
pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        // Setup HUD systems
        hud::setup_hud_systems(app);

        app.add_systems(Update, update_button_colors)
            // Main menu
            .add_systems(OnEnter(GameState::MainMenu), setup_main_menu)
            .add_systems(
                Update,
                (main_menu_input, close_help_on_escape).run_if(in_state(GameState::MainMenu)),
            )
            .add_systems(OnExit(GameState::MainMenu), cleanup::<MainMenuUi>)

            // Pause menu
            .add_systems(OnEnter(PlayState::Paused), setup_pause_menu)
            .add_systems(Update, pause_menu_input.run_if(in_state(PlayState::Paused)))
            .add_systems(OnExit(PlayState::Paused), cleanup::<PauseMenuUi>)

            // Level complete
            .add_systems(OnEnter(PlayState::LevelComplete), setup_level_complete)
            .add_systems(
                Update,
                level_complete_input.run_if(in_state(PlayState::LevelComplete)),
            )
            .add_systems(OnExit(PlayState::LevelComplete), cleanup::<LevelCompleteUi>)

            // Game over
            .add_systems(OnEnter(PlayState::GameOver), setup_game_over)
            .add_systems(Update, game_over_input.run_if(in_state(PlayState::GameOver)))
            .add_systems(OnExit(PlayState::GameOver), cleanup::<GameOverUi>);
    }
}

/// Marker for main menu UI entities.
#[derive(Component)]
struct MainMenuUi;

/// Marker for the controls overlay on the main menu.
#[derive(Component)]
struct HelpOverlay;

/// Marker for pause menu UI entities.
#[derive(Component)]
struct PauseMenuUi;

#[derive(Component)]
struct LevelCompleteUi;

#[derive(Component)]
struct GameOverUi;

/// Marker for menu buttons.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
enum MenuButton {
    Start,
    Controls,
    CloseHelp,
    Quit,
    Resume,
    MainMenu,
    NextLevel,
    Restart,
}

/// Lines of the level complete dialog.
pub fn completion_summary(index: usize, used: &AmmoUsed, seconds: f32) -> Vec<String> {
    vec![
        format!("Level {} complete!", index + 1),
        format!("Rocks used: {}", used.rock),
        format!("Bombs used: {}", used.bomb),
        format!("Time: {:.1} s", seconds),
    ]
}

fn overlay(background: Color) -> (Node, BackgroundColor) {
    (
        Node {
            width: Val::Percent(100.0),
            height: Val::Percent(100.0),
            flex_direction: FlexDirection::Column,
            justify_content: JustifyContent::Center,
            align_items: AlignItems::Center,
            position_type: PositionType::Absolute,
            ..default()
        },
        BackgroundColor(background),
    )
}

fn spawn_title(parent: &mut ChildBuilder, text: &str, font_size: f32, color: Color) {
    parent.spawn((
        Text::new(text),
        TextFont {
            font_size,
            ..default()
        },
        TextColor(color),
        Node {
            margin: UiRect::bottom(Val::Px(30.0)),
            ..default()
        },
    ));
}

fn spawn_line(parent: &mut ChildBuilder, text: &str) {
    parent.spawn((
        Text::new(text),
        TextFont {
            font_size: 22.0,
            ..default()
        },
        TextColor(Color::srgb(0.85, 0.85, 0.9)),
        Node {
            margin: UiRect::bottom(Val::Px(6.0)),
            ..default()
        },
    ));
}

/// Helper to spawn a menu button.
fn spawn_menu_button(parent: &mut ChildBuilder, text: &str, button: MenuButton) {
    parent
        .spawn((
            Button,
            Node {
                width: Val::Px(220.0),
                height: Val::Px(50.0),
                margin: UiRect::all(Val::Px(10.0)),
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                ..default()
            },
            BackgroundColor(BUTTON_IDLE),
            button,
        ))
        .with_children(|button| {
            button.spawn((
                Text::new(text),
                TextFont {
                    font_size: 24.0,
                    ..default()
                },
                TextColor(Color::srgb(0.9, 0.9, 0.95)),
            ));
        });
}

fn update_button_colors(
    mut interaction_query: Query<
        (&Interaction, &mut BackgroundColor),
        (Changed<Interaction>, With<Button>),
    >,
) {
    for (interaction, mut bg_color) in interaction_query.iter_mut() {
        *bg_color = match interaction {
            Interaction::Pressed => BUTTON_PRESSED,
            Interaction::Hovered => BUTTON_HOVERED,
            Interaction::None => BUTTON_IDLE,
        }
        .into();
    }
}

/// Buttons pressed this frame.
fn pressed_buttons(
    query: &Query<(&Interaction, &MenuButton), (Changed<Interaction>, With<Button>)>,
) -> Vec<MenuButton> {
    query
        .iter()
        .filter(|(interaction, _)| **interaction == Interaction::Pressed)
        .map(|(_, button)| *button)
        .collect()
}

/// Set up the main menu.
fn setup_main_menu(mut commands: Commands) {
    commands
        .spawn((overlay(Color::srgba(0.05, 0.07, 0.12, 0.85)), MainMenuUi))
        .with_children(|parent| {
            spawn_title(parent, "CANNON SIEGE", 72.0, Color::srgb(1.0, 0.85, 0.4));
            spawn_line(parent, "Knock down the structures, take out every enemy");
            spawn_menu_button(parent, "Start", MenuButton::Start);
            spawn_menu_button(parent, "Controls", MenuButton::Controls);
            spawn_menu_button(parent, "Quit", MenuButton::Quit);
        });
}

fn spawn_help_overlay(commands: &mut Commands) {
    commands
        .spawn((
            overlay(Color::srgba(0.0, 0.0, 0.0, 0.9)),
            HelpOverlay,
            MainMenuUi,
        ))
        .with_children(|parent| {
            spawn_title(parent, "Controls", 48.0, Color::srgb(0.9, 0.9, 0.95));
            for line in CONTROLS_HELP {
                spawn_line(parent, line);
            }
            spawn_menu_button(parent, "Back", MenuButton::CloseHelp);
        });
}

/// Handle main menu button interactions.
fn main_menu_input(
    mut commands: Commands,
    interaction_query: Query<(&Interaction, &MenuButton), (Changed<Interaction>, With<Button>)>,
    help_query: Query<Entity, With<HelpOverlay>>,
    mut next_state: ResMut<NextState<GameState>>,
    mut exit: EventWriter<AppExit>,
) {
    for button in pressed_buttons(&interaction_query) {
        match button {
            MenuButton::Start => next_state.set(GameState::InGame),
            MenuButton::Controls => {
                if help_query.is_empty() {
                    spawn_help_overlay(&mut commands);
                }
            }
            MenuButton::CloseHelp => {
                for entity in help_query.iter() {
                    commands.entity(entity).despawn_recursive();
                }
            }
            MenuButton::Quit => {
                exit.send(AppExit::Success);
            }
            _ => {}
        }
    }
}

fn close_help_on_escape(
    mut commands: Commands,
    keyboard: Res<ButtonInput<KeyCode>>,
    help_query: Query<Entity, With<HelpOverlay>>,
) {
    if keyboard.just_pressed(KeyCode::Escape) {
        for entity in help_query.iter() {
            commands.entity(entity).despawn_recursive();
        }
    }
}

/// Set up the pause menu.
fn setup_pause_menu(mut commands: Commands) {
    commands
        .spawn((overlay(Color::srgba(0.0, 0.0, 0.0, 0.7)), PauseMenuUi))
        .with_children(|parent| {
            spawn_title(parent, "PAUSED", 48.0, Color::srgb(0.85, 0.85, 0.9));
            spawn_menu_button(parent, "Resume", MenuButton::Resume);
            spawn_menu_button(parent, "Main Menu", MenuButton::MainMenu);
        });
}

/// Handle pause menu button interactions.
fn pause_menu_input(
    interaction_query: Query<(&Interaction, &MenuButton), (Changed<Interaction>, With<Button>)>,
    mut next_play_state: ResMut<NextState<PlayState>>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    for button in pressed_buttons(&interaction_query) {
        match button {
            MenuButton::Resume => next_play_state.set(PlayState::Aiming),
            MenuButton::MainMenu => next_state.set(GameState::MainMenu),
            _ => {}
        }
    }
}

fn setup_level_complete(
    mut commands: Commands,
    current: Res<CurrentLevel>,
    used: Res<AmmoUsed>,
    clock: Res<LevelClock>,
    time: Res<Time>,
) {
    let seconds = clock.elapsed(time.elapsed_secs());
    let lines = completion_summary(current.index, &used, seconds);

    commands
        .spawn((overlay(Color::srgba(0.0, 0.1, 0.0, 0.75)), LevelCompleteUi))
        .with_children(|parent| {
            if let Some((title, stats)) = lines.split_first() {
                spawn_title(parent, title, 56.0, Color::srgb(0.4, 0.9, 0.4));
                for line in stats {
                    spawn_line(parent, line);
                }
            }
            spawn_menu_button(parent, "Next level", MenuButton::NextLevel);
        });
}

/// "Next level" closes the dialog and loads the next level after a pause.
fn level_complete_input(
    mut commands: Commands,
    interaction_query: Query<(&Interaction, &MenuButton), (Changed<Interaction>, With<Button>)>,
    dialog_query: Query<Entity, With<LevelCompleteUi>>,
    config: Res<GameConfig>,
    registry: Res<LevelRegistry>,
    mut current: ResMut<CurrentLevel>,
    mut delayed: ResMut<DelayedTransition>,
) {
    for button in pressed_buttons(&interaction_query) {
        if button != MenuButton::NextLevel {
            continue;
        }
        for entity in dialog_query.iter() {
            commands.entity(entity).despawn_recursive();
        }

        schedule_next_level(
            &registry,
            &mut current,
            &mut delayed,
            config.timing.next_level_delay,
        );
    }
}

/// Advance to the level after the current one, wrapping past the last,
/// and queue it to be built after `delay` seconds.
pub fn schedule_next_level(
    registry: &LevelRegistry,
    current: &mut CurrentLevel,
    delayed: &mut DelayedTransition,
    delay: f32,
) -> usize {
    let next = registry.next_index(current.index);
    current.index = next;
    if delayed.schedule(PendingAction::StartLevel(next), delay) {
        info!("Next level: {}", next + 1);
    }
    next
}

fn setup_game_over(mut commands: Commands) {
    commands
        .spawn((overlay(Color::srgba(0.15, 0.0, 0.0, 0.8)), GameOverUi))
        .with_children(|parent| {
            spawn_title(parent, "GAME OVER", 72.0, Color::srgb(0.9, 0.25, 0.2));
            spawn_line(parent, "Out of ammunition");
            spawn_menu_button(parent, "Restart", MenuButton::Restart);
            spawn_menu_button(parent, "Main Menu", MenuButton::MainMenu);
        });
}

/// Restart goes back to the first level.
fn game_over_input(
    interaction_query: Query<(&Interaction, &MenuButton), (Changed<Interaction>, With<Button>)>,
    mut current: ResMut<CurrentLevel>,
    mut start_events: EventWriter<StartLevelEvent>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    for button in pressed_buttons(&interaction_query) {
        match button {
            MenuButton::Restart => {
                current.index = 0;
                start_events.send(StartLevelEvent { index: 0 });
            }
            MenuButton::MainMenu => {
                current.index = 0;
                next_state.set(GameState::MainMenu);
            }
            _ => {}
        }
    }
}

fn cleanup<T: Component>(mut commands: Commands, query: Query<Entity, With<T>>) {
    for entity in query.iter() {
        commands.entity(entity).despawn_recursive();
    }
}
