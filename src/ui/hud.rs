//! In-game HUD - aim, ammunition and level readouts.

use bevy::prelude::*;

use crate::artillery::{Ammo, ProjectileKind};
use crate::cannon::{Cannon, CannonAim};
use crate::core::{GameConfig, GameState, PlayState};
use crate::world::{CurrentLevel, LevelRegistry};

const ROCK_COLOR: Color = Color::srgb(0.298, 0.686, 0.314);
const BOMB_COLOR: Color = Color::srgb(1.0, 0.341, 0.133);
const LABEL_COLOR: Color = Color::srgb(0.95, 0.95, 0.95);

/// Marker for HUD root entity.
#[derive(Component)]
pub struct HudRoot;

/// Which readout a HUD text shows.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub enum HudField {
    Level,
    Angle,
    Power,
    Rocks,
    Bombs,
    Projectile,
    Status,
}

/// Setup HUD systems.
pub fn setup_hud_systems(app: &mut App) {
    app.add_systems(OnEnter(GameState::InGame), spawn_hud)
        .add_systems(OnExit(GameState::InGame), cleanup_hud)
        .add_systems(Update, update_hud.run_if(in_state(GameState::InGame)));
}

pub fn angle_label(aim: &CannonAim) -> String {
    format!("Angle: {}°", aim.angle_degrees())
}

/// Power as the raw value and the share of the maximum.
pub fn power_label(aim: &CannonAim, max_power: f32) -> String {
    format!("Power: {:.0} ({}%)", aim.power, aim.power_percent(max_power))
}

pub fn projectile_color(kind: ProjectileKind) -> Color {
    match kind {
        ProjectileKind::Rock => ROCK_COLOR,
        ProjectileKind::Bomb => BOMB_COLOR,
    }
}

pub fn level_label(index: usize, difficulty: &str) -> String {
    format!("Level {} - {}", index + 1, difficulty)
}

fn status_label(state: Option<&PlayState>) -> &'static str {
    match state {
        Some(PlayState::Settling) => "Settling...",
        Some(PlayState::Paused) => "Paused",
        _ => "",
    }
}

/// Spawn the HUD UI.
fn spawn_hud(mut commands: Commands) {
    // Readouts in the top-left corner
    commands
        .spawn((
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                flex_direction: FlexDirection::Column,
                justify_content: JustifyContent::Start,
                align_items: AlignItems::Start,
                padding: UiRect::all(Val::Px(20.0)),
                row_gap: Val::Px(4.0),
                ..default()
            },
            HudRoot,
        ))
        .with_children(|parent| {
            for field in [
                HudField::Level,
                HudField::Angle,
                HudField::Power,
                HudField::Rocks,
                HudField::Bombs,
                HudField::Projectile,
            ] {
                spawn_readout(parent, field, 20.0);
            }
        });

    // Status line, bottom centre
    commands
        .spawn((
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                justify_content: JustifyContent::Center,
                align_items: AlignItems::End,
                padding: UiRect::bottom(Val::Px(40.0)),
                position_type: PositionType::Absolute,
                ..default()
            },
            HudRoot,
        ))
        .with_children(|parent| {
            spawn_readout(parent, HudField::Status, 28.0);
        });
}

fn spawn_readout(parent: &mut ChildBuilder, field: HudField, font_size: f32) {
    parent.spawn((
        Text::new(""),
        TextFont {
            font_size,
            ..default()
        },
        TextColor(LABEL_COLOR),
        field,
    ));
}

/// Refresh every readout from the current game state.
fn update_hud(
    config: Res<GameConfig>,
    ammo: Option<Res<Ammo>>,
    current: Res<CurrentLevel>,
    registry: Res<LevelRegistry>,
    play_state: Option<Res<State<PlayState>>>,
    cannon_query: Query<&CannonAim, With<Cannon>>,
    mut texts: Query<(&HudField, &mut Text, &mut TextColor)>,
) {
    let aim = cannon_query.get_single().ok();
    let ammo = ammo.as_deref().copied().unwrap_or_default();
    let state = play_state.as_ref().map(|state| state.get());

    for (field, mut text, mut color) in texts.iter_mut() {
        let value = match field {
            HudField::Level => match registry.get(current.index) {
                Some(level) => level_label(current.index, &level.difficulty),
                None => String::new(),
            },
            HudField::Angle => aim.map(angle_label).unwrap_or_default(),
            HudField::Power => aim
                .map(|aim| power_label(aim, config.aim.max_power))
                .unwrap_or_default(),
            HudField::Rocks => format!("Rocks: {}", ammo.rock),
            HudField::Bombs => format!("Bombs: {}", ammo.bomb),
            HudField::Projectile => match aim {
                Some(aim) => {
                    color.0 = projectile_color(aim.selected);
                    format!("Projectile: {}", aim.selected.label())
                }
                None => String::new(),
            },
            HudField::Status => status_label(state).to_string(),
        };

        if text.0 != value {
            text.0 = value;
        }
    }
}

/// Clean up HUD when leaving InGame.
fn cleanup_hud(mut commands: Commands, query: Query<Entity, With<HudRoot>>) {
    for entity in query.iter() {
        commands.entity(entity).despawn_recursive();
    }
}
