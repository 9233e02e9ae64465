//! Firing the cannon and losing a level on an empty magazine.

use bevy::prelude::*;

use super::components::*;
use crate::cannon::{launch_velocity, muzzle_position, Cannon, CannonAim};
use crate::core::{DelayedTransition, FireEvent, GameConfig, PendingAction, PlayState};
use crate::enemies::Enemy;
use crate::physics::{attach_body, collision_radius_for, BodyRole, BodySpec, PhysicsMode};
use crate::world::LevelEntity;

/// Result of trying to take a shell for a shot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShotCheck {
    /// A shell was taken
    Fire,
    /// The selected kind is empty but the other kind is not
    Empty,
    /// Nothing left at all while enemies still stand
    OutOfAmmo,
}

/// Take a shell of `kind` if one is left.
pub fn check_shot(ammo: &mut Ammo, kind: ProjectileKind, enemies_left: bool) -> ShotCheck {
    if ammo.take(kind) {
        ShotCheck::Fire
    } else if ammo.is_exhausted() && enemies_left {
        ShotCheck::OutOfAmmo
    } else {
        ShotCheck::Empty
    }
}

/// Space fires the selected projectile from the muzzle.
#[allow(clippy::too_many_arguments)]
pub fn fire_projectile(
    mut commands: Commands,
    keyboard: Res<ButtonInput<KeyCode>>,
    config: Res<GameConfig>,
    mode: Res<PhysicsMode>,
    assets: Res<ProjectileAssets>,
    mut ammo: ResMut<Ammo>,
    mut used: ResMut<AmmoUsed>,
    mut watch: ResMut<OutOfAmmoWatch>,
    cannon_query: Query<&CannonAim, With<Cannon>>,
    enemies: Query<(), With<Enemy>>,
    mut next_state: ResMut<NextState<PlayState>>,
    mut fire_events: EventWriter<FireEvent>,
) {
    if !keyboard.just_pressed(KeyCode::Space) {
        return;
    }

    let Ok(aim) = cannon_query.get_single() else {
        return;
    };
    let kind = aim.selected;

    match check_shot(&mut ammo, kind, !enemies.is_empty()) {
        ShotCheck::Fire => {}
        ShotCheck::Empty => {
            info!("No {} left", kind.label().to_lowercase());
            return;
        }
        ShotCheck::OutOfAmmo => {
            info!("Out of ammunition");
            next_state.set(PlayState::GameOver);
            return;
        }
    }
    used.record(kind);

    let origin = muzzle_position(&config.ballistics, aim);
    let velocity = launch_velocity(&config.ballistics, aim);

    let mut projectile = commands.spawn((
        Projectile { kind },
        collision_radius_for(BodyRole::Projectile(kind)),
        Mesh3d(assets.mesh(kind)),
        MeshMaterial3d(assets.material(kind)),
        Transform::from_translation(origin),
        LevelEntity,
    ));
    if kind == ProjectileKind::Bomb {
        projectile.insert(BombFuse::default());
    }
    attach_body(
        &mut projectile,
        &BodySpec::projectile(kind, velocity),
        &config.physics,
        *mode,
    );
    let entity = projectile.id();

    info!(
        "Fired {} at {:.0}% power ({} rocks, {} bombs left)",
        kind.label().to_lowercase(),
        aim.power_percent(config.aim.max_power),
        ammo.rock,
        ammo.bomb
    );

    if ammo.is_exhausted() {
        watch.timer = Some(Timer::from_seconds(
            config.timing.out_of_ammo_grace,
            TimerMode::Once,
        ));
    }

    fire_events.send(FireEvent {
        projectile: entity,
        kind,
        origin,
        velocity,
    });
}

/// Lose the level a while after the last shell, unless it is won.
///
/// The countdown waits while any bomb is still live, since its blast may
/// yet clear the field.
pub fn watch_out_of_ammo(
    time: Res<Time>,
    mut watch: ResMut<OutOfAmmoWatch>,
    delayed: Res<DelayedTransition>,
    bombs: Query<(), With<BombFuse>>,
    enemies: Query<(), With<Enemy>>,
    mut next_state: ResMut<NextState<PlayState>>,
) {
    if watch.timer.is_none() {
        return;
    }

    if enemies.is_empty() || delayed.pending() == Some(PendingAction::CompleteLevel) {
        watch.timer = None;
        return;
    }
    if !bombs.is_empty() {
        return;
    }

    let finished = watch
        .timer
        .as_mut()
        .is_some_and(|timer| timer.tick(time.delta()).just_finished());
    if finished {
        watch.timer = None;
        info!("Out of ammunition with enemies left");
        next_state.set(PlayState::GameOver);
    }
}
