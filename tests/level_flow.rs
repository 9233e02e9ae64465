//! Headless tests for the level lifecycle.
//!
//! The app runs the gameplay plugins on `MinimalPlugins` with no Rapier
//! world, so every level is built in visual-only mode. Time advances by a
//! fixed step each update.
//!
//! Covered scenarios:
//! 1. Start moves through Settling into Aiming with the level populated.
//! 2. Firing spends a shell and launches a projectile.
//! 3. Removing every enemy completes the level after the victory delay.
//! 4. Firing with nothing left ends the game.
//! 5. R rebuilds the level and restores its ammunition.
//! 6. The modelled muzzle sits where shots are launched from.
//! 7. A grounded bomb arms, bursts once after its fuse and kills nearby enemies.
//! 8. An enemy pushed off the field counts as a kill.
//! 9. The out-of-ammo countdown waits for live bombs and yields to victory.
//! 10. R during the victory delay drops the pending level complete.
//! 11. "Next level" builds the following level after its delay.

use bevy::prelude::*;
use bevy::state::app::StatesPlugin;
use bevy::time::TimeUpdateStrategy;
use bevy::transform::TransformPlugin;
use std::time::Duration;

use cannon_siege::artillery::{
    Ammo, ArtilleryPlugin, BombFuse, OutOfAmmoWatch, Projectile, ProjectileKind,
};
use cannon_siege::cannon::{muzzle_position, Cannon, CannonAim, CannonMuzzle, CannonPlugin};
use cannon_siege::core::{
    BombDetonatedEvent, CorePlugin, DelayedTransition, EnemyKilledEvent, GameConfig, GameState,
    KillCause, PendingAction, PlayState,
};
use cannon_siege::enemies::{Enemy, EnemyPlugin, EnemyTally};
use cannon_siege::physics::{Ballistic, PhysicsMode, PhysicsPlugin};
use cannon_siege::rendering::VisualConfig;
use cannon_siege::ui::schedule_next_level;
use cannon_siege::world::{Brick, CurrentLevel, LevelRegistry, WorldPlugin};

const STEP: Duration = Duration::from_millis(50);

// ── Helpers ───────────────────────────────────────────────────────────────────

fn headless_app() -> App {
    let mut app = App::new();
    app.add_plugins((MinimalPlugins, StatesPlugin, TransformPlugin))
        .insert_resource(TimeUpdateStrategy::ManualDuration(STEP))
        .init_resource::<Assets<Mesh>>()
        .init_resource::<Assets<StandardMaterial>>()
        .init_resource::<ButtonInput<KeyCode>>()
        .insert_resource(VisualConfig::default())
        .add_plugins((
            CorePlugin,
            CannonPlugin,
            ArtilleryPlugin,
            PhysicsPlugin,
            EnemyPlugin,
            WorldPlugin,
        ));
    app
}

fn play_state(app: &App) -> Option<PlayState> {
    app.world()
        .get_resource::<State<PlayState>>()
        .map(|state| *state.get())
}

fn run_until(app: &mut App, max_frames: usize, done: impl Fn(&App) -> bool) -> bool {
    for _ in 0..max_frames {
        app.update();
        if done(app) {
            return true;
        }
    }
    false
}

/// Start the first level and wait until the cannon can be aimed.
fn app_in_first_level() -> App {
    let mut app = headless_app();
    let in_menu = run_until(&mut app, 5, |app| {
        *app.world().resource::<State<GameState>>().get() == GameState::MainMenu
    });
    assert!(in_menu, "loading must finish within a few frames");

    app.world_mut()
        .resource_mut::<NextState<GameState>>()
        .set(GameState::InGame);

    let aiming = run_until(&mut app, 10, |app| play_state(app) == Some(PlayState::Aiming));
    assert!(aiming, "level must reach Aiming");
    app
}

fn count<F: bevy::ecs::query::QueryFilter>(app: &mut App) -> usize {
    app.world_mut()
        .query_filtered::<Entity, F>()
        .iter(app.world())
        .count()
}

/// Report every enemy as killed, as a blast or a fall would.
fn kill_all_enemies(app: &mut App) {
    let enemies: Vec<(Entity, Vec3)> = app
        .world_mut()
        .query_filtered::<(Entity, &Transform), With<Enemy>>()
        .iter(app.world())
        .map(|(entity, transform)| (entity, transform.translation))
        .collect();
    for (enemy, position) in enemies {
        app.world_mut().send_event(EnemyKilledEvent {
            enemy,
            position,
            cause: KillCause::OutOfBounds,
        });
    }
}

/// Bombs that have gone off so far.
#[derive(Resource, Default)]
struct Detonations(usize);

fn count_detonations(mut events: EventReader<BombDetonatedEvent>, mut seen: ResMut<Detonations>) {
    seen.0 += events.read().count();
}

fn track_detonations(app: &mut App) {
    app.init_resource::<Detonations>()
        .add_systems(Update, count_detonations);
}

fn pending(app: &App) -> Option<PendingAction> {
    app.world().resource::<DelayedTransition>().pending()
}

fn press(app: &mut App, key: KeyCode) {
    app.world_mut().resource_mut::<ButtonInput<KeyCode>>().press(key);
    app.update();
    let mut input = app.world_mut().resource_mut::<ButtonInput<KeyCode>>();
    input.release(key);
    input.clear();
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[test]
fn first_level_is_built_and_aimable() {
    let mut app = app_in_first_level();

    assert_eq!(*app.world().resource::<PhysicsMode>(), PhysicsMode::VisualOnly);
    assert_eq!(count::<With<Enemy>>(&mut app), 3);
    assert_eq!(count::<With<Brick>>(&mut app), 11);
    assert_eq!(count::<With<Cannon>>(&mut app), 1);
    assert_eq!(*app.world().resource::<Ammo>(), Ammo::new(8, 3));
}

#[test]
fn firing_spends_a_shell_and_launches() {
    let mut app = app_in_first_level();

    press(&mut app, KeyCode::Space);
    assert_eq!(*app.world().resource::<Ammo>(), Ammo::new(7, 3));
    assert_eq!(count::<With<Projectile>>(&mut app), 1);

    let start = app
        .world_mut()
        .query_filtered::<&Transform, With<Ballistic>>()
        .single(app.world())
        .translation;
    app.update();
    app.update();
    let later = app
        .world_mut()
        .query_filtered::<&Transform, With<Ballistic>>()
        .single(app.world())
        .translation;

    assert!(later.z > start.z, "projectile must travel downrange");
}

#[test]
fn clearing_all_enemies_completes_the_level() {
    let mut app = app_in_first_level();

    kill_all_enemies(&mut app);
    app.update();
    assert_eq!(count::<With<Enemy>>(&mut app), 0);
    assert_eq!(play_state(&app), Some(PlayState::Aiming), "victory waits for the delay");

    let complete = run_until(&mut app, 40, |app| {
        play_state(app) == Some(PlayState::LevelComplete)
    });
    assert!(complete, "level complete must follow the victory delay");
}

#[test]
fn firing_with_no_ammo_left_is_game_over() {
    let mut app = app_in_first_level();
    *app.world_mut().resource_mut::<Ammo>() = Ammo::new(0, 0);

    press(&mut app, KeyCode::Space);
    app.update();

    assert_eq!(play_state(&app), Some(PlayState::GameOver));
    assert_eq!(count::<With<Projectile>>(&mut app), 0);
}

#[test]
fn restart_rebuilds_the_level() {
    let mut app = app_in_first_level();

    press(&mut app, KeyCode::Space);
    assert_eq!(*app.world().resource::<Ammo>(), Ammo::new(7, 3));

    press(&mut app, KeyCode::KeyR);
    let settling = run_until(&mut app, 5, |app| play_state(app) == Some(PlayState::Settling));
    assert!(settling, "a rebuilt level settles first");
    let aiming = run_until(&mut app, 10, |app| play_state(app) == Some(PlayState::Aiming));
    assert!(aiming);

    assert_eq!(*app.world().resource::<Ammo>(), Ammo::new(8, 3));
    assert_eq!(count::<With<Projectile>>(&mut app), 0);
    assert_eq!(count::<With<Enemy>>(&mut app), 3);
    assert_eq!(count::<With<Cannon>>(&mut app), 1);
}

#[test]
fn muzzle_model_matches_launch_point() {
    let mut app = app_in_first_level();
    app.update();

    let config = app.world().resource::<GameConfig>().clone();
    let aim = *app
        .world_mut()
        .query_filtered::<&CannonAim, With<Cannon>>()
        .single(app.world());
    let muzzle = app
        .world_mut()
        .query_filtered::<&GlobalTransform, With<CannonMuzzle>>()
        .single(app.world())
        .translation();

    // The ring is drawn just inside the barrel tip
    let launch_point = muzzle_position(&config.ballistics, &aim);
    assert!(muzzle.distance(launch_point) < 0.1);
}

#[test]
fn grounded_bomb_bursts_exactly_once() {
    let mut app = app_in_first_level();
    track_detonations(&mut app);

    let min_elevation = app.world().resource::<GameConfig>().aim.min_elevation;
    let mut cannons = app.world_mut().query_filtered::<&mut CannonAim, With<Cannon>>();
    let mut aim = cannons.single_mut(app.world_mut());
    aim.selected = ProjectileKind::Bomb;
    aim.elevation = min_elevation;

    press(&mut app, KeyCode::Space);
    assert_eq!(*app.world().resource::<Ammo>(), Ammo::new(8, 2));

    // Aimed at the ground just ahead of the cannon, so it lands almost at once
    let armed = run_until(&mut app, 5, |app| {
        app.world()
            .iter_entities()
            .filter_map(|entity| entity.get::<BombFuse>())
            .any(|fuse| fuse.is_armed())
    });
    assert!(armed, "a bomb on the ground must arm");

    let rest_height = app.world().resource::<GameConfig>().blast.rest_height;
    let height = app
        .world_mut()
        .query_filtered::<&Transform, With<BombFuse>>()
        .single(app.world())
        .translation
        .y;
    assert!((height - rest_height).abs() < 1e-4);

    let burst = run_until(&mut app, 30, |app| app.world().resource::<Detonations>().0 > 0);
    assert!(burst, "fuse must run out after a second");

    for _ in 0..20 {
        app.update();
    }
    assert_eq!(app.world().resource::<Detonations>().0, 1);
    assert_eq!(count::<With<BombFuse>>(&mut app), 0);
    assert_eq!(count::<With<Projectile>>(&mut app), 0);
}

#[test]
fn blast_kills_enemies_within_reach() {
    let mut app = app_in_first_level();
    track_detonations(&mut app);

    // Beside the low platform enemy, about 4.4 from the middle one and
    // 8.8 from the tower one
    app.world_mut().spawn((
        Projectile {
            kind: ProjectileKind::Bomb,
        },
        BombFuse::default(),
        Transform::from_xyz(-3.6, 0.3, -4.0),
    ));

    let burst = run_until(&mut app, 30, |app| app.world().resource::<Detonations>().0 > 0);
    assert!(burst);
    app.update();

    let survivors: Vec<Vec3> = app
        .world_mut()
        .query_filtered::<&Transform, With<Enemy>>()
        .iter(app.world())
        .map(|transform| transform.translation)
        .collect();
    assert_eq!(survivors.len(), 1);
    assert!(survivors[0].x > 4.0, "only the far tower enemy is out of reach");
    assert_eq!(app.world().resource::<EnemyTally>().killed, 2);
}

#[test]
fn enemy_off_the_field_counts_as_a_kill() {
    let mut app = app_in_first_level();

    let mut enemies = app.world_mut().query_filtered::<&mut Transform, With<Enemy>>();
    let mut transform = enemies
        .iter_mut(app.world_mut())
        .next()
        .expect("level has enemies");
    transform.translation.x = 151.0;

    app.update();
    app.update();

    assert_eq!(count::<With<Enemy>>(&mut app), 2);
    assert_eq!(app.world().resource::<EnemyTally>().killed, 1);
}

#[test]
fn last_shell_ends_the_game_after_the_grace_period() {
    let mut app = app_in_first_level();
    *app.world_mut().resource_mut::<Ammo>() = Ammo::new(1, 0);

    press(&mut app, KeyCode::Space);
    assert!(app.world().resource::<OutOfAmmoWatch>().timer.is_some());

    // Three seconds in, still playing
    for _ in 0..60 {
        app.update();
    }
    assert_eq!(play_state(&app), Some(PlayState::Aiming));

    let lost = run_until(&mut app, 30, |app| play_state(app) == Some(PlayState::GameOver));
    assert!(lost, "four seconds after the last shell the level is lost");
}

#[test]
fn live_bomb_holds_the_out_of_ammo_countdown() {
    let mut app = app_in_first_level();
    *app.world_mut().resource_mut::<Ammo>() = Ammo::new(1, 0);

    press(&mut app, KeyCode::Space);
    // Still in the air, so it never arms
    let bomb = app
        .world_mut()
        .spawn((
            Projectile {
                kind: ProjectileKind::Bomb,
            },
            BombFuse::default(),
            Transform::from_xyz(0.0, 50.0, 0.0),
        ))
        .id();

    for _ in 0..120 {
        app.update();
    }
    assert_eq!(play_state(&app), Some(PlayState::Aiming));

    app.world_mut().despawn(bomb);
    for _ in 0..60 {
        app.update();
    }
    assert_eq!(play_state(&app), Some(PlayState::Aiming), "countdown resumes, not restarts");

    let lost = run_until(&mut app, 30, |app| play_state(app) == Some(PlayState::GameOver));
    assert!(lost);
}

#[test]
fn victory_clears_the_out_of_ammo_countdown() {
    let mut app = app_in_first_level();
    *app.world_mut().resource_mut::<Ammo>() = Ammo::new(1, 0);

    press(&mut app, KeyCode::Space);
    kill_all_enemies(&mut app);

    let won = run_until(&mut app, 40, |app| {
        play_state(app) == Some(PlayState::LevelComplete)
    });
    assert!(won);
    assert!(app.world().resource::<OutOfAmmoWatch>().timer.is_none());

    for _ in 0..100 {
        app.update();
    }
    assert_eq!(play_state(&app), Some(PlayState::LevelComplete));
}

#[test]
fn restart_during_victory_delay_cancels_level_complete() {
    let mut app = app_in_first_level();

    kill_all_enemies(&mut app);
    app.update();
    assert_eq!(pending(&app), Some(PendingAction::CompleteLevel));

    press(&mut app, KeyCode::KeyR);
    let settling = run_until(&mut app, 5, |app| play_state(app) == Some(PlayState::Settling));
    assert!(settling);
    assert_eq!(pending(&app), None);

    let aiming = run_until(&mut app, 10, |app| play_state(app) == Some(PlayState::Aiming));
    assert!(aiming);
    for _ in 0..40 {
        app.update();
    }

    assert_eq!(play_state(&app), Some(PlayState::Aiming));
    assert_eq!(count::<With<Enemy>>(&mut app), 3);
}

#[test]
fn next_level_is_built_after_its_delay() {
    let mut app = app_in_first_level();

    let next = app.world_mut().resource_scope(|world, mut delayed: Mut<DelayedTransition>| {
        world.resource_scope(|world, mut current: Mut<CurrentLevel>| {
            let delay = world.resource::<GameConfig>().timing.next_level_delay;
            schedule_next_level(world.resource::<LevelRegistry>(), &mut current, &mut delayed, delay)
        })
    });
    assert_eq!(next, 1);
    assert_eq!(pending(&app), Some(PendingAction::StartLevel(1)));

    // 1.5 s at 50 ms a frame
    for _ in 0..25 {
        app.update();
    }
    assert_eq!(*app.world().resource::<Ammo>(), Ammo::new(8, 3), "still on the first level");

    let rebuilt = run_until(&mut app, 10, |app| play_state(app) == Some(PlayState::Settling));
    assert!(rebuilt);
    let aiming = run_until(&mut app, 10, |app| play_state(app) == Some(PlayState::Aiming));
    assert!(aiming);

    assert_eq!(app.world().resource::<CurrentLevel>().index, 1);
    assert_eq!(*app.world().resource::<Ammo>(), Ammo::new(7, 2));
}
