//! Headless tests for [`DestroyerCorePlugin`].
//!
//! These tests use [`MinimalPlugins`] with a manual time step of 100 ms, so
//! every `app.update()` after the first advances game time by exactly 0.1 s.
//! The first update only initialises the clock.

use std::time::Duration;

use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use destroyer::bullet::{Bullet, BulletKind};
use destroyer::config::GameConfig;
use destroyer::destroyer::Destroyer;
use destroyer::enemy::{Enemy, EnemyKind, EnemyParamTable, Heading, ParamValue};
use destroyer::simulation::{
    spawn_destroyer, CountdownTick, DestroyerCorePlugin, DestroyerFired, EnemyFired,
    FireRequest, GameLevel,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

// ── Helpers ───────────────────────────────────────────────────────────────────

const STEP: Duration = Duration::from_millis(100);
const SHIP_SIZE: Vec2 = Vec2::new(40.0, 90.0);
const BOAT_SIZE: Vec2 = Vec2::new(80.0, 20.0);

#[derive(Resource, Default)]
struct Collected {
    destroyer: Vec<DestroyerFired>,
    enemy: Vec<EnemyFired>,
    countdown: Vec<u32>,
}

fn collect_messages(
    mut destroyer: MessageReader<DestroyerFired>,
    mut enemy: MessageReader<EnemyFired>,
    mut countdown: MessageReader<CountdownTick>,
    mut out: ResMut<Collected>,
) {
    out.destroyer.extend(destroyer.read().copied());
    out.enemy.extend(enemy.read().copied());
    out.countdown.extend(countdown.read().map(|t| t.0));
}

fn test_app() -> App {
    let mut app = App::new();
    app.add_plugins((MinimalPlugins, DestroyerCorePlugin));
    app.insert_resource(TimeUpdateStrategy::ManualDuration(STEP));
    app.init_resource::<Collected>();
    app.add_systems(PostUpdate, collect_messages);
    app.update();
    app
}

fn add_destroyer(app: &mut App) -> Entity {
    let config = app.world().resource::<GameConfig>().clone();
    let now = app.world().resource::<Time>().elapsed_secs_f64();
    let entity = {
        let mut commands = app.world_mut().commands();
        spawn_destroyer(&mut commands, &config, SHIP_SIZE, now)
    };
    app.world_mut().flush();
    entity
}

fn gunboat_with_pattern(pattern: Vec<f64>) -> Enemy {
    let mut params = EnemyKind::Gunboat.default_params();
    params
        .set_ship_param("gun_pattern", ParamValue::List(pattern))
        .unwrap();
    Enemy::new(
        EnemyKind::Gunboat,
        params,
        100.0,
        Vec2::new(100.0, 340.0),
        Heading::East,
        BOAT_SIZE,
    )
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[test]
fn plugin_installs_default_resources() {
    let app = test_app();
    let config = app.world().resource::<GameConfig>();
    assert_eq!(config.destroyer_hp, 1000);
    assert_eq!(*app.world().resource::<GameLevel>(), GameLevel(0));
    assert!(app.world().get_resource::<EnemyParamTable>().is_some());
}

#[test]
fn enemies_move_faster_at_higher_levels() {
    let mut app = test_app();
    let slow = app.world_mut().spawn(gunboat_with_pattern(vec![100.0])).id();
    for _ in 0..10 {
        app.update();
    }
    let slow_x = app.world().get::<Enemy>(slow).unwrap().real_position().x;
    assert!((slow_x - 200.0).abs() < 0.5, "moved to {slow_x}");

    app.insert_resource(GameLevel(10));
    let fast = app.world_mut().spawn(gunboat_with_pattern(vec![100.0])).id();
    for _ in 0..10 {
        app.update();
    }
    let fast_x = app.world().get::<Enemy>(fast).unwrap().real_position().x;
    assert!((fast_x - 300.0).abs() < 0.5, "moved to {fast_x}");
}

#[test]
fn enemy_guns_aim_at_the_destroyer() {
    let mut app = test_app();
    add_destroyer(&mut app);
    let boat = app.world_mut().spawn(gunboat_with_pattern(vec![0.5, 0.2])).id();

    for _ in 0..10 {
        app.update();
    }

    let collected = app.world().resource::<Collected>();
    // first shot after 0.5 s, the next 0.2 s later
    assert!(collected.enemy.len() >= 2, "fired {}", collected.enemy.len());
    for shot in &collected.enemy {
        assert_eq!(shot.enemy, boat);
        assert_eq!(shot.bullet, BulletKind::EnemyShell);
        assert_eq!(shot.bearing, 90.0);
    }
}

#[test]
fn fire_request_respects_reload_time() {
    let mut app = test_app();
    let ship = add_destroyer(&mut app);

    app.world_mut().write_message(FireRequest);
    app.update();
    app.world_mut().write_message(FireRequest);
    app.update();

    let shots = app.world().resource::<Collected>().destroyer.clone();
    assert_eq!(shots.len(), 1);
    assert_eq!(shots[0].ship, ship);
    assert_eq!(shots[0].origin, Vec2::new(600.0, 310.0));
    assert_eq!(shots[0].bearing, 0.0);
    assert_eq!(shots[0].bullet, BulletKind::DestroyerMissile);

    for _ in 0..5 {
        app.update();
    }
    app.world_mut().write_message(FireRequest);
    app.update();

    assert_eq!(app.world().resource::<Collected>().destroyer.len(), 2);
    let power = app.world().get::<Destroyer>(ship).unwrap().shooting_power();
    assert!(power < 100.0);
}

#[test]
fn timed_override_and_countdown_run_on_game_time() {
    let mut app = test_app();
    let ship = add_destroyer(&mut app);
    {
        let mut destroyer = app.world_mut().get_mut::<Destroyer>(ship).unwrap();
        destroyer.options_mut().set_reload_time(100.0, Some(1.0));
        destroyer.options_mut().set_text_timer(1.0);
    }

    for _ in 0..15 {
        app.update();
    }

    let destroyer = app.world().get::<Destroyer>(ship).unwrap();
    assert_eq!(destroyer.options().reload_time(), 500.0);
    assert_eq!(app.world().resource::<Collected>().countdown, vec![1, 0]);
}

#[test]
fn destroyer_spawned_mid_game_keeps_its_overrides() {
    let mut app = test_app();
    for _ in 0..30 {
        app.update();
    }
    let ship = add_destroyer(&mut app);
    {
        let mut destroyer = app.world_mut().get_mut::<Destroyer>(ship).unwrap();
        destroyer.options_mut().set_reload_time(100.0, Some(1.0));
        destroyer.options_mut().set_text_timer(1.0);
    }

    for _ in 0..5 {
        app.update();
    }
    let destroyer = app.world().get::<Destroyer>(ship).unwrap();
    assert_eq!(destroyer.options().reload_time(), 100.0);
    assert_eq!(app.world().resource::<Collected>().countdown, vec![1]);

    for _ in 0..10 {
        app.update();
    }
    let destroyer = app.world().get::<Destroyer>(ship).unwrap();
    assert_eq!(destroyer.options().reload_time(), 500.0);
    assert_eq!(app.world().resource::<Collected>().countdown, vec![1, 0]);
}

#[test]
fn bullets_fly_each_frame() {
    let mut app = test_app();
    let mut rng = StdRng::seed_from_u64(9);
    let bullet = app
        .world_mut()
        .spawn(Bullet::spawn(
            BulletKind::EnemyShell,
            Vec2::new(600.0, 600.0),
            0.0,
            Vec2::splat(6.0),
            &mut rng,
        ))
        .id();

    for _ in 0..2 {
        app.update();
    }

    let b = app.world().get::<Bullet>(bullet).unwrap();
    assert!((b.real_position().y - 440.0).abs() < 0.5);
    assert_eq!(b.real_position().x, 600.0);
}
