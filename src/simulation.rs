//! Bevy plugin driving the entity model once per frame.
//!
//! Rendering, input, collision tests and spawning policy belong to the host
//! app. This plugin owns only the per-tick calls on each live entity, in an
//! order that keeps power and option state coherent:
//!
//! 1. destroyer options `check` (timed overrides, countdown text)
//! 2. destroyer `regenerate_power`
//! 3. destroyer `shoot` for each [`FireRequest`]
//! 4. enemy movement, then enemy guns
//! 5. projectile movement
//!
//! Results leave the plugin as messages ([`DestroyerFired`], [`EnemyFired`],
//! [`CountdownTick`]) so the host can spawn sprites and update the HUD.

use crate::bullet::{Bullet, BulletKind};
use crate::config::{load_game_config, GameConfig};
use crate::destroyer::{Destroyer, DestroyerOptions};
use crate::enemy::{Enemy, EnemyParamTable};
use crate::geometry::get_bearing;
use bevy::prelude::*;

/// Current game level; enemies speed up as it grows.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GameLevel(pub u32);

/// Host request to fire the destroyer's gun this frame.
#[derive(Message, Debug, Clone, Copy, Default)]
pub struct FireRequest;

/// The destroyer fired; spawn a projectile at `origin`.
#[derive(Message, Debug, Clone, Copy, PartialEq)]
pub struct DestroyerFired {
    pub ship: Entity,
    pub origin: Vec2,
    pub bearing: f32,
    pub bullet: BulletKind,
}

/// An enemy gun fired; spawn a projectile at `origin`.
#[derive(Message, Debug, Clone, Copy, PartialEq)]
pub struct EnemyFired {
    pub enemy: Entity,
    pub origin: Vec2,
    pub bearing: f32,
    pub bullet: BulletKind,
}

/// The countdown text crossed a whole second.
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub struct CountdownTick(pub u32);

pub struct DestroyerCorePlugin;

impl Plugin for DestroyerCorePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<GameConfig>()
            .init_resource::<EnemyParamTable>()
            .init_resource::<GameLevel>()
            .add_message::<FireRequest>()
            .add_message::<DestroyerFired>()
            .add_message::<EnemyFired>()
            .add_message::<CountdownTick>()
            .add_systems(Startup, load_game_config)
            .add_systems(
                Update,
                (
                    destroyer_options_system,
                    destroyer_power_system,
                    destroyer_fire_system,
                    enemy_move_system,
                    enemy_gun_system,
                    bullet_move_system,
                )
                    .chain(),
            );
    }
}

/// Spawn the player's ship using the configured hit points and weapon
/// defaults, centred in the configured window.
pub fn spawn_destroyer(
    commands: &mut Commands,
    config: &GameConfig,
    image_size: Vec2,
    now: f64,
) -> Entity {
    let options = DestroyerOptions::new(config.weapon);
    let ship = Destroyer::new(
        config.destroyer_hp,
        options,
        config.window_size(),
        image_size,
        now,
    );
    debug!("Destroyer spawned with {} hp", ship.hp());
    commands.spawn(ship).id()
}

pub fn destroyer_options_system(
    time: Res<Time>,
    mut q_ship: Query<&mut Destroyer>,
    mut ticks: MessageWriter<CountdownTick>,
) {
    let now = time.elapsed_secs_f64();
    for mut ship in q_ship.iter_mut() {
        if let Some(second) = ship.options_mut().check_at(now) {
            ticks.write(CountdownTick(second));
        }
    }
}

pub fn destroyer_power_system(time: Res<Time>, mut q_ship: Query<&mut Destroyer>) {
    let now = time.elapsed_secs_f64();
    for mut ship in q_ship.iter_mut() {
        ship.regenerate_power(now);
    }
}

/// One shot attempt per frame, however many requests arrived.
pub fn destroyer_fire_system(
    time: Res<Time>,
    mut requests: MessageReader<FireRequest>,
    mut q_ship: Query<(Entity, &mut Destroyer)>,
    mut fired: MessageWriter<DestroyerFired>,
) {
    if requests.read().count() == 0 {
        return;
    }
    let now = time.elapsed_secs_f64();
    for (entity, mut ship) in q_ship.iter_mut() {
        if ship.shoot(now) {
            fired.write(DestroyerFired {
                ship: entity,
                origin: ship.muzzle_point(),
                bearing: f32::from(ship.direction()),
                bullet: ship.options().bullet_type(),
            });
        }
    }
}

pub fn enemy_move_system(time: Res<Time>, level: Res<GameLevel>, mut q: Query<&mut Enemy>) {
    let dt = time.delta_secs();
    for mut enemy in q.iter_mut() {
        enemy.advance(dt, level.0);
    }
}

/// Enemy guns aim at the destroyer; with no destroyer alive they fire
/// straight ahead.
pub fn enemy_gun_system(
    time: Res<Time>,
    mut q_enemies: Query<(Entity, &mut Enemy)>,
    q_ship: Query<&Destroyer>,
    mut fired: MessageWriter<EnemyFired>,
) {
    let dt = time.delta_secs();
    let target = q_ship.iter().next().map(Destroyer::center);

    for (entity, mut enemy) in q_enemies.iter_mut() {
        if !enemy.shoot(dt) {
            continue;
        }
        let origin = enemy.center_point();
        let bearing = match target {
            Some(t) => get_bearing(origin, t).0,
            None => enemy.heading().bearing(),
        };
        fired.write(EnemyFired {
            enemy: entity,
            origin,
            bearing,
            bullet: enemy.gun_bullet(),
        });
    }
}

pub fn bullet_move_system(time: Res<Time>, mut q: Query<&mut Bullet>) {
    let dt = time.delta_secs();
    for mut bullet in q.iter_mut() {
        bullet.advance(dt);
    }
}
