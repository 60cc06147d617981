//! Centralised gameplay constants.
//!
//! All tuneable values live here so they can be found and modified in one
//! place. [`crate::config::GameConfig::default`] mirrors every value below;
//! `assets/destroyer.toml` may override any subset at startup.

// ── Window ────────────────────────────────────────────────────────────────────

/// Game window width in pixels. The destroyer sits at the window centre.
pub const WINDOW_WIDTH: f32 = 1200.0;

/// Game window height in pixels.
pub const WINDOW_HEIGHT: f32 = 680.0;

// ── Destroyer ─────────────────────────────────────────────────────────────────

/// Starting (and initial maximum) hit points of the player's ship.
pub const DESTROYER_HP: i32 = 1000;

/// Distance from the ship centre to the gun muzzle, in pixels.
/// Player bullets spawn at the tip of the barrel.
pub const PIPE_LENGTH: f32 = 30.0;

/// Upper bound of the shooting-power pool.
pub const MAX_SHOOTING_POWER: f32 = 100.0;

/// Below this power the gun refuses to fire, and at or below it power
/// refills at [`LOW_POWER_REFILL`] instead of the configured rate.
pub const MIN_SHOOTING_POWER: f32 = 20.0;

/// At or above this power a shot drains the configured `power_reduction`;
/// below it every shot drains [`LOW_POWER_DRAIN`].
pub const HIGH_POWER_THRESHOLD: f32 = 80.0;

/// Fixed drain per shot while power is below [`HIGH_POWER_THRESHOLD`].
pub const LOW_POWER_DRAIN: f32 = 30.0;

/// Refill rate (power per second) while power is at or below
/// [`MIN_SHOOTING_POWER`]. Recovering from an empty gun is slow on purpose.
pub const LOW_POWER_REFILL: f32 = 20.0;

// ── Weapon option defaults ────────────────────────────────────────────────────

/// Default minimum time between two shots, in milliseconds.
pub const DEFAULT_RELOAD_TIME_MS: f32 = 500.0;

/// Default power drained per high-power shot.
pub const DEFAULT_POWER_REDUCTION: f32 = 40.0;

/// Default refill rate in power per second.
pub const DEFAULT_POWER_REFILL: f32 = 55.0;

/// Default turret rotation per input step, in degrees.
pub const DEFAULT_TURN_SPEED: u16 = 1;

// ── Enemies ───────────────────────────────────────────────────────────────────

/// Speed-up per game level applied to ships. 0.1 means 10 % faster per level.
pub const SHIP_LEVEL_SPEEDUP: f32 = 0.1;

/// Minimum distance between an enemy lane and the destroyer's horizontal
/// centre line, in pixels.
pub const ENEMY_MIN_LANE_DIST: f32 = 100.0;

// ── Crates ────────────────────────────────────────────────────────────────────

/// Effect magnitude of a crate when the spawner does not choose one.
pub const DEFAULT_CRATE_EFFECT_POINTS: i32 = 100;

// ── Config file ───────────────────────────────────────────────────────────────

/// Location of the optional TOML override file.
pub const CONFIG_PATH: &str = "assets/destroyer.toml";
