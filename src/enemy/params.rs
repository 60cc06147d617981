//! Enemy kinds and their parameter records.
//!
//! Each kind has one [`EnemyParams`] record. The compiled defaults come from
//! [`EnemyKind::default_params`]; the [`EnemyParamTable`] resource holds the
//! records actually used by the game, built once at startup and optionally
//! edited key-by-key from the config file before any enemy is spawned.
//! Spawned enemies copy their record, so later edits never reach live
//! instances.
//!
//! ## Parameter keys
//!
//! | Key | Value |
//! |-----|-------|
//! | `max_instances` | integer, or `"none"` for unlimited |
//! | `hp` | integer |
//! | `min_speed`, `max_speed` | px/s |
//! | `game_speed_multiplier` | speed-up per level, 0.1 = 10 % |
//! | `min_dist` | px from the destroyer's centre line |
//! | `has_torpedo` | bool |
//! | `torpedo_type` | enemy kind name, e.g. `"torpedo_1"` |
//! | `torpedo_speed` | px/s |
//! | `torpedo_chance` | 0.0–1.0 |
//! | `has_gun` | bool |
//! | `gun_type` | bullet kind name, e.g. `"enemy_shell"` |
//! | `gun_pattern` | list of wait times in seconds |
//! | `points` | integer |
//! | `damage` | integer, or `"none"` |
//! | `spawn_method` | `"random"`, `"fixed"` or `"launched"` |
//! | `fixed_spawn` | `[x, y]` or `[x, y, heading]`; −1 = window edge; or `"none"` |

use crate::bullet::BulletKind;
use crate::constants::{ENEMY_MIN_LANE_DIST, SHIP_LEVEL_SPEEDUP};
use crate::error::{ParamError, ParamResult};
use bevy::prelude::*;
use rand::Rng;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EnemyKind {
    Submarine,
    Gunboat,
    Torpedoboat,
    Torpedo0,
    Torpedo1,
    Torpedo2,
    RowingBoat,
}

impl EnemyKind {
    pub const ALL: [EnemyKind; 7] = [
        EnemyKind::Submarine,
        EnemyKind::Gunboat,
        EnemyKind::Torpedoboat,
        EnemyKind::Torpedo0,
        EnemyKind::Torpedo1,
        EnemyKind::Torpedo2,
        EnemyKind::RowingBoat,
    ];

    #[inline]
    fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            EnemyKind::Submarine => "submarine",
            EnemyKind::Gunboat => "gunboat",
            EnemyKind::Torpedoboat => "torpedoboat",
            EnemyKind::Torpedo0 => "torpedo_0",
            EnemyKind::Torpedo1 => "torpedo_1",
            EnemyKind::Torpedo2 => "torpedo_2",
            EnemyKind::RowingBoat => "rowing_boat",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.name() == name)
    }

    /// Compiled-in parameter record for this kind.
    pub fn default_params(self) -> EnemyParams {
        let ship = EnemyParams {
            max_instances: None,
            hp: 100,
            min_speed: 0.0,
            max_speed: 0.0,
            game_speed_multiplier: SHIP_LEVEL_SPEEDUP,
            min_dist: ENEMY_MIN_LANE_DIST,
            has_torpedo: false,
            torpedo_kind: EnemyKind::Torpedo0,
            torpedo_speed: 0.0,
            torpedo_chance: 0.0,
            has_gun: false,
            gun_bullet: BulletKind::EnemyShell,
            gun_pattern: Vec::new(),
            points: 100,
            damage: None,
            spawn_method: SpawnMethod::Random,
            fixed_spawn: None,
        };

        match self {
            EnemyKind::Submarine => EnemyParams {
                hp: 200,
                min_speed: 60.0,
                max_speed: 80.0,
                has_torpedo: true,
                torpedo_kind: EnemyKind::Torpedo1,
                torpedo_speed: 30.0,
                torpedo_chance: 0.3,
                ..ship
            },
            EnemyKind::Gunboat => EnemyParams {
                max_instances: Some(1),
                min_speed: 120.0,
                max_speed: 150.0,
                has_gun: true,
                gun_pattern: vec![3.0, 0.05, 0.07],
                ..ship
            },
            EnemyKind::Torpedoboat => EnemyParams {
                min_speed: 140.0,
                max_speed: 160.0,
                has_torpedo: true,
                torpedo_kind: EnemyKind::Torpedo1,
                torpedo_chance: 0.35,
                ..ship
            },
            EnemyKind::Torpedo0 => EnemyParams {
                min_speed: 80.0,
                max_speed: 80.0,
                points: 300,
                damage: Some(50),
                ..ship
            },
            // Launched torpedoes keep their launch speed at every level.
            EnemyKind::Torpedo1 => EnemyParams {
                min_speed: 60.0,
                max_speed: 60.0,
                game_speed_multiplier: 0.0,
                points: 300,
                damage: Some(80),
                spawn_method: SpawnMethod::Launched,
                ..ship
            },
            EnemyKind::Torpedo2 => EnemyParams {
                min_speed: 60.0,
                max_speed: 60.0,
                game_speed_multiplier: 0.0,
                points: 300,
                damage: Some(100),
                spawn_method: SpawnMethod::Launched,
                ..ship
            },
            EnemyKind::RowingBoat => EnemyParams {
                min_speed: 30.0,
                max_speed: 50.0,
                points: 300,
                damage: Some(50),
                spawn_method: SpawnMethod::Fixed,
                fixed_spawn: Some(FixedSpawn {
                    x: SpawnCoord::Edge,
                    y: SpawnCoord::At(0.0),
                    heading: None,
                }),
                ..ship
            },
        }
    }
}

/// Cardinal travel direction of an enemy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Heading {
    North = 0,
    East = 1,
    South = 2,
    West = 3,
}

impl Heading {
    pub fn from_index(index: u8) -> Option<Self> {
        match index {
            0 => Some(Heading::North),
            1 => Some(Heading::East),
            2 => Some(Heading::South),
            3 => Some(Heading::West),
            _ => None,
        }
    }

    #[inline]
    pub fn index(self) -> u8 {
        self as u8
    }

    /// The same direction as a bearing in degrees.
    #[inline]
    pub fn bearing(self) -> f32 {
        f32::from(self.index()) * 90.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpawnMethod {
    /// The spawner picks lane, side and speed at random.
    Random,
    /// Always enters at [`EnemyParams::fixed_spawn`].
    Fixed,
    /// Never spawned on its own; fired by another enemy.
    Launched,
}

/// One coordinate of a fixed spawn point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SpawnCoord {
    /// The far edge of the window on this axis.
    Edge,
    At(f32),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedSpawn {
    pub x: SpawnCoord,
    pub y: SpawnCoord,
    pub heading: Option<Heading>,
}

impl FixedSpawn {
    /// Spawn point in window pixels.
    pub fn resolve(&self, window_size: Vec2) -> Vec2 {
        let axis = |coord: SpawnCoord, extent: f32| match coord {
            SpawnCoord::Edge => extent,
            SpawnCoord::At(v) => v,
        };
        Vec2::new(axis(self.x, window_size.x), axis(self.y, window_size.y))
    }
}

/// Per-kind enemy behaviour.
#[derive(Debug, Clone, PartialEq)]
pub struct EnemyParams {
    pub max_instances: Option<u32>,
    pub hp: i32,
    pub min_speed: f32,
    pub max_speed: f32,
    pub game_speed_multiplier: f32,
    pub min_dist: f32,
    pub has_torpedo: bool,
    pub torpedo_kind: EnemyKind,
    pub torpedo_speed: f32,
    /// Probability in `[0, 1]` that an instance carries a torpedo.
    pub torpedo_chance: f32,
    pub has_gun: bool,
    pub gun_bullet: BulletKind,
    /// Wait times in seconds before each shot of a salvo, repeated cyclically.
    pub gun_pattern: Vec<f32>,
    pub points: u32,
    /// Collision damage dealt to the destroyer, for kinds that ram.
    pub damage: Option<i32>,
    pub spawn_method: SpawnMethod,
    pub fixed_spawn: Option<FixedSpawn>,
}

/// A dynamically typed parameter value, as read from config.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    List(Vec<f64>),
    /// Clears an optional parameter.
    Unset,
}

impl ParamValue {
    /// Convert a TOML value. Tables and datetimes have no parameter meaning.
    pub fn from_toml(value: &toml::Value) -> Option<Self> {
        match value {
            toml::Value::Boolean(b) => Some(ParamValue::Bool(*b)),
            toml::Value::Integer(i) => Some(ParamValue::Int(*i)),
            toml::Value::Float(f) => Some(ParamValue::Float(*f)),
            toml::Value::String(s) if s == "none" => Some(ParamValue::Unset),
            toml::Value::String(s) => Some(ParamValue::Text(s.clone())),
            toml::Value::Array(items) => items
                .iter()
                .map(|v| match v {
                    toml::Value::Integer(i) => Some(*i as f64),
                    toml::Value::Float(f) => Some(*f),
                    _ => None,
                })
                .collect::<Option<Vec<_>>>()
                .map(ParamValue::List),
            _ => None,
        }
    }

    fn as_bool(&self, key: &'static str) -> ParamResult<bool> {
        match self {
            ParamValue::Bool(b) => Ok(*b),
            _ => Err(mismatch(key, "a boolean")),
        }
    }

    fn as_f32(&self, key: &'static str) -> ParamResult<f32> {
        let n = match self {
            ParamValue::Int(i) => *i as f32,
            ParamValue::Float(f) => *f as f32,
            _ => return Err(mismatch(key, "a number")),
        };
        finite(key, n)
    }

    fn as_i32(&self, key: &'static str) -> ParamResult<i32> {
        match self {
            ParamValue::Int(i) => i32::try_from(*i).map_err(|_| ParamError::InvalidValue {
                key,
                reason: "out of range",
            }),
            _ => Err(mismatch(key, "an integer")),
        }
    }

    fn as_u32(&self, key: &'static str) -> ParamResult<u32> {
        match self {
            ParamValue::Int(i) => u32::try_from(*i).map_err(|_| ParamError::InvalidValue {
                key,
                reason: "must be a non-negative integer",
            }),
            _ => Err(mismatch(key, "an integer")),
        }
    }

    fn as_text(&self, key: &'static str) -> ParamResult<&str> {
        match self {
            ParamValue::Text(s) => Ok(s),
            _ => Err(mismatch(key, "a name")),
        }
    }
}

impl From<bool> for ParamValue {
    fn from(b: bool) -> Self {
        ParamValue::Bool(b)
    }
}

impl From<i64> for ParamValue {
    fn from(i: i64) -> Self {
        ParamValue::Int(i)
    }
}

impl From<f64> for ParamValue {
    fn from(f: f64) -> Self {
        ParamValue::Float(f)
    }
}

impl From<&str> for ParamValue {
    fn from(s: &str) -> Self {
        ParamValue::Text(s.to_owned())
    }
}

impl From<Vec<f64>> for ParamValue {
    fn from(list: Vec<f64>) -> Self {
        ParamValue::List(list)
    }
}

fn mismatch(key: &'static str, expected: &'static str) -> ParamError {
    ParamError::TypeMismatch { key, expected }
}

/// `inf` and `nan` are valid TOML but never a valid parameter.
fn finite(key: &'static str, n: f32) -> ParamResult<f32> {
    if n.is_finite() {
        Ok(n)
    } else {
        Err(ParamError::InvalidValue {
            key,
            reason: "must be a finite number",
        })
    }
}

fn optional<T>(
    value: &ParamValue,
    key: &'static str,
    parse: impl FnOnce(&ParamValue, &'static str) -> ParamResult<T>,
) -> ParamResult<Option<T>> {
    match value {
        ParamValue::Unset => Ok(None),
        other => parse(other, key).map(Some),
    }
}

fn spawn_coord(v: f64) -> SpawnCoord {
    if v == -1.0 {
        SpawnCoord::Edge
    } else {
        SpawnCoord::At(v as f32)
    }
}

impl EnemyParams {
    /// Set one parameter by key.
    ///
    /// Unknown keys and badly shaped values are returned as errors and leave
    /// the record unchanged.
    pub fn set_ship_param(&mut self, key: &str, value: ParamValue) -> ParamResult<()> {
        match key {
            "max_instances" => {
                self.max_instances = optional(&value, "max_instances", ParamValue::as_u32)?
            }
            "hp" => self.hp = value.as_i32("hp")?,
            "min_speed" => self.min_speed = value.as_f32("min_speed")?,
            "max_speed" => self.max_speed = value.as_f32("max_speed")?,
            "game_speed_multiplier" => {
                self.game_speed_multiplier = value.as_f32("game_speed_multiplier")?
            }
            "min_dist" => self.min_dist = value.as_f32("min_dist")?,
            "has_torpedo" => self.has_torpedo = value.as_bool("has_torpedo")?,
            "torpedo_type" => {
                let name = value.as_text("torpedo_type")?;
                self.torpedo_kind =
                    EnemyKind::from_name(name).ok_or(ParamError::InvalidValue {
                        key: "torpedo_type",
                        reason: "not an enemy kind",
                    })?;
            }
            "torpedo_speed" => self.torpedo_speed = value.as_f32("torpedo_speed")?,
            "torpedo_chance" => {
                let chance = value.as_f32("torpedo_chance")?;
                if !(0.0..=1.0).contains(&chance) {
                    return Err(ParamError::InvalidValue {
                        key: "torpedo_chance",
                        reason: "must be between 0.0 and 1.0",
                    });
                }
                self.torpedo_chance = chance;
            }
            "has_gun" => self.has_gun = value.as_bool("has_gun")?,
            "gun_type" => {
                let name = value.as_text("gun_type")?;
                self.gun_bullet = BulletKind::from_name(name).ok_or(ParamError::InvalidValue {
                    key: "gun_type",
                    reason: "not a bullet kind",
                })?;
            }
            "gun_pattern" => {
                let ParamValue::List(waits) = &value else {
                    return Err(mismatch("gun_pattern", "a list of seconds"));
                };
                let pattern: Vec<f32> = waits.iter().map(|w| *w as f32).collect();
                if pattern.is_empty() || pattern.iter().any(|w| !w.is_finite() || *w < 0.0) {
                    return Err(ParamError::InvalidValue {
                        key: "gun_pattern",
                        reason: "needs at least one finite, non-negative wait time",
                    });
                }
                self.gun_pattern = pattern;
            }
            "points" => self.points = value.as_u32("points")?,
            "damage" => self.damage = optional(&value, "damage", ParamValue::as_i32)?,
            "spawn_method" => {
                self.spawn_method = match value.as_text("spawn_method")? {
                    "random" => SpawnMethod::Random,
                    "fixed" => SpawnMethod::Fixed,
                    "launched" => SpawnMethod::Launched,
                    _ => {
                        return Err(ParamError::InvalidValue {
                            key: "spawn_method",
                            reason: "expected random, fixed or launched",
                        })
                    }
                }
            }
            "fixed_spawn" => {
                self.fixed_spawn = match &value {
                    ParamValue::Unset => None,
                    ParamValue::List(v) if v.len() == 2 || v.len() == 3 => {
                        for coord in &v[..2] {
                            finite("fixed_spawn", *coord as f32)?;
                        }
                        let heading = match v.get(2) {
                            None => None,
                            Some(h) => Some(
                                Heading::from_index(*h as u8)
                                    .filter(|_| h.fract() == 0.0 && *h >= 0.0)
                                    .ok_or(ParamError::InvalidValue {
                                        key: "fixed_spawn",
                                        reason: "heading must be 0, 1, 2 or 3",
                                    })?,
                            ),
                        };
                        Some(FixedSpawn {
                            x: spawn_coord(v[0]),
                            y: spawn_coord(v[1]),
                            heading,
                        })
                    }
                    _ => return Err(mismatch("fixed_spawn", "[x, y] or [x, y, heading]")),
                }
            }
            _ => {
                return Err(ParamError::UnknownKey {
                    key: key.to_owned(),
                })
            }
        }
        Ok(())
    }

    /// Pick an instance speed uniformly from `[min_speed, max_speed]`.
    pub fn roll_speed(&self, rng: &mut impl Rng) -> f32 {
        let (lo, hi) = if self.min_speed <= self.max_speed {
            (self.min_speed, self.max_speed)
        } else {
            (self.max_speed, self.min_speed)
        };
        if lo == hi {
            lo
        } else {
            rng.gen_range(lo..=hi)
        }
    }
}

/// Parameter records of every enemy kind.
#[derive(Resource, Debug, Clone)]
pub struct EnemyParamTable {
    params: Vec<EnemyParams>,
}

impl Default for EnemyParamTable {
    fn default() -> Self {
        Self {
            params: EnemyKind::ALL.iter().map(|k| k.default_params()).collect(),
        }
    }
}

impl EnemyParamTable {
    pub fn get(&self, kind: EnemyKind) -> &EnemyParams {
        &self.params[kind.index()]
    }

    /// Override one parameter of one kind. See [`EnemyParams::set_ship_param`].
    pub fn set_ship_param(
        &mut self,
        kind: EnemyKind,
        key: &str,
        value: ParamValue,
    ) -> ParamResult<()> {
        self.params[kind.index()].set_ship_param(key, value)
    }
}
