//! Runtime gameplay configuration loaded from `assets/destroyer.toml`.
//!
//! [`GameConfig`] is a Bevy [`Resource`] that mirrors the defaults in
//! [`crate::constants`]. At startup, [`load_game_config`] reads the TOML file
//! and overwrites the defaults with any values present in it. Missing keys
//! fall back to the compile-time defaults, so a minimal file can override
//! just what you care about.
//!
//! Enemy behaviour is tuned per kind under `[enemies.<kind>]`, using the
//! keys listed in [`crate::enemy::params`]:
//!
//! ```toml
//! destroyer_hp = 1500
//!
//! [weapon]
//! reload_time = 350.0
//!
//! [enemies.gunboat]
//! gun_pattern = [2.0, 0.2, 0.2]
//! max_instances = 2
//! ```
//!
//! A rejected enemy override is logged and skipped; it never stops the game.

use crate::constants::{CONFIG_PATH, DESTROYER_HP, WINDOW_HEIGHT, WINDOW_WIDTH};
use crate::destroyer::OptionDefaults;
use crate::enemy::{EnemyKind, EnemyParamTable, ParamValue};
use crate::error::{ConfigError, ParamError};
use bevy::prelude::*;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;

/// Runtime-tunable gameplay configuration.
#[derive(Resource, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    // ── Window ───────────────────────────────────────────────────────────────
    pub window_width: f32,
    pub window_height: f32,

    // ── Destroyer ────────────────────────────────────────────────────────────
    pub destroyer_hp: i32,

    /// Weapon option defaults the timed overrides revert to.
    pub weapon: OptionDefaults,

    // ── Enemies ──────────────────────────────────────────────────────────────
    /// Raw per-kind overrides, keyed by kind name then parameter key.
    pub enemies: BTreeMap<String, toml::Table>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            window_width: WINDOW_WIDTH,
            window_height: WINDOW_HEIGHT,
            destroyer_hp: DESTROYER_HP,
            weapon: OptionDefaults::default(),
            enemies: BTreeMap::new(),
        }
    }
}

impl GameConfig {
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(contents)?)
    }

    /// Read `path`. A missing file is `Ok(None)`.
    pub fn from_file(path: &Path) -> Result<Option<Self>, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(contents) => Self::from_toml_str(&contents).map(Some),
            Err(_) => Ok(None),
        }
    }

    #[inline]
    pub fn window_size(&self) -> Vec2 {
        Vec2::new(self.window_width, self.window_height)
    }

    /// Apply every `[enemies.<kind>]` override to `table`.
    ///
    /// Each accepted key is applied; every rejected one is returned. The
    /// table is usable either way.
    pub fn apply_enemy_overrides(&self, table: &mut EnemyParamTable) -> Vec<ConfigError> {
        let mut rejected = Vec::new();
        for (name, overrides) in &self.enemies {
            let Some(kind) = EnemyKind::from_name(name) else {
                rejected.push(ConfigError::UnknownEnemy { name: name.clone() });
                continue;
            };
            for (key, raw) in overrides {
                let result = match ParamValue::from_toml(raw) {
                    Some(value) => table.set_ship_param(kind, key, value),
                    None => Err(ParamError::UnsupportedValue { key: key.clone() }),
                };
                if let Err(source) = result {
                    rejected.push(ConfigError::Param {
                        enemy: name.clone(),
                        source,
                    });
                }
            }
        }
        rejected
    }
}

/// Startup system: load `assets/destroyer.toml` into [`GameConfig`] and
/// apply its enemy overrides to [`EnemyParamTable`].
///
/// Parse errors keep the compiled defaults. A missing file is not an error.
pub fn load_game_config(mut config: ResMut<GameConfig>, mut table: ResMut<EnemyParamTable>) {
    match GameConfig::from_file(Path::new(CONFIG_PATH)) {
        Ok(Some(loaded)) => {
            *config = loaded;
            info!("Loaded game config from {CONFIG_PATH}");
        }
        Ok(None) => info!("No {CONFIG_PATH} found; using compiled defaults"),
        Err(e) => warn!("Failed to read {CONFIG_PATH}: {e}; using defaults"),
    }

    for err in config.apply_enemy_overrides(&mut table) {
        warn!("Ignoring enemy override: {err}");
    }
}
