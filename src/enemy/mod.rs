//! Enemy module: hostile vessels and torpedoes.
//!
//! | Module | Responsibility |
//! |--------|----------------|
//! | [`params`] | `EnemyKind`, per-kind `EnemyParams` records, the `EnemyParamTable` resource and keyed overrides |
//! | [`vessel`] | `Enemy` component: lane movement, salvo gun, torpedo roll, hit points |

pub mod params;
pub mod vessel;

pub use params::{
    EnemyKind, EnemyParamTable, EnemyParams, FixedSpawn, Heading, ParamValue, SpawnCoord,
    SpawnMethod,
};
pub use vessel::Enemy;
