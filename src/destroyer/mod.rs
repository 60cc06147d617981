//! Destroyer module: the player's ship and its weapon options.
//!
//! ## Sub-module layout
//!
//! | Module | Responsibility |
//! |--------|----------------|
//! | [`options`] | `DestroyerOptions`: weapon settings with timed overrides and the countdown text timer |
//! | [`ship`] | `Destroyer` component: turret, reload gate, shooting power, hit points |

pub mod options;
pub mod ship;

pub use options::{DestroyerOptions, OptionDefaults, TimedOption};
pub use ship::{Destroyer, Rotation};
