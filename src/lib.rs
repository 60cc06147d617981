//! Entity, weapon and combat core of a top-down naval arcade shooter.
//!
//! The player's destroyer sits in the middle of the sea and turns its turret
//! against submarines, gunboats, torpedo boats, torpedoes and rowing boats
//! crossing on cardinal lanes. Shooting supply crates yields repairs and
//! weapon upgrades.
//!
//! Every entity is a Bevy component with plain methods taking elapsed or
//! absolute game time, so it can be driven by [`simulation::DestroyerCorePlugin`]
//! or called directly.

pub mod bullet;
pub mod config;
pub mod constants;
pub mod destroyer;
pub mod enemy;
pub mod error;
pub mod geometry;
pub mod pickup;
pub mod simulation;
