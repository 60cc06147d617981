//! Supply crates: stationary pickups the player shoots open.
//!
//! A crate only knows what it is and how old it is. The game loop decides
//! when a crate has expired and what its effect does to the destroyer.

use crate::constants::DEFAULT_CRATE_EFFECT_POINTS;
use bevy::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CrateKind {
    Repair,
    Armor,
    Life,
    Bomb,
    Mine,
    MachineGun,
}

impl CrateKind {
    pub const ALL: [CrateKind; 6] = [
        CrateKind::Repair,
        CrateKind::Armor,
        CrateKind::Life,
        CrateKind::Bomb,
        CrateKind::Mine,
        CrateKind::MachineGun,
    ];

    /// Numeric type tag, stable across versions.
    pub fn id(self) -> u8 {
        match self {
            CrateKind::Repair => 0,
            CrateKind::Armor => 1,
            CrateKind::Life => 2,
            CrateKind::Bomb => 3,
            CrateKind::Mine => 4,
            CrateKind::MachineGun => 5,
        }
    }

    pub fn from_id(id: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.id() == id)
    }
}

#[derive(Component, Debug, Clone)]
pub struct Crate {
    kind: CrateKind,
    origin: Vec2,
    rect: Rect,
    /// Game time of creation in seconds.
    created_at: f64,
    return_points: u32,
    effect_points: i32,
}

impl Crate {
    pub fn new(
        kind: CrateKind,
        origin: Vec2,
        image_size: Vec2,
        return_points: u32,
        effect_points: i32,
        now: f64,
    ) -> Self {
        Self {
            kind,
            origin,
            rect: Rect::from_corners(origin, origin + image_size),
            created_at: now,
            return_points,
            effect_points,
        }
    }

    /// A crate with the default effect magnitude.
    pub fn with_default_effect(
        kind: CrateKind,
        origin: Vec2,
        image_size: Vec2,
        return_points: u32,
        now: f64,
    ) -> Self {
        Self::new(
            kind,
            origin,
            image_size,
            return_points,
            DEFAULT_CRATE_EFFECT_POINTS,
            now,
        )
    }

    /// Seconds since creation; never negative.
    pub fn get_age(&self, now: f64) -> f64 {
        (now - self.created_at).max(0.0)
    }

    #[inline]
    pub fn kind(&self) -> CrateKind {
        self.kind
    }

    #[inline]
    pub fn position(&self) -> Vec2 {
        self.origin
    }

    #[inline]
    pub fn rect(&self) -> Rect {
        self.rect
    }

    /// Score for shooting the crate.
    #[inline]
    pub fn points(&self) -> u32 {
        self.return_points
    }

    #[inline]
    pub fn effect_points(&self) -> i32 {
        self.effect_points
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_round_trip() {
        for (i, kind) in CrateKind::ALL.into_iter().enumerate() {
            assert_eq!(kind.id() as usize, i);
            assert_eq!(CrateKind::from_id(kind.id()), Some(kind));
        }
        assert_eq!(CrateKind::from_id(6), None);
    }

    #[test]
    fn age_grows_from_zero() {
        let origin = Vec2::new(10.0, 20.0);
        let c = Crate::with_default_effect(CrateKind::Repair, origin, Vec2::splat(32.0), 50, 12.5);
        assert_eq!(c.get_age(12.5), 0.0);
        assert_eq!(c.get_age(15.0), 2.5);
        assert!(c.get_age(20.0) > c.get_age(15.0));
        assert_eq!(c.get_age(1.0), 0.0);
    }

    #[test]
    fn carries_points_and_effect() {
        let c = Crate::new(CrateKind::Armor, Vec2::ZERO, Vec2::splat(32.0), 75, 250, 0.0);
        assert_eq!(c.kind(), CrateKind::Armor);
        assert_eq!(c.points(), 75);
        assert_eq!(c.effect_points(), 250);
        assert_eq!(c.rect().max, Vec2::splat(32.0));

        let d = Crate::with_default_effect(CrateKind::MachineGun, Vec2::ZERO, Vec2::ONE, 0, 0.0);
        assert_eq!(d.effect_points(), 100);
    }
}
