//! Projectiles: player missiles, enemy shells and mines.
//!
//! A projectile flies in a straight line along a fixed bearing. Speed, damage
//! and allegiance come from the kind's read-only [`BulletParams`] record.

use crate::geometry::project_point;
use bevy::prelude::*;
use rand::Rng;
use serde::Deserialize;

/// Immutable per-kind projectile parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BulletParams {
    /// Pixels per second.
    pub speed: f32,
    pub damage: i32,
    /// Friendly projectiles hurt enemies; hostile ones hurt the destroyer.
    pub friendly: bool,
}

const DESTROYER_MISSILE: BulletParams = BulletParams {
    speed: 800.0,
    damage: 100,
    friendly: true,
};

const ENEMY_SHELL: BulletParams = BulletParams {
    speed: 800.0,
    damage: 10,
    friendly: false,
};

// Barely drifts; a stationary hazard that wrecks whatever touches it.
const MINE: BulletParams = BulletParams {
    speed: 1.0,
    damage: 500,
    friendly: true,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BulletKind {
    #[default]
    DestroyerMissile,
    EnemyShell,
    Mine,
}

impl BulletKind {
    pub fn params(self) -> &'static BulletParams {
        match self {
            BulletKind::DestroyerMissile => &DESTROYER_MISSILE,
            BulletKind::EnemyShell => &ENEMY_SHELL,
            BulletKind::Mine => &MINE,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            BulletKind::DestroyerMissile => "destroyer_missile",
            BulletKind::EnemyShell => "enemy_shell",
            BulletKind::Mine => "mine",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "destroyer_missile" => Some(BulletKind::DestroyerMissile),
            "enemy_shell" => Some(BulletKind::EnemyShell),
            "mine" => Some(BulletKind::Mine),
            _ => None,
        }
    }
}

/// A projectile in flight.
#[derive(Component, Debug, Clone)]
pub struct Bullet {
    kind: BulletKind,
    position: Vec2,
    /// Bearing of travel in degrees.
    direction: f32,
    size: Vec2,
    rect: Rect,
}

fn centered_rect(center: Vec2, size: Vec2) -> Rect {
    Rect::from_center_size(center, size)
}

impl Bullet {
    /// Create a projectile at `origin` heading along `direction`.
    ///
    /// Mines ignore `direction` and face a random bearing; they barely move,
    /// so the facing only changes how the sprite is drawn.
    pub fn spawn(
        kind: BulletKind,
        origin: Vec2,
        direction: f32,
        image_size: Vec2,
        rng: &mut impl Rng,
    ) -> Self {
        let direction = match kind {
            BulletKind::Mine => rng.gen_range(0..359) as f32,
            _ => direction,
        };
        Self {
            kind,
            position: origin,
            direction,
            size: image_size,
            rect: centered_rect(origin, image_size),
        }
    }

    /// Fly `elapsed × speed` pixels along the bearing.
    pub fn advance(&mut self, elapsed: f32) {
        let distance = elapsed * self.kind.params().speed;
        self.position = project_point(self.position, self.direction, distance);
        self.rect = centered_rect(self.position, self.size);
    }

    #[inline]
    pub fn kind(&self) -> BulletKind {
        self.kind
    }

    /// Whole-pixel position, floored.
    pub fn position(&self) -> IVec2 {
        self.position.floor().as_ivec2()
    }

    #[inline]
    pub fn real_position(&self) -> Vec2 {
        self.position
    }

    #[inline]
    pub fn direction(&self) -> f32 {
        self.direction
    }

    #[inline]
    pub fn rect(&self) -> Rect {
        self.rect
    }

    #[inline]
    pub fn damage(&self) -> i32 {
        self.kind.params().damage
    }

    #[inline]
    pub fn is_friendly(&self) -> bool {
        self.kind.params().friendly
    }
}
