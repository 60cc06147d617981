//! Live enemy instances: movement along a cardinal lane, salvo guns,
//! torpedo equipment and hit points.

use super::params::{EnemyKind, EnemyParamTable, EnemyParams, Heading};
use crate::bullet::BulletKind;
use bevy::prelude::*;
use rand::Rng;

#[derive(Component, Debug, Clone)]
pub struct Enemy {
    kind: EnemyKind,
    params: EnemyParams,
    hp: i32,
    /// Base speed in px/s before the level speed-up.
    speed: f32,
    real_position: Vec2,
    position: IVec2,
    heading: Heading,
    size: Vec2,
    rect: Rect,
    /// Rolled on first query, fixed afterwards.
    torpedo: Option<bool>,
    torpedo_shot: bool,
    gun_elapsed: f32,
    gun_cursor: usize,
}

impl Enemy {
    /// Build an enemy from an explicit parameter record and speed.
    pub fn new(
        kind: EnemyKind,
        params: EnemyParams,
        speed: f32,
        origin: Vec2,
        heading: Heading,
        image_size: Vec2,
    ) -> Self {
        let rect = Rect::new(
            origin.x,
            origin.y - image_size.y / 2.0,
            origin.x + image_size.x,
            origin.y + image_size.y / 2.0,
        );
        Self {
            kind,
            hp: params.hp,
            params,
            speed,
            real_position: origin,
            position: origin.round().as_ivec2(),
            heading,
            size: image_size,
            rect,
            torpedo: None,
            torpedo_shot: false,
            gun_elapsed: 0.0,
            gun_cursor: 0,
        }
    }

    /// Build an enemy of `kind` from the table, with a random speed in the
    /// kind's range.
    pub fn spawn(
        kind: EnemyKind,
        table: &EnemyParamTable,
        origin: Vec2,
        heading: Heading,
        image_size: Vec2,
        rng: &mut impl Rng,
    ) -> Self {
        let params = table.get(kind).clone();
        let speed = params.roll_speed(rng);
        Self::new(kind, params, speed, origin, heading, image_size)
    }

    /// Move along the heading for `elapsed` seconds at game `level`.
    ///
    /// Each level adds `game_speed_multiplier` of the base speed. The
    /// bounding rectangle is centred across the lane and anchored at the
    /// position along it.
    pub fn advance(&mut self, elapsed: f32, level: u32) {
        let speed = self.speed + self.speed * self.params.game_speed_multiplier * level as f32;
        let step = elapsed * speed;
        let (w, h) = (self.size.x, self.size.y);

        let min = match self.heading {
            Heading::North => {
                self.real_position.y -= step;
                Vec2::new(self.real_position.x - w / 2.0, self.real_position.y)
            }
            Heading::South => {
                self.real_position.y += step;
                Vec2::new(self.real_position.x - w / 2.0, self.real_position.y)
            }
            Heading::East => {
                self.real_position.x += step;
                Vec2::new(self.real_position.x, self.real_position.y - h / 2.0)
            }
            Heading::West => {
                self.real_position.x -= step;
                Vec2::new(self.real_position.x, self.real_position.y - h / 2.0)
            }
        };

        self.rect = Rect::from_corners(min, min + self.size);
        self.position = self.real_position.round().as_ivec2();
    }

    /// Whether this instance carries a torpedo.
    ///
    /// For kinds that can carry one, the first call rolls 1–9 against
    /// `torpedo_chance × 10` and the outcome holds for the instance's life.
    pub fn has_torpedo(&mut self, rng: &mut impl Rng) -> bool {
        if !self.params.has_torpedo {
            return false;
        }
        if let Some(equipped) = self.torpedo {
            return equipped;
        }

        let roll = rng.gen_range(1..10);
        let equipped = roll as f32 <= self.params.torpedo_chance * 10.0;
        debug!(
            "{} torpedo roll {} against {:.1}: {}",
            self.kind.name(),
            roll,
            self.params.torpedo_chance * 10.0,
            if equipped { "equipped" } else { "none" }
        );
        self.torpedo = Some(equipped);
        equipped
    }

    /// Feed the gun `elapsed` seconds. Returns `true` on each shot.
    ///
    /// The gun waits the current step of the pattern, fires, then moves on
    /// to the next step, wrapping after the last one.
    pub fn shoot(&mut self, elapsed: f32) -> bool {
        self.gun_elapsed += elapsed;
        if !self.params.has_gun {
            return false;
        }
        let Some(&wait) = self.params.gun_pattern.get(self.gun_cursor) else {
            return false;
        };
        if self.gun_elapsed < wait {
            return false;
        }

        self.gun_elapsed = 0.0;
        self.gun_cursor = (self.gun_cursor + 1) % self.params.gun_pattern.len();
        true
    }

    /// Apply damage. Returns `true` when the enemy is destroyed.
    ///
    /// Stored hit points bottom out at zero. Negative amounts are ignored.
    pub fn reduce_hp(&mut self, amount: i32) -> bool {
        self.hp = self.hp.saturating_sub(amount.max(0)).max(0);
        self.hp <= 0
    }

    /// Mark the carried torpedo as launched.
    pub fn set_torpedo_shot(&mut self) {
        self.torpedo_shot = true;
    }

    #[inline]
    pub fn torpedo_shot(&self) -> bool {
        self.torpedo_shot
    }

    #[inline]
    pub fn kind(&self) -> EnemyKind {
        self.kind
    }

    #[inline]
    pub fn params(&self) -> &EnemyParams {
        &self.params
    }

    #[inline]
    pub fn hp(&self) -> i32 {
        self.hp
    }

    #[inline]
    pub fn speed(&self) -> f32 {
        self.speed
    }

    /// Whole-pixel position, rounded.
    #[inline]
    pub fn position(&self) -> IVec2 {
        self.position
    }

    #[inline]
    pub fn real_position(&self) -> Vec2 {
        self.real_position
    }

    #[inline]
    pub fn heading(&self) -> Heading {
        self.heading
    }

    pub fn set_heading(&mut self, heading: Heading) {
        self.heading = heading;
    }

    #[inline]
    pub fn rect(&self) -> Rect {
        self.rect
    }

    pub fn center_point(&self) -> Vec2 {
        self.rect.center()
    }

    #[inline]
    pub fn gun_bullet(&self) -> BulletKind {
        self.params.gun_bullet
    }

    /// Index of the pattern step the gun is waiting on.
    #[inline]
    pub fn gun_cursor(&self) -> usize {
        self.gun_cursor
    }

    #[inline]
    pub fn points(&self) -> u32 {
        self.params.points
    }

    #[inline]
    pub fn damage(&self) -> Option<i32> {
        self.params.damage
    }
}
