//! The player's destroyer: turret, rate of fire, shooting power and hull.
//!
//! The ship sits at the centre of the window and never moves. Time enters
//! every timed operation as `now`, seconds since game start (what Bevy's
//! `Time::elapsed_secs_f64` reports), so the reload gate and power refill
//! are measured against the same clock the loop advances once per frame.

use super::options::DestroyerOptions;
use crate::constants::{
    HIGH_POWER_THRESHOLD, LOW_POWER_DRAIN, LOW_POWER_REFILL, MAX_SHOOTING_POWER,
    MIN_SHOOTING_POWER, PIPE_LENGTH,
};
use crate::geometry::project_point;
use bevy::prelude::*;

/// Turret rotation sense.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rotation {
    Clockwise,
    CounterClockwise,
}

/// The player's ship.
#[derive(Component, Debug, Clone)]
pub struct Destroyer {
    hp: i32,
    max_hp: i32,
    /// Turret bearing in whole degrees, always in `[0, 360)`.
    turret: u16,
    shooting_power: f32,
    last_shot: Option<f64>,
    last_power_check: f64,
    center: Vec2,
    rect: Rect,
    pipe_length: f32,
    options: DestroyerOptions,
}

impl Destroyer {
    /// Place a fresh ship in the middle of `window_size`.
    pub fn new(
        hp: i32,
        options: DestroyerOptions,
        window_size: Vec2,
        image_size: Vec2,
        now: f64,
    ) -> Self {
        let center = window_size / 2.0;
        Self {
            hp,
            max_hp: hp,
            turret: 0,
            shooting_power: MAX_SHOOTING_POWER,
            last_shot: None,
            last_power_check: now,
            center,
            rect: Rect::from_center_size(center, image_size),
            pipe_length: PIPE_LENGTH,
            options: options.with_clock(now),
        }
    }

    // ── Turret ───────────────────────────────────────────────────────────────

    /// Rotate the turret by `steps` degrees, wrapping through north.
    pub fn turn_turret(&mut self, rotation: Rotation, steps: u16) {
        let delta = i32::from(steps);
        let bearing = match rotation {
            Rotation::Clockwise => i32::from(self.turret) + delta,
            Rotation::CounterClockwise => i32::from(self.turret) - delta,
        };
        self.turret = bearing.rem_euclid(360) as u16;
    }

    /// Rotate by the configured turn speed; one call per input tick.
    pub fn turn_turret_step(&mut self, rotation: Rotation) {
        let steps = self.options.turn_speed();
        self.turn_turret(rotation, steps);
    }

    #[inline]
    pub fn direction(&self) -> u16 {
        self.turret
    }

    /// Tip of the barrel, where player projectiles are spawned.
    pub fn muzzle_point(&self) -> Vec2 {
        project_point(self.center, f32::from(self.turret), self.pipe_length)
    }

    // ── Gun ──────────────────────────────────────────────────────────────────

    /// Try to fire at game time `now`.
    ///
    /// Refused below the minimum power or while reloading. The very first
    /// shot of a ship costs nothing. Later shots drain the configured power
    /// reduction while the pool is at or above the high-power threshold, and
    /// a fixed amount once it has fallen below.
    pub fn shoot(&mut self, now: f64) -> bool {
        if self.shooting_power < MIN_SHOOTING_POWER {
            return false;
        }

        let Some(last_shot) = self.last_shot else {
            self.last_shot = Some(now);
            return true;
        };

        let since_ms = (now - last_shot) * 1000.0;
        if since_ms < f64::from(self.options.reload_time()) {
            return false;
        }

        self.last_shot = Some(now);
        let drain = if self.shooting_power >= HIGH_POWER_THRESHOLD {
            self.options.power_reduction()
        } else {
            LOW_POWER_DRAIN
        };
        self.shooting_power = (self.shooting_power - drain).max(0.0);
        true
    }

    /// Refill shooting power for the time passed since the previous call.
    pub fn regenerate_power(&mut self, now: f64) {
        let delta = (now - self.last_power_check).max(0.0) as f32;
        let rate = if self.shooting_power > MIN_SHOOTING_POWER {
            self.options.power_refill()
        } else {
            LOW_POWER_REFILL
        };
        self.shooting_power = (self.shooting_power + rate * delta).min(MAX_SHOOTING_POWER);
        self.last_power_check = now;
    }

    #[inline]
    pub fn shooting_power(&self) -> f32 {
        self.shooting_power
    }

    /// Overwrite the power pool, clamped to `[0, 100]`.
    pub fn set_shooting_power(&mut self, power: f32) {
        self.shooting_power = power.clamp(0.0, MAX_SHOOTING_POWER);
    }

    #[inline]
    pub fn options(&self) -> &DestroyerOptions {
        &self.options
    }

    #[inline]
    pub fn options_mut(&mut self) -> &mut DestroyerOptions {
        &mut self.options
    }

    // ── Hull ─────────────────────────────────────────────────────────────────

    /// Apply damage. Returns `true` when the ship is destroyed.
    ///
    /// Stored hit points stay within `[0, max_hp]`. Negative amounts are
    /// ignored.
    pub fn reduce_hp(&mut self, amount: i32) -> bool {
        self.hp = self.hp.saturating_sub(amount.max(0)).max(0);
        self.hp <= 0
    }

    /// Heal, never above the maximum. Negative amounts are ignored.
    pub fn increase_hp(&mut self, amount: i32) {
        self.hp = self.hp.saturating_add(amount.max(0)).min(self.max_hp);
    }

    /// Raise the maximum; current hit points are untouched.
    pub fn increase_max_hp(&mut self, amount: i32) {
        self.max_hp = self.max_hp.saturating_add(amount.max(0));
    }

    pub fn reset_hp(&mut self) {
        self.hp = self.max_hp;
    }

    #[inline]
    pub fn hp(&self) -> i32 {
        self.hp
    }

    #[inline]
    pub fn max_hp(&self) -> i32 {
        self.max_hp
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.center
    }

    #[inline]
    pub fn rect(&self) -> Rect {
        self.rect
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn ship() -> Destroyer {
        Destroyer::new(
            1000,
            DestroyerOptions::default(),
            Vec2::new(1200.0, 680.0),
            Vec2::new(40.0, 90.0),
            0.0,
        )
    }

    #[test]
    fn sits_in_window_centre() {
        let s = ship();
        assert_eq!(s.center(), Vec2::new(600.0, 340.0));
        assert_eq!(s.rect().min, Vec2::new(580.0, 295.0));
        assert_eq!(s.muzzle_point(), Vec2::new(600.0, 310.0));
    }

    #[test]
    fn turret_wraps_both_ways() {
        let mut s = ship();
        s.turn_turret(Rotation::CounterClockwise, 5);
        assert_eq!(s.direction(), 355);
        s.turn_turret(Rotation::Clockwise, 10);
        assert_eq!(s.direction(), 5);
        s.turn_turret(Rotation::Clockwise, 355);
        assert_eq!(s.direction(), 0);
    }

    #[test]
    fn turret_step_uses_turn_speed_option() {
        let mut s = ship();
        s.options_mut().set_turn_speed(3, None);
        s.turn_turret_step(Rotation::Clockwise);
        s.turn_turret_step(Rotation::Clockwise);
        assert_eq!(s.direction(), 6);
    }

    #[test]
    fn second_shot_within_reload_is_refused() {
        let mut s = ship();
        assert!(s.shoot(1.0));
        assert!(!s.shoot(1.3));
        assert_eq!(s.shooting_power(), 100.0);
    }

    #[test]
    fn shots_spaced_by_reload_both_fire() {
        let mut s = ship();
        assert!(s.shoot(1.0));
        assert_eq!(s.shooting_power(), 100.0);
        assert!(s.shoot(1.5));
        assert_eq!(s.shooting_power(), 60.0);
    }

    #[test]
    fn drain_branch_switches_at_eighty() {
        let mut s = ship();
        assert!(s.shoot(0.0));

        s.set_shooting_power(80.0);
        assert!(s.shoot(1.0));
        assert_eq!(s.shooting_power(), 40.0);

        s.set_shooting_power(79.0);
        assert!(s.shoot(2.0));
        assert_eq!(s.shooting_power(), 49.0);
    }

    #[test]
    fn low_power_blocks_fire_and_floors_at_zero() {
        let mut s = ship();
        assert!(s.shoot(0.0));
        s.set_shooting_power(19.9);
        assert!(!s.shoot(5.0));

        s.set_shooting_power(20.0);
        assert!(s.shoot(6.0));
        assert_eq!(s.shooting_power(), 0.0);
    }

    #[test]
    fn reload_override_shortens_gap() {
        let mut s = ship();
        s.options_mut().set_reload_time(100.0, Some(5.0));
        assert!(s.shoot(0.0));
        assert!(s.shoot(0.1));
    }

    #[test]
    fn regeneration_rate_depends_on_level() {
        let mut s = ship();
        s.set_shooting_power(50.0);
        s.regenerate_power(0.5);
        assert_relative_eq!(s.shooting_power(), 77.5, epsilon = 1e-4);

        s.set_shooting_power(10.0);
        s.regenerate_power(1.0);
        assert_relative_eq!(s.shooting_power(), 20.0, epsilon = 1e-4);

        s.regenerate_power(10.0);
        assert_eq!(s.shooting_power(), 100.0);
    }

    #[test]
    fn hull_damage_and_repair() {
        let mut s = ship();
        assert!(!s.reduce_hp(400));
        assert_eq!(s.hp(), 600);

        s.increase_hp(1000);
        assert_eq!(s.hp(), 1000);

        s.increase_max_hp(200);
        assert_eq!(s.max_hp(), 1200);
        assert_eq!(s.hp(), 1000);

        assert!(s.reduce_hp(5000));
        assert_eq!(s.hp(), 0);

        s.reset_hp();
        assert_eq!(s.hp(), 1200);
    }

    #[test]
    fn hull_ignores_negative_and_huge_amounts() {
        let mut s = ship();
        assert!(!s.reduce_hp(-500));
        assert_eq!(s.hp(), 1000);

        s.increase_hp(-5000);
        assert_eq!(s.hp(), 1000);

        s.reduce_hp(100);
        s.increase_hp(i32::MAX);
        assert_eq!(s.hp(), 1000);

        s.increase_max_hp(-300);
        assert_eq!(s.max_hp(), 1000);
        s.increase_max_hp(i32::MAX);
        assert_eq!(s.max_hp(), i32::MAX);

        assert!(s.reduce_hp(i32::MAX));
        assert_eq!(s.hp(), 0);
    }

    #[test]
    fn late_spawn_keeps_timed_overrides() {
        let mut s = Destroyer::new(
            1000,
            DestroyerOptions::default(),
            Vec2::new(1200.0, 680.0),
            Vec2::new(40.0, 90.0),
            100.0,
        );
        s.options_mut().set_reload_time(200.0, Some(5.0));
        s.options_mut().set_text_timer(2.0);

        assert_eq!(s.options_mut().check_at(100.1), Some(2));
        assert_eq!(s.options().reload_time(), 200.0);
        assert!(s.options().text_timer_active());

        s.options_mut().check_at(105.0);
        assert_eq!(s.options().reload_time(), 500.0);
        assert!(!s.options().text_timer_active());
    }

    #[test]
    fn exact_lethal_damage_destroys() {
        let mut s = ship();
        assert!(s.reduce_hp(1000));
    }
}
