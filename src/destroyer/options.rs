//! Weapon options of the destroyer with timed overrides.
//!
//! Every option has a default and a current value. Setting an option with a
//! duration makes the change temporary: once the tick clock passes the
//! expiry timestamp the option falls back to its default. Setting without a
//! duration is permanent until the next explicit `set_*` or `reset_*`.
//!
//! Expiry is tracked as an absolute timestamp on the options' own clock and
//! compared on each [`DestroyerOptions::check`], so repeated small ticks do
//! not accumulate subtraction error per option.

use crate::bullet::BulletKind;
use crate::constants::{
    DEFAULT_POWER_REDUCTION, DEFAULT_POWER_REFILL, DEFAULT_RELOAD_TIME_MS, DEFAULT_TURN_SPEED,
};
use bevy::prelude::*;
use serde::Deserialize;

/// A value that may be temporarily overridden.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimedOption<T: Copy> {
    value: T,
    default: T,
    /// Clock time at which `value` reverts to `default`; `None` = permanent.
    expires_at: Option<f64>,
}

impl<T: Copy> TimedOption<T> {
    pub fn new(default: T) -> Self {
        Self {
            value: default,
            default,
            expires_at: None,
        }
    }

    #[inline]
    pub fn get(&self) -> T {
        self.value
    }

    #[inline]
    pub fn default_value(&self) -> T {
        self.default
    }

    fn set(&mut self, value: T, duration: Option<f64>, now: f64) {
        self.value = value;
        self.expires_at = duration.map(|d| now + d);
    }

    fn reset(&mut self) {
        self.value = self.default;
        self.expires_at = None;
    }

    fn remaining(&self, now: f64) -> Option<f64> {
        self.expires_at.map(|t| t - now)
    }

    /// Revert to the default when the override has run out.
    fn expire(&mut self, now: f64) -> bool {
        match self.expires_at {
            Some(t) if t <= now => {
                self.reset();
                true
            }
            _ => false,
        }
    }
}

/// Default values the option set reverts to.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct OptionDefaults {
    pub bullet_type: BulletKind,
    /// Minimum time between shots, in milliseconds.
    pub reload_time: f32,
    pub power_reduction: f32,
    /// Power regained per second while above the low-power threshold.
    pub power_refill: f32,
    /// Degrees per turret input step.
    pub turn_speed: u16,
}

impl Default for OptionDefaults {
    fn default() -> Self {
        Self {
            bullet_type: BulletKind::DestroyerMissile,
            reload_time: DEFAULT_RELOAD_TIME_MS,
            power_reduction: DEFAULT_POWER_REDUCTION,
            power_refill: DEFAULT_POWER_REFILL,
            turn_speed: DEFAULT_TURN_SPEED,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct TextCountdown {
    expires_at: f64,
    /// Last whole second reported; the next report fires when the remaining
    /// time drops below it.
    last_second: i64,
}

/// Weapon configuration of the player's ship.
#[derive(Component, Debug, Clone, PartialEq)]
pub struct DestroyerOptions {
    /// Seconds of game time seen by `check`.
    clock: f64,
    bullet_type: TimedOption<BulletKind>,
    reload_time: TimedOption<f32>,
    power_reduction: TimedOption<f32>,
    power_refill: TimedOption<f32>,
    turn_speed: TimedOption<u16>,
    text_timer: Option<TextCountdown>,
}

impl Default for DestroyerOptions {
    fn default() -> Self {
        Self::new(OptionDefaults::default())
    }
}

impl DestroyerOptions {
    pub fn new(defaults: OptionDefaults) -> Self {
        Self {
            clock: 0.0,
            bullet_type: TimedOption::new(defaults.bullet_type),
            reload_time: TimedOption::new(defaults.reload_time),
            power_reduction: TimedOption::new(defaults.power_reduction),
            power_refill: TimedOption::new(defaults.power_refill),
            turn_speed: TimedOption::new(defaults.turn_speed),
            text_timer: None,
        }
    }

    /// Start the options clock at game time `now`, so overrides set before
    /// the first `check` expire relative to it.
    pub fn with_clock(mut self, now: f64) -> Self {
        self.clock = self.clock.max(now);
        self
    }

    // ── Bullet type ──────────────────────────────────────────────────────────

    pub fn set_bullet_type(&mut self, bullet_type: BulletKind, duration: Option<f64>) {
        self.bullet_type.set(bullet_type, duration, self.clock);
    }

    pub fn bullet_type(&self) -> BulletKind {
        self.bullet_type.get()
    }

    pub fn reset_bullet_type(&mut self) {
        self.bullet_type.reset();
    }

    pub fn remaining_bullet_type(&self) -> Option<f64> {
        self.bullet_type.remaining(self.clock)
    }

    // ── Reload time ──────────────────────────────────────────────────────────

    /// Set the minimum time between shots in milliseconds.
    pub fn set_reload_time(&mut self, millis: f32, duration: Option<f64>) {
        self.reload_time.set(millis, duration, self.clock);
    }

    pub fn reload_time(&self) -> f32 {
        self.reload_time.get()
    }

    pub fn reset_reload_time(&mut self) {
        self.reload_time.reset();
    }

    pub fn remaining_reload_time(&self) -> Option<f64> {
        self.reload_time.remaining(self.clock)
    }

    // ── Power reduction ──────────────────────────────────────────────────────

    pub fn set_power_reduction(&mut self, reduction: f32, duration: Option<f64>) {
        self.power_reduction.set(reduction, duration, self.clock);
    }

    pub fn power_reduction(&self) -> f32 {
        self.power_reduction.get()
    }

    pub fn reset_power_reduction(&mut self) {
        self.power_reduction.reset();
    }

    pub fn remaining_power_reduction(&self) -> Option<f64> {
        self.power_reduction.remaining(self.clock)
    }

    // ── Power refill ─────────────────────────────────────────────────────────

    pub fn set_power_refill(&mut self, refill: f32, duration: Option<f64>) {
        self.power_refill.set(refill, duration, self.clock);
    }

    pub fn power_refill(&self) -> f32 {
        self.power_refill.get()
    }

    pub fn reset_power_refill(&mut self) {
        self.power_refill.reset();
    }

    pub fn remaining_power_refill(&self) -> Option<f64> {
        self.power_refill.remaining(self.clock)
    }

    // ── Turret turn speed ────────────────────────────────────────────────────

    pub fn set_turn_speed(&mut self, degrees: u16, duration: Option<f64>) {
        self.turn_speed.set(degrees, duration, self.clock);
    }

    pub fn turn_speed(&self) -> u16 {
        self.turn_speed.get()
    }

    pub fn reset_turn_speed(&mut self) {
        self.turn_speed.reset();
    }

    pub fn remaining_turn_speed(&self) -> Option<f64> {
        self.turn_speed.remaining(self.clock)
    }

    // ── Countdown text ───────────────────────────────────────────────────────

    /// Start the on-screen countdown. `check` reports each whole second.
    pub fn set_text_timer(&mut self, seconds: f64) {
        self.text_timer = Some(TextCountdown {
            expires_at: self.clock + seconds,
            last_second: seconds.floor() as i64,
        });
    }

    pub fn text_timer_active(&self) -> bool {
        self.text_timer.is_some()
    }

    // ── Tick ─────────────────────────────────────────────────────────────────

    /// Advance the options' clock by `elapsed` seconds.
    ///
    /// Expired overrides revert to their defaults. Returns the seconds to
    /// display when the countdown text just crossed a whole second.
    pub fn check(&mut self, elapsed: f32) -> Option<u32> {
        self.check_at(self.clock + f64::from(elapsed))
    }

    /// Like [`check`](Self::check) but with an absolute game time, e.g.
    /// `Time::elapsed_secs_f64`. The clock never runs backwards.
    pub fn check_at(&mut self, now: f64) -> Option<u32> {
        self.clock = self.clock.max(now);
        let now = self.clock;

        self.bullet_type.expire(now);
        self.reload_time.expire(now);
        self.power_reduction.expire(now);
        self.power_refill.expire(now);
        self.turn_speed.expire(now);

        let countdown = self.text_timer.as_mut()?;
        let remaining = countdown.expires_at - now;
        if remaining <= 0.0 {
            self.text_timer = None;
            return Some(0);
        }
        if remaining < countdown.last_second as f64 {
            countdown.last_second = remaining.floor() as i64;
            return Some((countdown.last_second + 1) as u32);
        }
        None
    }

    /// Seconds seen by `check` so far.
    pub fn clock(&self) -> f64 {
        self.clock
    }
}
