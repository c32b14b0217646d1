#![forbid(unsafe_code)]

//! Tick-driven animation values.
//!
//! The decorative components (the floating logo, the tilting cards) are pure
//! value generators: the view calls [`Animation::tick`] once per frame and
//! reads [`Animation::value`]. Nothing here touches a renderer or a timer.
//!
//! Values are plain `f32` in whatever unit the caller picked (pixels,
//! degrees, scale factor). Progress math runs on [`Duration`] so long loops
//! do not drift.

pub mod decor;

use std::time::Duration;

// ---------------------------------------------------------------------------
// Easing
// ---------------------------------------------------------------------------

/// Maps `t` in [0, 1] to eased progress in [0, 1].
pub type EasingFn = fn(f32) -> f32;

#[inline]
pub fn linear(t: f32) -> f32 {
    t.clamp(0.0, 1.0)
}

/// Quadratic ease-in-out (slow start and end).
#[inline]
pub fn ease_in_out(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        2.0 * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
    }
}

// ---------------------------------------------------------------------------
// Animation trait
// ---------------------------------------------------------------------------

/// A time-based animation.
pub trait Animation {
    /// Advance by `dt`.
    fn tick(&mut self, dt: Duration);

    /// Whether the animation has reached its end. Loops never do.
    fn is_complete(&self) -> bool;

    /// Current output value.
    fn value(&self) -> f32;

    /// Return to the initial state.
    fn reset(&mut self);

    /// Time elapsed past completion, forwarded by composites.
    fn overshoot(&self) -> Duration {
        Duration::ZERO
    }
}

// ---------------------------------------------------------------------------
// Tween
// ---------------------------------------------------------------------------

/// Interpolates `from -> to` over a duration.
#[derive(Debug, Clone, Copy)]
pub struct Tween {
    from: f32,
    to: f32,
    elapsed: Duration,
    duration: Duration,
    easing: EasingFn,
}

impl Tween {
    /// A tween with `ease_in_out` easing. A zero duration completes on the
    /// first tick.
    pub fn new(from: f32, to: f32, duration: Duration) -> Self {
        Self {
            from,
            to,
            elapsed: Duration::ZERO,
            duration: if duration.is_zero() {
                Duration::from_nanos(1)
            } else {
                duration
            },
            easing: ease_in_out,
        }
    }

    #[must_use]
    pub fn easing(mut self, easing: EasingFn) -> Self {
        self.easing = easing;
        self
    }

    /// The same tween played backwards.
    #[must_use]
    pub fn reversed(&self) -> Self {
        Self {
            from: self.to,
            to: self.from,
            elapsed: Duration::ZERO,
            duration: self.duration,
            easing: self.easing,
        }
    }

    /// Raw progress before easing, in [0, 1].
    pub fn progress(&self) -> f32 {
        let t = self.elapsed.as_secs_f64() / self.duration.as_secs_f64();
        (t as f32).clamp(0.0, 1.0)
    }

    pub fn from(&self) -> f32 {
        self.from
    }

    pub fn to(&self) -> f32 {
        self.to
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }
}

impl Animation for Tween {
    fn tick(&mut self, dt: Duration) {
        self.elapsed = self.elapsed.saturating_add(dt);
    }

    fn is_complete(&self) -> bool {
        self.elapsed >= self.duration
    }

    fn value(&self) -> f32 {
        let t = (self.easing)(self.progress());
        self.from + (self.to - self.from) * t
    }

    fn reset(&mut self) {
        self.elapsed = Duration::ZERO;
    }

    fn overshoot(&self) -> Duration {
        self.elapsed.saturating_sub(self.duration)
    }
}

// ---------------------------------------------------------------------------
// PingPong
// ---------------------------------------------------------------------------

/// Plays a tween forward, then backward, forever.
#[derive(Debug, Clone, Copy)]
pub struct PingPong {
    there: Tween,
    back: Tween,
    returning: bool,
}

impl PingPong {
    pub fn new(there: Tween) -> Self {
        Self {
            there,
            back: there.reversed(),
            returning: false,
        }
    }

    /// Shorthand for `PingPong::new(Tween::new(from, to, leg))`.
    pub fn between(from: f32, to: f32, leg: Duration) -> Self {
        Self::new(Tween::new(from, to, leg))
    }

    /// Whether the backward leg is playing.
    pub fn is_returning(&self) -> bool {
        self.returning
    }
}

impl Animation for PingPong {
    fn tick(&mut self, dt: Duration) {
        let mut remaining = dt;
        // Bounded: every iteration consumes at least one full leg.
        loop {
            let leg = if self.returning {
                &mut self.back
            } else {
                &mut self.there
            };
            leg.tick(remaining);
            if !leg.is_complete() {
                break;
            }
            remaining = leg.overshoot();
            leg.reset();
            self.returning = !self.returning;
            if remaining.is_zero() {
                break;
            }
            let cycle = self.there.duration() + self.back.duration();
            if remaining >= cycle {
                remaining = Duration::from_nanos(
                    (remaining.as_nanos() % cycle.as_nanos()).min(u128::from(u64::MAX)) as u64,
                );
            }
        }
    }

    fn is_complete(&self) -> bool {
        false
    }

    fn value(&self) -> f32 {
        if self.returning {
            self.back.value()
        } else {
            self.there.value()
        }
    }

    fn reset(&mut self) {
        self.there.reset();
        self.back.reset();
        self.returning = false;
    }
}

// ---------------------------------------------------------------------------
// Spin
// ---------------------------------------------------------------------------

/// Continuous rotation in degrees, one full turn per `period`.
#[derive(Debug, Clone, Copy)]
pub struct Spin {
    period: Duration,
    phase: Duration,
}

impl Spin {
    pub fn new(period: Duration) -> Self {
        Self {
            period: if period.is_zero() {
                Duration::from_nanos(1)
            } else {
                period
            },
            phase: Duration::ZERO,
        }
    }

    /// Current angle in [0, 360).
    pub fn degrees(&self) -> f32 {
        (self.phase.as_secs_f64() / self.period.as_secs_f64() * 360.0) as f32
    }
}

impl Animation for Spin {
    fn tick(&mut self, dt: Duration) {
        let total = self.phase.as_nanos() + dt.as_nanos();
        self.phase = Duration::from_nanos((total % self.period.as_nanos()) as u64);
    }

    fn is_complete(&self) -> bool {
        false
    }

    fn value(&self) -> f32 {
        self.degrees()
    }

    fn reset(&mut self) {
        self.phase = Duration::ZERO;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MS_500: Duration = Duration::from_millis(500);
    const SEC_1: Duration = Duration::from_secs(1);

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 0.01
    }

    #[test]
    fn easing_clamps_input() {
        assert!(close(linear(-1.0), 0.0));
        assert!(close(linear(2.0), 1.0));
        assert!(close(ease_in_out(-0.5), 0.0));
        assert!(close(ease_in_out(1.5), 1.0));
    }

    #[test]
    fn ease_in_out_is_symmetric() {
        assert!(close(ease_in_out(0.5), 0.5));
        assert!(close(ease_in_out(0.25) + ease_in_out(0.75), 1.0));
    }

    #[test]
    fn tween_interpolates_between_endpoints() {
        let mut t = Tween::new(0.0, -10.0, SEC_1).easing(linear);
        assert!(close(t.value(), 0.0));
        t.tick(MS_500);
        assert!(close(t.value(), -5.0));
        t.tick(MS_500);
        assert!(t.is_complete());
        assert!(close(t.value(), -10.0));
    }

    #[test]
    fn tween_clamps_past_the_end() {
        let mut t = Tween::new(1.0, 1.05, SEC_1);
        t.tick(Duration::from_secs(60));
        assert!(close(t.value(), 1.05));
        assert_eq!(t.overshoot(), Duration::from_secs(59));
    }

    #[test]
    fn zero_duration_tween_completes_on_first_tick() {
        let mut t = Tween::new(0.0, 1.0, Duration::ZERO);
        t.tick(Duration::from_nanos(1));
        assert!(t.is_complete());
    }

    #[test]
    fn ping_pong_returns_to_start() {
        let mut p = PingPong::new(Tween::new(0.0, 1.0, SEC_1).easing(linear));
        p.tick(MS_500);
        assert!(close(p.value(), 0.5));
        p.tick(SEC_1);
        assert!(p.is_returning());
        assert!(close(p.value(), 0.5));
        p.tick(MS_500);
        assert!(!p.is_returning());
        assert!(close(p.value(), 0.0));
        assert!(!p.is_complete());
    }

    #[test]
    fn ping_pong_survives_huge_ticks() {
        let mut p = PingPong::between(0.0, 1.0, MS_500);
        p.tick(Duration::from_secs(3600));
        let v = p.value();
        assert!((0.0..=1.0).contains(&v), "value out of range: {v}");
    }

    #[test]
    fn spin_wraps_each_period() {
        let mut s = Spin::new(Duration::from_secs(4));
        s.tick(SEC_1);
        assert!(close(s.degrees(), 90.0));
        s.tick(Duration::from_secs(4));
        assert!(close(s.degrees(), 90.0));
        s.reset();
        assert!(close(s.degrees(), 0.0));
    }
}
