#![forbid(unsafe_code)]

//! Slide controller: the onboarding carousel's state machine.
//!
//! Owns the current slide index of a fixed-length deck and a single
//! auto-advance timer. The host forwards gestures (swipe, dot tap, skip,
//! "Get Started") and timer fires in, and drains [`SlideEvent`]s out.
//!
//! # Usage
//!
//! ```ignore
//! let mut timers = TimerQueue::new();
//! let mut slides = SlideController::new(4, Duration::from_secs(4))?;
//! slides.start(&mut timers);
//!
//! timers.advance(frame_dt, |timers, fired| {
//!     slides.on_timer_fire(fired.id, timers);
//! });
//! for event in slides.drain_events() {
//!     match event {
//!         SlideEvent::IndexChanged(i) => { /* scroll to page i */ }
//!         SlideEvent::Completed => { /* leave onboarding */ }
//!     }
//! }
//! ```
//!
//! # Invariants
//!
//! 1. `0 <= current_index() < slide_count()` at all times.
//! 2. At most one auto-advance timer is armed, and any previous timer is
//!    cancelled before a new one is scheduled.
//! 3. Every transition that does not complete the deck re-arms exactly one
//!    fresh timer (once started).
//! 4. `Completed` is emitted exactly once; no `IndexChanged` follows it.
//! 5. Only the currently armed timer id can advance the deck. A stale id
//!    (cancelled, superseded, or foreign) is ignored.
//!
//! # Failure Modes
//!
//! - Zero slides or a zero delay: [`SlideError::InvalidArgument`] at
//!   construction, the only error this type ever returns.
//! - Out-of-range navigation targets: clamped, never rejected.
//! - Any call after completion: ignored.

use std::fmt;
use std::time::Duration;

use smartbudget_core::{Scheduler, TimerId};

use crate::config::OnboardingConfig;
use crate::pager::Pager;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Construction errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlideError {
    /// A construction parameter was not positive.
    InvalidArgument {
        argument: &'static str,
        reason: &'static str,
    },
}

impl fmt::Display for SlideError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidArgument { argument, reason } => {
                write!(f, "invalid argument `{argument}`: {reason}")
            }
        }
    }
}

impl std::error::Error for SlideError {}

// ---------------------------------------------------------------------------
// Events
// ---------------------------------------------------------------------------

/// What the view needs to react to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlideEvent {
    /// The active slide changed.
    IndexChanged(usize),
    /// The deck is done (ran out, skipped, or "Get Started").
    Completed,
}

// ---------------------------------------------------------------------------
// Controller
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Armed {
    id: TimerId,
    index: usize,
}

/// Carousel state machine.
#[derive(Debug)]
pub struct SlideController {
    slide_count: usize,
    auto_advance: Duration,
    current: usize,
    armed: Option<Armed>,
    started: bool,
    completed: bool,
    events: Vec<SlideEvent>,
}

impl SlideController {
    /// Create a controller for `slide_count` slides advancing every
    /// `auto_advance`.
    pub fn new(slide_count: usize, auto_advance: Duration) -> Result<Self, SlideError> {
        if slide_count == 0 {
            return Err(SlideError::InvalidArgument {
                argument: "slide_count",
                reason: "must be at least 1",
            });
        }
        if auto_advance.is_zero() {
            return Err(SlideError::InvalidArgument {
                argument: "auto_advance",
                reason: "must be longer than zero",
            });
        }
        Ok(Self {
            slide_count,
            auto_advance,
            current: 0,
            armed: None,
            started: false,
            completed: false,
            events: Vec::new(),
        })
    }

    /// Create a controller using the configured delay.
    pub fn with_config(slide_count: usize, config: &OnboardingConfig) -> Result<Self, SlideError> {
        Self::new(slide_count, config.auto_advance)
    }

    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current
    }

    #[must_use]
    pub fn slide_count(&self) -> usize {
        self.slide_count
    }

    #[must_use]
    pub fn auto_advance(&self) -> Duration {
        self.auto_advance
    }

    #[must_use]
    pub fn is_completed(&self) -> bool {
        self.completed
    }

    #[must_use]
    pub fn is_started(&self) -> bool {
        self.started
    }

    /// Whether the active slide is the last one.
    #[must_use]
    pub fn is_last(&self) -> bool {
        self.current + 1 == self.slide_count
    }

    /// The pending auto-advance timer, if any.
    #[must_use]
    pub fn armed_timer(&self) -> Option<TimerId> {
        self.armed.map(|a| a.id)
    }

    /// Take all pending events, oldest first.
    pub fn drain_events(&mut self) -> Vec<SlideEvent> {
        std::mem::take(&mut self.events)
    }

    #[must_use]
    pub fn pending_event_count(&self) -> usize {
        self.events.len()
    }

    /// Arm the auto-advance timer for the current slide.
    ///
    /// Idempotent while a timer for the current slide is still pending.
    pub fn start(&mut self, timers: &mut impl Scheduler) {
        if self.completed {
            return;
        }
        self.started = true;
        if let Some(armed) = self.armed {
            if armed.index == self.current && timers.is_pending(armed.id) {
                return;
            }
        }
        self.rearm(timers);
    }

    /// User swiped to or tapped the dot of `target`.
    ///
    /// Out-of-range targets clamp to the nearest slide. The countdown
    /// restarts from the new slide rather than stopping.
    pub fn on_manual_navigate(&mut self, target: i64, timers: &mut impl Scheduler) {
        if self.completed {
            tracing::trace!(target, "navigation after completion ignored");
            return;
        }
        let index = self.clamp(target);
        self.disarm(timers);
        if index != self.current {
            self.current = index;
            self.events.push(SlideEvent::IndexChanged(index));
            tracing::debug!(index, "manual navigation");
        }
        if self.started {
            self.rearm(timers);
        }
    }

    /// Horizontal scroll settled at `offset_x`.
    ///
    /// Acts only when the offset lands on a different slide, so the scroll
    /// echo of a programmatic page change does not reset the countdown.
    pub fn on_scroll(&mut self, offset_x: f32, pager: &Pager, timers: &mut impl Scheduler) {
        let target = pager.index_at(offset_x);
        if self.clamp(target) == self.current {
            return;
        }
        self.on_manual_navigate(target, timers);
    }

    /// User skipped onboarding.
    pub fn skip(&mut self, timers: &mut impl Scheduler) {
        self.finish(timers, "skipped");
    }

    /// User pressed "Get Started".
    pub fn complete(&mut self, timers: &mut impl Scheduler) {
        self.finish(timers, "completed");
    }

    /// A timer fired. Returns `false` if `id` is not this controller's
    /// pending timer, in which case nothing changes.
    pub fn on_timer_fire(&mut self, id: TimerId, timers: &mut impl Scheduler) -> bool {
        match self.armed {
            Some(armed) if armed.id == id => {
                self.armed = None;
            }
            _ => {
                tracing::trace!(timer = id.get(), "stale or foreign timer ignored");
                return false;
            }
        }
        if self.is_last() {
            self.finish(timers, "auto-completed");
        } else {
            self.current += 1;
            self.events.push(SlideEvent::IndexChanged(self.current));
            tracing::debug!(index = self.current, "auto-advanced");
            self.rearm(timers);
        }
        true
    }

    /// The carousel is going away: cancel the timer without completing.
    pub fn dispose(&mut self, timers: &mut impl Scheduler) {
        self.disarm(timers);
        self.started = false;
    }

    fn finish(&mut self, timers: &mut impl Scheduler, how: &'static str) {
        if self.completed {
            return;
        }
        self.disarm(timers);
        self.completed = true;
        self.events.push(SlideEvent::Completed);
        tracing::info!(index = self.current, how, "onboarding finished");
    }

    fn rearm(&mut self, timers: &mut impl Scheduler) {
        self.disarm(timers);
        let id = timers.schedule(self.auto_advance);
        self.armed = Some(Armed {
            id,
            index: self.current,
        });
    }

    fn disarm(&mut self, timers: &mut impl Scheduler) {
        if let Some(armed) = self.armed.take() {
            timers.cancel(armed.id);
        }
    }

    fn clamp(&self, target: i64) -> usize {
        let last = self.slide_count - 1;
        usize::try_from(target).map_or(0, |t| t.min(last))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use smartbudget_core::TimerQueue;

    const DELAY: Duration = Duration::from_millis(4000);

    fn started(n: usize) -> (SlideController, TimerQueue) {
        let mut timers = TimerQueue::new();
        let mut c = SlideController::new(n, DELAY).unwrap();
        c.start(&mut timers);
        (c, timers)
    }

    #[test]
    fn rejects_zero_slides() {
        let err = SlideController::new(0, DELAY).unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid argument `slide_count`: must be at least 1"
        );
    }

    #[test]
    fn rejects_zero_delay() {
        assert!(matches!(
            SlideController::new(3, Duration::ZERO),
            Err(SlideError::InvalidArgument {
                argument: "auto_advance",
                ..
            })
        ));
    }

    #[test]
    fn starts_at_first_slide_with_one_timer() {
        let (c, timers) = started(4);
        assert_eq!(c.current_index(), 0);
        assert_eq!(timers.pending_count(), 1);
        assert_eq!(timers.deadline_of(c.armed_timer().unwrap()), Some(DELAY));
    }

    #[test]
    fn start_is_idempotent() {
        let (mut c, mut timers) = started(4);
        let first = c.armed_timer();
        c.start(&mut timers);
        assert_eq!(c.armed_timer(), first);
        assert_eq!(timers.pending_count(), 1);
    }

    #[test]
    fn navigation_clamps_low_and_high() {
        let (mut c, mut timers) = started(4);
        c.on_manual_navigate(99, &mut timers);
        assert_eq!(c.current_index(), 3);
        c.on_manual_navigate(-1, &mut timers);
        assert_eq!(c.current_index(), 0);
        c.on_manual_navigate(i64::MIN, &mut timers);
        assert_eq!(c.current_index(), 0);
        assert_eq!(
            c.drain_events(),
            vec![SlideEvent::IndexChanged(3), SlideEvent::IndexChanged(0)]
        );
    }

    #[test]
    fn navigating_to_current_slide_restarts_countdown_silently() {
        let (mut c, mut timers) = started(4);
        let before = c.armed_timer().unwrap();
        timers.advance(Duration::from_millis(1000), |_, _| {});
        c.on_manual_navigate(0, &mut timers);
        let after = c.armed_timer().unwrap();
        assert_ne!(before, after);
        assert!(!timers.is_pending(before));
        assert_eq!(timers.deadline_of(after), Some(Duration::from_millis(5000)));
        assert!(c.drain_events().is_empty());
    }

    #[test]
    fn navigation_before_start_does_not_arm() {
        let mut timers = TimerQueue::new();
        let mut c = SlideController::new(4, DELAY).unwrap();
        c.on_manual_navigate(2, &mut timers);
        assert_eq!(c.current_index(), 2);
        assert_eq!(timers.pending_count(), 0);
        c.start(&mut timers);
        assert_eq!(timers.pending_count(), 1);
    }

    #[test]
    fn skip_twice_completes_once() {
        let (mut c, mut timers) = started(4);
        c.skip(&mut timers);
        c.skip(&mut timers);
        c.complete(&mut timers);
        assert_eq!(c.drain_events(), vec![SlideEvent::Completed]);
        assert_eq!(timers.pending_count(), 0);
        assert!(c.is_completed());
    }

    #[test]
    fn stale_timer_is_ignored() {
        let (mut c, mut timers) = started(4);
        let stale = c.armed_timer().unwrap();
        c.on_manual_navigate(1, &mut timers);
        assert!(!c.on_timer_fire(stale, &mut timers));
        assert_eq!(c.current_index(), 1);
    }

    #[test]
    fn single_slide_deck_completes_on_first_fire() {
        let (mut c, mut timers) = started(1);
        timers.advance(DELAY, |t, f| {
            c.on_timer_fire(f.id, t);
        });
        assert_eq!(c.drain_events(), vec![SlideEvent::Completed]);
    }

    #[test]
    fn nothing_happens_after_completion() {
        let (mut c, mut timers) = started(3);
        c.complete(&mut timers);
        c.drain_events();
        c.on_manual_navigate(2, &mut timers);
        c.start(&mut timers);
        assert_eq!(c.current_index(), 0);
        assert_eq!(timers.pending_count(), 0);
        assert!(c.drain_events().is_empty());
    }

    #[test]
    fn dispose_cancels_without_completing() {
        let (mut c, mut timers) = started(3);
        c.dispose(&mut timers);
        assert_eq!(timers.pending_count(), 0);
        assert!(!c.is_completed());
        assert!(c.drain_events().is_empty());
    }

    #[test]
    fn scroll_echo_does_not_reset_countdown() {
        let (mut c, mut timers) = started(4);
        let pager = Pager::new(390.0);
        let armed = c.armed_timer();
        c.on_scroll(20.0, &pager, &mut timers);
        assert_eq!(c.armed_timer(), armed);
        c.on_scroll(400.0, &pager, &mut timers);
        assert_eq!(c.current_index(), 1);
        assert_ne!(c.armed_timer(), armed);
    }
}
