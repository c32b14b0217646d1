#![forbid(unsafe_code)]

//! Cooperative one-shot timers.
//!
//! The client runs single-threaded: timers never fire on their own. The host
//! advances a [`TimerQueue`] and the queue hands back each due timer, in
//! deadline order, for the owner to handle.
//!
//! # Invariants
//!
//! 1. [`TimerId`]s are never reused within a queue.
//! 2. Cancellation is synchronous: once [`Scheduler::cancel`] returns, the id
//!    can never be returned by [`TimerQueue::pop_due`].
//! 3. When a timer fires, the queue's `now` moves to its deadline first, so a
//!    timer armed while handling the fire is relative to the fire instant.
//! 4. Equal deadlines fire in scheduling order.

use std::collections::{BTreeSet, HashMap};
use std::fmt;
use std::time::Duration;

/// Handle of a pending timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

impl TimerId {
    /// Raw numeric value, for logging.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for TimerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "timer#{}", self.0)
    }
}

/// Something that can arm and cancel one-shot timers.
///
/// Components take `&mut impl Scheduler` rather than owning a queue so one
/// queue can serve a whole screen and tests can substitute a recording
/// implementation.
pub trait Scheduler {
    /// Arm a one-shot timer `delay` from now.
    fn schedule(&mut self, delay: Duration) -> TimerId;

    /// Cancel a pending timer. Returns `false` if it already fired, was
    /// already cancelled, or was never issued by this scheduler.
    fn cancel(&mut self, id: TimerId) -> bool;

    /// Whether `id` is armed and has not fired.
    fn is_pending(&self, id: TimerId) -> bool;
}

/// A timer that came due.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fired {
    pub id: TimerId,
    /// The instant (queue time) the timer was due.
    pub at: Duration,
}

/// Host-driven timer queue.
#[derive(Debug, Default)]
pub struct TimerQueue {
    now: Duration,
    next_id: u64,
    order: BTreeSet<(Duration, TimerId)>,
    deadlines: HashMap<TimerId, Duration>,
}

impl TimerQueue {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current queue time.
    #[must_use]
    pub const fn now(&self) -> Duration {
        self.now
    }

    /// Number of armed timers.
    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.deadlines.len()
    }

    /// Earliest armed deadline, if any.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Duration> {
        self.order.first().map(|&(deadline, _)| deadline)
    }

    /// Deadline of an armed timer.
    #[must_use]
    pub fn deadline_of(&self, id: TimerId) -> Option<Duration> {
        self.deadlines.get(&id).copied()
    }

    /// Remove and return the earliest timer due at or before `until`.
    ///
    /// Moves `now` to the fired timer's deadline. Returns `None` when nothing
    /// is due; `now` is left untouched in that case.
    pub fn pop_due(&mut self, until: Duration) -> Option<Fired> {
        let &(deadline, id) = self.order.first()?;
        if deadline > until {
            return None;
        }
        self.order.remove(&(deadline, id));
        self.deadlines.remove(&id);
        self.now = self.now.max(deadline);
        tracing::trace!(timer = id.get(), at_ms = deadline.as_millis() as u64, "timer fired");
        Some(Fired { id, at: deadline })
    }

    /// Fire everything due up to `until`, in deadline order, then set `now`
    /// to `until`.
    ///
    /// `on_fire` receives the queue back so handlers can re-arm; timers armed
    /// that way fire in the same call if they also fall due before `until`.
    /// Returns the number of timers fired.
    pub fn advance_to(&mut self, until: Duration, mut on_fire: impl FnMut(&mut Self, Fired)) -> usize {
        let mut fired = 0;
        while let Some(due) = self.pop_due(until) {
            fired += 1;
            on_fire(self, due);
        }
        self.now = self.now.max(until);
        fired
    }

    /// [`advance_to`](Self::advance_to) relative to the current time.
    pub fn advance(&mut self, dt: Duration, on_fire: impl FnMut(&mut Self, Fired)) -> usize {
        let until = self.now.saturating_add(dt);
        self.advance_to(until, on_fire)
    }

    /// Cancel every armed timer.
    pub fn clear(&mut self) {
        self.order.clear();
        self.deadlines.clear();
    }
}

impl Scheduler for TimerQueue {
    fn schedule(&mut self, delay: Duration) -> TimerId {
        self.next_id += 1;
        let id = TimerId(self.next_id);
        let deadline = self.now.saturating_add(delay);
        self.order.insert((deadline, id));
        self.deadlines.insert(id, deadline);
        id
    }

    fn cancel(&mut self, id: TimerId) -> bool {
        match self.deadlines.remove(&id) {
            Some(deadline) => {
                self.order.remove(&(deadline, id));
                true
            }
            None => false,
        }
    }

    fn is_pending(&self, id: TimerId) -> bool {
        self.deadlines.contains_key(&id)
    }
}
