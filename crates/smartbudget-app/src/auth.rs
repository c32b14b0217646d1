#![forbid(unsafe_code)]

//! Simulated sign-in/sign-up round trip.
//!
//! No request leaves the device: a submission arms one timer and, when it
//! fires, succeeds. Credentials are never stored or logged.

use std::time::Duration;

use smartbudget_core::{Scheduler, TimerId};

use crate::forms::{AuthKind, Notice};

/// One auth screen's in-flight submission.
#[derive(Debug, Clone)]
pub struct AuthAttempt {
    kind: AuthKind,
    delay: Duration,
    pending: Option<TimerId>,
}

impl AuthAttempt {
    #[must_use]
    pub fn new(kind: AuthKind, delay: Duration) -> Self {
        Self {
            kind,
            delay,
            pending: None,
        }
    }

    #[must_use]
    pub fn kind(&self) -> AuthKind {
        self.kind
    }

    /// Whether a submission is in flight (the button shows a spinner).
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.pending.is_some()
    }

    /// Start a submission. Returns `false`, changing nothing, if one is
    /// already in flight.
    pub fn begin(&mut self, timers: &mut impl Scheduler) -> bool {
        if self.pending.is_some() {
            return false;
        }
        let id = timers.schedule(self.delay);
        self.pending = Some(id);
        tracing::debug!(kind = self.kind.verb(), timer = id.get(), "auth submitted");
        true
    }

    /// Handle a timer. Returns the welcome notice if `id` completed this
    /// attempt.
    pub fn on_timer_fire(&mut self, id: TimerId) -> Option<Notice> {
        if self.pending != Some(id) {
            return None;
        }
        self.pending = None;
        tracing::info!(kind = self.kind.verb(), "auth succeeded");
        Some(self.kind.welcome())
    }

    /// Abandon an in-flight submission (the screen went away).
    pub fn cancel(&mut self, timers: &mut impl Scheduler) {
        if let Some(id) = self.pending.take() {
            timers.cancel(id);
            tracing::debug!(kind = self.kind.verb(), "auth abandoned");
        }
    }
}
