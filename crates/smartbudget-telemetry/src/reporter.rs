#![forbid(unsafe_code)]

//! Deduplicating error reporter.
//!
//! `report` turns a (level, message, payload) triple into an [`ErrorEvent`]
//! and hands it to the sink, unless an identical report was forwarded less
//! than one suppression window ago.
//!
//! # Invariants
//!
//! 1. Two reports with equal [`DedupKey`]s less than `suppression_window`
//!    apart forward once. At exactly `first_seen + window` the key has
//!    expired and the next report forwards again.
//! 2. Every key expires on its own timer; keys never extend or shorten each
//!    other's windows, and a suppressed duplicate does not extend its key.
//! 3. `report` never panics and never returns an error: sink failures,
//!    sink panics, and unserializable payloads all degrade to the local
//!    fallback log.
//! 4. A report raised while this thread is already inside `report` (a sink
//!    that logs at error level, a panicking sink with the panic hook
//!    installed) goes to the fallback log instead of recursing.
//!
//! # Failure Modes
//!
//! - Unserializable payload: keyed and sent as `"[unserializable]"`.
//! - Sink error or panic: [`ReportOutcome::Degraded`], event logged under
//!   [`FALLBACK_TARGET`](crate::sink::FALLBACK_TARGET).
//! - Poisoned state mutex: recovered; suppression state is plain data.

use std::cell::Cell;
use std::collections::{HashMap, HashSet};
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use serde::Serialize;
use smartbudget_core::{Clock, Scheduler, TimerId, TimerQueue, format_timestamp};

use crate::config::ReporterConfig;
use crate::event::{ErrorEvent, Level};
use crate::key::{DedupKey, canonical_json};
use crate::location::{SourceLocation, extract_source_location};
use crate::sink::{EventSink, log_fallback};

thread_local! {
    static IN_REPORT: Cell<bool> = const { Cell::new(false) };
}

/// What happened to a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportOutcome {
    /// Handed to the sink.
    Forwarded,
    /// Dropped as a duplicate within the suppression window.
    Suppressed,
    /// The sink failed (or the report re-entered); logged locally instead.
    Degraded,
}

/// Keys seen recently, each with its own expiry timer.
#[derive(Debug, Default)]
struct Suppression {
    expiry: TimerQueue,
    live: HashSet<DedupKey>,
    by_timer: HashMap<TimerId, DedupKey>,
}

impl Suppression {
    /// Drop every key whose window ended at or before `now`.
    fn expire(&mut self, now: Duration) {
        let Self {
            expiry,
            live,
            by_timer,
        } = self;
        expiry.advance_to(now, |_, fired| {
            if let Some(key) = by_timer.remove(&fired.id) {
                live.remove(&key);
            }
        });
    }

    /// Record `key` if it is not live. Returns `false` for a duplicate.
    fn admit(&mut self, key: DedupKey, window: Duration) -> bool {
        if self.live.contains(&key) {
            return false;
        }
        let id = self.expiry.schedule(window);
        self.by_timer.insert(id, key.clone());
        self.live.insert(key);
        true
    }
}

/// Forwards deduplicated error events to a sink.
pub struct ErrorReporter {
    sink: Box<dyn EventSink>,
    clock: Arc<dyn Clock>,
    config: ReporterConfig,
    state: Mutex<Suppression>,
}

impl ErrorReporter {
    pub fn new(
        sink: impl EventSink + 'static,
        clock: impl Clock + 'static,
        config: ReporterConfig,
    ) -> Self {
        Self {
            sink: Box::new(sink),
            clock: Arc::new(clock),
            config,
            state: Mutex::new(Suppression::default()),
        }
    }

    #[must_use]
    pub fn config(&self) -> &ReporterConfig {
        &self.config
    }

    /// Current wall-clock time as reports stamp it.
    #[must_use]
    pub fn timestamp(&self) -> String {
        format_timestamp(self.clock.now_utc())
    }

    /// Report an event with no stack information.
    pub fn report<T: Serialize + ?Sized>(
        &self,
        level: Level,
        message: &str,
        data: &T,
    ) -> ReportOutcome {
        self.report_at(level, message, data, None)
    }

    /// Report an event, attaching the source location found in `stack`.
    pub fn report_with_stack<T: Serialize + ?Sized>(
        &self,
        level: Level,
        message: &str,
        data: &T,
        stack: &str,
    ) -> ReportOutcome {
        self.report_at(level, message, data, extract_source_location(stack))
    }

    /// Report an event with an already known location.
    pub fn report_at<T: Serialize + ?Sized>(
        &self,
        level: Level,
        message: &str,
        data: &T,
        location: Option<SourceLocation>,
    ) -> ReportOutcome {
        let (data, _) = canonical_json(data);

        if IN_REPORT.with(Cell::get) {
            let event = self.build(level, message, data, location);
            log_fallback(&event, "reported while reporting");
            return ReportOutcome::Degraded;
        }

        let key = DedupKey::new(level, message, &data);
        let now = self.clock.now_mono();
        {
            let mut state = self.lock();
            state.expire(now);
            if !state.admit(key, self.config.suppression_window) {
                tracing::trace!(%level, report = message, "duplicate report suppressed");
                return ReportOutcome::Suppressed;
            }
        }

        let event = self.build(level, message, data, location);
        IN_REPORT.with(|flag| flag.set(true));
        let sent = catch_unwind(AssertUnwindSafe(|| self.sink.send(&event)));
        IN_REPORT.with(|flag| flag.set(false));

        match sent {
            Ok(Ok(())) => ReportOutcome::Forwarded,
            Ok(Err(err)) => {
                log_fallback(&event, &err.to_string());
                ReportOutcome::Degraded
            }
            Err(_) => {
                log_fallback(&event, "sink panicked");
                ReportOutcome::Degraded
            }
        }
    }

    /// Number of keys currently inside their suppression window.
    #[must_use]
    pub fn tracked_keys(&self) -> usize {
        let now = self.clock.now_mono();
        let mut state = self.lock();
        state.expire(now);
        state.live.len()
    }

    fn build(
        &self,
        level: Level,
        message: &str,
        data: serde_json::Value,
        location: Option<SourceLocation>,
    ) -> ErrorEvent {
        ErrorEvent::new(
            level,
            message,
            data,
            self.timestamp(),
            location.map(|l| l.to_string()),
        )
    }

    fn lock(&self) -> MutexGuard<'_, Suppression> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl std::fmt::Debug for ErrorReporter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ErrorReporter")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
