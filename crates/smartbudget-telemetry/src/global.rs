#![forbid(unsafe_code)]

//! Process-wide reporter.
//!
//! Set up once at startup with [`initialize`]; afterwards the host hooks and
//! any code without a reporter handle report through [`report`]. There is no
//! teardown: the reporter lives for the rest of the process.

use std::sync::OnceLock;

use serde::Serialize;
use smartbudget_core::Clock;

use crate::config::ReporterConfig;
use crate::event::Level;
use crate::reporter::{ErrorReporter, ReportOutcome};
use crate::sink::EventSink;

static REPORTER: OnceLock<ErrorReporter> = OnceLock::new();

/// Install the process-wide reporter.
///
/// Returns `false`, leaving the existing reporter in place, if one was
/// already installed.
pub fn initialize(
    sink: impl EventSink + 'static,
    clock: impl Clock + 'static,
    config: ReporterConfig,
) -> bool {
    let mut fresh = false;
    REPORTER.get_or_init(|| {
        fresh = true;
        ErrorReporter::new(sink, clock, config)
    });
    if fresh {
        tracing::info!("error reporting initialized");
    } else {
        tracing::debug!("error reporting already initialized");
    }
    fresh
}

#[must_use]
pub fn is_initialized() -> bool {
    REPORTER.get().is_some()
}

/// Report through the process-wide reporter.
///
/// Before [`initialize`] the event goes to the fallback log and the outcome
/// is [`ReportOutcome::Degraded`].
pub fn report<T: Serialize + ?Sized>(level: Level, message: &str, data: &T) -> ReportOutcome {
    match REPORTER.get() {
        Some(reporter) => reporter.report(level, message, data),
        None => {
            tracing::warn!(
                target: crate::sink::FALLBACK_TARGET,
                %level,
                report = message,
                "error reporting not initialized"
            );
            ReportOutcome::Degraded
        }
    }
}

/// Run `f` against the process-wide reporter, if installed.
pub fn with_reporter<R>(f: impl FnOnce(&ErrorReporter) -> R) -> Option<R> {
    REPORTER.get().map(f)
}
