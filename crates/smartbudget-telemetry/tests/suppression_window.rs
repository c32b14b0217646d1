//! Duplicate suppression over time.
//!
//! 1. Twice within 50 ms forwards once; twice 150 ms apart forwards twice.
//! 2. Same level and message with different payloads never suppress each
//!    other, whatever the timing.
//! 3. Many keys in one window each expire on their own.

use std::sync::Arc;
use std::time::Duration;

use pretty_assertions::assert_eq;
use proptest::prelude::*;
use serde_json::json;
use smartbudget_core::DeterministicClock;
use smartbudget_telemetry::{ErrorReporter, Level, MemorySink, ReportOutcome, ReporterConfig};

fn setup() -> (ErrorReporter, Arc<MemorySink>, Arc<DeterministicClock>) {
    let sink = Arc::new(MemorySink::new());
    let clock = Arc::new(DeterministicClock::new());
    let reporter = ErrorReporter::new(sink.clone(), clock.clone(), ReporterConfig::default());
    (reporter, sink, clock)
}

#[test]
fn twice_within_50ms_forwards_once() {
    let (reporter, sink, clock) = setup();
    reporter.report(Level::Error, "X", &json!({"a": 1}));
    clock.advance(Duration::from_millis(50));
    reporter.report(Level::Error, "X", &json!({"a": 1}));
    assert_eq!(sink.len(), 1);
}

#[test]
fn twice_150ms_apart_forwards_twice() {
    let (reporter, sink, clock) = setup();
    reporter.report(Level::Error, "X", &json!({"a": 1}));
    clock.advance(Duration::from_millis(150));
    reporter.report(Level::Error, "X", &json!({"a": 1}));
    assert_eq!(sink.len(), 2);
}

#[test]
fn burst_of_keys_expires_per_key() {
    let (reporter, sink, clock) = setup();
    for i in 0..50 {
        reporter.report(Level::Error, "burst", &json!({ "i": i }));
        clock.advance(Duration::from_millis(2));
    }
    assert_eq!(sink.len(), 50);
    // Keys reported at t = 0, 2, .., 98; now t = 100, so only the first expired.
    assert_eq!(reporter.tracked_keys(), 49);
    assert_eq!(
        reporter.report(Level::Error, "burst", &json!({"i": 0})),
        ReportOutcome::Forwarded
    );
    assert_eq!(
        reporter.report(Level::Error, "burst", &json!({"i": 1})),
        ReportOutcome::Suppressed
    );
}

#[test]
fn custom_window_is_honoured() {
    let sink = Arc::new(MemorySink::new());
    let clock = Arc::new(DeterministicClock::new());
    let config = ReporterConfig::default().with_suppression_window(Duration::from_secs(1));
    let reporter = ErrorReporter::new(sink.clone(), clock.clone(), config);
    reporter.report(Level::Warn, "slow", &());
    clock.advance(Duration::from_millis(500));
    assert_eq!(reporter.report(Level::Warn, "slow", &()), ReportOutcome::Suppressed);
    clock.advance(Duration::from_millis(500));
    assert_eq!(reporter.report(Level::Warn, "slow", &()), ReportOutcome::Forwarded);
}

proptest! {
    #[test]
    fn different_payloads_never_collide(
        a in any::<i64>(),
        b in any::<i64>(),
        gap_ms in 0u64..200,
    ) {
        prop_assume!(a != b);
        let (reporter, sink, clock) = setup();
        prop_assert_eq!(reporter.report(Level::Error, "X", &json!({"a": a})), ReportOutcome::Forwarded);
        clock.advance(Duration::from_millis(gap_ms));
        prop_assert_eq!(reporter.report(Level::Error, "X", &json!({"a": b})), ReportOutcome::Forwarded);
        prop_assert_eq!(sink.len(), 2);
    }

    #[test]
    fn identical_reports_forward_once_per_window(gaps in prop::collection::vec(0u64..60, 1..40)) {
        let (reporter, sink, clock) = setup();
        let mut expected = 0;
        let mut window_start: Option<u64> = None;
        let mut t = 0u64;
        for gap in gaps {
            t += gap;
            clock.set(Duration::from_millis(t));
            let fresh = window_start.is_none_or(|start| t >= start + 100);
            if fresh {
                window_start = Some(t);
                expected += 1;
            }
            let outcome = reporter.report(Level::Error, "same", &());
            prop_assert_eq!(outcome == ReportOutcome::Forwarded, fresh);
        }
        prop_assert_eq!(sink.len(), expected);
    }
}
