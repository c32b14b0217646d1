//! Process-wide wiring. One test function: the reporter and the panic hook
//! are global and cannot be reset between tests.

use std::sync::Arc;

use pretty_assertions::assert_eq;
use serde_json::json;
use smartbudget_core::DeterministicClock;
use smartbudget_telemetry::hooks::{
    self, CONSOLE_ERROR, RUNTIME_ERROR, UNHANDLED_REJECTION, install_panic_hook,
};
use smartbudget_telemetry::{
    ErrorForwardingLayer, FallbackSink, MemorySink, ReportOutcome, ReporterConfig, global,
};
use tracing_subscriber::prelude::*;

#[test]
fn global_wiring() {
    assert!(!global::is_initialized());
    assert_eq!(
        global::report(smartbudget_telemetry::Level::Error, "early", &()),
        ReportOutcome::Degraded
    );

    let sink = Arc::new(MemorySink::new());
    let clock = Arc::new(DeterministicClock::new());
    assert!(global::initialize(sink.clone(), clock.clone(), ReporterConfig::default()));
    assert!(!global::initialize(FallbackSink, DeterministicClock::new(), ReporterConfig::default()));
    assert!(global::is_initialized());

    // Panics.
    install_panic_hook();
    install_panic_hook();
    let caught = std::panic::catch_unwind(|| panic!("budget overflow"));
    assert!(caught.is_err());
    let events = sink.events();
    assert_eq!(events.len(), 1, "hook installed twice must report once");
    assert_eq!(events[0].message(), RUNTIME_ERROR);
    assert_eq!(events[0].data()["message"], json!("budget overflow"));
    let source = events[0].data()["source"].as_str().unwrap();
    assert!(source.contains("global_hooks.rs:"), "{source}");
    assert!(events[0].source_location().unwrap().contains("global_hooks.rs"));

    // Host script errors.
    sink.clear();
    let outcome = hooks::uncaught_error(
        "x is undefined",
        Some("http://localhost:8081/app/index.bundle"),
        10,
        4,
        None,
    );
    assert_eq!(outcome, ReportOutcome::Forwarded);
    let event = &sink.events()[0];
    assert_eq!(event.data()["source"], json!("index.bundle:10:4"));
    assert_eq!(event.data()["error"], json!("x is undefined"));
    assert_eq!(event.data()["timestamp"], json!("1970-01-01T00:00:00.000Z"));

    // Rejections.
    sink.clear();
    let disposition = hooks::unhandled_rejection(&json!({"code": 503}));
    assert!(disposition.handled && disposition.prevent_default);
    hooks::rejection_handled("late handler");
    let events = sink.events();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].message(), UNHANDLED_REJECTION);
    assert_eq!(events[0].data()["reason"], json!({"code": 503}));
    assert_eq!(events[0].data()["handled"], json!(true));

    // Error-level logging.
    sink.clear();
    let subscriber = tracing_subscriber::registry().with(ErrorForwardingLayer::new());
    tracing::subscriber::with_default(subscriber, || {
        for _ in 0..2 {
            tracing::error!(target: "smartbudget_app::auth", "sign-in backend unreachable");
        }
        tracing::info!(target: "smartbudget_app::auth", "not forwarded");
    });
    let events = sink.events();
    assert_eq!(events.len(), 1, "same callsite within the window is suppressed");
    assert_eq!(events[0].message(), CONSOLE_ERROR);
    assert!(
        events[0]
            .data()
            .as_str()
            .unwrap()
            .starts_with("sign-in backend unreachable | Source: ")
    );
}
