//! One-call setup through the facade. Global state: a single test.

use std::sync::Arc;
use std::time::Duration;

use smartbudget::prelude::*;
use smartbudget::{MemorySink, install_error_reporting, install_tracing};

#[test]
fn facade_setup_and_shell() {
    assert!(install_tracing(&TracingSettings::default()));
    assert!(!install_tracing(&TracingSettings::default().with_json(true)));

    let sink = Arc::new(MemorySink::new());
    assert!(install_error_reporting(sink.clone(), ReporterConfig::default()));
    assert!(!install_error_reporting(sink.clone(), ReporterConfig::default()));

    // Error-level logs reach the reporter through the installed subscriber.
    tracing::error!(target: "smartbudget_app", "ledger sync failed");
    let events = sink.events();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].level(), Level::Error);
    assert_eq!(events[0].message(), "Console Error");

    let mut shell = AppShell::new(AppConfig::default(), 390.0);
    shell.boot();
    shell.advance(Duration::from_millis(1000));
    assert_eq!(shell.screen(), Screen::Onboarding);
}
