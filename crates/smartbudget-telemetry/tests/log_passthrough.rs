#![forbid(unsafe_code)]

//! Error-level logs forwarded to the reporter still reach the other layers
//! of the subscriber.

use std::sync::{Arc, Mutex};

use pretty_assertions::assert_eq;
use smartbudget_core::DeterministicClock;
use smartbudget_telemetry::hooks::CONSOLE_ERROR;
use smartbudget_telemetry::{ErrorForwardingLayer, ErrorReporter, MemorySink, ReporterConfig};
use tracing::{Event, Subscriber};
use tracing_subscriber::Layer;
use tracing_subscriber::layer::{Context, SubscriberExt};

/// Records the level and target of every event it sees.
struct EventCapture {
    seen: Arc<Mutex<Vec<(tracing::Level, String)>>>,
}

impl EventCapture {
    fn new() -> (Self, Arc<Mutex<Vec<(tracing::Level, String)>>>) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        (Self { seen: seen.clone() }, seen)
    }
}

impl<S: Subscriber> Layer<S> for EventCapture {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let meta = event.metadata();
        self.seen
            .lock()
            .unwrap()
            .push((*meta.level(), meta.target().to_owned()));
    }
}

fn forwarding_layer() -> (ErrorForwardingLayer, Arc<MemorySink>) {
    let sink = Arc::new(MemorySink::new());
    let reporter = ErrorReporter::new(
        sink.clone(),
        DeterministicClock::new(),
        ReporterConfig::default(),
    );
    (ErrorForwardingLayer::with_reporter(Arc::new(reporter)), sink)
}

#[test]
fn sibling_layer_still_sees_forwarded_errors() {
    let (forward, sink) = forwarding_layer();
    let (capture, seen) = EventCapture::new();
    let subscriber = tracing_subscriber::registry().with(forward).with(capture);

    tracing::subscriber::with_default(subscriber, || {
        tracing::error!(target: "smartbudget_app::ledger", "budget file unreadable");
    });

    let events = sink.events();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].message(), CONSOLE_ERROR);
    assert_eq!(
        *seen.lock().unwrap(),
        vec![(tracing::Level::ERROR, "smartbudget_app::ledger".to_owned())]
    );
}

#[test]
fn order_of_layers_does_not_matter() {
    let (forward, sink) = forwarding_layer();
    let (capture, seen) = EventCapture::new();
    let subscriber = tracing_subscriber::registry().with(capture).with(forward);

    tracing::subscriber::with_default(subscriber, || {
        tracing::warn!(target: "smartbudget_app::ledger", "slow sync");
        tracing::error!(target: "smartbudget_app::ledger", "sync failed");
    });

    assert_eq!(sink.len(), 1);
    let levels: Vec<_> = seen.lock().unwrap().iter().map(|(l, _)| *l).collect();
    assert_eq!(levels, vec![tracing::Level::WARN, tracing::Level::ERROR]);
}
