#![forbid(unsafe_code)]

//! Error telemetry: deduplicated, structured error events forwarded to an
//! unreliable sink.
//!
//! # Role in SmartBudget
//! The client reports runtime failures to whatever hosts it (a parent frame,
//! a log file). Reporting must never make things worse: every failure on the
//! reporting path degrades to a local `tracing` warning under
//! [`FALLBACK_TARGET`].
//!
//! # Wiring
//!
//! ```ignore
//! smartbudget_telemetry::global::initialize(sink, SystemClock::new(), ReporterConfig::from_env());
//! smartbudget_telemetry::hooks::install_panic_hook();
//! // and add `ErrorForwardingLayer::new()` to the tracing subscriber
//! ```

pub mod config;
pub mod event;
pub mod global;
pub mod hooks;
pub mod key;
pub mod location;
pub mod reporter;
pub mod sink;

pub use config::ReporterConfig;
pub use event::{Envelope, ErrorEvent, Level};
pub use hooks::{ErrorForwardingLayer, RejectionDisposition};
pub use key::{DedupKey, canonical_json};
pub use location::{SourceLocation, extract_source_location};
pub use reporter::{ErrorReporter, ReportOutcome};
pub use sink::{
    EventSink, FALLBACK_TARGET, FallbackSink, FrameChannel, FrameSink, JsonLinesSink, MemorySink,
    SinkError, SinkResult,
};
