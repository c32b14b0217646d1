#![forbid(unsafe_code)]

//! Host error sources wired into the reporter.
//!
//! Three sources feed [`report`](crate::global::report):
//!
//! - uncaught synchronous errors: Rust panics via [`install_panic_hook`], and
//!   script errors the host forwards through [`uncaught_error`];
//! - unhandled asynchronous rejections via [`unhandled_rejection`], always
//!   marked handled so the host suppresses its default crash behavior;
//! - error-level log calls via [`ErrorForwardingLayer`]. The layer sits
//!   beside the other subscriber layers, so regular log output is kept.
//!
//! Every hook is best effort and silent on failure.

use std::fmt;
use std::panic::PanicHookInfo;
use std::sync::{Arc, OnceLock};

use serde::Serialize;
use tracing::field::{Field, Visit};
use tracing::{Event, Subscriber};
use tracing_subscriber::Layer;
use tracing_subscriber::layer::Context;

use crate::event::Level;
use crate::global;
use crate::location::{SourceLocation, file_name};
use crate::reporter::{ErrorReporter, ReportOutcome};

pub const RUNTIME_ERROR: &str = "Runtime Error";
pub const UNHANDLED_REJECTION: &str = "Unhandled Promise Rejection";
pub const CONSOLE_ERROR: &str = "Console Error";

/// Events under these targets are never forwarded.
const OWN_TARGET_PREFIX: &str = "smartbudget_telemetry";

// ─────────────────────────────────────────────────────────────────────────────
// Uncaught errors
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Serialize)]
struct RuntimeError<'a> {
    message: &'a str,
    /// `file:line:column`.
    source: String,
    line: u32,
    column: u32,
    error: &'a str,
    timestamp: String,
}

fn report_runtime_error(
    reporter: &ErrorReporter,
    message: &str,
    file: &str,
    line: u32,
    column: u32,
    error: &str,
) -> ReportOutcome {
    let payload = RuntimeError {
        message,
        source: format!("{file}:{line}:{column}"),
        line,
        column,
        error,
        timestamp: reporter.timestamp(),
    };
    tracing::error!(error_message = message, source = %payload.source, "runtime error");
    let location = SourceLocation {
        file: file.to_owned(),
        line,
        column: Some(column),
    };
    reporter.report_at(Level::Error, RUNTIME_ERROR, &payload, Some(location))
}

/// Route panics to the reporter.
///
/// Idempotent. The previously installed hook still runs afterwards, so the
/// usual panic output is unchanged.
pub fn install_panic_hook() {
    static HOOK: OnceLock<()> = OnceLock::new();
    HOOK.get_or_init(|| {
        let previous = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            report_panic(info);
            previous(info);
        }));
    });
}

fn report_panic(info: &PanicHookInfo<'_>) {
    let message = panic_message(info);
    let (file, line, column) = info
        .location()
        .map_or(("unknown", 0, 0), |l| (l.file(), l.line(), l.column()));
    let backtrace = std::backtrace::Backtrace::capture();
    let error = match backtrace.status() {
        std::backtrace::BacktraceStatus::Captured => backtrace.to_string(),
        _ => message.to_owned(),
    };
    global::with_reporter(|r| report_runtime_error(r, message, file, line, column, &error));
}

fn panic_message<'a>(info: &'a PanicHookInfo<'_>) -> &'a str {
    let payload = info.payload();
    if let Some(s) = payload.downcast_ref::<&str>() {
        s
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s
    } else {
        "Box<dyn Any>"
    }
}

/// A script error the host caught (a WebView's `onerror`).
///
/// `source_url` is reduced to its file name. Does not prevent the host's
/// default handling.
pub fn uncaught_error(
    message: &str,
    source_url: Option<&str>,
    line: u32,
    column: u32,
    stack: Option<&str>,
) -> ReportOutcome {
    let file = source_url.map_or("unknown", file_name);
    global::with_reporter(|r| {
        report_runtime_error(r, message, file, line, column, stack.unwrap_or(message))
    })
    .unwrap_or(ReportOutcome::Degraded)
}

// ─────────────────────────────────────────────────────────────────────────────
// Rejections
// ─────────────────────────────────────────────────────────────────────────────

/// What the host should do with a rejection event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RejectionDisposition {
    pub handled: bool,
    pub prevent_default: bool,
}

#[derive(Serialize)]
struct Rejection<'a, T: ?Sized> {
    reason: &'a T,
    timestamp: String,
    handled: bool,
}

/// An async rejection nobody handled. Always reports it as handled.
pub fn unhandled_rejection<T: Serialize + ?Sized>(reason: &T) -> RejectionDisposition {
    global::with_reporter(|r| {
        let payload = Rejection {
            reason,
            timestamp: r.timestamp(),
            handled: true,
        };
        tracing::warn!("unhandled rejection marked handled");
        r.report(Level::Error, UNHANDLED_REJECTION, &payload)
    });
    RejectionDisposition {
        handled: true,
        prevent_default: true,
    }
}

/// A rejection got a handler after it was reported. Logged, not forwarded.
pub fn rejection_handled<T: fmt::Debug + ?Sized>(reason: &T) {
    tracing::info!(reason = ?reason, "rejection handled after being reported");
}

// ─────────────────────────────────────────────────────────────────────────────
// ErrorForwardingLayer
// ─────────────────────────────────────────────────────────────────────────────

/// Collects an event's message and fields as `message k=v k=v`.
#[derive(Default)]
struct MessageVisitor {
    message: String,
    fields: Vec<String>,
}

impl MessageVisitor {
    fn into_text(self) -> String {
        let mut parts = Vec::with_capacity(self.fields.len() + 1);
        if !self.message.is_empty() {
            parts.push(self.message);
        }
        parts.extend(self.fields);
        parts.join(" ")
    }
}

impl Visit for MessageVisitor {
    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.message = value.to_owned();
        } else {
            self.fields.push(format!("{}={value}", field.name()));
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            self.message = format!("{value:?}");
        } else {
            self.fields.push(format!("{}={value:?}", field.name()));
        }
    }
}

/// Forwards `ERROR` events as `"Console Error"` reports.
///
/// The forwarded payload is the rendered message plus ` | Source: file:line`
/// when the callsite knows its location. Events from this crate are skipped.
#[derive(Clone, Default)]
pub struct ErrorForwardingLayer {
    reporter: Option<Arc<ErrorReporter>>,
}

impl ErrorForwardingLayer {
    /// Forward to the process-wide reporter.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Forward to a specific reporter.
    #[must_use]
    pub fn with_reporter(reporter: Arc<ErrorReporter>) -> Self {
        Self {
            reporter: Some(reporter),
        }
    }

    fn forward(&self, text: &str) {
        match &self.reporter {
            Some(reporter) => {
                reporter.report(Level::Error, CONSOLE_ERROR, text);
            }
            None => {
                global::with_reporter(|r| r.report(Level::Error, CONSOLE_ERROR, text));
            }
        }
    }
}

impl fmt::Debug for ErrorForwardingLayer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ErrorForwardingLayer")
            .field("dedicated_reporter", &self.reporter.is_some())
            .finish()
    }
}

impl<S> Layer<S> for ErrorForwardingLayer
where
    S: Subscriber,
{
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let meta = event.metadata();
        if *meta.level() != tracing::Level::ERROR || meta.target().starts_with(OWN_TARGET_PREFIX) {
            return;
        }
        let mut visitor = MessageVisitor::default();
        event.record(&mut visitor);
        let mut text = visitor.into_text();
        if let (Some(file), Some(line)) = (meta.file(), meta.line()) {
            text.push_str(&format!(" | Source: {file}:{line}"));
        }
        self.forward(&text);
    }
}
