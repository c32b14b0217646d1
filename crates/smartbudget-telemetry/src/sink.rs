#![forbid(unsafe_code)]

//! Destinations for forwarded events.
//!
//! Sinks are assumed unreliable: [`EventSink::send`] may fail, and the
//! reporter absorbs every failure into the local fallback log.

use std::fmt;
use std::io::Write;
use std::sync::{Arc, Mutex, PoisonError};

use crate::config::ReporterConfig;
use crate::event::ErrorEvent;

/// Target of the local fallback log.
pub const FALLBACK_TARGET: &str = "smartbudget_telemetry::fallback";

// ─────────────────────────────────────────────────────────────────────────────
// Errors
// ─────────────────────────────────────────────────────────────────────────────

/// Why a sink could not take an event.
#[derive(Debug)]
pub enum SinkError {
    /// No destination is attached (no parent frame, closed channel).
    Unavailable,
    /// The envelope could not be encoded.
    Serialization(String),
    /// The host rejected the message.
    Transport(String),
    /// Writing to a stream failed.
    Io(std::io::Error),
}

impl fmt::Display for SinkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SinkError::Unavailable => write!(f, "sink unavailable"),
            SinkError::Serialization(msg) => write!(f, "serialization error: {msg}"),
            SinkError::Transport(msg) => write!(f, "transport error: {msg}"),
            SinkError::Io(e) => write!(f, "I/O error: {e}"),
        }
    }
}

impl std::error::Error for SinkError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SinkError::Io(e) => Some(e),
            SinkError::Unavailable | SinkError::Serialization(_) | SinkError::Transport(_) => None,
        }
    }
}

impl From<std::io::Error> for SinkError {
    fn from(e: std::io::Error) -> Self {
        SinkError::Io(e)
    }
}

impl From<serde_json::Error> for SinkError {
    fn from(e: serde_json::Error) -> Self {
        SinkError::Serialization(e.to_string())
    }
}

pub type SinkResult<T> = Result<T, SinkError>;

// ─────────────────────────────────────────────────────────────────────────────
// Trait
// ─────────────────────────────────────────────────────────────────────────────

/// Anything that accepts forwarded events.
pub trait EventSink: Send + Sync {
    fn send(&self, event: &ErrorEvent) -> SinkResult<()>;
}

impl<S: EventSink + ?Sized> EventSink for Arc<S> {
    fn send(&self, event: &ErrorEvent) -> SinkResult<()> {
        (**self).send(event)
    }
}

impl<S: EventSink + ?Sized> EventSink for Box<S> {
    fn send(&self, event: &ErrorEvent) -> SinkResult<()> {
        (**self).send(event)
    }
}

/// Log an event to the fallback channel.
pub(crate) fn log_fallback(event: &ErrorEvent, why: &str) {
    tracing::warn!(
        target: FALLBACK_TARGET,
        level = %event.level(),
        report = event.message(),
        data = %event.data(),
        why,
        "error event not forwarded"
    );
}

// ─────────────────────────────────────────────────────────────────────────────
// FrameSink
// ─────────────────────────────────────────────────────────────────────────────

/// A message channel to the frame hosting this client (a WebView bridge, an
/// embedding page).
pub trait FrameChannel: Send + Sync {
    /// Whether a parent distinct from this frame exists.
    fn has_parent(&self) -> bool;

    /// Post one JSON message to the parent. Fire-and-forget.
    fn post(&self, message: &str) -> SinkResult<()>;
}

/// Posts each event to the hosting frame as a JSON envelope.
///
/// With no parent attached the event is logged locally instead and the
/// send counts as delivered.
pub struct FrameSink<C> {
    channel: C,
    config: ReporterConfig,
}

impl<C: FrameChannel> FrameSink<C> {
    pub fn new(channel: C, config: ReporterConfig) -> Self {
        Self { channel, config }
    }

    pub fn channel(&self) -> &C {
        &self.channel
    }
}

impl<C: FrameChannel> EventSink for FrameSink<C> {
    fn send(&self, event: &ErrorEvent) -> SinkResult<()> {
        if !self.channel.has_parent() {
            log_fallback(event, "no parent frame");
            return Ok(());
        }
        let message = serde_json::to_string(&event.envelope(&self.config))?;
        self.channel.post(&message)
    }
}

impl<C> fmt::Debug for FrameSink<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FrameSink")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// JsonLinesSink
// ─────────────────────────────────────────────────────────────────────────────

/// Writes one JSON envelope per line (log files, stderr, pipes).
pub struct JsonLinesSink<W> {
    writer: Mutex<W>,
    config: ReporterConfig,
}

impl<W: Write + Send> JsonLinesSink<W> {
    pub fn new(writer: W, config: ReporterConfig) -> Self {
        Self {
            writer: Mutex::new(writer),
            config,
        }
    }

    /// Consume the sink and return the writer.
    pub fn into_inner(self) -> W {
        self.writer.into_inner().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<W: Write + Send> EventSink for JsonLinesSink<W> {
    fn send(&self, event: &ErrorEvent) -> SinkResult<()> {
        let mut line = serde_json::to_vec(&event.envelope(&self.config))?;
        line.push(b'\n');
        let mut writer = self.writer.lock().unwrap_or_else(PoisonError::into_inner);
        writer.write_all(&line)?;
        writer.flush()?;
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// MemorySink
// ─────────────────────────────────────────────────────────────────────────────

/// Keeps every event in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    events: Mutex<Vec<ErrorEvent>>,
}

impl MemorySink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything received so far.
    #[must_use]
    pub fn events(&self) -> Vec<ErrorEvent> {
        self.lock().clone()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<ErrorEvent>> {
        self.events.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl EventSink for MemorySink {
    fn send(&self, event: &ErrorEvent) -> SinkResult<()> {
        self.lock().push(event.clone());
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// FallbackSink
// ─────────────────────────────────────────────────────────────────────────────

/// Logs to the local fallback channel only. Useful when no host is present.
#[derive(Debug, Default, Clone, Copy)]
pub struct FallbackSink;

impl EventSink for FallbackSink {
    fn send(&self, event: &ErrorEvent) -> SinkResult<()> {
        log_fallback(event, "fallback sink");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::Level;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn event() -> ErrorEvent {
        ErrorEvent::new(
            Level::Error,
            "X",
            json!({"a": 1}),
            "1970-01-01T00:00:00.000Z",
            None,
        )
    }

    #[derive(Default)]
    struct Parent {
        attached: bool,
        posted: Mutex<Vec<String>>,
    }

    impl FrameChannel for Parent {
        fn has_parent(&self) -> bool {
            self.attached
        }

        fn post(&self, message: &str) -> SinkResult<()> {
            self.posted.lock().unwrap().push(message.to_owned());
            Ok(())
        }
    }

    #[test]
    fn frame_sink_posts_envelope() {
        let sink = FrameSink::new(
            Parent {
                attached: true,
                ..Parent::default()
            },
            ReporterConfig::default(),
        );
        sink.send(&event()).unwrap();
        let posted = sink.channel().posted.lock().unwrap().clone();
        assert_eq!(posted.len(), 1);
        let wire: serde_json::Value = serde_json::from_str(&posted[0]).unwrap();
        assert_eq!(wire["type"], "APP_ERROR");
        assert_eq!(wire["data"], json!({"a": 1}));
    }

    #[test]
    fn frame_sink_without_parent_logs_locally() {
        let sink = FrameSink::new(Parent::default(), ReporterConfig::default());
        assert!(sink.send(&event()).is_ok());
        assert!(sink.channel().posted.lock().unwrap().is_empty());
    }

    #[test]
    fn json_lines_sink_writes_one_line_per_event() {
        let sink = JsonLinesSink::new(Vec::new(), ReporterConfig::default());
        sink.send(&event()).unwrap();
        sink.send(&event()).unwrap();
        let out = String::from_utf8(sink.into_inner()).unwrap();
        assert_eq!(out.lines().count(), 2);
        assert!(out.lines().all(|l| l.starts_with(r#"{"type":"APP_ERROR""#)));
    }

    #[test]
    fn json_lines_sink_surfaces_io_errors() {
        struct Broken;
        impl Write for Broken {
            fn write(&mut self, _: &[u8]) -> std::io::Result<usize> {
                Err(std::io::Error::other("disk gone"))
            }
            fn flush(&mut self) -> std::io::Result<()> {
                Ok(())
            }
        }
        let sink = JsonLinesSink::new(Broken, ReporterConfig::default());
        let err = sink.send(&event()).unwrap_err();
        assert!(matches!(err, SinkError::Io(_)));
        assert_eq!(err.to_string(), "I/O error: disk gone");
    }

    #[test]
    fn memory_sink_collects() {
        let sink = Arc::new(MemorySink::new());
        let shared: Arc<dyn EventSink> = sink.clone();
        shared.send(&event()).unwrap();
        assert_eq!(sink.len(), 1);
        assert_eq!(sink.events()[0].message(), "X");
        sink.clear();
        assert!(sink.is_empty());
    }
}
