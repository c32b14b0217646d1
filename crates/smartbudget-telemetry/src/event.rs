#![forbid(unsafe_code)]

//! Structured error events and the envelope a host frame receives.

use std::fmt;

use serde::Serialize;
use serde_json::Value;

use crate::config::ReporterConfig;

/// Severity of a reported event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Error,
    Warn,
    Log,
}

impl Level {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warn => "warn",
            Self::Log => "log",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One forwarded report. Immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub struct ErrorEvent {
    level: Level,
    message: String,
    data: Value,
    timestamp: String,
    source_location: Option<String>,
}

impl ErrorEvent {
    pub fn new(
        level: Level,
        message: impl Into<String>,
        data: Value,
        timestamp: impl Into<String>,
        source_location: Option<String>,
    ) -> Self {
        Self {
            level,
            message: message.into(),
            data,
            timestamp: timestamp.into(),
            source_location,
        }
    }

    #[must_use]
    pub fn level(&self) -> Level {
        self.level
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Canonical payload.
    #[must_use]
    pub fn data(&self) -> &Value {
        &self.data
    }

    /// ISO-8601 UTC, millisecond precision.
    #[must_use]
    pub fn timestamp(&self) -> &str {
        &self.timestamp
    }

    /// Best-effort `file:line[:column]` of the reporting code. May be absent.
    #[must_use]
    pub fn source_location(&self) -> Option<&str> {
        self.source_location.as_deref()
    }

    /// Wrap the event in the message shape a hosting frame expects.
    #[must_use]
    pub fn envelope<'a>(&'a self, config: &'a ReporterConfig) -> Envelope<'a> {
        Envelope {
            kind: &config.envelope_type,
            level: self.level,
            message: &self.message,
            data: &self.data,
            timestamp: &self.timestamp,
            user_agent: config.user_agent.as_deref().unwrap_or("unknown"),
            source: &config.source,
            location: self.source_location.as_deref(),
        }
    }
}

/// Wire shape of a forwarded event.
///
/// `{type, level, message, data, timestamp, userAgent, source}`, plus
/// `location` when one was extracted. Advisory, not a versioned format.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Envelope<'a> {
    #[serde(rename = "type")]
    pub kind: &'a str,
    pub level: Level,
    pub message: &'a str,
    pub data: &'a Value,
    pub timestamp: &'a str,
    pub user_agent: &'a str,
    pub source: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<&'a str>,
}
