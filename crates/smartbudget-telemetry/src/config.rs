#![forbid(unsafe_code)]

//! Reporter settings.

use std::time::Duration;

use smartbudget_core::env;

pub const DEFAULT_SUPPRESSION_WINDOW: Duration = Duration::from_millis(100);
pub const DEFAULT_ENVELOPE_TYPE: &str = "APP_ERROR";
pub const DEFAULT_SOURCE: &str = "smartbudget-client";

/// Placeholder used when a payload cannot be serialized.
pub const UNSERIALIZABLE: &str = "[unserializable]";

/// Configuration for an [`ErrorReporter`](crate::ErrorReporter).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReporterConfig {
    /// How long an identical report stays suppressed after it is first seen.
    pub suppression_window: Duration,
    /// `type` field of the forwarded envelope.
    pub envelope_type: String,
    /// `source` field of the forwarded envelope.
    pub source: String,
    /// `userAgent` field; `"unknown"` when unset.
    pub user_agent: Option<String>,
}

impl Default for ReporterConfig {
    fn default() -> Self {
        Self {
            suppression_window: DEFAULT_SUPPRESSION_WINDOW,
            envelope_type: DEFAULT_ENVELOPE_TYPE.to_owned(),
            source: DEFAULT_SOURCE.to_owned(),
            user_agent: None,
        }
    }
}

impl ReporterConfig {
    /// Defaults overridden by `SMARTBUDGET_SUPPRESSION_MS` and
    /// `SMARTBUDGET_USER_AGENT`.
    #[must_use]
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Some(window) = env::duration_ms("SMARTBUDGET_SUPPRESSION_MS") {
            config.suppression_window = window;
        }
        config.user_agent = env::string("SMARTBUDGET_USER_AGENT");
        config
    }

    #[must_use]
    pub fn with_suppression_window(mut self, window: Duration) -> Self {
        self.suppression_window = window;
        self
    }

    #[must_use]
    pub fn with_envelope_type(mut self, kind: impl Into<String>) -> Self {
        self.envelope_type = kind.into();
        self
    }

    #[must_use]
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = source.into();
        self
    }

    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }
}
