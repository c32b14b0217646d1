#![forbid(unsafe_code)]

//! Process logging and error reporting setup.

use smartbudget_core::{SystemClock, env};
use smartbudget_telemetry::hooks::install_panic_hook;
use smartbudget_telemetry::{ErrorForwardingLayer, EventSink, ReporterConfig, global};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

/// Filter directives, `RUST_LOG` syntax.
pub const LOG_ENV: &str = "SMARTBUDGET_LOG";
/// Emit JSON lines instead of human-readable logs.
pub const LOG_JSON_ENV: &str = "SMARTBUDGET_LOG_JSON";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TracingSettings {
    /// Directive used when `SMARTBUDGET_LOG` is unset or invalid.
    pub default_directive: String,
    pub json: bool,
}

impl Default for TracingSettings {
    fn default() -> Self {
        Self {
            default_directive: "info".to_owned(),
            json: false,
        }
    }
}

impl TracingSettings {
    /// Defaults with `SMARTBUDGET_LOG_JSON` applied. `SMARTBUDGET_LOG` is
    /// read by [`install_tracing`] itself.
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            json: env::flag(LOG_JSON_ENV).unwrap_or(false),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_default_directive(mut self, directive: impl Into<String>) -> Self {
        self.default_directive = directive.into();
        self
    }

    #[must_use]
    pub fn with_json(mut self, json: bool) -> Self {
        self.json = json;
        self
    }
}

/// Install the process subscriber: env filter, formatted output, and
/// forwarding of error-level events to the error reporter.
///
/// Returns `false` if a global subscriber was already installed, in which
/// case nothing changes.
pub fn install_tracing(settings: &TracingSettings) -> bool {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_new(&settings.default_directive))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry()
        .with(filter)
        .with(ErrorForwardingLayer::new());
    let installed = if settings.json {
        registry
            .with(tracing_subscriber::fmt::layer().json())
            .try_init()
    } else {
        registry.with(tracing_subscriber::fmt::layer()).try_init()
    };
    installed.is_ok()
}

/// Install the process-wide error reporter on the system clock and route
/// panics to it.
///
/// Returns `false` if a reporter was already installed; the panic hook is
/// installed either way.
pub fn install_error_reporting(sink: impl EventSink + 'static, config: ReporterConfig) -> bool {
    let fresh = global::initialize(sink, SystemClock::new(), config);
    install_panic_hook();
    fresh
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn settings_builders() {
        let s = TracingSettings::default()
            .with_default_directive("smartbudget=debug")
            .with_json(true);
        assert_eq!(s.default_directive, "smartbudget=debug");
        assert!(s.json);
        assert!(!TracingSettings::default().json);
    }
}
