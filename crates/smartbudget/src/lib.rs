#![forbid(unsafe_code)]

//! SmartBudget client core, public facade.
//!
//! Re-exports the types a host needs from the internal crates, a prelude,
//! and one-call setup for logging and error reporting.

// --- Core re-exports -------------------------------------------------------

pub use smartbudget_core::animation::decor::{CardTilt, Floating, Transform};
pub use smartbudget_core::animation::{Animation, PingPong, Spin, Tween};
pub use smartbudget_core::{
    Clock, DeterministicClock, Fired, Scheduler, SystemClock, TimerId, TimerQueue,
    format_timestamp,
};

// --- Onboarding re-exports -------------------------------------------------

pub use smartbudget_onboarding::{
    DEFAULT_DECK, Dot, OnboardingConfig, Pager, Slide, SlideController, SlideError, SlideEvent,
};

// --- App re-exports --------------------------------------------------------

#[cfg(feature = "app")]
pub use smartbudget_app::{
    AppConfig, AppShell, AuthKind, FlowError, FlowMsg, FormError, Notice, Screen, ScreenFlow,
    SignInForm, SignUpForm,
};

// --- Telemetry re-exports --------------------------------------------------

#[cfg(feature = "telemetry")]
pub use smartbudget_telemetry::{
    ErrorEvent, ErrorForwardingLayer, ErrorReporter, EventSink, FallbackSink, FrameChannel,
    FrameSink, JsonLinesSink, Level, MemorySink, ReportOutcome, ReporterConfig, SinkError,
    global, hooks,
};

#[cfg(feature = "telemetry")]
mod logging;

#[cfg(feature = "telemetry")]
pub use logging::{LOG_ENV, LOG_JSON_ENV, TracingSettings, install_error_reporting, install_tracing};

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        Animation, Clock, DeterministicClock, OnboardingConfig, Scheduler, SlideController,
        SlideEvent, SystemClock, TimerQueue,
    };

    #[cfg(feature = "app")]
    pub use crate::{AppConfig, AppShell, Notice, Screen};

    #[cfg(feature = "telemetry")]
    pub use crate::{
        ErrorReporter, EventSink, Level, ReportOutcome, ReporterConfig, TracingSettings,
    };
}
