#![forbid(unsafe_code)]

//! App timing knobs.

use std::time::Duration;

use smartbudget_core::env;
use smartbudget_onboarding::OnboardingConfig;

pub const DEFAULT_SESSION_CHECK_DELAY: Duration = Duration::from_millis(1000);
pub const DEFAULT_SIGN_IN_DELAY: Duration = Duration::from_millis(1500);
pub const DEFAULT_SIGN_UP_DELAY: Duration = Duration::from_millis(1500);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub onboarding: OnboardingConfig,
    /// Splash time while the (simulated) stored session is checked.
    pub session_check_delay: Duration,
    /// Simulated sign-in round trip.
    pub sign_in_delay: Duration,
    /// Simulated sign-up round trip.
    pub sign_up_delay: Duration,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            onboarding: OnboardingConfig::default(),
            session_check_delay: DEFAULT_SESSION_CHECK_DELAY,
            sign_in_delay: DEFAULT_SIGN_IN_DELAY,
            sign_up_delay: DEFAULT_SIGN_UP_DELAY,
        }
    }
}

impl AppConfig {
    /// Defaults overridden by `SMARTBUDGET_AUTO_ADVANCE_MS`,
    /// `SMARTBUDGET_SESSION_CHECK_MS`, `SMARTBUDGET_SIGN_IN_MS` and
    /// `SMARTBUDGET_SIGN_UP_MS`.
    #[must_use]
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            onboarding: OnboardingConfig::from_env(),
            session_check_delay: env::duration_ms("SMARTBUDGET_SESSION_CHECK_MS")
                .unwrap_or(defaults.session_check_delay),
            sign_in_delay: env::duration_ms("SMARTBUDGET_SIGN_IN_MS")
                .unwrap_or(defaults.sign_in_delay),
            sign_up_delay: env::duration_ms("SMARTBUDGET_SIGN_UP_MS")
                .unwrap_or(defaults.sign_up_delay),
        }
    }

    #[must_use]
    pub fn with_onboarding(mut self, onboarding: OnboardingConfig) -> Self {
        self.onboarding = onboarding;
        self
    }

    #[must_use]
    pub fn with_session_check_delay(mut self, delay: Duration) -> Self {
        self.session_check_delay = delay;
        self
    }

    #[must_use]
    pub fn with_sign_in_delay(mut self, delay: Duration) -> Self {
        self.sign_in_delay = delay;
        self
    }

    #[must_use]
    pub fn with_sign_up_delay(mut self, delay: Duration) -> Self {
        self.sign_up_delay = delay;
        self
    }
}
