#![forbid(unsafe_code)]

use std::time::Duration;

use smartbudget_core::env;

/// Default pause on each slide before auto-advancing.
pub const DEFAULT_AUTO_ADVANCE: Duration = Duration::from_millis(4000);

/// Onboarding settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OnboardingConfig {
    /// Pause on each slide before moving on.
    pub auto_advance: Duration,
}

impl Default for OnboardingConfig {
    fn default() -> Self {
        Self {
            auto_advance: DEFAULT_AUTO_ADVANCE,
        }
    }
}

impl OnboardingConfig {
    /// Defaults, overridden by `SMARTBUDGET_AUTO_ADVANCE_MS`.
    #[must_use]
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Some(delay) = env::duration_ms("SMARTBUDGET_AUTO_ADVANCE_MS") {
            config.auto_advance = delay;
        }
        config
    }

    #[must_use]
    pub fn with_auto_advance(mut self, delay: Duration) -> Self {
        self.auto_advance = delay;
        self
    }
}
