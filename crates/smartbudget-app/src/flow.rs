#![forbid(unsafe_code)]

//! Top-level screen flow.
//!
//! ```text
//! Loading --SessionChecked--> Onboarding --OnboardingComplete--> SignIn
//! SignIn <--GoToSignUp / GoToSignIn--> SignUp
//! SignIn --SignInSucceeded--> Main      SignUp --SignUpSucceeded--> Main
//! Main --Logout--> SignIn
//! ```
//!
//! Any other (screen, message) pair is rejected and leaves the screen as
//! it was.

use std::fmt;

/// Which screen is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Screen {
    Loading,
    Onboarding,
    SignIn,
    SignUp,
    Main,
}

impl Screen {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Loading => "loading",
            Self::Onboarding => "onboarding",
            Self::SignIn => "signin",
            Self::SignUp => "signup",
            Self::Main => "main",
        }
    }
}

impl fmt::Display for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Something that may move the app to another screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowMsg {
    SessionChecked,
    OnboardingComplete,
    GoToSignUp,
    GoToSignIn,
    SignInSucceeded,
    SignUpSucceeded,
    Logout,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowError {
    /// `msg` has no meaning on `from`.
    InvalidTransition { from: Screen, msg: FlowMsg },
}

impl fmt::Display for FlowError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidTransition { from, msg } => {
                write!(f, "{msg:?} is not valid on the {from} screen")
            }
        }
    }
}

impl std::error::Error for FlowError {}

/// The screen state machine.
#[derive(Debug, Clone)]
pub struct ScreenFlow {
    screen: Screen,
}

impl Default for ScreenFlow {
    fn default() -> Self {
        Self::new()
    }
}

impl ScreenFlow {
    /// Starts on [`Screen::Loading`].
    #[must_use]
    pub fn new() -> Self {
        Self {
            screen: Screen::Loading,
        }
    }

    #[must_use]
    pub fn screen(&self) -> Screen {
        self.screen
    }

    /// Where `msg` leads from the current screen, without moving.
    #[must_use]
    pub fn target(&self, msg: FlowMsg) -> Option<Screen> {
        use FlowMsg as M;
        use Screen as S;
        match (self.screen, msg) {
            (S::Loading, M::SessionChecked) => Some(S::Onboarding),
            (S::Onboarding, M::OnboardingComplete) => Some(S::SignIn),
            (S::SignIn, M::GoToSignUp) => Some(S::SignUp),
            (S::SignUp, M::GoToSignIn) => Some(S::SignIn),
            (S::SignIn, M::SignInSucceeded) | (S::SignUp, M::SignUpSucceeded) => Some(S::Main),
            (S::Main, M::Logout) => Some(S::SignIn),
            _ => None,
        }
    }

    /// Apply `msg`. On success returns the new screen.
    pub fn update(&mut self, msg: FlowMsg) -> Result<Screen, FlowError> {
        let Some(next) = self.target(msg) else {
            return Err(FlowError::InvalidTransition {
                from: self.screen,
                msg,
            });
        };
        tracing::info!(from = %self.screen, to = %next, ?msg, "screen transition");
        self.screen = next;
        Ok(next)
    }
}
