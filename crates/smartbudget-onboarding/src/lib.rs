#![forbid(unsafe_code)]

//! Onboarding carousel logic.
//!
//! - [`SlideController`] - current slide, auto-advance timer, completion
//! - [`Pager`] - maps horizontal scroll offsets to slide indices and back
//! - [`slides`] - the onboarding deck shown on first launch
//!
//! The controller knows only how many slides there are. Rendering, gestures
//! and the timer loop belong to the host, which forwards gestures in and
//! drains [`SlideEvent`]s out.

pub mod config;
pub mod controller;
pub mod pager;
pub mod slides;

pub use config::OnboardingConfig;
pub use controller::{SlideController, SlideError, SlideEvent};
pub use pager::{Dot, Pager};
pub use slides::{Accent, DEFAULT_DECK, Slide};
