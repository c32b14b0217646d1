#![forbid(unsafe_code)]

//! Core: host-driven time and decorative animation values.
//!
//! Nothing in this crate spawns threads or sleeps. The host owns the event
//! loop and pushes time forward; components read it through [`Clock`] and arm
//! one-shot timers through [`Scheduler`].

pub mod animation;
pub mod clock;
pub mod env;
pub mod timer;

pub use clock::{Clock, DeterministicClock, SystemClock, format_timestamp};
pub use timer::{Fired, Scheduler, TimerId, TimerQueue};
