#![forbid(unsafe_code)]

//! SmartBudget client logic: which screen shows, what the forms accept, and
//! the shell that drives both from host time and gestures.

pub mod auth;
pub mod config;
pub mod flow;
pub mod forms;
pub mod shell;

pub use auth::AuthAttempt;
pub use config::AppConfig;
pub use flow::{FlowError, FlowMsg, Screen, ScreenFlow};
pub use forms::{AuthKind, FormError, Notice, SignInForm, SignUpForm, social_notice};
pub use shell::AppShell;
