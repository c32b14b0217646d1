#![forbid(unsafe_code)]

//! Sign-in and sign-up forms and the alerts they raise.

use std::fmt;

/// Shortest accepted sign-up password, in characters.
pub const MIN_PASSWORD_LEN: usize = 6;

/// An alert for the host to show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub title: String,
    pub body: String,
    /// Label of the single dismiss button, when it is not the host default.
    pub button: Option<&'static str>,
}

impl Notice {
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
            button: None,
        }
    }

    #[must_use]
    pub fn with_button(mut self, label: &'static str) -> Self {
        self.button = Some(label);
        self
    }
}

/// Why a form was not submitted. `Display` is the alert text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormError {
    MissingFields,
    InvalidEmail,
    PasswordTooShort { min: usize },
}

impl fmt::Display for FormError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingFields => write!(f, "Please fill in all fields"),
            Self::InvalidEmail => write!(f, "Please enter a valid email address"),
            Self::PasswordTooShort { min } => {
                write!(f, "Password must be at least {min} characters long")
            }
        }
    }
}

impl std::error::Error for FormError {}

impl FormError {
    /// The alert shown for this error.
    #[must_use]
    pub fn notice(&self) -> Notice {
        Notice::new("Error", self.to_string())
    }
}

/// Which auth screen a form or notice belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthKind {
    SignIn,
    SignUp,
}

impl AuthKind {
    #[must_use]
    pub const fn verb(self) -> &'static str {
        match self {
            Self::SignIn => "sign-in",
            Self::SignUp => "sign-up",
        }
    }

    /// Alert shown once a (simulated) submission goes through.
    #[must_use]
    pub fn welcome(self) -> Notice {
        match self {
            Self::SignIn => Notice::new(
                "Welcome back!",
                "Let's check your progress toward your savings goal.",
            )
            .with_button("Continue"),
            Self::SignUp => Notice::new(
                "Welcome to SmartBudget AI!",
                "Your account has been created successfully. Let's start building your savings plan!",
            )
            .with_button("Get Started"),
        }
    }
}

/// Third-party providers are not wired up yet.
#[must_use]
pub fn social_notice(provider: &str, kind: AuthKind) -> Notice {
    Notice::new(
        "Coming Soon",
        format!("{provider} {} will be available soon!", kind.verb()),
    )
}

fn looks_like_email(email: &str) -> bool {
    email.contains('@')
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignInForm {
    pub email: String,
    pub password: String,
    pub show_password: bool,
}

impl SignInForm {
    pub fn validate(&self) -> Result<(), FormError> {
        if self.email.is_empty() || self.password.is_empty() {
            return Err(FormError::MissingFields);
        }
        if !looks_like_email(&self.email) {
            return Err(FormError::InvalidEmail);
        }
        Ok(())
    }

    pub fn toggle_password_visibility(&mut self) {
        self.show_password = !self.show_password;
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignUpForm {
    pub full_name: String,
    pub email: String,
    pub password: String,
    pub show_password: bool,
}

impl SignUpForm {
    pub fn validate(&self) -> Result<(), FormError> {
        if self.full_name.is_empty() || self.email.is_empty() || self.password.is_empty() {
            return Err(FormError::MissingFields);
        }
        if !looks_like_email(&self.email) {
            return Err(FormError::InvalidEmail);
        }
        if self.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(FormError::PasswordTooShort {
                min: MIN_PASSWORD_LEN,
            });
        }
        Ok(())
    }

    pub fn toggle_password_visibility(&mut self) {
        self.show_password = !self.show_password;
    }
}
