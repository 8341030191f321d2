use std::time::{Duration, Instant};

use crate::delay::Deferred;

/// The demo credential pair the simulated backend accepts. Nothing in the
/// console is actually gated on being logged in.
pub const DEMO_EMAIL: &str = "test@example.com";
pub const DEMO_PASSWORD: &str = "password";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginOutcome {
    Success,
    InvalidCredentials,
}

/// The login form and its simulated round trip. Submitting locks the form
/// until the outcome is delivered; leaving the screen cancels it.
#[derive(Debug, Default)]
pub struct LoginForm {
    email: String,
    password: String,
    pending: Option<Deferred<LoginOutcome>>,
    error: Option<String>,
    logged_in: bool,
}

impl LoginForm {
    pub fn set_email(&mut self, email: impl Into<String>) {
        self.email = email.into();
    }

    pub fn set_password(&mut self, password: impl Into<String>) {
        self.password = password.into();
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_submitting(&self) -> bool {
        self.pending.is_some()
    }

    pub fn is_logged_in(&self) -> bool {
        self.logged_in
    }

    /// Starts the simulated round trip against the demo credentials. The
    /// previous error is cleared; a submit while one is in flight is
    /// ignored.
    pub fn submit(&mut self, delay: Duration, now: Instant) {
        if self.pending.is_some() {
            return;
        }
        self.error = None;
        let outcome = if self.email == DEMO_EMAIL && self.password == DEMO_PASSWORD {
            LoginOutcome::Success
        } else {
            LoginOutcome::InvalidCredentials
        };
        self.pending = Some(Deferred::new(outcome, delay, now));
    }

    /// Delivers the outcome once the delay has elapsed.
    pub fn poll(&mut self, now: Instant) -> Option<LoginOutcome> {
        let outcome = self.pending.as_mut()?.take_if_ready(now)?;
        self.pending = None;
        match outcome {
            LoginOutcome::Success => self.logged_in = true,
            LoginOutcome::InvalidCredentials => {
                self.error = Some("Invalid credentials. Please try again.".to_string());
            }
        }
        Some(outcome)
    }

    /// Drops an in-flight attempt. Called when the screen is left.
    pub fn teardown(&mut self) {
        self.pending = None;
    }
}
