//! Presentation port
//!
//! The core never touches a screen directly. It emits these notifications
//! and a presentation adapter decides how to render them.

use interview_domain::Role;

/// Output port implemented by the presentation layer
pub trait InterviewPresenter: Send + Sync {
    /// Show a message bubble for `role`.
    fn display_message(&self, role: Role, text: &str);

    /// Allow or block respondent input while a turn is processed.
    fn set_input_enabled(&self, enabled: bool);

    /// Replace the status line; an empty string clears it.
    fn set_status(&self, text: &str);
}

/// No-op presenter for tests and headless runs
pub struct NoPresenter;

impl InterviewPresenter for NoPresenter {
    fn display_message(&self, _role: Role, _text: &str) {}
    fn set_input_enabled(&self, _enabled: bool) {}
    fn set_status(&self, _text: &str) {}
}
