//! Terminal rendering of the interview.

use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use interview_application::InterviewPresenter;
use interview_domain::Role;
use std::sync::Mutex;
use std::time::Duration;

/// Renders messages with colored speaker labels and shows the status line
/// as a spinner while the respondent's input is blocked.
pub struct ConsolePresenter {
    show_progress: bool,
    spinner: Mutex<Option<ProgressBar>>,
}

impl ConsolePresenter {
    pub fn new() -> Self {
        Self {
            show_progress: true,
            spinner: Mutex::new(None),
        }
    }

    /// Set whether to animate the status line
    pub fn with_progress(mut self, show: bool) -> Self {
        self.show_progress = show;
        self
    }

    /// Format one message bubble
    pub fn format_message(role: Role, text: &str) -> String {
        let label = match role {
            Role::Assistant => "Interviewer:".cyan().bold(),
            Role::User => "You:".green().bold(),
        };
        format!("{} {}", label, text)
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg:.dim}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    }

    fn clear_spinner(&self) -> Option<String> {
        let spinner = self.spinner.lock().ok()?.take()?;
        let message = spinner.message();
        spinner.finish_and_clear();
        Some(message)
    }
}

impl Default for ConsolePresenter {
    fn default() -> Self {
        Self::new()
    }
}

impl InterviewPresenter for ConsolePresenter {
    fn display_message(&self, role: Role, text: &str) {
        let line = Self::format_message(role, text);
        match self.spinner.lock().ok().as_deref().and_then(Option::as_ref) {
            Some(spinner) => spinner.println(format!("\n{}\n", line)),
            None => println!("\n{}\n", line),
        }
    }

    fn set_input_enabled(&self, enabled: bool) {
        if !enabled {
            return;
        }
        // A status still showing when input reopens is a notice for the respondent.
        if let Some(message) = self.clear_spinner()
            && !message.is_empty()
        {
            println!("{}", message.yellow());
        }
    }

    fn set_status(&self, text: &str) {
        if text.is_empty() {
            self.clear_spinner();
            return;
        }

        if !self.show_progress {
            eprintln!("{}", text.dimmed());
            return;
        }

        let Ok(mut slot) = self.spinner.lock() else {
            return;
        };
        match slot.as_ref() {
            Some(spinner) => spinner.set_message(text.to_string()),
            None => {
                let spinner = ProgressBar::new_spinner();
                spinner.set_style(Self::spinner_style());
                spinner.set_message(text.to_string());
                spinner.enable_steady_tick(Duration::from_millis(100));
                *slot = Some(spinner);
            }
        }
    }
}
