//! Presentation layer for consumer-interview
//!
//! This crate contains the CLI definition, the console presenter
//! and the interactive interview REPL.

pub mod cli;
pub mod console;
pub mod interview;

// Re-export commonly used types
pub use cli::commands::Cli;
pub use console::ConsolePresenter;
pub use interview::{InterviewRepl, ReplCommand};
