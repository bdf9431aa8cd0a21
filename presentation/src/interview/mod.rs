//! Interactive interview loop.

mod repl;

pub use repl::{InterviewRepl, ReplCommand, STATUS_EMPTY_INPUT};
