//! Prompt domain
//!
//! Fixed interviewer texts and the composer that turns session state into
//! ordered generation context.

pub mod composer;
mod template;

pub use composer::PromptComposer;
pub use template::InterviewPrompts;
