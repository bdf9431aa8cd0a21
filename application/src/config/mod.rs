//! Application-level configuration.
//!
//! - [`InterviewParams`]: retry pacing and assessment context window

pub mod interview_params;

pub use interview_params::InterviewParams;
