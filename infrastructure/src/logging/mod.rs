//! Logging infrastructure: structured interview transcript.
//!
//! Provides [`JsonlTranscriptLogger`], a JSONL file writer that implements
//! the [`ConversationLogger`](interview_application::ConversationLogger) port.

mod jsonl_logger;

pub use jsonl_logger::JsonlTranscriptLogger;
