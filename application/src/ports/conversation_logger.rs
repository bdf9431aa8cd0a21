//! Port for the structured interview transcript.
//!
//! Defines the [`ConversationLogger`] trait for recording interview events
//! (respondent turns, hidden assessments, routing decisions, generation
//! attempts) to a machine-readable log.
//!
//! `tracing` carries human-readable diagnostics; this port carries the
//! research transcript, one record per event (e.g. one JSONL line).

use serde_json::Value;

/// A structured interview event for logging.
pub struct ConversationEvent {
    /// Event type identifier (e.g., "respondent_turn", "assessment", "generation").
    pub event_type: &'static str,
    /// JSON payload with event-specific data.
    pub payload: Value,
}

impl ConversationEvent {
    pub fn new(event_type: &'static str, payload: Value) -> Self {
        Self {
            event_type,
            payload,
        }
    }
}

/// Port for logging interview events.
///
/// `log` is synchronous and infallible: a broken transcript must never
/// interrupt the interview, so implementations swallow their own errors.
pub trait ConversationLogger: Send + Sync {
    fn log(&self, event: ConversationEvent);
}

/// No-op implementation for tests and when the transcript is disabled.
pub struct NoConversationLogger;

impl ConversationLogger for NoConversationLogger {
    fn log(&self, _event: ConversationEvent) {}
}
