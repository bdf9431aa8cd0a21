//! Application layer for consumer-interview
//!
//! This crate contains use cases, port definitions, and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::InterviewParams;
pub use ports::{
    conversation_logger::{ConversationEvent, ConversationLogger, NoConversationLogger},
    field_store::{FieldStore, MemoryFieldStore, PersistenceError, SessionField},
    generation_client::{GenerationClient, GenerationError},
    presenter::{InterviewPresenter, NoPresenter},
};
pub use use_cases::assess_response::AssessmentAgent;
pub use use_cases::recover_session::{RecoverSessionError, recover_session};
pub use use_cases::turn_controller::{TurnController, TurnOutcome};
