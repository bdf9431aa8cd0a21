//! Domain layer for consumer-interview
//!
//! This crate contains the interview's core business logic. It has no
//! dependencies on I/O, networking or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Agents
//!
//! Each interviewer reply is produced by one of two behaviors:
//!
//! - **Main**: conducts the interview and moves it forward
//! - **Clarification**: asks one targeted question about missing detail
//!
//! ## Assessment and routing
//!
//! After each respondent turn a hidden [`Assessment`] decides whether the
//! reply was detailed enough. [`OrchestrationState::route`] turns that
//! verdict into the next active agent; [`routing::decide`] applies the
//! bypass rules that skip the assessment altogether.

pub mod assessment;
pub mod conversation;
pub mod core;
pub mod generation;
pub mod orchestration;
pub mod prompt;
pub mod session;
pub mod util;

// Re-export commonly used types
pub use assessment::{
    entities::{Assessment, NextAction, Verdict},
    parsing::{DecodeSource, DecodedAssessment, decode_assessment},
};
pub use conversation::{
    entities::{ConversationLog, Role, Turn},
    input::RespondentInput,
};
pub use core::error::DomainError;
pub use generation::request::{ContextEntry, ContextRole, SamplingConfig};
pub use orchestration::{
    agent::{ActiveAgent, ConversationPhase},
    routing::{self, BypassReason, MAX_CLARIFICATION_STREAK, RoutingDecision},
    state::OrchestrationState,
};
pub use prompt::{InterviewPrompts, PromptComposer, composer::ComposedPrompt};
pub use session::context::SessionContext;
