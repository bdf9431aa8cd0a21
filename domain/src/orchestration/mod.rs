//! Orchestration domain: which response behavior handles the next turn.
//!
//! - [`agent::ActiveAgent`]: the `main` interviewer or the `clarification` specialist
//! - [`state::OrchestrationState`]: routing state and its transition function
//! - [`routing::RoutingDecision`]: bypass rules evaluated before any assessment

pub mod agent;
pub mod routing;
pub mod state;
