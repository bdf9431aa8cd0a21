//! Bypass rules evaluated before the assessment step.
//!
//! The assessment agent costs a backend round-trip, so two cases skip it
//! entirely and force the `main` agent:
//!
//! 1. The reply is the respondent's first, answering the greeting.
//! 2. The clarification streak has reached [`MAX_CLARIFICATION_STREAK`].
//!
//! Rule 1 is checked first.

use super::state::OrchestrationState;
use crate::conversation::entities::ConversationLog;

/// Consecutive clarification rounds allowed before the interview is forced
/// back to the main agent.
pub const MAX_CLARIFICATION_STREAK: u32 = 2;

/// Why the assessment step was skipped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BypassReason {
    /// First respondent reply; the introductory turn is never assessed.
    IntroductoryReply,
    /// Clarification streak hit the cap.
    ClarificationCapReached,
}

impl BypassReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            BypassReason::IntroductoryReply => "introductory_reply",
            BypassReason::ClarificationCapReached => "clarification_cap_reached",
        }
    }
}

/// Outcome of evaluating the bypass rules for the latest respondent turn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoutingDecision {
    /// Skip the assessment and force the main agent.
    Bypass(BypassReason),
    /// Ask the assessment agent about the latest reply.
    Assess,
}

/// Evaluate the bypass rules.
///
/// `log` must already contain the respondent turn being routed.
pub fn decide(state: &OrchestrationState, log: &ConversationLog) -> RoutingDecision {
    if log.respondent_turn_count() <= 1 {
        return RoutingDecision::Bypass(BypassReason::IntroductoryReply);
    }
    if state.clarification_streak() >= MAX_CLARIFICATION_STREAK {
        return RoutingDecision::Bypass(BypassReason::ClarificationCapReached);
    }
    RoutingDecision::Assess
}
