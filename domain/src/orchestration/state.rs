//! Orchestration state and its transition function

use super::agent::{ActiveAgent, ConversationPhase};
use super::routing::MAX_CLARIFICATION_STREAK;
use crate::assessment::entities::{Assessment, NextAction};
use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};

/// Routing state carried across turns (Entity)
///
/// Invariants, upheld by every transition below:
///
/// - `clarification_streak` is 0 whenever `active_agent` is `Main`
/// - `clarification_streak` never exceeds [`MAX_CLARIFICATION_STREAK`]
/// - `active_agent == Clarification` implies `last_assessment` is present
///   and requests clarification
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct OrchestrationState {
    active_agent: ActiveAgent,
    clarification_streak: u32,
    last_respondent_turn: String,
    last_assessment: Option<Assessment>,
    #[serde(default)]
    missing_info: Vec<String>,
    phase: ConversationPhase,
}

impl OrchestrationState {
    pub fn new() -> Self {
        Self::default()
    }

    // ==================== Accessors ====================

    pub fn active_agent(&self) -> ActiveAgent {
        self.active_agent
    }

    pub fn clarification_streak(&self) -> u32 {
        self.clarification_streak
    }

    pub fn last_respondent_turn(&self) -> &str {
        &self.last_respondent_turn
    }

    pub fn last_assessment(&self) -> Option<&Assessment> {
        self.last_assessment.as_ref()
    }

    /// Gaps the clarification agent is currently asked to close.
    pub fn missing_info(&self) -> &[String] {
        &self.missing_info
    }

    pub fn phase(&self) -> ConversationPhase {
        self.phase
    }

    // ==================== Transitions ====================

    /// Remember the respondent text being routed.
    pub fn record_respondent_turn(&mut self, text: impl Into<String>) {
        self.last_respondent_turn = text.into();
    }

    /// Apply a fresh assessment and return the agent it selects.
    pub fn route(&mut self, assessment: Assessment) -> ActiveAgent {
        match assessment.next_action {
            NextAction::RequestClarification => {
                self.active_agent = ActiveAgent::Clarification;
                self.clarification_streak = (self.clarification_streak + 1)
                    .min(MAX_CLARIFICATION_STREAK);
                self.missing_info = assessment.missing_info.clone();
            }
            NextAction::ContinueInterview => self.reset_to_main(),
        }
        self.last_assessment = Some(assessment);
        self.phase = ConversationPhase::Ongoing;
        self.active_agent
    }

    /// Force the main agent because a bypass rule matched.
    pub fn apply_bypass(&mut self) -> ActiveAgent {
        self.force_main()
    }

    /// Force the main agent because the assessment could not be obtained.
    pub fn fall_back_to_main(&mut self) -> ActiveAgent {
        self.force_main()
    }

    /// Return to the state of a freshly greeted interview.
    pub fn restart(&mut self) {
        *self = Self::new();
    }

    fn force_main(&mut self) -> ActiveAgent {
        self.reset_to_main();
        self.phase = ConversationPhase::Ongoing;
        self.active_agent
    }

    fn reset_to_main(&mut self) {
        self.active_agent = ActiveAgent::Main;
        self.clarification_streak = 0;
        self.missing_info.clear();
    }

    /// Check the invariants on state that came from outside (e.g. a
    /// persisted snapshot).
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.clarification_streak > MAX_CLARIFICATION_STREAK {
            return Err(DomainError::InvalidSnapshot(format!(
                "clarification streak {} exceeds {}",
                self.clarification_streak, MAX_CLARIFICATION_STREAK
            )));
        }
        match self.active_agent {
            ActiveAgent::Main if self.clarification_streak != 0 => {
                Err(DomainError::InvalidSnapshot(
                    "main agent with a non-zero clarification streak".to_string(),
                ))
            }
            ActiveAgent::Clarification
                if !self
                    .last_assessment
                    .as_ref()
                    .is_some_and(Assessment::requests_clarification) =>
            {
                Err(DomainError::InvalidSnapshot(
                    "clarification agent without a clarification request".to_string(),
                ))
            }
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn insufficient(gap: &str) -> Assessment {
        Assessment::insufficient("too vague", vec![gap.to_string()])
    }

    #[test]
    fn test_new_state() {
        let state = OrchestrationState::new();
        assert_eq!(state.active_agent(), ActiveAgent::Main);
        assert_eq!(state.clarification_streak(), 0);
        assert_eq!(state.phase(), ConversationPhase::Initial);
        assert!(state.last_assessment().is_none());
        assert!(state.validate().is_ok());
    }

    #[test]
    fn test_route_to_clarification() {
        let mut state = OrchestrationState::new();
        let agent = state.route(insufficient("what happened"));

        assert_eq!(agent, ActiveAgent::Clarification);
        assert_eq!(state.clarification_streak(), 1);
        assert_eq!(state.missing_info(), ["what happened"]);
        assert_eq!(state.phase(), ConversationPhase::Ongoing);
        assert!(state.validate().is_ok());
    }

    #[test]
    fn test_route_back_to_main_resets_streak() {
        let mut state = OrchestrationState::new();
        state.route(insufficient("what happened"));
        let agent = state.route(Assessment::sufficient("detailed"));

        assert_eq!(agent, ActiveAgent::Main);
        assert_eq!(state.clarification_streak(), 0);
        assert!(state.missing_info().is_empty());
        assert_eq!(
            state.last_assessment().map(|a| a.next_action),
            Some(NextAction::ContinueInterview)
        );
    }

    #[test]
    fn test_bypass_resets_streak() {
        let mut state = OrchestrationState::new();
        state.route(insufficient("when"));
        state.route(insufficient("where"));
        assert_eq!(state.clarification_streak(), 2);

        let agent = state.apply_bypass();
        assert_eq!(agent, ActiveAgent::Main);
        assert_eq!(state.clarification_streak(), 0);
        assert!(state.validate().is_ok());
    }

    #[test]
    fn test_fall_back_to_main() {
        let mut state = OrchestrationState::new();
        state.route(insufficient("when"));
        state.fall_back_to_main();
        assert_eq!(state.active_agent(), ActiveAgent::Main);
        assert_eq!(state.clarification_streak(), 0);
        assert!(state.validate().is_ok());
    }

    #[test]
    fn test_streak_is_bounded_even_without_bypass() {
        let mut state = OrchestrationState::new();
        for _ in 0..5 {
            state.route(insufficient("anything"));
        }
        assert_eq!(state.clarification_streak(), MAX_CLARIFICATION_STREAK);
    }

    #[test]
    fn test_invariants_hold_over_mixed_sequences() {
        let mut state = OrchestrationState::new();
        let steps: [Option<bool>; 9] = [
            Some(false),
            Some(false),
            None,
            Some(true),
            Some(false),
            Some(true),
            Some(false),
            Some(false),
            None,
        ];
        for step in steps {
            match step {
                Some(true) => {
                    state.route(Assessment::sufficient("fine"));
                }
                Some(false) => {
                    state.route(insufficient("gap"));
                }
                None => {
                    state.apply_bypass();
                }
            }
            assert!(state.validate().is_ok(), "invariant broken: {state:?}");
            assert!(state.clarification_streak() <= MAX_CLARIFICATION_STREAK);
        }
    }

    #[test]
    fn test_validate_rejects_inconsistent_snapshot() {
        let json = r#"{
            "active_agent": "clarification",
            "clarification_streak": 1,
            "last_respondent_turn": "bad",
            "last_assessment": null,
            "missing_info": [],
            "phase": "ongoing"
        }"#;
        let state: OrchestrationState = serde_json::from_str(json).unwrap();
        assert!(matches!(
            state.validate(),
            Err(DomainError::InvalidSnapshot(_))
        ));

        let json = r#"{
            "active_agent": "main",
            "clarification_streak": 3,
            "last_respondent_turn": "",
            "last_assessment": null,
            "phase": "ongoing"
        }"#;
        let state: OrchestrationState = serde_json::from_str(json).unwrap();
        assert!(state.validate().is_err());
    }
}
