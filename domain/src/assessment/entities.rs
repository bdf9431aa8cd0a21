//! Assessment value objects

use serde::{Deserialize, Serialize};

/// Whether a respondent turn carried enough concrete detail
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    Sufficient,
    Insufficient,
}

/// What the interview should do next
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NextAction {
    ContinueInterview,
    RequestClarification,
}

impl NextAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            NextAction::ContinueInterview => "continue_interview",
            NextAction::RequestClarification => "request_clarification",
        }
    }
}

/// Verdict on a single respondent turn (Value Object)
///
/// Field names on the wire follow the JSON shape the analysis prompt asks
/// the model to produce, so the same type decodes model output and
/// round-trips through persisted orchestration state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assessment {
    #[serde(rename = "assessment")]
    pub verdict: Verdict,
    #[serde(default)]
    pub reasoning: String,
    #[serde(default)]
    pub missing_info: Vec<String>,
    pub next_action: NextAction,
}

impl Assessment {
    pub fn new(
        verdict: Verdict,
        reasoning: impl Into<String>,
        missing_info: Vec<String>,
        next_action: NextAction,
    ) -> Self {
        Self {
            verdict,
            reasoning: reasoning.into(),
            missing_info,
            next_action,
        }
    }

    /// A sufficient verdict that lets the interview move on.
    pub fn sufficient(reasoning: impl Into<String>) -> Self {
        Self::new(
            Verdict::Sufficient,
            reasoning,
            Vec::new(),
            NextAction::ContinueInterview,
        )
    }

    /// An insufficient verdict asking for the listed details.
    pub fn insufficient(reasoning: impl Into<String>, missing_info: Vec<String>) -> Self {
        Self::new(
            Verdict::Insufficient,
            reasoning,
            missing_info,
            NextAction::RequestClarification,
        )
    }

    pub fn requests_clarification(&self) -> bool {
        self.next_action == NextAction::RequestClarification
    }
}
