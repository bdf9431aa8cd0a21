//! Response behaviors and interview phases

use serde::{Deserialize, Serialize};
use std::fmt;

/// The response-generation behavior currently in charge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActiveAgent {
    /// Conducts the interview and moves it forward.
    #[default]
    Main,
    /// Asks one targeted question about the gaps in the last reply.
    Clarification,
}

impl ActiveAgent {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActiveAgent::Main => "main",
            ActiveAgent::Clarification => "clarification",
        }
    }
}

impl fmt::Display for ActiveAgent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Coarse progress marker for the interview.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConversationPhase {
    /// Greeting shown, first reply not yet routed.
    #[default]
    Initial,
    /// At least one respondent reply has been routed.
    Ongoing,
}

impl ConversationPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConversationPhase::Initial => "initial",
            ConversationPhase::Ongoing => "ongoing",
        }
    }
}
