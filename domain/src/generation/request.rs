//! Backend-neutral generation request types

use crate::conversation::entities::{Role, Turn};
use crate::orchestration::agent::ActiveAgent;
use serde::{Deserialize, Serialize};

/// Speaker tag of a context entry, in backend convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContextRole {
    /// Respondent turns, instructions and directives
    User,
    /// Interviewer turns
    Model,
}

impl ContextRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContextRole::User => "user",
            ContextRole::Model => "model",
        }
    }
}

impl From<Role> for ContextRole {
    fn from(role: Role) -> Self {
        match role {
            Role::User => ContextRole::User,
            Role::Assistant => ContextRole::Model,
        }
    }
}

/// One entry of the ordered context sent to the generation backend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContextEntry {
    pub role: ContextRole,
    pub text: String,
}

impl ContextEntry {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: ContextRole::User,
            text: text.into(),
        }
    }

    pub fn model(text: impl Into<String>) -> Self {
        Self {
            role: ContextRole::Model,
            text: text.into(),
        }
    }
}

impl From<&Turn> for ContextEntry {
    fn from(turn: &Turn) -> Self {
        Self {
            role: turn.role().into(),
            text: turn.content().to_string(),
        }
    }
}

/// Sampling parameters for one generation request
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SamplingConfig {
    pub temperature: f32,
    pub top_k: u32,
    pub top_p: f32,
    pub max_output_tokens: u32,
}

impl SamplingConfig {
    /// Open-ended interviewing.
    pub const MAIN: Self = Self {
        temperature: 0.7,
        top_k: 40,
        top_p: 0.95,
        max_output_tokens: 200,
    };

    /// Narrow, directive follow-up questions.
    pub const CLARIFICATION: Self = Self {
        temperature: 0.5,
        top_k: 40,
        top_p: 0.95,
        max_output_tokens: 150,
    };

    /// Near-deterministic JSON verdicts.
    pub const ASSESSMENT: Self = Self {
        temperature: 0.3,
        top_k: 20,
        top_p: 0.8,
        max_output_tokens: 300,
    };

    pub fn for_agent(agent: ActiveAgent) -> Self {
        match agent {
            ActiveAgent::Main => Self::MAIN,
            ActiveAgent::Clarification => Self::CLARIFICATION,
        }
    }
}
