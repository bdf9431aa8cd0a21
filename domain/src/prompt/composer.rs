//! Prompt composition for the response step.
//!
//! The context sent to the backend is, in order:
//!
//! 1. the instruction of the active agent
//! 2. every turn of the conversation log, oldest first
//! 3. for the clarification agent only, a directive naming the gaps from
//!    the last assessment

use super::template::InterviewPrompts;
use crate::conversation::entities::ConversationLog;
use crate::generation::request::{ContextEntry, SamplingConfig};
use crate::orchestration::agent::ActiveAgent;
use crate::orchestration::state::OrchestrationState;

/// A fully composed response request
#[derive(Debug, Clone, PartialEq)]
pub struct ComposedPrompt {
    pub agent: ActiveAgent,
    pub entries: Vec<ContextEntry>,
    pub sampling: SamplingConfig,
}

/// Builds generation context from session state
pub struct PromptComposer;

impl PromptComposer {
    /// Compose the response request for the currently active agent.
    pub fn compose(state: &OrchestrationState, log: &ConversationLog) -> ComposedPrompt {
        let agent = state.active_agent();
        let mut entries = Vec::with_capacity(log.len() + 2);

        entries.push(ContextEntry::user(Self::instruction(agent)));
        entries.extend(log.turns().iter().map(ContextEntry::from));

        if agent == ActiveAgent::Clarification
            && let Some(assessment) = state.last_assessment()
        {
            entries.push(ContextEntry::user(InterviewPrompts::clarification_directive(
                state.missing_info(),
                &assessment.reasoning,
            )));
        }

        ComposedPrompt {
            agent,
            entries,
            sampling: SamplingConfig::for_agent(agent),
        }
    }

    /// Compose the request for the hidden assessment of `response`.
    pub fn compose_assessment(log: &ConversationLog, response: &str, window: usize) -> Vec<ContextEntry> {
        vec![
            ContextEntry::user(InterviewPrompts::assessment_system()),
            ContextEntry::user(InterviewPrompts::assessment_context(log.recent(window))),
            ContextEntry::user(InterviewPrompts::assessment_subject(response)),
        ]
    }

    fn instruction(agent: ActiveAgent) -> &'static str {
        match agent {
            ActiveAgent::Main => InterviewPrompts::main_system(),
            ActiveAgent::Clarification => InterviewPrompts::clarification_system(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assessment::entities::Assessment;
    use crate::conversation::entities::Turn;
    use crate::generation::request::ContextRole;

    fn log() -> ConversationLog {
        let mut log = ConversationLog::new();
        log.append(Turn::assistant(InterviewPrompts::greeting()));
        log.append(Turn::user("It was fine"));
        log.append(Turn::assistant("What happened?"));
        log.append(Turn::user("bad"));
        log
    }

    #[test]
    fn test_main_prompt_layout() {
        let state = OrchestrationState::new();
        let prompt = PromptComposer::compose(&state, &log());

        assert_eq!(prompt.agent, ActiveAgent::Main);
        assert_eq!(prompt.sampling, SamplingConfig::MAIN);
        assert_eq!(prompt.entries.len(), 5);
        assert_eq!(prompt.entries[0].text, InterviewPrompts::main_system());
        assert_eq!(prompt.entries[0].role, ContextRole::User);
        assert_eq!(prompt.entries[1].role, ContextRole::Model);
        assert_eq!(prompt.entries[2].text, "It was fine");
        assert_eq!(prompt.entries[4].text, "bad");
    }

    #[test]
    fn test_clarification_prompt_appends_directive() {
        let mut state = OrchestrationState::new();
        state.route(Assessment::insufficient(
            "no detail at all",
            vec!["what happened".to_string()],
        ));
        let prompt = PromptComposer::compose(&state, &log());

        assert_eq!(prompt.agent, ActiveAgent::Clarification);
        assert_eq!(prompt.sampling, SamplingConfig::CLARIFICATION);
        assert_eq!(prompt.entries.len(), 6);
        assert_eq!(prompt.entries[0].text, InterviewPrompts::clarification_system());

        let directive = prompt.entries.last().unwrap();
        assert_eq!(directive.role, ContextRole::User);
        assert!(directive.text.contains("what happened"));
        assert!(directive.text.contains("no detail at all"));
    }

    #[test]
    fn test_assessment_request_uses_recent_window() {
        let entries = PromptComposer::compose_assessment(&log(), "bad", 2);
        assert_eq!(entries.len(), 3);
        assert!(entries.iter().all(|e| e.role == ContextRole::User));
        assert!(entries[1].text.contains("Bot: What happened? User: bad"));
        assert!(!entries[1].text.contains("It was fine"));
        assert_eq!(entries[2].text, "User response to analyze: \"bad\"");
    }
}
