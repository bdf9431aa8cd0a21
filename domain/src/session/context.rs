//! Session context entity

use crate::conversation::entities::ConversationLog;
use crate::core::error::DomainError;
use crate::orchestration::state::OrchestrationState;

/// Everything one interview session owns.
///
/// Created once per session and handed by `&mut` to the turn controller,
/// so at most one turn can be in progress at a time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionContext {
    pub log: ConversationLog,
    pub state: OrchestrationState,
}

impl SessionContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a session from persisted parts, checking state invariants.
    pub fn restore(log: ConversationLog, state: OrchestrationState) -> Result<Self, DomainError> {
        state.validate()?;
        if log.is_empty() {
            return Err(DomainError::InvalidSnapshot(
                "conversation history is empty".to_string(),
            ));
        }
        Ok(Self { log, state })
    }

    /// True until the opening greeting has been recorded.
    pub fn is_fresh(&self) -> bool {
        self.log.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conversation::entities::Turn;

    #[test]
    fn test_restore_requires_history() {
        let result = SessionContext::restore(ConversationLog::new(), OrchestrationState::new());
        assert!(matches!(result, Err(DomainError::InvalidSnapshot(_))));
    }

    #[test]
    fn test_restore_valid_session() {
        let mut log = ConversationLog::new();
        log.append(Turn::assistant("Hello"));
        let session = SessionContext::restore(log, OrchestrationState::new()).unwrap();
        assert!(!session.is_fresh());
        assert_eq!(session.log.len(), 1);
    }
}
