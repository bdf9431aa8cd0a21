//! Recover Session use case.
//!
//! Rebuilds a [`SessionContext`] from the `convo_history` and
//! `orchestration_state` fields the turn controller persists after every
//! turn. This is the only place the core reads the store back.

use crate::ports::field_store::{FieldStore, PersistenceError, SessionField};
use interview_domain::{ConversationLog, DomainError, OrchestrationState, SessionContext};
use thiserror::Error;
use tracing::info;

/// Errors that can occur while recovering a session
#[derive(Error, Debug)]
pub enum RecoverSessionError {
    #[error("Persistence error: {0}")]
    Persistence(#[from] PersistenceError),

    #[error("Corrupt {field} field: {source}")]
    Corrupt {
        field: &'static str,
        source: serde_json::Error,
    },

    #[error(transparent)]
    Invalid(#[from] DomainError),
}

/// Load the last persisted session, if any.
///
/// Returns `Ok(None)` when no conversation history has been written. A
/// missing orchestration state is treated as a fresh state.
pub fn recover_session(
    store: &dyn FieldStore,
) -> Result<Option<SessionContext>, RecoverSessionError> {
    let Some(history) = store.get_field(SessionField::ConvoHistory)? else {
        return Ok(None);
    };
    let log: ConversationLog =
        serde_json::from_str(&history).map_err(|source| RecoverSessionError::Corrupt {
            field: SessionField::ConvoHistory.key(),
            source,
        })?;

    let state = match store.get_field(SessionField::OrchestrationState)? {
        Some(raw) => serde_json::from_str::<OrchestrationState>(&raw).map_err(|source| {
            RecoverSessionError::Corrupt {
                field: SessionField::OrchestrationState.key(),
                source,
            }
        })?,
        None => OrchestrationState::new(),
    };

    let session = SessionContext::restore(log, state)?;
    info!(
        "Recovered session: {} turns, agent={}, streak={}",
        session.log.len(),
        session.state.active_agent(),
        session.state.clarification_streak()
    );
    Ok(Some(session))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::field_store::MemoryFieldStore;
    use interview_domain::{ActiveAgent, Assessment, Turn};

    #[test]
    fn test_nothing_to_recover() {
        let store = MemoryFieldStore::new();
        assert!(recover_session(&store).unwrap().is_none());
    }

    #[test]
    fn test_recover_round_trip() {
        let mut log = ConversationLog::new();
        log.append(Turn::assistant("Hello"));
        log.append(Turn::user("bad"));
        let mut state = OrchestrationState::new();
        state.route(Assessment::insufficient("vague", vec!["what".to_string()]));

        let store = MemoryFieldStore::new();
        store
            .set_field(SessionField::ConvoHistory, &serde_json::to_string(&log).unwrap())
            .unwrap();
        store
            .set_field(
                SessionField::OrchestrationState,
                &serde_json::to_string(&state).unwrap(),
            )
            .unwrap();

        let session = recover_session(&store).unwrap().unwrap();
        assert_eq!(session.log, log);
        assert_eq!(session.state.active_agent(), ActiveAgent::Clarification);
        assert_eq!(session.state.clarification_streak(), 1);
    }

    #[test]
    fn test_corrupt_history() {
        let store = MemoryFieldStore::new();
        store.set_field(SessionField::ConvoHistory, "{oops").unwrap();
        assert!(matches!(
            recover_session(&store),
            Err(RecoverSessionError::Corrupt {
                field: "convo_history",
                ..
            })
        ));
    }

    #[test]
    fn test_missing_state_defaults() {
        let store = MemoryFieldStore::new();
        store
            .set_field(
                SessionField::ConvoHistory,
                r#"[{"role":"assistant","content":"Hello"}]"#,
            )
            .unwrap();
        let session = recover_session(&store).unwrap().unwrap();
        assert_eq!(session.state, OrchestrationState::new());
    }

    #[test]
    fn test_inconsistent_state_is_rejected() {
        let store = MemoryFieldStore::new();
        store
            .set_field(
                SessionField::ConvoHistory,
                r#"[{"role":"assistant","content":"Hello"}]"#,
            )
            .unwrap();
        store
            .set_field(
                SessionField::OrchestrationState,
                r#"{"active_agent":"clarification","clarification_streak":1,"last_respondent_turn":"","last_assessment":null,"phase":"ongoing"}"#,
            )
            .unwrap();
        assert!(matches!(
            recover_session(&store),
            Err(RecoverSessionError::Invalid(DomainError::InvalidSnapshot(_)))
        ));
    }
}
