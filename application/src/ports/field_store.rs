//! Persistence port for session fields.
//!
//! The turn controller writes named fields after every turn so a session
//! can survive a restart. Fields are plain strings; list-valued fields such
//! as [`SessionField::OrchestrationLog`] hold a JSON array that
//! [`FieldStore::append_field`] extends.

use serde_json::Value;
use std::collections::HashMap;
use std::sync::Mutex;
use thiserror::Error;
use tracing::warn;

/// Named fields written by the core
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SessionField {
    /// Latest interviewer text
    BotQuestion,
    /// Latest respondent text
    UserResponse,
    /// Serialized conversation log
    ConvoHistory,
    /// Serialized orchestration state
    OrchestrationState,
    /// One entry per assessed turn
    OrchestrationLog,
}

impl SessionField {
    pub const ALL: [SessionField; 5] = [
        SessionField::BotQuestion,
        SessionField::UserResponse,
        SessionField::ConvoHistory,
        SessionField::OrchestrationState,
        SessionField::OrchestrationLog,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            SessionField::BotQuestion => "bot_question",
            SessionField::UserResponse => "user_response",
            SessionField::ConvoHistory => "convo_history",
            SessionField::OrchestrationState => "orchestration_state",
            SessionField::OrchestrationLog => "orchestration_log",
        }
    }
}

/// Errors from a field store
#[derive(Error, Debug)]
pub enum PersistenceError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

/// Key-value store for session fields
pub trait FieldStore: Send + Sync {
    /// Overwrite a field.
    fn set_field(&self, field: SessionField, value: &str) -> Result<(), PersistenceError>;

    /// Read a field, if it has been written.
    fn get_field(&self, field: SessionField) -> Result<Option<String>, PersistenceError>;

    /// Append one JSON entry to a list-valued field.
    ///
    /// A missing value starts a fresh list. A non-list value is replaced
    /// by a fresh list, with a warning since earlier entries are lost.
    fn append_field(&self, field: SessionField, entry: Value) -> Result<(), PersistenceError> {
        let mut entries: Vec<Value> = match self.get_field(field)? {
            Some(raw) => serde_json::from_str(&raw).unwrap_or_else(|e| {
                warn!(
                    "Discarding unreadable {} ({}), starting a new list",
                    field.key(),
                    e
                );
                Vec::new()
            }),
            None => Vec::new(),
        };
        entries.push(entry);
        self.set_field(field, &serde_json::to_string(&entries)?)
    }
}

/// In-memory field store for tests and sessions run without persistence
#[derive(Default)]
pub struct MemoryFieldStore {
    fields: Mutex<HashMap<SessionField, String>>,
}

impl MemoryFieldStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl FieldStore for MemoryFieldStore {
    fn set_field(&self, field: SessionField, value: &str) -> Result<(), PersistenceError> {
        self.fields
            .lock()
            .map_err(|_| PersistenceError::Unavailable("store lock poisoned".to_string()))?
            .insert(field, value.to_string());
        Ok(())
    }

    fn get_field(&self, field: SessionField) -> Result<Option<String>, PersistenceError> {
        Ok(self
            .fields
            .lock()
            .map_err(|_| PersistenceError::Unavailable("store lock poisoned".to_string()))?
            .get(&field)
            .cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_keys() {
        let keys: Vec<&str> = SessionField::ALL.iter().map(SessionField::key).collect();
        assert_eq!(
            keys,
            vec![
                "bot_question",
                "user_response",
                "convo_history",
                "orchestration_state",
                "orchestration_log",
            ]
        );
    }

    #[test]
    fn test_memory_store_set_and_get() {
        let store = MemoryFieldStore::new();
        assert!(store.get_field(SessionField::BotQuestion).unwrap().is_none());

        store.set_field(SessionField::BotQuestion, "first").unwrap();
        store.set_field(SessionField::BotQuestion, "second").unwrap();
        assert_eq!(
            store.get_field(SessionField::BotQuestion).unwrap().as_deref(),
            Some("second")
        );
    }

    #[test]
    fn test_append_field_builds_json_list() {
        let store = MemoryFieldStore::new();
        store
            .append_field(SessionField::OrchestrationLog, serde_json::json!({"n": 1}))
            .unwrap();
        store
            .append_field(SessionField::OrchestrationLog, serde_json::json!({"n": 2}))
            .unwrap();

        let raw = store.get_field(SessionField::OrchestrationLog).unwrap().unwrap();
        let entries: Vec<Value> = serde_json::from_str(&raw).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[1]["n"], 2);
    }

    #[test]
    fn test_append_field_replaces_garbage() {
        let store = MemoryFieldStore::new();
        store
            .set_field(SessionField::OrchestrationLog, "not json")
            .unwrap();
        store
            .append_field(SessionField::OrchestrationLog, serde_json::json!("x"))
            .unwrap();
        let raw = store.get_field(SessionField::OrchestrationLog).unwrap().unwrap();
        assert_eq!(raw, r#"["x"]"#);
    }
}
