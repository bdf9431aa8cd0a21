//! Conversation domain entities

use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Who produced a turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// The human being interviewed
    User,
    /// The interviewer
    Assistant,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }

    /// Speaker label used when a transcript is flattened into prose.
    pub fn narrative_label(&self) -> &'static str {
        match self {
            Role::User => "User",
            Role::Assistant => "Bot",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single message in the interview (Entity)
///
/// Fields are private so a turn cannot change once it has been appended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    role: Role,
    content: String,
}

impl Turn {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn content(&self) -> &str {
        &self.content
    }
}

/// Append-only, ordered interview transcript.
///
/// The only mutation is [`append`](Self::append). Readers get either a
/// borrowed slice or an owned [`snapshot`](Self::snapshot); neither lets a
/// caller rewrite history in place.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConversationLog {
    turns: Vec<Turn>,
}

impl ConversationLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a log from previously persisted turns.
    pub fn from_turns(turns: Vec<Turn>) -> Self {
        Self { turns }
    }

    /// Append a turn at the end. Never rejects.
    pub fn append(&mut self, turn: Turn) {
        self.turns.push(turn);
    }

    /// Immutable copy of the full ordered sequence.
    pub fn snapshot(&self) -> Arc<[Turn]> {
        Arc::from(self.turns.as_slice())
    }

    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    /// The last `n` turns (or all of them when fewer exist).
    pub fn recent(&self, n: usize) -> &[Turn] {
        let start = self.turns.len().saturating_sub(n);
        &self.turns[start..]
    }

    pub fn last(&self) -> Option<&Turn> {
        self.turns.last()
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// Number of turns the respondent has contributed so far.
    pub fn respondent_turn_count(&self) -> usize {
        self.turns.iter().filter(|t| t.role == Role::User).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_log() -> ConversationLog {
        let mut log = ConversationLog::new();
        log.append(Turn::assistant("Tell me about a bad purchase."));
        log.append(Turn::user("My headphones broke."));
        log.append(Turn::assistant("When did that happen?"));
        log.append(Turn::user("Last week."));
        log.append(Turn::assistant("How did it make you feel?"));
        log
    }

    #[test]
    fn test_append_preserves_order() {
        let log = sample_log();
        let contents: Vec<&str> = log.turns().iter().map(Turn::content).collect();
        assert_eq!(
            contents,
            vec![
                "Tell me about a bad purchase.",
                "My headphones broke.",
                "When did that happen?",
                "Last week.",
                "How did it make you feel?",
            ]
        );
    }

    #[test]
    fn test_snapshot_is_detached_from_later_appends() {
        let mut log = sample_log();
        let snapshot = log.snapshot();
        log.append(Turn::user("Angry."));

        assert_eq!(snapshot.len(), 5);
        assert_eq!(log.len(), 6);
        assert_eq!(&snapshot[..], &log.turns()[..5]);
    }

    #[test]
    fn test_recent_window() {
        let log = sample_log();
        let recent = log.recent(4);
        assert_eq!(recent.len(), 4);
        assert_eq!(recent[0].content(), "My headphones broke.");

        assert_eq!(log.recent(50).len(), 5);
        assert!(ConversationLog::new().recent(4).is_empty());
    }

    #[test]
    fn test_respondent_turn_count() {
        assert_eq!(sample_log().respondent_turn_count(), 2);
        assert_eq!(ConversationLog::new().respondent_turn_count(), 0);
    }

    #[test]
    fn test_serializes_as_plain_list() {
        let mut log = ConversationLog::new();
        log.append(Turn::user("hi"));
        let json = serde_json::to_string(&log).unwrap();
        assert_eq!(json, r#"[{"role":"user","content":"hi"}]"#);

        let back: ConversationLog = serde_json::from_str(&json).unwrap();
        assert_eq!(back, log);
    }
}
