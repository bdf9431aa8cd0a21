//! Respondent input value object

use crate::core::error::DomainError;

/// A finished respondent reply (Value Object)
///
/// Whatever produced the text (typing, dictation, or both), the core only
/// ever sees one trimmed, non-empty string per turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RespondentInput {
    content: String,
}

impl RespondentInput {
    /// Validate raw input, rejecting empty and whitespace-only replies.
    pub fn parse(raw: impl AsRef<str>) -> Result<Self, DomainError> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            return Err(DomainError::EmptyInput);
        }
        Ok(Self {
            content: trimmed.to_string(),
        })
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn into_content(self) -> String {
        self.content
    }
}

impl std::fmt::Display for RespondentInput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.content)
    }
}
