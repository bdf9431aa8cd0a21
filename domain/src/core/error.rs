//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Respondent input is empty")]
    EmptyInput,

    #[error("Invalid session snapshot: {0}")]
    InvalidSnapshot(String),
}
