//! Generation client port
//!
//! Defines the interface for calling the text-generation backend.

use async_trait::async_trait;
use interview_domain::{ContextEntry, SamplingConfig};
use thiserror::Error;

/// Errors that can occur during a generation request
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GenerationError {
    #[error("Timeout")]
    Timeout,

    #[error("Request failed with status {status}")]
    RequestFailed { status: u16 },

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Connection error: {0}")]
    Connection(String),
}

impl GenerationError {
    /// Short machine-readable tag for structured logs.
    pub fn kind(&self) -> &'static str {
        match self {
            GenerationError::Timeout => "timeout",
            GenerationError::RequestFailed { .. } => "request_failed",
            GenerationError::MalformedResponse(_) => "malformed_response",
            GenerationError::Connection(_) => "connection",
        }
    }
}

/// Client for the generation backend
///
/// Implementations issue exactly one request per call, enforce their own
/// timeout, and never retry; retry policy belongs to the caller.
#[async_trait]
pub trait GenerationClient: Send + Sync {
    /// Send the ordered context and return the generated text.
    async fn generate(
        &self,
        entries: &[ContextEntry],
        sampling: &SamplingConfig,
    ) -> Result<String, GenerationError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(GenerationError::Timeout.to_string(), "Timeout");
        assert_eq!(
            GenerationError::RequestFailed { status: 503 }.to_string(),
            "Request failed with status 503"
        );
    }

    #[test]
    fn test_error_kind() {
        assert_eq!(GenerationError::Timeout.kind(), "timeout");
        assert_eq!(
            GenerationError::MalformedResponse("no candidates".into()).kind(),
            "malformed_response"
        );
    }
}
