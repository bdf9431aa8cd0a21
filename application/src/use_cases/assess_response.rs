//! Assess Response use case.
//!
//! Runs the hidden assessment of one respondent turn: a single generation
//! request with the analysis instruction, followed by two-stage decoding
//! of the reply. Decoding never fails; only the request itself can.

use crate::ports::generation_client::{GenerationClient, GenerationError};
use interview_domain::util::preview;
use interview_domain::{ConversationLog, DecodedAssessment, PromptComposer, SamplingConfig, decode_assessment};
use std::sync::Arc;
use tracing::{debug, warn};

/// Agent that judges whether a respondent turn had enough detail
#[derive(Clone)]
pub struct AssessmentAgent {
    client: Arc<dyn GenerationClient>,
    context_window: usize,
}

impl AssessmentAgent {
    pub fn new(client: Arc<dyn GenerationClient>, context_window: usize) -> Self {
        Self {
            client,
            context_window,
        }
    }

    /// Assess `response`, the latest respondent turn in `log`.
    ///
    /// Transport failures are returned as errors; malformed model output is
    /// recovered by the heuristic decoder and flagged on the result.
    pub async fn assess(
        &self,
        log: &ConversationLog,
        response: &str,
    ) -> Result<DecodedAssessment, GenerationError> {
        let entries = PromptComposer::compose_assessment(log, response, self.context_window);
        let reply = self
            .client
            .generate(&entries, &SamplingConfig::ASSESSMENT)
            .await?;

        let decoded = decode_assessment(&reply);
        if decoded.is_fallback() {
            warn!(
                "Assessment reply was not valid JSON, used keyword fallback: {}",
                preview(&reply, 120)
            );
        }
        debug!(
            "Assessment: verdict={:?} next_action={} missing={:?}",
            decoded.assessment.verdict,
            decoded.assessment.next_action.as_str(),
            decoded.assessment.missing_info
        );
        Ok(decoded)
    }
}
