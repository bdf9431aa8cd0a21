//! Two-stage decoding of assessment replies.
//!
//! The analysis prompt asks for a single JSON object, but models do not
//! always comply. Decoding therefore runs in two stages that both yield an
//! [`Assessment`]:
//!
//! | Stage | Input accepted | Result |
//! |-------|----------------|--------|
//! | Strict | JSON object with valid `assessment` / `next_action` values | as decoded |
//! | Heuristic | anything else | keyword scan for "insufficient" |
//!
//! Neither stage can fail.

use super::entities::{Assessment, NextAction, Verdict};

/// Reasoning recorded when the heuristic stage produced the verdict.
pub const FALLBACK_REASONING: &str = "parse fallback";

/// Placeholder gap reported by a heuristic "insufficient" verdict.
pub const FALLBACK_MISSING_INFO: &str = "specific details";

/// Which decoding stage produced an assessment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeSource {
    Strict,
    Fallback,
}

/// Decoded assessment together with how it was obtained
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedAssessment {
    pub assessment: Assessment,
    pub source: DecodeSource,
}

impl DecodedAssessment {
    pub fn is_fallback(&self) -> bool {
        self.source == DecodeSource::Fallback
    }
}

/// Decode a model reply into an [`Assessment`], never failing.
pub fn decode_assessment(reply: &str) -> DecodedAssessment {
    match decode_strict(reply) {
        Some(assessment) => DecodedAssessment {
            assessment,
            source: DecodeSource::Strict,
        },
        None => DecodedAssessment {
            assessment: decode_heuristic(reply),
            source: DecodeSource::Fallback,
        },
    }
}

/// Strict stage: the reply (optionally inside a Markdown code fence) must be
/// exactly one JSON object matching the assessment schema.
pub fn decode_strict(reply: &str) -> Option<Assessment> {
    serde_json::from_str(strip_code_fence(reply)).ok()
}

/// Heuristic stage: a case-insensitive scan for the word "insufficient".
pub fn decode_heuristic(reply: &str) -> Assessment {
    if reply.to_lowercase().contains("insufficient") {
        Assessment::new(
            Verdict::Insufficient,
            FALLBACK_REASONING,
            vec![FALLBACK_MISSING_INFO.to_string()],
            NextAction::RequestClarification,
        )
    } else {
        Assessment::new(
            Verdict::Sufficient,
            FALLBACK_REASONING,
            Vec::new(),
            NextAction::ContinueInterview,
        )
    }
}

fn strip_code_fence(reply: &str) -> &str {
    let trimmed = reply.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let Some(body) = rest.strip_suffix("```") else {
        return trimmed;
    };
    // Drop an info string such as `json` on the opening fence line.
    match body.find('\n') {
        Some(newline) => body[newline + 1..].trim(),
        None => body.trim(),
    }
}
