//! Interview parameters: turn-loop control.
//!
//! [`InterviewParams`] groups the static knobs the
//! [`TurnController`](crate::use_cases::turn_controller::TurnController)
//! reads on every turn. These are application-layer concerns, not domain
//! policy: the clarification cap lives in the domain, retry pacing here.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Turn-loop control parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterviewParams {
    /// Total generation attempts per turn, including the first.
    pub max_attempts: u32,
    /// Delay unit for linear backoff between attempts.
    pub retry_base_delay: Duration,
    /// Number of recent turns shown to the assessment agent.
    pub context_window: usize,
}

impl Default for InterviewParams {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            retry_base_delay: Duration::from_secs(1),
            context_window: 4,
        }
    }
}

impl InterviewParams {
    /// Delay to wait after failed attempt number `attempt` (1-based).
    ///
    /// Saturates at `Duration::MAX` instead of overflowing.
    pub fn retry_delay(&self, attempt: u32) -> Duration {
        self.retry_base_delay
            .checked_mul(attempt)
            .unwrap_or(Duration::MAX)
    }

    // ==================== Builder Methods ====================

    pub fn with_max_attempts(mut self, max: u32) -> Self {
        self.max_attempts = max.max(1);
        self
    }

    pub fn with_retry_base_delay(mut self, delay: Duration) -> Self {
        self.retry_base_delay = delay;
        self
    }

    pub fn with_context_window(mut self, window: usize) -> Self {
        self.context_window = window;
        self
    }
}
