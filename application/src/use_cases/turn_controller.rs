//! Turn controller: drives one respondent turn end to end.
//!
//! Per turn:
//!
//! 1. Append the respondent turn and persist `user_response`
//! 2. Apply the bypass rules, or run the [`AssessmentAgent`] and route
//! 3. Compose the prompt for the active agent and generate, retrying with
//!    linear backoff (`base × attempt`)
//! 4. Append the reply (or the fixed apology once attempts run out),
//!    notify the presenter and persist a snapshot
//!
//! Retries re-run only the response step; the assessment of a turn is
//! never repeated. Nothing here is fatal: every failure ends in either a
//! main-agent fallback or the apology turn.

use crate::config::InterviewParams;
use crate::ports::conversation_logger::{
    ConversationEvent, ConversationLogger, NoConversationLogger,
};
use crate::ports::field_store::{FieldStore, SessionField};
use crate::ports::generation_client::{GenerationClient, GenerationError};
use crate::ports::presenter::InterviewPresenter;
use crate::use_cases::assess_response::AssessmentAgent;
use interview_domain::util::preview;
use interview_domain::{
    ActiveAgent, Assessment, ComposedPrompt, InterviewPrompts, PromptComposer, RespondentInput,
    Role, RoutingDecision, SessionContext, Turn, routing,
};
use std::sync::Arc;
use tracing::{debug, info, warn};

pub const STATUS_ANALYZING: &str = "Analyzing your response...";
pub const STATUS_PREPARING: &str = "Preparing response...";
pub const STATUS_TECHNICAL_DIFFICULTIES: &str = "Technical difficulties. Please try again.";

/// How a respondent turn ended
#[derive(Debug, Clone, PartialEq)]
pub enum TurnOutcome {
    /// The active agent produced a reply.
    Replied {
        agent: ActiveAgent,
        text: String,
        attempts: u32,
    },
    /// Every attempt failed; the fixed apology was emitted instead.
    Apologized {
        attempts: u32,
        last_error: GenerationError,
    },
}

impl TurnOutcome {
    pub fn is_reply(&self) -> bool {
        matches!(self, TurnOutcome::Replied { .. })
    }
}

/// Top-level sequencing of the interview.
///
/// Owns no session data: the caller passes its [`SessionContext`] by
/// `&mut`, which also guarantees that turns are processed one at a time.
pub struct TurnController {
    client: Arc<dyn GenerationClient>,
    assessor: AssessmentAgent,
    presenter: Arc<dyn InterviewPresenter>,
    store: Arc<dyn FieldStore>,
    conversation_logger: Arc<dyn ConversationLogger>,
    params: InterviewParams,
}

impl TurnController {
    pub fn new(
        client: Arc<dyn GenerationClient>,
        presenter: Arc<dyn InterviewPresenter>,
        store: Arc<dyn FieldStore>,
        params: InterviewParams,
    ) -> Self {
        Self {
            assessor: AssessmentAgent::new(client.clone(), params.context_window),
            client,
            presenter,
            store,
            conversation_logger: Arc::new(NoConversationLogger),
            params,
        }
    }

    /// Create with a conversation logger.
    pub fn with_conversation_logger(mut self, logger: Arc<dyn ConversationLogger>) -> Self {
        self.conversation_logger = logger;
        self
    }

    pub fn params(&self) -> &InterviewParams {
        &self.params
    }

    /// Start the interview, or replay it when the session was restored.
    ///
    /// A fresh session gets the fixed greeting as its first assistant turn;
    /// no backend call is made.
    pub fn open(&self, session: &mut SessionContext) {
        if !session.is_fresh() {
            info!("Resuming interview with {} turns", session.log.len());
            for turn in session.log.turns() {
                self.presenter.display_message(turn.role(), turn.content());
            }
            self.presenter.set_input_enabled(true);
            return;
        }

        let greeting = InterviewPrompts::greeting();
        session.state.restart();
        session.log.append(Turn::assistant(greeting));
        self.presenter.display_message(Role::Assistant, greeting);
        self.persist(SessionField::BotQuestion, greeting);
        self.persist_snapshot(session);
        self.presenter.set_input_enabled(true);
        info!("Interview opened");
    }

    /// Process one respondent turn.
    pub async fn handle_turn(
        &self,
        session: &mut SessionContext,
        input: RespondentInput,
    ) -> TurnOutcome {
        self.presenter.set_input_enabled(false);
        self.presenter.set_status(STATUS_ANALYZING);

        let text = input.into_content();
        info!("Respondent turn: {}", preview(&text, 50));
        session.log.append(Turn::user(text.clone()));
        session.state.record_respondent_turn(text.clone());
        self.persist(SessionField::UserResponse, &text);
        self.conversation_logger.log(ConversationEvent::new(
            "respondent_turn",
            serde_json::json!({
                "index": session.log.respondent_turn_count(),
                "text": text,
            }),
        ));

        self.select_agent(session, &text).await;
        self.presenter.set_status(STATUS_PREPARING);

        let prompt = PromptComposer::compose(&session.state, &session.log);
        let outcome = match self.generate_with_retry(&prompt).await {
            Ok((reply, attempts)) => {
                session.log.append(Turn::assistant(reply.clone()));
                self.presenter.display_message(Role::Assistant, &reply);
                self.persist(SessionField::BotQuestion, &reply);
                self.presenter.set_status("");
                TurnOutcome::Replied {
                    agent: prompt.agent,
                    text: reply,
                    attempts,
                }
            }
            Err((last_error, attempts)) => {
                warn!(
                    "Generation failed after {} attempts: {}",
                    attempts, last_error
                );
                let apology = InterviewPrompts::apology();
                session.log.append(Turn::assistant(apology));
                self.presenter.display_message(Role::Assistant, apology);
                self.presenter.set_status(STATUS_TECHNICAL_DIFFICULTIES);
                self.conversation_logger.log(ConversationEvent::new(
                    "apology",
                    serde_json::json!({
                        "attempts": attempts,
                        "error": last_error.to_string(),
                    }),
                ));
                TurnOutcome::Apologized {
                    attempts,
                    last_error,
                }
            }
        };

        self.persist_snapshot(session);
        self.presenter.set_input_enabled(true);
        outcome
    }

    /// Apply the bypass rules or the assessment, updating session state.
    async fn select_agent(&self, session: &mut SessionContext, text: &str) {
        match routing::decide(&session.state, &session.log) {
            RoutingDecision::Bypass(reason) => {
                let agent = session.state.apply_bypass();
                debug!("Assessment bypassed ({}), agent={}", reason.as_str(), agent);
                self.conversation_logger.log(ConversationEvent::new(
                    "routing",
                    serde_json::json!({
                        "bypass": reason.as_str(),
                        "agent": agent.as_str(),
                    }),
                ));
            }
            RoutingDecision::Assess => match self.assessor.assess(&session.log, text).await {
                Ok(decoded) => {
                    let fallback = decoded.is_fallback();
                    let assessment = decoded.assessment;
                    let agent = session.state.route(assessment.clone());
                    info!(
                        "Routed to {} agent (streak {})",
                        agent,
                        session.state.clarification_streak()
                    );
                    self.record_assessment(text, &assessment, agent, fallback);
                }
                Err(e) => {
                    warn!("Assessment failed, continuing with main agent: {}", e);
                    session.state.fall_back_to_main();
                    self.conversation_logger.log(ConversationEvent::new(
                        "routing",
                        serde_json::json!({
                            "assessment_error": e.to_string(),
                            "agent": ActiveAgent::Main.as_str(),
                        }),
                    ));
                }
            },
        }
    }

    fn record_assessment(
        &self,
        text: &str,
        assessment: &Assessment,
        agent: ActiveAgent,
        fallback: bool,
    ) {
        let entry = serde_json::json!({
            "timestamp": chrono::Utc::now().to_rfc3339(),
            "user_response": text,
            "assessment": assessment,
            "selected_agent": agent.as_str(),
        });
        if let Err(e) = self
            .store
            .append_field(SessionField::OrchestrationLog, entry)
        {
            warn!("Could not append orchestration log entry: {}", e);
        }
        self.conversation_logger.log(ConversationEvent::new(
            "assessment",
            serde_json::json!({
                "assessment": assessment,
                "agent": agent.as_str(),
                "parse_fallback": fallback,
            }),
        ));
    }

    /// Call the backend until it succeeds or attempts run out.
    ///
    /// Returns the reply with the attempt that produced it, or the last
    /// error with the number of attempts made.
    async fn generate_with_retry(
        &self,
        prompt: &ComposedPrompt,
    ) -> Result<(String, u32), (GenerationError, u32)> {
        let max_attempts = self.params.max_attempts.max(1);
        let mut attempt = 1;
        loop {
            let result = self
                .client
                .generate(&prompt.entries, &prompt.sampling)
                .await
                .and_then(|text| {
                    if text.trim().is_empty() {
                        Err(GenerationError::MalformedResponse(
                            "empty reply text".to_string(),
                        ))
                    } else {
                        Ok(text)
                    }
                });

            match result {
                Ok(text) => {
                    self.conversation_logger.log(ConversationEvent::new(
                        "generation",
                        serde_json::json!({
                            "agent": prompt.agent.as_str(),
                            "attempt": attempt,
                            "bytes": text.len(),
                            "text": text,
                        }),
                    ));
                    return Ok((text, attempt));
                }
                Err(e) if attempt < max_attempts => {
                    let delay = self.params.retry_delay(attempt);
                    warn!(
                        "Generation attempt {}/{} failed ({}), retrying in {:?}",
                        attempt, max_attempts, e, delay
                    );
                    self.presenter.set_status(&format!(
                        "Connection issue. Retrying... ({}/{})",
                        attempt,
                        max_attempts - 1
                    ));
                    self.conversation_logger.log(ConversationEvent::new(
                        "generation_retry",
                        serde_json::json!({
                            "attempt": attempt,
                            "error": e.kind(),
                            "delay_ms": delay.as_millis() as u64,
                        }),
                    ));
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(e) => return Err((e, attempt)),
            }
        }
    }

    fn persist(&self, field: SessionField, value: &str) {
        if let Err(e) = self.store.set_field(field, value) {
            warn!("Could not persist {}: {}", field.key(), e);
        }
    }

    /// Write the conversation and orchestration snapshots.
    fn persist_snapshot(&self, session: &SessionContext) {
        match serde_json::to_string(&session.log) {
            Ok(history) => self.persist(SessionField::ConvoHistory, &history),
            Err(e) => warn!("Could not serialize conversation history: {}", e),
        }
        match serde_json::to_string(&session.state) {
            Ok(state) => self.persist(SessionField::OrchestrationState, &state),
            Err(e) => warn!("Could not serialize orchestration state: {}", e),
        }
    }
}
