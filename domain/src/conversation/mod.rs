//! Conversation domain.
//!
//! - [`entities::Turn`]: one respondent or assistant message
//! - [`entities::ConversationLog`]: the append-only ordered transcript
//! - [`input::RespondentInput`]: a validated, non-empty respondent reply

pub mod entities;
pub mod input;
