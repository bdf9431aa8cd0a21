//! Interview session.
//!
//! - [`context::SessionContext`]: the conversation log and orchestration
//!   state of one interview, passed explicitly into every core operation

pub mod context;
