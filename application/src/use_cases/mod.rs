//! Use cases (application services)
//!
//! - [`turn_controller`]: drive one respondent turn end to end
//! - [`assess_response`]: hidden quality assessment of a reply
//! - [`recover_session`]: rebuild a session from persisted fields

pub mod assess_response;
pub mod recover_session;
pub mod turn_controller;
