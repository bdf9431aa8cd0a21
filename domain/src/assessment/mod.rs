//! Response quality assessment.
//!
//! - [`entities::Assessment`]: the hidden verdict on a respondent turn
//! - [`parsing::decode_assessment`]: two-stage decoder for model replies

pub mod entities;
pub mod parsing;
