//! Generation request value objects.
//!
//! - [`request::ContextEntry`]: one ordered entry of model context
//! - [`request::SamplingConfig`]: per-agent sampling profile

pub mod request;
