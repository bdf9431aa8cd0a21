//! Gemini generation backend.
//!
//! Implements the [`GenerationClient`](interview_application::GenerationClient)
//! port over the `generateContent` REST endpoint.

mod client;
mod types;

pub use client::{GeminiClient, GeminiSettings};
