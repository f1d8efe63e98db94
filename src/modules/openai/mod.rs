//! OpenAI Responses API client
//!
//! Services depend on the [`TextGenerator`] trait rather than the concrete
//! client so tests can substitute a stub.

mod client;
mod error;

pub use client::{CompletionRequest, OpenAiClient, TextGenerator};
pub use error::LlmError;
