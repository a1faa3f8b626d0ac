//! Soulmate AI - completion clients behind a provider-neutral trait.
//!
//! The chat service only needs single-shot chat completions: a system prompt,
//! the running conversation, and the assistant's reply.

pub mod error;
mod http_client;
pub mod llm;

pub use error::{AiError, Result};
pub use llm::{
    CompletionRequest, CompletionResponse, FinishReason, LlmClient, LlmRetryConfig, Message,
    OpenAIClient, Role, TokenUsage,
};

#[cfg(any(test, feature = "test-utils"))]
pub use llm::{MockLlmClient, MockStep};
