//! LLM provider trait definition

use crate::{CompletionRequest, CompletionResponse, Result};
use async_trait::async_trait;

/// Trait for LLM providers
///
/// Implementations wrap one text-generation service. A provider is invoked
/// once per model turn; it holds no conversation state of its own.
#[async_trait]
pub trait LLMProvider: Send + Sync {
    /// Generate a completion for the given conversation
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse>;

    /// Provider name (e.g. "openai")
    fn name(&self) -> &str;
}
