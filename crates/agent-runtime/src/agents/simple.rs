//! Simple agent implementation (LLM only, no tools)

use agent_core::{Agent, Context, Result};
use agent_llm::{CompletionRequest, LLMProvider, Message};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::info;

/// Configuration for a simple agent
#[derive(Debug, Clone)]
pub struct SimpleConfig {
    /// Model to use
    pub model: String,

    /// System prompt
    pub system_prompt: String,

    /// Max tokens per completion
    pub max_tokens: usize,

    /// Temperature, omitted for reasoning models
    pub temperature: Option<f32>,
}

impl Default for SimpleConfig {
    fn default() -> Self {
        Self {
            model: "gpt-4o-mini".to_string(),
            system_prompt: "You are a helpful assistant.".to_string(),
            max_tokens: 4096,
            temperature: None,
        }
    }
}

/// A single-turn agent that calls the model once without tools
///
/// # Example
///
/// ```no_run
/// use agent_runtime::{SimpleAgent, SimpleConfig};
/// use agent_core::{Agent, Context};
/// use agent_llm::LLMProvider;
/// use std::sync::Arc;
///
/// # async fn example(provider: Arc<dyn LLMProvider>) -> agent_core::Result<()> {
/// let config = SimpleConfig {
///     model: "o3-mini-2025-01-31".to_string(),
///     system_prompt: "당신은 투자 자문가입니다.".to_string(),
///     max_tokens: 8192,
///     temperature: None,
/// };
///
/// let agent = SimpleAgent::new(provider, config, "advisor".to_string());
/// let mut context = Context::new();
/// let response = agent.process("추천을 작성하세요".to_string(), &mut context).await?;
/// # Ok(())
/// # }
/// ```
pub struct SimpleAgent {
    provider: Arc<dyn LLMProvider>,
    config: SimpleConfig,
    name: String,
}

impl SimpleAgent {
    /// Create a new simple agent
    pub fn new(provider: Arc<dyn LLMProvider>, config: SimpleConfig, name: String) -> Self {
        Self {
            provider,
            config,
            name,
        }
    }

    /// Get the agent's configuration
    pub fn config(&self) -> &SimpleConfig {
        &self.config
    }
}

#[async_trait]
impl Agent for SimpleAgent {
    async fn process(&self, input: String, _context: &mut Context) -> Result<String> {
        let request = CompletionRequest::builder(&self.config.model)
            .messages(vec![Message::user(input)])
            .system(self.config.system_prompt.clone())
            .max_tokens(self.config.max_tokens)
            .temperature(self.config.temperature)
            .build();

        info!(agent = %self.name, model = %self.config.model, "Sending request to LLM");
        let response = self
            .provider
            .complete(request)
            .await
            .map_err(|e| agent_core::Error::ProcessingFailed(e.to_string()))?;

        Ok(response
            .message
            .text()
            .unwrap_or_else(|| "No response".to_string()))
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::executor::tests::{ScriptedProvider, text_response};

    #[test]
    fn test_simple_config_default() {
        let config = SimpleConfig::default();
        assert_eq!(config.model, "gpt-4o-mini");
        assert_eq!(config.max_tokens, 4096);
        assert!(config.temperature.is_none());
    }

    #[tokio::test]
    async fn test_single_call_without_tools() {
        let provider = Arc::new(ScriptedProvider::new(vec![text_response("매수")]));
        let config = SimpleConfig {
            system_prompt: "advisor".to_string(),
            ..SimpleConfig::default()
        };
        let agent = SimpleAgent::new(provider.clone(), config, "advisor".to_string());

        let mut context = Context::new();
        let output = agent.process("추천".to_string(), &mut context).await.unwrap();
        assert_eq!(output, "매수");
        assert_eq!(agent.name(), "advisor");

        let requests = provider.requests.lock().unwrap();
        assert_eq!(requests.len(), 1);
        assert!(requests[0].tools.is_none());
        assert!(requests[0].temperature.is_none());
        assert_eq!(requests[0].system.as_deref(), Some("advisor"));
    }
}
