//! Agent executor for running agent loops
//!
//! The AgentExecutor implements the core agent loop pattern:
//! 1. Call LLM with conversation history and available tools
//! 2. Check stop reason
//! 3. If tool use requested, execute tools and loop back
//! 4. If completed, return final response
//!
//! When the iteration budget is spent the executor makes one last call with
//! no tools attached, so the model has to answer with what it already has.

use agent_core::Result;
use agent_llm::{
    CompletionRequest, CompletionResponse, ContentBlock, LLMProvider, Message, StopReason,
    ToolDefinition,
};
use agent_tools::ToolRegistry;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

const DEFAULT_SYSTEM_PROMPT: &str = "You are a helpful assistant.";
const DEFAULT_FINAL_ANSWER_PROMPT: &str = "You have reached the tool-use limit. \
    Using only the information gathered so far, write your final answer now.";

/// Configuration for agent execution
#[derive(Debug, Clone)]
pub struct ExecutorConfig {
    /// Maximum number of model turns that may request tools
    pub max_iterations: usize,

    /// Model to use
    pub model: String,

    /// System prompt
    pub system_prompt: Option<String>,

    /// Max tokens per completion
    pub max_tokens: usize,

    /// Temperature, `None` leaves it to the provider
    pub temperature: Option<f32>,

    /// User message sent with the final tool-less call
    pub final_answer_prompt: String,
}

impl Default for ExecutorConfig {
    fn default() -> Self {
        Self {
            max_iterations: 10,
            model: "gpt-4o-mini".to_string(),
            system_prompt: None,
            max_tokens: 4096,
            temperature: None,
            final_answer_prompt: DEFAULT_FINAL_ANSWER_PROMPT.to_string(),
        }
    }
}

/// Executes an agent loop: LLM → tool calls → execution → loop back
pub struct AgentExecutor {
    provider: Arc<dyn LLMProvider>,
    tool_registry: Arc<ToolRegistry>,
    config: ExecutorConfig,
}

impl AgentExecutor {
    /// Create a new agent executor
    pub fn new(
        provider: Arc<dyn LLMProvider>,
        tool_registry: Arc<ToolRegistry>,
        config: ExecutorConfig,
    ) -> Self {
        Self {
            provider,
            tool_registry,
            config,
        }
    }

    /// Get the executor configuration
    pub fn config(&self) -> &ExecutorConfig {
        &self.config
    }

    /// Execute the agent loop with a user query
    pub async fn run(&self, user_message: String) -> Result<String> {
        self.run_conversation(vec![Message::user(user_message)])
            .await
    }

    /// Execute the agent loop after previous conversation messages
    pub async fn run_with_history(
        &self,
        user_message: String,
        history: Vec<Message>,
    ) -> Result<String> {
        let mut conversation = history;
        conversation.push(Message::user(user_message));
        self.run_conversation(conversation).await
    }

    async fn run_conversation(&self, initial_conversation: Vec<Message>) -> Result<String> {
        let mut conversation = initial_conversation;
        let tools = self.build_tool_definitions();
        debug!(tool_count = tools.len(), "Available tools");

        for iteration in 1..=self.config.max_iterations {
            info!(
                iteration,
                max_iterations = self.config.max_iterations,
                model = %self.config.model,
                tool_count = tools.len(),
                "Agent iteration started"
            );

            let response = self.complete(&conversation, tools.clone()).await?;
            conversation.push(response.message.clone());

            match response.stop_reason {
                StopReason::ToolUse if response.message.has_tool_uses() => {
                    let tool_results = self.execute_tools(&response.message).await;
                    info!(
                        result_count = tool_results.len(),
                        "Tool execution completed, continuing agent loop"
                    );
                    conversation.extend(tool_results);
                }
                StopReason::MaxTokens => {
                    warn!(iteration, "Hit max tokens in LLM response");
                    return Ok(response_text(&response));
                }
                _ => {
                    let text = response_text(&response);
                    info!(
                        iteration,
                        response_length = text.len(),
                        "Agent completed naturally"
                    );
                    return Ok(text);
                }
            }
        }

        warn!(
            max_iterations = self.config.max_iterations,
            "Max iterations reached, requesting final answer without tools"
        );
        conversation.push(Message::user(self.config.final_answer_prompt.clone()));
        let response = self.complete(&conversation, Vec::new()).await?;
        Ok(response_text(&response))
    }

    async fn complete(
        &self,
        conversation: &[Message],
        tools: Vec<ToolDefinition>,
    ) -> Result<CompletionResponse> {
        let request = CompletionRequest::builder(&self.config.model)
            .messages(conversation.to_vec())
            .system(
                self.config
                    .system_prompt
                    .clone()
                    .unwrap_or_else(|| DEFAULT_SYSTEM_PROMPT.to_string()),
            )
            .max_tokens(self.config.max_tokens)
            .temperature(self.config.temperature)
            .tools(tools)
            .build();

        let response = self
            .provider
            .complete(request)
            .await
            .map_err(|e| agent_core::Error::ProcessingFailed(e.to_string()))?;

        info!(
            stop_reason = ?response.stop_reason,
            input_tokens = response.usage.input_tokens,
            output_tokens = response.usage.output_tokens,
            "LLM response received"
        );
        let preview: String = response
            .message
            .text()
            .unwrap_or_default()
            .chars()
            .take(300)
            .collect();
        debug!(response_preview = %preview, "LLM response content preview");

        Ok(response)
    }

    /// Build tool definitions from the registry
    fn build_tool_definitions(&self) -> Vec<ToolDefinition> {
        self.tool_registry
            .list_tools()
            .iter()
            .map(|tool| ToolDefinition::new(tool.name(), tool.description(), tool.input_schema()))
            .collect()
    }

    /// Execute tool calls from an assistant message
    ///
    /// Failures, including unknown tool names, are returned to the model as
    /// error results rather than aborting the loop.
    async fn execute_tools(&self, message: &Message) -> Vec<Message> {
        let mut results = Vec::new();

        for tool_use in message.tool_uses() {
            let ContentBlock::ToolUse { id, name, input } = tool_use else {
                continue;
            };

            let input_preview: String = input.to_string().chars().take(500).collect();
            info!(
                tool_name = %name,
                tool_id = %id,
                input_preview = %input_preview,
                "Executing tool"
            );

            let Some(tool) = self.tool_registry.get(name) else {
                warn!(tool_name = %name, "Model requested an unknown tool");
                let error = agent_core::Error::ToolNotFound(name.clone());
                results.push(Message::tool_error(id.clone(), format!("Error: {error}")));
                continue;
            };

            let start_time = Instant::now();
            match tool.execute(input.clone()).await {
                Ok(result) => {
                    let result_str = result.to_string();
                    info!(
                        tool_name = %name,
                        duration_ms = start_time.elapsed().as_millis() as u64,
                        result_length = result_str.len(),
                        "Tool execution succeeded"
                    );
                    results.push(Message::tool_result(id.clone(), result_str));
                }
                Err(e) => {
                    warn!(
                        tool_name = %name,
                        duration_ms = start_time.elapsed().as_millis() as u64,
                        error = %e,
                        "Tool execution failed"
                    );
                    results.push(Message::tool_error(id.clone(), format!("Error: {e}")));
                }
            }
        }

        results
    }
}

fn response_text(response: &CompletionResponse) -> String {
    response
        .message
        .text()
        .unwrap_or_else(|| "No response".to_string())
}

/// Builder for AgentExecutor
pub struct AgentExecutorBuilder {
    provider: Option<Arc<dyn LLMProvider>>,
    tool_registry: Arc<ToolRegistry>,
    config: ExecutorConfig,
}

impl AgentExecutorBuilder {
    /// Create a new builder
    pub fn new() -> Self {
        Self {
            provider: None,
            tool_registry: Arc::new(ToolRegistry::new()),
            config: ExecutorConfig::default(),
        }
    }

    /// Set the LLM provider
    pub fn provider(mut self, provider: Arc<dyn LLMProvider>) -> Self {
        self.provider = Some(provider);
        self
    }

    /// Set the tool registry
    pub fn tool_registry(mut self, registry: Arc<ToolRegistry>) -> Self {
        self.tool_registry = registry;
        self
    }

    /// Set the full configuration
    pub fn config(mut self, config: ExecutorConfig) -> Self {
        self.config = config;
        self
    }

    /// Set maximum iterations
    pub fn max_iterations(mut self, max: usize) -> Self {
        self.config.max_iterations = max;
        self
    }

    /// Set the model
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.config.model = model.into();
        self
    }

    /// Set the system prompt
    pub fn system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.config.system_prompt = Some(prompt.into());
        self
    }

    /// Set max tokens
    pub fn max_tokens(mut self, max_tokens: usize) -> Self {
        self.config.max_tokens = max_tokens;
        self
    }

    /// Set temperature
    pub fn temperature(mut self, temperature: Option<f32>) -> Self {
        self.config.temperature = temperature;
        self
    }

    /// Build the executor
    pub fn build(self) -> Result<AgentExecutor> {
        let provider = self.provider.ok_or_else(|| {
            agent_core::Error::InitializationFailed("Provider not set".to_string())
        })?;

        Ok(AgentExecutor::new(provider, self.tool_registry, self.config))
    }
}

impl Default for AgentExecutorBuilder {
    fn default() -> Self {
        Self::new()
    }
}
