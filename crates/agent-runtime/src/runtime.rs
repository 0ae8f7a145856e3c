//! Runtime holding the shared LLM provider and default tools
//!
//! Agents created from one runtime share its provider. Tool agents either use
//! the runtime's default registry or a registry of their own.

use agent_core::Result;
use agent_llm::LLMProvider;
use agent_tools::ToolRegistry;
use std::sync::Arc;
use tracing::debug;

use crate::agents::{SimpleAgent, SimpleConfig, ToolAgent};
use crate::executor::{AgentExecutor, ExecutorConfig};

/// Configuration for the agent runtime
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    /// Default maximum iterations for tool-using agents
    pub default_max_iterations: usize,

    /// Default model to use
    pub default_model: String,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            default_max_iterations: 10,
            default_model: "gpt-4o-mini".to_string(),
        }
    }
}

/// Runtime for creating agents around one provider
///
/// # Example
///
/// ```no_run
/// use agent_runtime::{AgentRuntime, ExecutorConfig, SimpleConfig};
/// use agent_llm::LLMProvider;
/// use std::sync::Arc;
///
/// # fn example(provider: Arc<dyn LLMProvider>) -> agent_core::Result<()> {
/// let runtime = AgentRuntime::builder().provider(provider).build()?;
///
/// let advisor = runtime.create_simple_agent(SimpleConfig::default(), "advisor");
/// let analyst = runtime.create_tool_agent(runtime.executor_config(), "analyst");
/// # Ok(())
/// # }
/// ```
pub struct AgentRuntime {
    provider: Arc<dyn LLMProvider>,
    tool_registry: Arc<ToolRegistry>,
    config: RuntimeConfig,
}

impl AgentRuntime {
    /// Create a new agent runtime
    pub fn new(
        provider: Arc<dyn LLMProvider>,
        tool_registry: Arc<ToolRegistry>,
        config: RuntimeConfig,
    ) -> Self {
        Self {
            provider,
            tool_registry,
            config,
        }
    }

    /// Create a new runtime builder
    pub fn builder() -> AgentRuntimeBuilder {
        AgentRuntimeBuilder::new()
    }

    /// Get a reference to the LLM provider
    pub fn provider(&self) -> &Arc<dyn LLMProvider> {
        &self.provider
    }

    /// Get a reference to the default tool registry
    pub fn tools(&self) -> &Arc<ToolRegistry> {
        &self.tool_registry
    }

    /// Get a reference to the runtime configuration
    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    /// Executor configuration seeded with the runtime defaults
    pub fn executor_config(&self) -> ExecutorConfig {
        ExecutorConfig {
            max_iterations: self.config.default_max_iterations,
            model: self.config.default_model.clone(),
            ..ExecutorConfig::default()
        }
    }

    /// Create a simple agent (LLM only, no tools)
    pub fn create_simple_agent(&self, config: SimpleConfig, name: impl Into<String>) -> SimpleAgent {
        SimpleAgent::new(self.provider.clone(), config, name.into())
    }

    /// Create a tool-using agent over the default registry
    pub fn create_tool_agent(&self, config: ExecutorConfig, name: impl Into<String>) -> ToolAgent {
        self.create_tool_agent_with_tools(config, name, self.tool_registry.clone())
    }

    /// Create a tool-using agent restricted to the given registry
    pub fn create_tool_agent_with_tools(
        &self,
        config: ExecutorConfig,
        name: impl Into<String>,
        registry: Arc<ToolRegistry>,
    ) -> ToolAgent {
        let name = name.into();
        debug!(agent = %name, tool_count = registry.len(), "Creating tool agent");
        let executor = AgentExecutor::new(self.provider.clone(), registry, config);
        ToolAgent::new(executor, name)
    }
}

/// Builder for AgentRuntime
pub struct AgentRuntimeBuilder {
    provider: Option<Arc<dyn LLMProvider>>,
    tool_registry: Option<Arc<ToolRegistry>>,
    config: RuntimeConfig,
}

impl AgentRuntimeBuilder {
    /// Create a new runtime builder
    pub fn new() -> Self {
        Self {
            provider: None,
            tool_registry: None,
            config: RuntimeConfig::default(),
        }
    }

    /// Set the LLM provider
    pub fn provider(mut self, provider: Arc<dyn LLMProvider>) -> Self {
        self.provider = Some(provider);
        self
    }

    /// Set the default tool registry
    pub fn tool_registry(mut self, registry: Arc<ToolRegistry>) -> Self {
        self.tool_registry = Some(registry);
        self
    }

    /// Set the runtime configuration
    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the default max iterations
    pub fn default_max_iterations(mut self, max: usize) -> Self {
        self.config.default_max_iterations = max;
        self
    }

    /// Set the default model
    pub fn default_model(mut self, model: impl Into<String>) -> Self {
        self.config.default_model = model.into();
        self
    }

    /// Build the runtime
    pub fn build(self) -> Result<AgentRuntime> {
        let provider = self.provider.ok_or_else(|| {
            agent_core::Error::InitializationFailed("Provider not set".to_string())
        })?;

        let tool_registry = self
            .tool_registry
            .unwrap_or_else(|| Arc::new(ToolRegistry::new()));

        Ok(AgentRuntime::new(provider, tool_registry, self.config))
    }
}

impl Default for AgentRuntimeBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::executor::tests::{ScriptedProvider, text_response};
    use agent_core::{Agent, Context};

    #[test]
    fn test_runtime_config_default() {
        let config = RuntimeConfig::default();
        assert_eq!(config.default_max_iterations, 10);
        assert_eq!(config.default_model, "gpt-4o-mini");
    }

    #[test]
    fn test_runtime_builder() {
        let builder = AgentRuntimeBuilder::new()
            .default_max_iterations(5)
            .default_model("test-model");

        assert_eq!(builder.config.default_max_iterations, 5);
        assert_eq!(builder.config.default_model, "test-model");
    }

    #[test]
    fn test_build_without_provider_fails() {
        assert!(AgentRuntime::builder().build().is_err());
    }

    #[tokio::test]
    async fn test_agents_share_provider() {
        let provider = Arc::new(ScriptedProvider::new(vec![
            text_response("one"),
            text_response("two"),
        ]));
        let runtime = AgentRuntime::builder()
            .provider(provider.clone())
            .default_max_iterations(3)
            .build()
            .unwrap();
        assert!(runtime.tools().is_empty());
        assert_eq!(runtime.executor_config().max_iterations, 3);

        let tool_agent = runtime.create_tool_agent_with_tools(
            runtime.executor_config(),
            "analyst",
            Arc::new(ToolRegistry::new()),
        );
        let simple = runtime.create_simple_agent(SimpleConfig::default(), "advisor");

        let mut context = Context::new();
        assert_eq!(tool_agent.process("a".into(), &mut context).await.unwrap(), "one");
        assert_eq!(simple.process("b".into(), &mut context).await.unwrap(), "two");
        assert_eq!(provider.requests.lock().unwrap().len(), 2);
    }
}
