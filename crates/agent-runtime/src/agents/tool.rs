//! Tool agent implementation (wraps AgentExecutor)

use crate::executor::AgentExecutor;
use agent_core::{Agent, Context, Result};
use async_trait::async_trait;

/// An agent that uses the LLM loop with tool execution
///
/// # Example
///
/// ```no_run
/// use agent_runtime::{AgentRuntime, ExecutorConfig};
/// use agent_core::{Agent, Context};
/// use agent_llm::LLMProvider;
/// use std::sync::Arc;
///
/// # async fn example(provider: Arc<dyn LLMProvider>) -> agent_core::Result<()> {
/// let runtime = AgentRuntime::builder().provider(provider).build()?;
/// let agent = runtime.create_tool_agent(ExecutorConfig::default(), "financial_analyst");
///
/// let mut context = Context::new();
/// let response = agent.process("AAPL 재무 분석".to_string(), &mut context).await?;
/// # Ok(())
/// # }
/// ```
pub struct ToolAgent {
    executor: AgentExecutor,
    name: String,
}

impl ToolAgent {
    /// Create a new tool agent
    pub fn new(executor: AgentExecutor, name: String) -> Self {
        Self { executor, name }
    }

    /// Get a reference to the underlying executor
    pub fn executor(&self) -> &AgentExecutor {
        &self.executor
    }
}

#[async_trait]
impl Agent for ToolAgent {
    async fn process(&self, input: String, _context: &mut Context) -> Result<String> {
        self.executor.run(input).await
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::executor::AgentExecutorBuilder;
    use crate::executor::tests::{ScriptedProvider, text_response};
    use std::sync::Arc;

    #[tokio::test]
    async fn test_tool_agent_delegates_to_executor() {
        let provider = Arc::new(ScriptedProvider::new(vec![text_response("ok")]));
        let executor = AgentExecutorBuilder::new()
            .provider(provider)
            .max_iterations(3)
            .build()
            .unwrap();
        let agent = ToolAgent::new(executor, "risk_analyst".to_string());

        let mut context = Context::new();
        assert_eq!(agent.process("go".to_string(), &mut context).await.unwrap(), "ok");
        assert_eq!(agent.name(), "risk_analyst");
        assert_eq!(agent.executor().config().max_iterations, 3);
    }
}
