//! Core Agent trait definition

use crate::{Context, Result};
use async_trait::async_trait;

/// Core trait that all agents must implement
///
/// Input and output are plain text: prompts go in, report sections come out.
#[async_trait]
pub trait Agent: Send + Sync {
    /// Process input and return output
    async fn process(&self, input: String, context: &mut Context) -> Result<String>;

    /// Get the agent's name
    fn name(&self) -> &str;
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Echo;

    #[async_trait]
    impl Agent for Echo {
        async fn process(&self, input: String, context: &mut Context) -> Result<String> {
            context.push_stage_output("echo", "Echo", input.clone());
            Ok(input)
        }

        fn name(&self) -> &str {
            "echo"
        }
    }

    #[tokio::test]
    async fn test_agent_records_into_context() {
        let agent = Echo;
        let mut ctx = Context::new();
        let out = agent.process("hello".to_string(), &mut ctx).await.unwrap();

        assert_eq!(out, "hello");
        assert_eq!(agent.name(), "echo");
        assert_eq!(ctx.stage_outputs().len(), 1);
    }
}
