//! Tool trait definition

use agent_core::Result;
use async_trait::async_trait;
use serde_json::Value;

/// Trait for tools that agents can execute
///
/// Each tool provides a name, a description the model reads to decide when to
/// call it, and a JSON schema for its input.
#[async_trait]
pub trait Tool: Send + Sync {
    /// Execute the tool with parameters matching `input_schema`
    async fn execute(&self, params: Value) -> Result<Value>;

    /// Unique name within a `ToolRegistry`
    fn name(&self) -> &str;

    /// Description shown to the model
    fn description(&self) -> &str;

    /// Input schema (JSON Schema)
    ///
    /// ```
    /// use serde_json::json;
    ///
    /// let schema = json!({
    ///     "type": "object",
    ///     "properties": { "ticker": { "type": "string" } },
    ///     "required": ["ticker"]
    /// });
    /// assert_eq!(schema["required"][0], "ticker");
    /// ```
    fn input_schema(&self) -> Value;
}
