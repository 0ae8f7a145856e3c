//! Web search tool backed by Serper

use agent_core::Result as AgentResult;
use agent_llm::tools::schema;
use agent_tools::Tool;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{Value, json};
use std::sync::Arc;
use tracing::info;

use crate::api::SerperClient;
use crate::config::MAX_SEARCH_RESULTS;

/// Name the models call the search by
pub const TOOL_NAME: &str = "web_search";

/// Google search through Serper
pub struct WebSearchTool {
    client: Arc<SerperClient>,
}

#[derive(Debug, Deserialize)]
struct SearchParams {
    query: String,
    #[serde(default)]
    num_results: Option<usize>,
}

impl WebSearchTool {
    /// Create the tool over a Serper client
    pub fn new(client: Arc<SerperClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Tool for WebSearchTool {
    async fn execute(&self, params: Value) -> AgentResult<Value> {
        let params: SearchParams = serde_json::from_value(params).map_err(|e| {
            agent_core::Error::ProcessingFailed(format!("Invalid parameters: {e}"))
        })?;

        let num = params
            .num_results
            .unwrap_or_else(|| self.client.default_results())
            .clamp(1, MAX_SEARCH_RESULTS);
        info!(query = %params.query, num, "Searching the web");

        let results = self.client.search(&params.query, num).await?;
        Ok(json!({ "query": params.query, "results": results }))
    }

    fn name(&self) -> &str {
        TOOL_NAME
    }

    fn description(&self) -> &str {
        "Search the internet with Google. Returns titles, links, snippets and dates \
         of the top results for the query."
    }

    fn input_schema(&self) -> Value {
        schema::object(
            json!({
                "query": schema::string("Search query"),
                "num_results": schema::integer("Number of results to return (default 10, max 20)"),
            }),
            &["query"],
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AdvisorConfig;

    fn tool() -> WebSearchTool {
        let client = SerperClient::new("test-key", &AdvisorConfig::default()).unwrap();
        WebSearchTool::new(Arc::new(client))
    }

    #[test]
    fn test_tool_metadata() {
        let tool = tool();
        assert_eq!(tool.name(), "web_search");
        assert!(!tool.description().is_empty());
        assert_eq!(tool.input_schema()["required"][0], "query");
    }

    #[tokio::test]
    async fn test_missing_query_is_rejected() {
        let err = tool().execute(json!({ "q": "IREN" })).await.unwrap_err();
        assert!(err.to_string().contains("Invalid parameters"));
    }

    #[tokio::test]
    async fn test_blank_query_fails_before_request() {
        let err = tool().execute(json!({ "query": " " })).await.unwrap_err();
        assert!(err.to_string().contains("empty search query"));
    }
}
