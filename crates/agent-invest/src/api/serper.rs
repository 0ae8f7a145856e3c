//! Serper web search client

use crate::config::AdvisorConfig;
use crate::error::{AdvisorError, Result};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{debug, instrument};

const PROVIDER: &str = "Serper";

/// One organic search result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    /// Page title
    pub title: String,
    /// Result URL
    pub link: String,
    /// Text snippet
    #[serde(default)]
    pub snippet: String,
    /// Publication date, when Google shows one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    organic: Vec<SearchResult>,
}

/// Client for the Serper Google search API
pub struct SerperClient {
    http: Client,
    api_key: String,
    url: String,
    default_results: usize,
}

impl SerperClient {
    /// Create a client with an explicit key
    pub fn new(api_key: impl Into<String>, config: &AdvisorConfig) -> Result<Self> {
        let http = Client::builder().timeout(config.request_timeout).build()?;

        Ok(Self {
            http,
            api_key: api_key.into(),
            url: config.serper_url.clone(),
            default_results: config.search_results,
        })
    }

    /// Create a client when the configuration carries a key
    pub fn from_config(config: &AdvisorConfig) -> Result<Option<Self>> {
        config
            .serper_api_key
            .as_deref()
            .map(|key| Self::new(key, config))
            .transpose()
    }

    /// Result count used when the caller does not ask for one
    pub fn default_results(&self) -> usize {
        self.default_results
    }

    /// Run a search and return its organic results
    #[instrument(skip(self))]
    pub async fn search(&self, query: &str, num_results: usize) -> Result<Vec<SearchResult>> {
        if query.trim().is_empty() {
            return Err(AdvisorError::provider(PROVIDER, "empty search query"));
        }

        let response = self
            .http
            .post(&self.url)
            .header("X-API-KEY", &self.api_key)
            .json(&json!({ "q": query, "num": num_results }))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await?;
            return Err(AdvisorError::provider(
                PROVIDER,
                format!("HTTP {status}: {}", body.chars().take(200).collect::<String>()),
            ));
        }

        let parsed: SearchResponse = serde_json::from_str(&response.text().await?)?;
        debug!(results = parsed.organic.len(), "Search completed");
        Ok(parsed.organic)
    }
}
