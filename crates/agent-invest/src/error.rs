//! Error types for the metrics aggregator and the analyst crew

use thiserror::Error;

/// Investment advisor errors
#[derive(Debug, Error)]
pub enum AdvisorError {
    /// A line item or one of its cells is absent
    #[error("Missing data: {item} for {period}")]
    MissingData {
        /// Line item name (e.g. "TotalRevenue")
        item: String,
        /// Period label, or "latest" when no period was available
        period: String,
    },

    /// Fewer than two periods, so nothing to compare against
    #[error("Insufficient history in {statement}: {available} period(s) available, 2 required")]
    InsufficientHistory {
        /// Statement name (e.g. "annual financials")
        statement: String,
        /// Number of periods actually present
        available: usize,
    },

    /// The data provider rejected or could not serve the request
    #[error("{provider} unavailable: {reason}")]
    ProviderUnavailable {
        /// Provider name
        provider: String,
        /// Reason reported by the provider or the client
        reason: String,
    },

    /// Network or HTTP error
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// JSON parsing error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Empty or malformed ticker
    #[error("Invalid ticker: {0:?}")]
    InvalidTicker(String),

    /// Missing or invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// A crew stage failed
    #[error("Stage {stage} failed: {reason}")]
    Stage {
        /// Task name of the failing stage
        stage: String,
        /// Underlying failure
        reason: String,
    },

    /// Error raised by the agent layer
    #[error("Agent error: {0}")]
    Agent(String),

    /// Prompt template failed to compile or render
    #[error("Prompt template error: {0}")]
    Prompt(#[from] minijinja::Error),

    /// Writing a report or run log failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl AdvisorError {
    pub(crate) fn provider(provider: impl Into<String>, reason: impl ToString) -> Self {
        Self::ProviderUnavailable {
            provider: provider.into(),
            reason: reason.to_string(),
        }
    }
}

/// Result type alias for advisor operations
pub type Result<T> = std::result::Result<T, AdvisorError>;

/// Convert AdvisorError to agent_core::Error
impl From<AdvisorError> for agent_core::Error {
    fn from(err: AdvisorError) -> Self {
        agent_core::Error::ProcessingFailed(err.to_string())
    }
}

/// Convert agent_core::Error to AdvisorError
impl From<agent_core::Error> for AdvisorError {
    fn from(err: agent_core::Error) -> Self {
        AdvisorError::Agent(err.to_string())
    }
}
