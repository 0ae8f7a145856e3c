//! Error types for LLM operations

use thiserror::Error;

/// Result type for LLM operations
pub type Result<T> = std::result::Result<T, LLMError>;

/// Failures talking to a completion endpoint
///
/// HTTP statuses map onto the first five variants; everything the provider
/// could not parse ends up in `UnexpectedResponse`.
#[derive(Error, Debug)]
pub enum LLMError {
    /// Non-success status without a more specific mapping
    #[error("completion request failed: {0}")]
    RequestFailed(String),

    /// HTTP 401
    #[error("authentication failed, check OPENAI_API_KEY")]
    AuthenticationFailed,

    /// HTTP 429
    #[error("rate limit exceeded: {0}")]
    RateLimitExceeded(String),

    /// HTTP 400
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// HTTP 404
    #[error("model not found: {0}")]
    ModelNotFound(String),

    #[error("serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    /// Transport failure or timeout
    #[cfg(feature = "openai")]
    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Body had no choices or an unreadable shape
    #[error("unexpected response format: {0}")]
    UnexpectedResponse(String),

    /// Missing API key or endpoint
    #[error("provider configuration error: {0}")]
    ConfigurationError(String),
}
