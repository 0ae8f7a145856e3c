//! Execution context for agents
//!
//! The `Context` struct is a key-value store carried through a pipeline run.
//! Besides free-form JSON values it keeps the ordered outputs of completed
//! stages, which later stages read as background material.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Well-known context keys
pub mod keys {
    /// Ticker symbol under analysis
    pub const TICKER: &str = "ticker";
    /// Report date, already formatted for prompts
    pub const REPORT_DATE: &str = "report_date";
}

/// Output of one completed pipeline stage
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageOutput {
    /// Task name (e.g. "financial_analysis")
    pub name: String,
    /// Role of the agent that produced it
    pub role: String,
    /// Raw text returned by the model
    pub output: String,
}

/// Context passed to agents during execution
///
/// # Example
///
/// ```
/// use agent_core::Context;
///
/// let ctx = Context::new()
///     .with_ticker("AAPL")
///     .with_report_date("2025년 01월 10일");
///
/// assert_eq!(ctx.ticker(), Some("AAPL"));
/// assert_eq!(ctx.report_date(), Some("2025년 01월 10일"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct Context {
    data: HashMap<String, serde_json::Value>,
    stages: Vec<StageOutput>,
}

impl Context {
    /// Create a new empty context
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the ticker under analysis
    pub fn with_ticker(mut self, ticker: impl Into<String>) -> Self {
        self.insert(keys::TICKER, serde_json::json!(ticker.into()));
        self
    }

    /// Set the report date string
    pub fn with_report_date(mut self, date: impl Into<String>) -> Self {
        self.insert(keys::REPORT_DATE, serde_json::json!(date.into()));
        self
    }

    /// Ticker under analysis
    pub fn ticker(&self) -> Option<&str> {
        self.get(keys::TICKER).and_then(|v| v.as_str())
    }

    /// Report date string
    pub fn report_date(&self) -> Option<&str> {
        self.get(keys::REPORT_DATE).and_then(|v| v.as_str())
    }

    /// Insert a value into the context
    pub fn insert(&mut self, key: impl Into<String>, value: serde_json::Value) {
        self.data.insert(key.into(), value);
    }

    /// Get a value from the context
    pub fn get(&self, key: &str) -> Option<&serde_json::Value> {
        self.data.get(key)
    }

    /// Check if a key exists in the context
    pub fn contains_key(&self, key: &str) -> bool {
        self.data.contains_key(key)
    }

    /// Remove a value from the context
    pub fn remove(&mut self, key: &str) -> Option<serde_json::Value> {
        self.data.remove(key)
    }

    /// Record the output of a finished stage
    pub fn push_stage_output(
        &mut self,
        name: impl Into<String>,
        role: impl Into<String>,
        output: impl Into<String>,
    ) {
        self.stages.push(StageOutput {
            name: name.into(),
            role: role.into(),
            output: output.into(),
        });
    }

    /// Outputs of all finished stages, in completion order
    pub fn stage_outputs(&self) -> &[StageOutput] {
        &self.stages
    }

    /// Number of key-value entries
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// True when neither values nor stage outputs are present
    pub fn is_empty(&self) -> bool {
        self.data.is_empty() && self.stages.is_empty()
    }
}
