//! Configuration for market data, web search and the analyst crew

use crate::error::{AdvisorError, Result};
use agent_utils::optional_env;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Default Yahoo fundamentals-timeseries endpoint (symbol is appended)
pub const DEFAULT_TIMESERIES_URL: &str =
    "https://query2.finance.yahoo.com/ws/fundamentals-timeseries/v1/finance/timeseries";

/// Default Serper search endpoint
pub const DEFAULT_SERPER_URL: &str = "https://google.serper.dev/search";

/// Upper bound on search results per query
pub const MAX_SEARCH_RESULTS: usize = 20;

/// Model used by the three analysts
pub const DEFAULT_ANALYST_MODEL: &str = "gpt-4o-mini";

/// Model used by the investment advisor
pub const DEFAULT_ADVISOR_MODEL: &str = "o3-mini-2025-01-31";

/// Configuration for an advisor run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdvisorConfig {
    /// Yahoo fundamentals-timeseries endpoint
    pub timeseries_url: String,

    /// HTTP timeout for market data and search requests
    pub request_timeout: Duration,

    /// Earliest statement date requested from Yahoo
    pub statement_start: NaiveDate,

    /// Serper API key; the market analyst runs without search when unset
    pub serper_api_key: Option<String>,

    /// Serper search endpoint
    pub serper_url: String,

    /// Number of organic results requested per search
    pub search_results: usize,

    /// Model for the financial, market and risk analysts
    pub analyst_model: String,

    /// Model for the investment advisor
    pub advisor_model: String,

    /// Completion budget for analyst turns
    pub max_tokens: usize,

    /// Completion budget for the advisor, which spends tokens on reasoning
    pub advisor_max_tokens: usize,

    /// Sampling temperature for analysts; never sent to the advisor
    pub temperature: Option<f32>,

    /// Directory receiving `investment_advisor_<ticker>.md`
    pub output_dir: PathBuf,

    /// JSON run log path, `None` disables it
    pub run_log: Option<PathBuf>,
}

impl Default for AdvisorConfig {
    fn default() -> Self {
        Self {
            timeseries_url: DEFAULT_TIMESERIES_URL.to_string(),
            request_timeout: Duration::from_secs(30),
            statement_start: NaiveDate::from_ymd_opt(2016, 12, 31).unwrap_or_default(),
            serper_api_key: None,
            serper_url: DEFAULT_SERPER_URL.to_string(),
            search_results: 10,
            analyst_model: DEFAULT_ANALYST_MODEL.to_string(),
            advisor_model: DEFAULT_ADVISOR_MODEL.to_string(),
            max_tokens: 4096,
            advisor_max_tokens: 16_384,
            temperature: None,
            output_dir: PathBuf::from("outputs"),
            run_log: Some(PathBuf::from("logs/investment_advisor_run.json")),
        }
    }
}

impl AdvisorConfig {
    /// Create a new configuration builder
    pub fn builder() -> AdvisorConfigBuilder {
        AdvisorConfigBuilder::default()
    }

    /// Default configuration overlaid with `SERPER_API_KEY`, `ANALYST_MODEL`
    /// and `ADVISOR_MODEL`
    pub fn from_env() -> Result<Self> {
        Self::builder().with_env().build()
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.request_timeout.is_zero() {
            return Err(AdvisorError::Config(
                "request_timeout must be greater than 0".to_string(),
            ));
        }

        if !(1..=MAX_SEARCH_RESULTS).contains(&self.search_results) {
            return Err(AdvisorError::Config(format!(
                "search_results must be between 1 and {MAX_SEARCH_RESULTS}"
            )));
        }

        if self.analyst_model.trim().is_empty() || self.advisor_model.trim().is_empty() {
            return Err(AdvisorError::Config("model names must not be empty".to_string()));
        }

        if self.max_tokens == 0 || self.advisor_max_tokens == 0 {
            return Err(AdvisorError::Config(
                "token budgets must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }

    /// Path of the Markdown report for a ticker
    pub fn report_path(&self, ticker: &str) -> PathBuf {
        self.output_dir.join(format!("investment_advisor_{ticker}.md"))
    }
}

/// Builder for AdvisorConfig
#[derive(Debug, Default)]
pub struct AdvisorConfigBuilder {
    timeseries_url: Option<String>,
    request_timeout: Option<Duration>,
    statement_start: Option<NaiveDate>,
    serper_api_key: Option<String>,
    serper_url: Option<String>,
    search_results: Option<usize>,
    analyst_model: Option<String>,
    advisor_model: Option<String>,
    max_tokens: Option<usize>,
    advisor_max_tokens: Option<usize>,
    temperature: Option<f32>,
    output_dir: Option<PathBuf>,
    run_log: Option<Option<PathBuf>>,
}

impl AdvisorConfigBuilder {
    /// Set the Yahoo timeseries endpoint
    pub fn timeseries_url(mut self, url: impl Into<String>) -> Self {
        self.timeseries_url = Some(url.into());
        self
    }

    /// Set request timeout
    pub fn request_timeout(mut self, duration: Duration) -> Self {
        self.request_timeout = Some(duration);
        self
    }

    /// Set the earliest statement date
    pub fn statement_start(mut self, date: NaiveDate) -> Self {
        self.statement_start = Some(date);
        self
    }

    /// Set Serper API key
    pub fn serper_api_key(mut self, key: impl Into<String>) -> Self {
        self.serper_api_key = Some(key.into());
        self
    }

    /// Set the Serper endpoint
    pub fn serper_url(mut self, url: impl Into<String>) -> Self {
        self.serper_url = Some(url.into());
        self
    }

    /// Set the number of search results
    pub fn search_results(mut self, count: usize) -> Self {
        self.search_results = Some(count);
        self
    }

    /// Set the analyst model
    pub fn analyst_model(mut self, model: impl Into<String>) -> Self {
        self.analyst_model = Some(model.into());
        self
    }

    /// Set the advisor model
    pub fn advisor_model(mut self, model: impl Into<String>) -> Self {
        self.advisor_model = Some(model.into());
        self
    }

    /// Set the analyst token budget
    pub fn max_tokens(mut self, max_tokens: usize) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    /// Set the advisor token budget
    pub fn advisor_max_tokens(mut self, max_tokens: usize) -> Self {
        self.advisor_max_tokens = Some(max_tokens);
        self
    }

    /// Set the analyst temperature
    pub fn temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Set the report output directory
    pub fn output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = Some(dir.into());
        self
    }

    /// Set or disable the run log
    pub fn run_log(mut self, path: Option<PathBuf>) -> Self {
        self.run_log = Some(path);
        self
    }

    /// Fill unset keys and models from the environment
    pub fn with_env(mut self) -> Self {
        if self.serper_api_key.is_none() {
            self.serper_api_key = optional_env("SERPER_API_KEY");
        }
        if self.analyst_model.is_none() {
            self.analyst_model = optional_env("ANALYST_MODEL");
        }
        if self.advisor_model.is_none() {
            self.advisor_model = optional_env("ADVISOR_MODEL");
        }
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<AdvisorConfig> {
        let defaults = AdvisorConfig::default();

        let config = AdvisorConfig {
            timeseries_url: self.timeseries_url.unwrap_or(defaults.timeseries_url),
            request_timeout: self.request_timeout.unwrap_or(defaults.request_timeout),
            statement_start: self.statement_start.unwrap_or(defaults.statement_start),
            serper_api_key: self.serper_api_key,
            serper_url: self.serper_url.unwrap_or(defaults.serper_url),
            search_results: self.search_results.unwrap_or(defaults.search_results),
            analyst_model: self.analyst_model.unwrap_or(defaults.analyst_model),
            advisor_model: self.advisor_model.unwrap_or(defaults.advisor_model),
            max_tokens: self.max_tokens.unwrap_or(defaults.max_tokens),
            advisor_max_tokens: self.advisor_max_tokens.unwrap_or(defaults.advisor_max_tokens),
            temperature: self.temperature.or(defaults.temperature),
            output_dir: self.output_dir.unwrap_or(defaults.output_dir),
            run_log: self.run_log.unwrap_or(defaults.run_log),
        };

        config.validate()?;
        Ok(config)
    }
}
