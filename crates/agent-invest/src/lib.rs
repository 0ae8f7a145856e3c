//! Investment advisor
//!
//! Collects financial metrics for a ticker and runs a four-stage analyst
//! crew (financial, market, risk, recommendation) over them.

pub mod agents;
pub mod api;
pub mod config;
pub mod error;
pub mod metrics;
pub mod prompts;
pub mod provider;
pub mod statement;
pub mod tools;

pub use agents::{AnalystAgent, AnalystRole, CrewOutput, InvestmentCrew, StageRecord};
pub use api::{SearchResult, SerperClient, YahooFinanceClient};
pub use config::{AdvisorConfig, AdvisorConfigBuilder};
pub use error::{AdvisorError, Result};
pub use metrics::{MetricsAggregator, MetricsReport};
pub use provider::{Frequency, MarketDataProvider, PricePoint};
pub use statement::{BalanceSheet, FinancialStatement, StatementTable};
