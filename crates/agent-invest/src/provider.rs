//! Market-data provider abstraction

use crate::error::Result;
use crate::statement::{BalanceSheet, FinancialStatement};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Reporting frequency of an income statement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    /// Fiscal years
    Annual,
    /// Fiscal quarters
    Quarterly,
}

impl Frequency {
    /// Prefix Yahoo uses for timeseries types (`annualTotalRevenue`)
    pub fn prefix(self) -> &'static str {
        match self {
            Self::Annual => "annual",
            Self::Quarterly => "quarterly",
        }
    }

    /// Statement name used in logs and errors
    pub fn statement_name(self) -> &'static str {
        match self {
            Self::Annual => "annual financials",
            Self::Quarterly => "quarterly financials",
        }
    }
}

/// Latest traded price and when it was observed
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    /// Close of the latest bar
    pub price: f64,
    /// Bar timestamp
    pub timestamp: DateTime<Utc>,
}

/// Source of prices and financial statements
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    /// Latest intraday price, `None` when the provider has no price history
    async fn latest_price(&self, ticker: &str) -> Result<Option<PricePoint>>;

    /// Income statement at the given frequency, periods most recent first
    async fn financials(&self, ticker: &str, frequency: Frequency) -> Result<FinancialStatement>;

    /// Annual balance sheet, periods most recent first
    async fn balance_sheet(&self, ticker: &str) -> Result<BalanceSheet>;
}
