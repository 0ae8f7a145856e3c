//! Financial statement tables keyed by line item and reporting period

use crate::error::{AdvisorError, Result};
use chrono::NaiveDate;
use std::collections::BTreeMap;

/// Line-item row keys used by the aggregator
pub mod line_items {
    /// Income statement: total revenue
    pub const TOTAL_REVENUE: &str = "TotalRevenue";
    /// Income statement: cost of revenue
    pub const COST_OF_REVENUE: &str = "CostOfRevenue";
    /// Income statement: gross profit
    pub const GROSS_PROFIT: &str = "GrossProfit";
    /// Income statement: operating income
    pub const OPERATING_INCOME: &str = "OperatingIncome";
    /// Income statement: net income
    pub const NET_INCOME: &str = "NetIncome";
    /// Income statement: EBITDA
    pub const EBITDA: &str = "EBITDA";
    /// Income statement: diluted EPS
    pub const DILUTED_EPS: &str = "DilutedEPS";
    /// Balance sheet: total assets
    pub const TOTAL_ASSETS: &str = "TotalAssets";
    /// Balance sheet: total liabilities
    pub const TOTAL_LIABILITIES: &str = "TotalLiabilitiesNetMinorityInterest";

    /// Rows requested for income statements
    pub const INCOME_STATEMENT: &[&str] = &[
        TOTAL_REVENUE,
        COST_OF_REVENUE,
        GROSS_PROFIT,
        OPERATING_INCOME,
        NET_INCOME,
        EBITDA,
        DILUTED_EPS,
    ];

    /// Rows requested for balance sheets
    pub const BALANCE_SHEET: &[&str] = &[TOTAL_ASSETS, TOTAL_LIABILITIES];
}

/// A table of numeric cells keyed by (line item, period end date)
///
/// Periods are kept most-recent-first; every row holds one cell per period.
/// Missing and NaN cells read back as `None`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StatementTable {
    name: String,
    periods: Vec<NaiveDate>,
    rows: BTreeMap<String, Vec<Option<f64>>>,
}

/// Annual or quarterly income statement
pub type FinancialStatement = StatementTable;

/// Balance sheet
pub type BalanceSheet = StatementTable;

impl StatementTable {
    /// Create an empty table
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Build a table from `(item, period, value)` cells in any order
    ///
    /// ```
    /// use agent_invest::statement::StatementTable;
    /// use chrono::NaiveDate;
    ///
    /// let d = |y| NaiveDate::from_ymd_opt(y, 12, 31).unwrap();
    /// let table = StatementTable::from_cells(
    ///     "annual financials",
    ///     [("TotalRevenue", d(2023), Some(90.0)), ("TotalRevenue", d(2024), Some(100.0))],
    /// );
    /// assert_eq!(table.periods()[0], d(2024));
    /// assert_eq!(table.value("TotalRevenue", 1), Some(90.0));
    /// ```
    pub fn from_cells<I, S>(name: impl Into<String>, cells: I) -> Self
    where
        I: IntoIterator<Item = (S, NaiveDate, Option<f64>)>,
        S: Into<String>,
    {
        let cells: Vec<(String, NaiveDate, Option<f64>)> = cells
            .into_iter()
            .map(|(item, period, value)| (item.into(), period, value))
            .collect();

        let mut periods: Vec<NaiveDate> = cells.iter().map(|(_, period, _)| *period).collect();
        periods.sort_unstable_by(|a, b| b.cmp(a));
        periods.dedup();

        let mut rows: BTreeMap<String, Vec<Option<f64>>> = BTreeMap::new();
        for (item, period, value) in cells {
            let row = rows
                .entry(item)
                .or_insert_with(|| vec![None; periods.len()]);
            if let Ok(index) = periods.binary_search_by(|p| period.cmp(p)) {
                row[index] = value;
            }
        }

        Self {
            name: name.into(),
            periods,
            rows,
        }
    }

    /// Table name used in error messages
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Period end dates, most recent first
    pub fn periods(&self) -> &[NaiveDate] {
        &self.periods
    }

    /// Number of period columns
    pub fn period_count(&self) -> usize {
        self.periods.len()
    }

    /// True when the table has no period columns
    pub fn is_empty(&self) -> bool {
        self.periods.is_empty()
    }

    /// Whether the table has a row for `item`
    pub fn has_item(&self, item: &str) -> bool {
        self.rows.contains_key(item)
    }

    /// Cell value, `None` when the row, the column or the number is missing
    pub fn value(&self, item: &str, period: usize) -> Option<f64> {
        self.rows
            .get(item)
            .and_then(|row| row.get(period).copied().flatten())
            .filter(|v| !v.is_nan())
    }

    /// Cell value, or `MissingData` naming the item and period
    pub fn require(&self, item: &str, period: usize) -> Result<f64> {
        self.value(item, period).ok_or_else(|| AdvisorError::MissingData {
            item: item.to_string(),
            period: self
                .periods
                .get(period)
                .map_or_else(|| "latest".to_string(), ToString::to_string),
        })
    }

    /// Indices of the current and previous period, if both exist
    pub fn recent_pair(&self) -> Result<(usize, usize)> {
        if self.periods.len() < 2 {
            return Err(AdvisorError::InsufficientHistory {
                statement: self.name.clone(),
                available: self.periods.len(),
            });
        }
        Ok((0, 1))
    }
}
