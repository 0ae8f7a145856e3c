//! Metrics aggregator: statements in, formatted report out

use super::calc::{debt_ratio, growth, margin};
use super::format::{NOT_AVAILABLE, format_eps, format_number, format_percent};
use super::report::{
    AnnualBlock, MetricsReport, PriceBlock, PriceValue, QuarterlyBlock, StatementSummary,
};
use crate::error::{AdvisorError, Result};
use crate::provider::{Frequency, MarketDataProvider, PricePoint};
use crate::statement::{BalanceSheet, FinancialStatement, StatementTable, line_items};
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// Builds a `MetricsReport` from a market-data provider
///
/// Missing cells, short histories and absent prices degrade to `"N/A"` in the
/// report. Only provider failures and an empty ticker are errors.
#[derive(Clone)]
pub struct MetricsAggregator {
    provider: Arc<dyn MarketDataProvider>,
}

impl MetricsAggregator {
    /// Create an aggregator over a provider
    pub fn new(provider: Arc<dyn MarketDataProvider>) -> Self {
        Self { provider }
    }

    /// Fetch price and statements for `ticker` and derive the report
    #[instrument(skip(self))]
    pub async fn analyze(&self, ticker: &str) -> Result<MetricsReport> {
        let ticker = normalize_ticker(ticker)?;
        info!(%ticker, "Collecting financial data");

        let price = self.provider.latest_price(&ticker).await?;
        let annual = self.provider.financials(&ticker, Frequency::Annual).await?;
        let quarterly = self
            .provider
            .financials(&ticker, Frequency::Quarterly)
            .await?;
        let balance = self.provider.balance_sheet(&ticker).await?;

        info!(
            %ticker,
            has_price = price.is_some(),
            annual_periods = annual.period_count(),
            quarterly_periods = quarterly.period_count(),
            balance_periods = balance.period_count(),
            "Financial data collected"
        );

        Ok(build_report(price, &annual, &quarterly, &balance))
    }
}

/// Trim and upper-case a ticker
///
/// Accepts ASCII letters, digits and `. ^ = -` (`BRK-B`, `^GSPC`, `EURUSD=X`,
/// `005930.KS`). Anything else, path separators included, is rejected.
pub fn normalize_ticker(raw: &str) -> Result<String> {
    let ticker = raw.trim();
    let valid = |c: char| c.is_ascii_alphanumeric() || matches!(c, '.' | '^' | '=' | '-');
    if ticker.is_empty() || !ticker.chars().all(valid) {
        return Err(AdvisorError::InvalidTicker(raw.to_string()));
    }
    Ok(ticker.to_uppercase())
}

/// Derive the report from already-fetched data
pub fn build_report(
    price: Option<PricePoint>,
    annual: &FinancialStatement,
    quarterly: &FinancialStatement,
    balance: &BalanceSheet,
) -> MetricsReport {
    MetricsReport {
        current_price: price_block(price),
        annual: annual_block(annual, balance),
        quarterly: quarterly_block(quarterly),
        annual_summary: StatementSummary::from_table(annual),
        quarterly_summary: StatementSummary::from_table(quarterly),
    }
}

fn price_block(price: Option<PricePoint>) -> PriceBlock {
    match price {
        Some(point) => PriceBlock {
            price: PriceValue::Price(point.price),
            as_of: point.timestamp.format("%Y-%m-%d %H:%M:%S").to_string(),
        },
        None => PriceBlock {
            price: PriceValue::not_available(),
            as_of: NOT_AVAILABLE.to_string(),
        },
    }
}

/// Current-period cell; a missing cell is logged and read as `None`
fn current(table: &StatementTable, item: &str) -> Option<f64> {
    match table.require(item, 0) {
        Ok(value) => Some(value),
        Err(e) => {
            debug!(statement = table.name(), error = %e, "Value unavailable");
            None
        }
    }
}

fn period_growth(table: &StatementTable, item: &str) -> Option<f64> {
    match table.recent_pair() {
        Ok((cur, prev)) => growth(table.value(item, cur), table.value(item, prev)),
        Err(e) => {
            debug!(item, error = %e, "Growth unavailable");
            None
        }
    }
}

fn annual_block(annual: &FinancialStatement, balance: &BalanceSheet) -> AnnualBlock {
    let revenue = current(annual, line_items::TOTAL_REVENUE);
    let gross_profit = current(annual, line_items::GROSS_PROFIT);
    let operating_income = current(annual, line_items::OPERATING_INCOME);
    let net_income = current(annual, line_items::NET_INCOME);

    let total_assets = current(balance, line_items::TOTAL_ASSETS);
    let total_liabilities = current(balance, line_items::TOTAL_LIABILITIES);

    AnnualBlock {
        revenue: format_number(revenue),
        cost_of_revenue: format_number(current(annual, line_items::COST_OF_REVENUE)),
        gross_profit: format_number(gross_profit),
        operating_income: format_number(operating_income),
        net_income: format_number(net_income),
        ebitda: format_number(current(annual, line_items::EBITDA)),
        eps: format_eps(current(annual, line_items::DILUTED_EPS)),
        gross_margin: format_percent(margin(gross_profit, revenue)),
        operating_margin: format_percent(margin(operating_income, revenue)),
        net_margin: format_percent(margin(net_income, revenue)),
        revenue_growth: format_percent(period_growth(annual, line_items::TOTAL_REVENUE)),
        net_income_growth: format_percent(period_growth(annual, line_items::NET_INCOME)),
        debt_ratio: format_percent(debt_ratio(total_liabilities, total_assets)),
    }
}

fn quarterly_block(quarterly: &FinancialStatement) -> QuarterlyBlock {
    QuarterlyBlock {
        revenue: format_number(current(quarterly, line_items::TOTAL_REVENUE)),
        net_income: format_number(current(quarterly, line_items::NET_INCOME)),
        revenue_growth: format_percent(period_growth(quarterly, line_items::TOTAL_REVENUE)),
        net_income_growth: format_percent(period_growth(quarterly, line_items::NET_INCOME)),
    }
}
