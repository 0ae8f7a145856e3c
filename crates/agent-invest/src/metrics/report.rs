//! Report structure serialized with the Korean labels models read

use super::format::{NOT_AVAILABLE, format_eps, format_number};
use crate::statement::{StatementTable, line_items};
use serde::ser::{Serialize, SerializeMap, Serializer};

/// Complete metrics report for one ticker
///
/// Serializes to a mapping with the same five top-level keys whatever data
/// was available.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct MetricsReport {
    /// Latest price
    #[serde(rename = "현재 주가")]
    pub current_price: PriceBlock,

    /// Current fiscal year figures
    #[serde(rename = "연간 데이터")]
    pub annual: AnnualBlock,

    /// Current fiscal quarter figures
    #[serde(rename = "분기 데이터")]
    pub quarterly: QuarterlyBlock,

    /// Every annual period
    #[serde(rename = "연간 재무제표 요약")]
    pub annual_summary: StatementSummary,

    /// Every quarterly period
    #[serde(rename = "분기 재무제표 요약")]
    pub quarterly_summary: StatementSummary,
}

/// Price as a raw number, or the sentinel string
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
#[serde(untagged)]
pub enum PriceValue {
    /// Latest close
    Price(f64),
    /// No price history
    NotAvailable(&'static str),
}

impl PriceValue {
    /// The `"N/A"` price
    pub fn not_available() -> Self {
        Self::NotAvailable(NOT_AVAILABLE)
    }
}

/// `현재 주가` block
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct PriceBlock {
    /// Latest close
    #[serde(rename = "가격")]
    pub price: PriceValue,

    /// Timestamp of the close, `%Y-%m-%d %H:%M:%S`
    #[serde(rename = "기준 시간")]
    pub as_of: String,
}

/// `연간 데이터` block
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct AnnualBlock {
    #[serde(rename = "매출")]
    pub revenue: String,
    #[serde(rename = "매출원가")]
    pub cost_of_revenue: String,
    #[serde(rename = "매출총이익")]
    pub gross_profit: String,
    #[serde(rename = "영업이익")]
    pub operating_income: String,
    #[serde(rename = "순이익")]
    pub net_income: String,
    #[serde(rename = "EBITDA")]
    pub ebitda: String,
    #[serde(rename = "EPS")]
    pub eps: String,
    #[serde(rename = "매출총이익률")]
    pub gross_margin: String,
    #[serde(rename = "영업이익률")]
    pub operating_margin: String,
    #[serde(rename = "순이익률")]
    pub net_margin: String,
    #[serde(rename = "매출 성장률")]
    pub revenue_growth: String,
    #[serde(rename = "순이익 성장률")]
    pub net_income_growth: String,
    #[serde(rename = "부채비율")]
    pub debt_ratio: String,
}

/// `분기 데이터` block
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct QuarterlyBlock {
    #[serde(rename = "매출")]
    pub revenue: String,
    #[serde(rename = "순이익")]
    pub net_income: String,
    #[serde(rename = "매출 성장률(QoQ)")]
    pub revenue_growth: String,
    #[serde(rename = "순이익 성장률(QoQ)")]
    pub net_income_growth: String,
}

/// Key figures for one reporting period
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct PeriodSummary {
    #[serde(rename = "총수익")]
    pub total_revenue: String,
    #[serde(rename = "영업이익")]
    pub operating_income: String,
    #[serde(rename = "순이익")]
    pub net_income: String,
    #[serde(rename = "EBITDA")]
    pub ebitda: String,
    #[serde(rename = "EPS")]
    pub eps: String,
}

/// Period label to summary, in statement order (most recent first)
///
/// Serialized as a JSON object whose key order follows the statement.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StatementSummary {
    entries: Vec<(String, PeriodSummary)>,
}

impl StatementSummary {
    /// One entry per period column of `table`
    pub fn from_table(table: &StatementTable) -> Self {
        let entries = table
            .periods()
            .iter()
            .enumerate()
            .map(|(i, period)| {
                let summary = PeriodSummary {
                    total_revenue: format_number(table.value(line_items::TOTAL_REVENUE, i)),
                    operating_income: format_number(table.value(line_items::OPERATING_INCOME, i)),
                    net_income: format_number(table.value(line_items::NET_INCOME, i)),
                    ebitda: format_number(table.value(line_items::EBITDA, i)),
                    eps: format_eps(table.value(line_items::DILUTED_EPS, i)),
                };
                (period.format("%Y-%m-%d").to_string(), summary)
            })
            .collect();

        Self { entries }
    }

    /// Entries in statement order
    pub fn entries(&self) -> &[(String, PeriodSummary)] {
        &self.entries
    }

    /// Summary for a `YYYY-MM-DD` period label
    pub fn get(&self, period: &str) -> Option<&PeriodSummary> {
        self.entries
            .iter()
            .find(|(label, _)| label == period)
            .map(|(_, summary)| summary)
    }

    /// Number of periods
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when the statement had no periods
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for StatementSummary {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (period, summary) in &self.entries {
            map.serialize_entry(period, summary)?;
        }
        map.end()
    }
}
