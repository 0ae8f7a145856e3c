//! Tool wrapping the metrics aggregator

use agent_core::Result as AgentResult;
use agent_llm::tools::schema;
use agent_tools::Tool;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{Value, json};
use std::sync::Arc;

use crate::metrics::MetricsAggregator;

/// Name the models call the aggregator by
pub const TOOL_NAME: &str = "comprehensive_stock_analysis";

/// Comprehensive financial analysis for one ticker
pub struct FinancialAnalysisTool {
    aggregator: Arc<MetricsAggregator>,
}

#[derive(Debug, Deserialize)]
struct AnalysisParams {
    ticker: String,
}

impl FinancialAnalysisTool {
    /// Create the tool over a shared aggregator
    pub fn new(aggregator: Arc<MetricsAggregator>) -> Self {
        Self { aggregator }
    }
}

#[async_trait]
impl Tool for FinancialAnalysisTool {
    async fn execute(&self, params: Value) -> AgentResult<Value> {
        let params: AnalysisParams = serde_json::from_value(params).map_err(|e| {
            agent_core::Error::ProcessingFailed(format!("Invalid parameters: {e}"))
        })?;

        let report = self.aggregator.analyze(&params.ticker).await?;
        serde_json::to_value(&report)
            .map_err(|e| agent_core::Error::ProcessingFailed(e.to_string()))
    }

    fn name(&self) -> &str {
        TOOL_NAME
    }

    fn description(&self) -> &str {
        "주어진 주식 티커에 대한 종합 재무 분석"
    }

    fn input_schema(&self) -> Value {
        schema::object(
            json!({ "ticker": schema::string("Stock ticker symbol (e.g. AAPL)") }),
            &["ticker"],
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::{Frequency, MockMarketDataProvider};
    use crate::statement::{StatementTable, line_items};
    use chrono::NaiveDate;

    fn tool_with_mock() -> FinancialAnalysisTool {
        let period = NaiveDate::from_ymd_opt(2024, 12, 31).unwrap();
        let mut mock = MockMarketDataProvider::new();
        mock.expect_latest_price().returning(|_| Ok(None));
        mock.expect_financials().returning(move |_, frequency| {
            Ok(match frequency {
                Frequency::Annual => StatementTable::from_cells(
                    "annual financials",
                    [(line_items::TOTAL_REVENUE, period, Some(1_500_000.0))],
                ),
                Frequency::Quarterly => StatementTable::new("quarterly financials"),
            })
        });
        mock.expect_balance_sheet()
            .returning(|_| Ok(StatementTable::new("balance sheet")));

        FinancialAnalysisTool::new(Arc::new(MetricsAggregator::new(Arc::new(mock))))
    }

    #[test]
    fn test_tool_metadata() {
        let tool = tool_with_mock();
        assert_eq!(tool.name(), "comprehensive_stock_analysis");
        assert_eq!(tool.description(), "주어진 주식 티커에 대한 종합 재무 분석");
        assert_eq!(tool.input_schema()["required"][0], "ticker");
    }

    #[tokio::test]
    async fn test_execute_returns_korean_report() {
        let tool = tool_with_mock();
        let value = tool.execute(json!({ "ticker": "msft" })).await.unwrap();
        assert_eq!(value["연간 데이터"]["매출"], "1,500,000");
        assert_eq!(value["현재 주가"]["가격"], "N/A");
        assert!(value["연간 재무제표 요약"]["2024-12-31"].is_object());
    }

    #[tokio::test]
    async fn test_invalid_parameters() {
        let tool = tool_with_mock();
        let err = tool.execute(json!({ "symbol": "MSFT" })).await.unwrap_err();
        assert!(err.to_string().contains("Invalid parameters"));
    }
}
