//! Yahoo Finance client
//!
//! Prices come from the chart API through `yahoo_finance_api`; statements come
//! from the fundamentals-timeseries endpoint, which the crate does not cover.

use crate::config::AdvisorConfig;
use crate::error::{AdvisorError, Result};
use crate::provider::{Frequency, MarketDataProvider, PricePoint};
use crate::statement::{BalanceSheet, FinancialStatement, StatementTable, line_items};
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use reqwest::Client;
use serde_json::Value;
use tracing::{debug, instrument, warn};
use yahoo_finance_api as yahoo;

const PROVIDER: &str = "Yahoo Finance";
const USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 \
    (KHTML, like Gecko) Chrome/124.0 Safari/537.36";

/// Yahoo Finance client
pub struct YahooFinanceClient {
    http: Client,
    timeseries_url: String,
    statement_start: NaiveDate,
}

impl YahooFinanceClient {
    /// Create a client from the advisor configuration
    pub fn new(config: &AdvisorConfig) -> Result<Self> {
        let http = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(config.request_timeout)
            .build()?;

        Ok(Self {
            http,
            timeseries_url: config.timeseries_url.trim_end_matches('/').to_string(),
            statement_start: config.statement_start,
        })
    }

    /// Fetch `{prefix}{item}` series for `items` and assemble a table
    async fn fetch_timeseries(
        &self,
        ticker: &str,
        prefix: &str,
        items: &[&str],
        statement: &str,
    ) -> Result<StatementTable> {
        let types = items
            .iter()
            .map(|item| format!("{prefix}{item}"))
            .collect::<Vec<_>>()
            .join(",");
        let period1 = self
            .statement_start
            .and_hms_opt(0, 0, 0)
            .map_or(0, |dt| dt.and_utc().timestamp());
        let period2 = Utc::now().timestamp();

        let url = format!("{}/{ticker}", self.timeseries_url);
        debug!(%url, %types, "Requesting fundamentals timeseries");

        let response = self
            .http
            .get(&url)
            .query(&[
                ("symbol", ticker.to_string()),
                ("type", types),
                ("period1", period1.to_string()),
                ("period2", period2.to_string()),
            ])
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            let reason = error_description(&body)
                .unwrap_or_else(|| format!("HTTP {status}: {}", truncate(&body, 200)));
            return Err(AdvisorError::provider(PROVIDER, reason));
        }

        let json: Value = serde_json::from_str(&body)?;
        parse_timeseries(&json, prefix, statement)
    }
}

#[async_trait]
impl MarketDataProvider for YahooFinanceClient {
    #[instrument(skip(self))]
    async fn latest_price(&self, ticker: &str) -> Result<Option<PricePoint>> {
        let connector =
            yahoo::YahooConnector::new().map_err(|e| AdvisorError::provider(PROVIDER, e))?;

        let response = connector
            .get_latest_quotes(ticker, "1d")
            .await
            .map_err(|e| AdvisorError::provider(PROVIDER, e))?;

        let quote = match response.last_quote() {
            Ok(quote) => quote,
            Err(e) => {
                warn!(%ticker, error = %e, "No price history");
                return Ok(None);
            }
        };

        let Some(timestamp) = DateTime::from_timestamp(quote.timestamp as i64, 0) else {
            warn!(%ticker, timestamp = quote.timestamp, "Quote timestamp out of range");
            return Ok(None);
        };

        Ok(Some(PricePoint {
            price: quote.close,
            timestamp,
        }))
    }

    #[instrument(skip(self))]
    async fn financials(&self, ticker: &str, frequency: Frequency) -> Result<FinancialStatement> {
        self.fetch_timeseries(
            ticker,
            frequency.prefix(),
            line_items::INCOME_STATEMENT,
            frequency.statement_name(),
        )
        .await
    }

    #[instrument(skip(self))]
    async fn balance_sheet(&self, ticker: &str) -> Result<BalanceSheet> {
        self.fetch_timeseries(
            ticker,
            Frequency::Annual.prefix(),
            line_items::BALANCE_SHEET,
            "balance sheet",
        )
        .await
    }
}

/// Turn a timeseries payload into a table
///
/// Each result carries its type in `meta.type[0]` and its cells under a key
/// of the same name; cells are `{asOfDate, reportedValue: {raw}}` or `null`.
pub fn parse_timeseries(json: &Value, prefix: &str, statement: &str) -> Result<StatementTable> {
    let timeseries = json.get("timeseries").ok_or_else(|| {
        AdvisorError::provider(PROVIDER, "response has no timeseries object")
    })?;

    if let Some(error) = timeseries.get("error").filter(|e| !e.is_null()) {
        let reason = error
            .get("description")
            .and_then(Value::as_str)
            .map_or_else(|| error.to_string(), ToString::to_string);
        return Err(AdvisorError::provider(PROVIDER, reason));
    }

    let results = timeseries
        .get("result")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default();

    let mut cells = Vec::new();
    for result in results {
        let Some(kind) = result
            .pointer("/meta/type/0")
            .and_then(Value::as_str)
        else {
            continue;
        };
        let Some(item) = kind.strip_prefix(prefix) else {
            continue;
        };
        let Some(series) = result.get(kind).and_then(Value::as_array) else {
            debug!(%item, "Series has no data");
            continue;
        };

        for cell in series.iter().filter(|c| !c.is_null()) {
            let Some(period) = cell
                .get("asOfDate")
                .and_then(Value::as_str)
                .and_then(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").ok())
            else {
                continue;
            };
            let value = cell.pointer("/reportedValue/raw").and_then(Value::as_f64);
            cells.push((item.to_string(), period, value));
        }
    }

    let table = StatementTable::from_cells(statement, cells);
    debug!(statement, periods = table.period_count(), "Parsed timeseries");
    Ok(table)
}

fn error_description(body: &str) -> Option<String> {
    let json: Value = serde_json::from_str(body).ok()?;
    ["/finance/error/description", "/timeseries/error/description"]
        .iter()
        .find_map(|path| json.pointer(path).and_then(Value::as_str))
        .map(ToString::to_string)
}

fn truncate(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn cell(date: &str, raw: f64) -> Value {
        json!({
            "asOfDate": date,
            "periodType": "12M",
            "currencyCode": "USD",
            "reportedValue": { "raw": raw, "fmt": "-" }
        })
    }

    #[test]
    fn test_parse_timeseries_orders_periods_and_keeps_nulls_missing() {
        let payload = json!({
            "timeseries": {
                "result": [
                    {
                        "meta": { "symbol": ["AAPL"], "type": ["annualTotalRevenue"] },
                        "timestamp": [1_632_960_000, 1_664_496_000],
                        "annualTotalRevenue": [
                            cell("2022-09-30", 394_328_000_000.0),
                            cell("2023-09-30", 383_285_000_000.0),
                            null
                        ]
                    },
                    {
                        "meta": { "symbol": ["AAPL"], "type": ["annualNetIncome"] },
                        "annualNetIncome": [ null, cell("2023-09-30", 96_995_000_000.0) ]
                    },
                    {
                        "meta": { "symbol": ["AAPL"], "type": ["annualEBITDA"] }
                    }
                ],
                "error": null
            }
        });

        let table = parse_timeseries(&payload, "annual", "annual financials").unwrap();
        assert_eq!(table.name(), "annual financials");
        assert_eq!(
            table.periods(),
            &[
                NaiveDate::from_ymd_opt(2023, 9, 30).unwrap(),
                NaiveDate::from_ymd_opt(2022, 9, 30).unwrap(),
            ]
        );
        assert_eq!(
            table.value(line_items::TOTAL_REVENUE, 0),
            Some(383_285_000_000.0)
        );
        assert_eq!(table.value(line_items::NET_INCOME, 0), Some(96_995_000_000.0));
        assert_eq!(table.value(line_items::NET_INCOME, 1), None);
        assert!(!table.has_item(line_items::EBITDA));
    }

    #[test]
    fn test_parse_timeseries_ignores_other_prefixes() {
        let payload = json!({
            "timeseries": {
                "result": [{
                    "meta": { "type": ["trailingTotalRevenue"] },
                    "trailingTotalRevenue": [cell("2024-06-30", 1.0)]
                }],
                "error": null
            }
        });
        let table = parse_timeseries(&payload, "quarterly", "quarterly financials").unwrap();
        assert!(table.is_empty());
    }

    #[test]
    fn test_parse_timeseries_error_payload() {
        let payload = json!({
            "timeseries": {
                "result": null,
                "error": { "code": "Not Found", "description": "No data found, symbol may be delisted" }
            }
        });
        match parse_timeseries(&payload, "annual", "annual financials") {
            Err(AdvisorError::ProviderUnavailable { provider, reason }) => {
                assert_eq!(provider, "Yahoo Finance");
                assert!(reason.contains("delisted"));
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_error_description_from_http_body() {
        let body = r#"{"finance":{"result":null,"error":{"code":"Not Found","description":"Quote not found for symbol: ZZZZ"}}}"#;
        assert_eq!(
            error_description(body).as_deref(),
            Some("Quote not found for symbol: ZZZZ")
        );
        assert!(error_description("<html>").is_none());
    }

    #[tokio::test]
    #[ignore] // Requires network access
    async fn test_fetch_annual_financials() {
        let client = YahooFinanceClient::new(&AdvisorConfig::default()).unwrap();
        let table = client.financials("AAPL", Frequency::Annual).await.unwrap();
        assert!(table.period_count() >= 2);
        assert!(table.value(line_items::TOTAL_REVENUE, 0).is_some());
    }

    #[tokio::test]
    #[ignore] // Requires network access
    async fn test_latest_price() {
        let client = YahooFinanceClient::new(&AdvisorConfig::default()).unwrap();
        let price = client.latest_price("AAPL").await.unwrap();
        assert!(price.is_some_and(|p| p.price > 0.0));
    }
}
