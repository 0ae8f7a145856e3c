//! Financial metrics aggregation
//!
//! Reads statement tables from a `MarketDataProvider`, derives growth,
//! margins and the debt ratio, and renders everything as display strings.

pub mod aggregator;
pub mod calc;
pub mod format;
pub mod report;

pub use aggregator::{MetricsAggregator, build_report, normalize_ticker};
pub use format::{NOT_AVAILABLE, format_eps, format_number, format_percent};
pub use report::{
    AnnualBlock, MetricsReport, PeriodSummary, PriceBlock, PriceValue, QuarterlyBlock,
    StatementSummary,
};
