//! Tools exposed to the analyst agents

pub mod financial_analysis;
pub mod web_search;

pub use financial_analysis::FinancialAnalysisTool;
pub use web_search::WebSearchTool;
