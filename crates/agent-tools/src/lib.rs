//! Tool management for analyst agents
//!
//! Tools are the functions a model may call during a stage, such as the
//! financial-metrics aggregator or a web search.

pub mod registry;
pub mod tool;

pub use registry::ToolRegistry;
pub use tool::Tool;
