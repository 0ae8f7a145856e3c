//! Concrete agent implementations
//!
//! - SimpleAgent: LLM-only agent without tool execution
//! - ToolAgent: Agent with LLM loop and tool execution capabilities

pub mod simple;
pub mod tool;

pub use simple::{SimpleAgent, SimpleConfig};
pub use tool::ToolAgent;
