//! Agent runtime for executing agents
//!
//! This crate provides the AgentExecutor for LLM loops, AgentRuntime for
//! sharing a provider between agents, and the concrete agent types.

pub mod agents;
pub mod executor;
pub mod runtime;

pub use agents::{SimpleAgent, SimpleConfig, ToolAgent};
pub use executor::{AgentExecutor, AgentExecutorBuilder, ExecutorConfig};
pub use runtime::{AgentRuntime, AgentRuntimeBuilder, RuntimeConfig};
