//! Core abstractions shared by every analyst agent
//!
//! This crate defines the `Agent` trait, the `Context` passed between
//! pipeline stages and the common error type.

pub mod agent;
pub mod context;
pub mod error;

pub use agent::Agent;
pub use context::{Context, StageOutput};
pub use error::{Error, Result};
