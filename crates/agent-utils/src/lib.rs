//! Shared utilities for the investment advisor workspace
//!
//! Tracing setup and `.env`/environment helpers used by every binary.

pub mod env;
pub mod logging;

pub use env::{EnvError, env_or, load_dotenv, load_dotenv_from, optional_env, required_env};
pub use logging::{LogFormat, init_tracing};
