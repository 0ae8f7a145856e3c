//! External data clients

pub mod serper;
pub mod yahoo;

pub use serper::{SearchResult, SerperClient};
pub use yahoo::YahooFinanceClient;
