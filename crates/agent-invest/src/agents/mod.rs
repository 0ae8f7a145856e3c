//! The analyst crew
//!
//! - `analyst`: the four roles and the stage wrapper
//! - `crew`: sequential execution and report output

pub mod analyst;
pub mod crew;

pub use analyst::{AnalystAgent, AnalystRole};
pub use crew::{CrewOutput, InvestmentCrew, StageRecord};
