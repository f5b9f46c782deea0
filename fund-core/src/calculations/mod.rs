//! Housing-fund and income-tax calculations.
//!
//! [`ScenarioEngine`] evaluates one contribution base; [`sweep`] runs it over
//! a grid of bases and [`analysis`] summarises the outcome.

pub mod analysis;
pub mod brackets;
pub mod common;
mod error;
pub mod scenario;
pub mod sweep;

pub use analysis::{MethodComparison, Recommendation, SweepAnalysis};
pub use brackets::{apply_brackets, find_bracket, validate_bracket_table};
pub use error::CalculationError;
pub use scenario::ScenarioEngine;
pub use sweep::{BaseRange, SweepOutcome, sweep};
