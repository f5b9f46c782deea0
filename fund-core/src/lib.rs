pub mod calculations;
pub mod models;

pub use calculations::{CalculationError, ScenarioEngine};
pub use models::*;
