use rust_decimal::Decimal;
use thiserror::Error;

/// Errors raised by the housing-fund calculations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CalculationError {
    /// A calculation argument was negative or out of range.
    #[error("invalid input: {field} must be a non-negative amount in range, got {value}")]
    InvalidInput { field: &'static str, value: String },

    /// A [`CalculatorConfig`](crate::CalculatorConfig) field is out of range.
    #[error("invalid config: {field} must be {expected}, got {value}")]
    InvalidConfig {
        field: &'static str,
        value: Decimal,
        expected: &'static str,
    },

    /// No bracket in the table covers the given income.
    #[error("no tax bracket found for income {0}")]
    NoMatchingBracket(Decimal),

    /// A bracket table does not partition `[0, ∞)`.
    #[error("invalid bracket table at row {index}: {reason}")]
    InvalidBracketTable { index: usize, reason: &'static str },

    /// An intermediate amount does not fit in a `Decimal`.
    #[error("arithmetic overflow while computing {field}")]
    Overflow { field: &'static str },

    /// A sweep was asked to evaluate zero candidate bases.
    #[error("no candidate bases to evaluate")]
    EmptySweep,
}

impl CalculationError {
    pub(crate) fn invalid_input(
        field: &'static str,
        value: impl ToString,
    ) -> Self {
        Self::InvalidInput {
            field,
            value: value.to_string(),
        }
    }
}
