//! Common utility functions for the fund calculations.
//!
//! Rounding helpers are for display only. The engine itself never rounds.

use rust_decimal::{Decimal, RoundingStrategy};

use super::CalculationError;

/// Rounds a decimal value to whole currency units, half away from zero.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use fund_core::calculations::common::round_to_units;
///
/// assert_eq!(round_to_units(dec!(18330.032)), dec!(18330));
/// assert_eq!(round_to_units(dec!(0.5)), dec!(1));
/// assert_eq!(round_to_units(dec!(-0.5)), dec!(-1));
/// ```
pub fn round_to_units(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}

/// Rounds a decimal value to `dp` decimal places, half away from zero.
pub fn round_half_up(
    value: Decimal,
    dp: u32,
) -> Decimal {
    value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero)
}

/// Returns the maximum of two decimal values.
pub fn max(
    a: Decimal,
    b: Decimal,
) -> Decimal {
    if a > b { a } else { b }
}

/// Rejects a negative decimal argument with [`CalculationError::InvalidInput`].
pub fn ensure_non_negative(
    field: &'static str,
    value: Decimal,
) -> Result<Decimal, CalculationError> {
    if value < Decimal::ZERO {
        return Err(CalculationError::invalid_input(field, value));
    }
    Ok(value)
}

/// `a * b`, or [`CalculationError::Overflow`] naming `field`.
pub fn checked_mul(
    field: &'static str,
    a: Decimal,
    b: Decimal,
) -> Result<Decimal, CalculationError> {
    a.checked_mul(b).ok_or(CalculationError::Overflow { field })
}

/// `a + b`, or [`CalculationError::Overflow`] naming `field`.
pub fn checked_add(
    field: &'static str,
    a: Decimal,
    b: Decimal,
) -> Result<Decimal, CalculationError> {
    a.checked_add(b).ok_or(CalculationError::Overflow { field })
}

/// `a - b`, or [`CalculationError::Overflow`] naming `field`.
pub fn checked_sub(
    field: &'static str,
    a: Decimal,
    b: Decimal,
) -> Result<Decimal, CalculationError> {
    a.checked_sub(b).ok_or(CalculationError::Overflow { field })
}
