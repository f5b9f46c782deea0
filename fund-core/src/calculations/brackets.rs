//! Progressive bracket lookup.
//!
//! Tax for an income is `income * rate - quick_deduction` for the single
//! bracket whose `[min, max)` range contains the income. The open-ended top
//! bracket catches everything above the last finite bound.

use rust_decimal::Decimal;

use super::CalculationError;
use super::common::ensure_non_negative;
use crate::TaxBracket;

/// Finds the bracket containing `income`.
///
/// # Errors
///
/// * [`CalculationError::InvalidInput`] if `income` is negative.
/// * [`CalculationError::NoMatchingBracket`] if the table does not cover it.
pub fn find_bracket(
    table: &[TaxBracket],
    income: Decimal,
) -> Result<&TaxBracket, CalculationError> {
    let income = ensure_non_negative("income", income)?;

    table
        .iter()
        .find(|b| b.contains(income))
        .ok_or(CalculationError::NoMatchingBracket(income))
}

/// Computes tax on `income` using its own bracket.
///
/// # Errors
///
/// Same as [`find_bracket`], plus [`CalculationError::Overflow`] when the
/// tax does not fit in a [`Decimal`].
pub fn apply_brackets(
    table: &[TaxBracket],
    income: Decimal,
) -> Result<Decimal, CalculationError> {
    find_bracket(table, income)?
        .tax_for(income)
        .ok_or(CalculationError::Overflow { field: "tax" })
}

/// Checks that `table` partitions `[0, ∞)`: first row starts at zero, each
/// row starts where the previous one ends, bounds strictly increase and only
/// the last row is unbounded.
///
/// # Errors
///
/// Returns [`CalculationError::InvalidBracketTable`] for the first bad row.
pub fn validate_bracket_table(table: &[TaxBracket]) -> Result<(), CalculationError> {
    let invalid = |index, reason| CalculationError::InvalidBracketTable { index, reason };

    let first = table.first().ok_or(invalid(0, "table is empty"))?;
    if !first.min_income.is_zero() {
        return Err(invalid(0, "first bracket must start at zero"));
    }

    let last_index = table.len() - 1;
    for (index, bracket) in table.iter().enumerate() {
        match bracket.max_income {
            Some(max) if max <= bracket.min_income => {
                return Err(invalid(index, "upper bound must exceed lower bound"));
            }
            Some(_) if index == last_index => {
                return Err(invalid(index, "last bracket must be unbounded"));
            }
            None if index != last_index => {
                return Err(invalid(index, "only the last bracket may be unbounded"));
            }
            _ => {}
        }

        if let Some(next) = table.get(index + 1)
            && bracket.max_income != Some(next.min_income)
        {
            return Err(invalid(index + 1, "bracket must start where the previous ends"));
        }
    }

    Ok(())
}
