use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::calculations::CalculationError;

/// Statutory monthly personal allowance deducted before comprehensive tax.
pub const MONTHLY_PERSONAL_ALLOWANCE: Decimal = dec!(5000);

/// Numeric inputs for one employee.
///
/// All monetary values are currency units. Nothing here is rounded; callers
/// round only when displaying results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculatorConfig {
    pub monthly_salary: Decimal,
    pub annual_bonus: Decimal,
    /// Employee social-insurance payment per month (not the base).
    pub monthly_social_insurance: Decimal,
    pub monthly_special_deduction: Decimal,
    pub monthly_other_deductions: Decimal,
    /// Housing-fund contribution rate as a fraction, e.g. `0.12`.
    pub fund_rate: Decimal,
    /// Base the employer declares and funds on its own side.
    pub employer_declared_base: Decimal,
}

impl CalculatorConfig {
    /// Checks that every monetary field is non-negative and that the fund
    /// rate lies in `[0, 1]`.
    ///
    /// # Errors
    ///
    /// Returns [`CalculationError::InvalidConfig`] naming the first field
    /// that fails.
    pub fn validate(&self) -> Result<(), CalculationError> {
        let amounts = [
            ("monthly_salary", self.monthly_salary),
            ("annual_bonus", self.annual_bonus),
            ("monthly_social_insurance", self.monthly_social_insurance),
            ("monthly_special_deduction", self.monthly_special_deduction),
            ("monthly_other_deductions", self.monthly_other_deductions),
            ("employer_declared_base", self.employer_declared_base),
        ];

        for (field, value) in amounts {
            if value < Decimal::ZERO {
                return Err(CalculationError::InvalidConfig {
                    field,
                    value,
                    expected: "a non-negative amount",
                });
            }
        }

        if self.fund_rate < Decimal::ZERO || self.fund_rate > Decimal::ONE {
            return Err(CalculationError::InvalidConfig {
                field: "fund_rate",
                value: self.fund_rate,
                expected: "a fraction between 0 and 1",
            });
        }

        Ok(())
    }

    /// Monthly housing-fund contribution the employer makes on its declared base.
    pub fn employer_declared_contribution(&self) -> Decimal {
        self.employer_declared_base * self.fund_rate
    }
}
