use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::BonusTaxMethod;

/// Outcome of evaluating one housing-fund contribution base.
///
/// A plain value: it can always be recomputed from the engine's config, the
/// base and the bonus tax method, and nothing mutates it after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioResult {
    /// Housing-fund base this row was computed for.
    pub contribution_base: Decimal,

    // Monthly contributions
    pub personal_contribution: Decimal,
    pub employer_contribution: Decimal,
    /// Employer-side contribution above what the declared base requires.
    pub employer_extra_contribution: Decimal,
    /// Amount the employee pays each month to cover the employer extra.
    pub employee_extra_payment: Decimal,

    // Annual tax
    pub annual_tax: Decimal,
    /// Separate-regime bonus tax; zero when the bonus is combined.
    pub bonus_tax: Decimal,
    pub bonus_tax_method: BonusTaxMethod,

    // Income
    pub monthly_cash: Decimal,
    /// Personal plus employer contributions over twelve months.
    pub annual_contribution_income: Decimal,
    pub annual_total_income: Decimal,
    /// Annual taxable income. Includes the bonus only under
    /// [`BonusTaxMethod::Combined`].
    pub annual_taxable_income: Decimal,
}

impl ScenarioResult {
    /// Personal plus employer contribution for one month.
    pub fn monthly_contribution_total(&self) -> Decimal {
        self.personal_contribution + self.employer_contribution
    }
}
