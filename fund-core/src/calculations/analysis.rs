//! Summaries built on top of a finished sweep.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;

use super::CalculationError;
use super::{ScenarioEngine, SweepOutcome};
use crate::{BonusTaxMethod, ScenarioResult};

/// Advice derived from a sweep.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Recommendation {
    /// Raising the base to `to` increases annual total income.
    RaiseBase { to: Decimal },
    /// No candidate beats the baseline.
    KeepDeclaredBase { base: Decimal },
}

/// Baseline-versus-best comparison for one sweep.
///
/// All amounts are annual except `monthly_cash_reduction` and the two
/// contribution deltas.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SweepAnalysis {
    pub baseline_base: Decimal,
    pub best_base: Decimal,
    pub baseline_income: Decimal,
    pub best_income: Decimal,
    pub income_increase: Decimal,
    /// Increase as a percentage of baseline income; `None` when the baseline
    /// income is zero or the ratio does not fit in a `Decimal`.
    pub income_increase_pct: Option<Decimal>,
    pub tax_saving: Decimal,
    pub fund_increase: Decimal,
    /// Twelve months of the employee's extra payment at the best base.
    pub extra_cost: Decimal,
    pub net_gain: Decimal,
    pub monthly_cash_reduction: Decimal,
    pub personal_contribution_delta: Decimal,
    pub employer_contribution_delta: Decimal,
}

impl SweepAnalysis {
    pub fn from_outcome(outcome: &SweepOutcome) -> Self {
        Self::compare(outcome.baseline(), outcome.best())
    }

    /// Compares two scenarios, treating `baseline` as the reference point.
    pub fn compare(
        baseline: &ScenarioResult,
        best: &ScenarioResult,
    ) -> Self {
        let income_increase = best.annual_total_income - baseline.annual_total_income;
        let income_increase_pct = income_increase
            .checked_div(baseline.annual_total_income)
            .and_then(|ratio| ratio.checked_mul(dec!(100)));

        let tax_saving = baseline.annual_tax - best.annual_tax;
        let fund_increase = best.annual_contribution_income - baseline.annual_contribution_income;
        let extra_cost = best.employee_extra_payment * dec!(12);

        Self {
            baseline_base: baseline.contribution_base,
            best_base: best.contribution_base,
            baseline_income: baseline.annual_total_income,
            best_income: best.annual_total_income,
            income_increase,
            income_increase_pct,
            tax_saving,
            fund_increase,
            extra_cost,
            net_gain: tax_saving + fund_increase - extra_cost,
            monthly_cash_reduction: baseline.monthly_cash - best.monthly_cash,
            personal_contribution_delta: best.personal_contribution
                - baseline.personal_contribution,
            employer_contribution_delta: best.employer_contribution
                - baseline.employer_contribution,
        }
    }

    pub fn improves(&self) -> bool {
        self.income_increase > Decimal::ZERO
    }

    pub fn recommendation(&self) -> Recommendation {
        if self.best_base > self.baseline_base && self.improves() {
            Recommendation::RaiseBase { to: self.best_base }
        } else {
            Recommendation::KeepDeclaredBase {
                base: self.baseline_base,
            }
        }
    }
}

/// Both bonus regimes evaluated at the same base.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MethodComparison {
    pub combined: ScenarioResult,
    pub separate: ScenarioResult,
}

impl MethodComparison {
    /// Evaluates `base` under each [`BonusTaxMethod`].
    ///
    /// # Errors
    ///
    /// Propagates errors from [`ScenarioEngine::calculate_scenario`].
    pub fn at_base(
        engine: &ScenarioEngine,
        base: Decimal,
    ) -> Result<Self, CalculationError> {
        Ok(Self {
            combined: engine.calculate_scenario(base, BonusTaxMethod::Combined)?,
            separate: engine.calculate_scenario(base, BonusTaxMethod::Separate)?,
        })
    }

    /// The method with the lower annual tax. Equal tax prefers
    /// [`BonusTaxMethod::Separate`].
    pub fn preferred(&self) -> BonusTaxMethod {
        if self.combined.annual_tax < self.separate.annual_tax {
            BonusTaxMethod::Combined
        } else {
            BonusTaxMethod::Separate
        }
    }

    /// Annual tax saved by choosing [`MethodComparison::preferred`].
    pub fn tax_saving(&self) -> Decimal {
        (self.combined.annual_tax - self.separate.annual_tax).abs()
    }

    pub fn result_for(
        &self,
        method: BonusTaxMethod,
    ) -> &ScenarioResult {
        match method {
            BonusTaxMethod::Combined => &self.combined,
            BonusTaxMethod::Separate => &self.separate,
        }
    }
}
