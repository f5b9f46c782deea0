//! Scenario engine for one housing-fund contribution base.
//!
//! # Calculation Steps
//!
//! | Step | Description |
//! |------|-------------|
//! | 1    | Personal and employer contribution: base × fund rate each |
//! | 2    | Employer extra above the declared base, paid by the employee |
//! | 3    | Monthly taxable income (floored at zero), × 12 for the year |
//! | 4    | Annual tax, bonus combined or taxed separately |
//! | 5    | Monthly cash after contributions, extra payment and tax |
//! | 6    | Annual contribution income: (personal + employer) × 12 |
//! | 7    | Annual total income: cash × 12 + contribution income + bonus |
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use fund_core::{BonusTaxMethod, CalculatorConfig, ScenarioEngine};
//!
//! let engine = ScenarioEngine::new(CalculatorConfig {
//!     monthly_salary: dec!(22000),
//!     annual_bonus: dec!(60000),
//!     monthly_social_insurance: dec!(384.96),
//!     monthly_special_deduction: dec!(1500),
//!     monthly_other_deductions: dec!(0),
//!     fund_rate: dec!(0.12),
//!     employer_declared_base: dec!(7000),
//! })
//! .unwrap();
//!
//! let result = engine
//!     .calculate_scenario(dec!(7000), BonusTaxMethod::Separate)
//!     .unwrap();
//!
//! assert_eq!(result.annual_tax, dec!(23130.096));
//! assert_eq!(result.annual_total_income, dec!(306330.384));
//! ```

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tracing::{debug, trace, warn};

use super::CalculationError;
use super::brackets::{apply_brackets, find_bracket};
use super::common::{checked_add, checked_mul, checked_sub, ensure_non_negative, max};
use crate::{
    BONUS_BRACKETS, BonusTaxMethod, COMPREHENSIVE_BRACKETS, CalculatorConfig,
    MONTHLY_PERSONAL_ALLOWANCE, ScenarioResult,
};

const MONTHS_PER_YEAR: Decimal = dec!(12);

/// Split of the monthly housing-fund contribution for one base.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ContributionSplit {
    personal: Decimal,
    employer: Decimal,
    employer_extra: Decimal,
    employee_extra_payment: Decimal,
}

/// Annual tax under one bonus regime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct TaxOutcome {
    annual_tax: Decimal,
    bonus_tax: Decimal,
    annual_taxable_income: Decimal,
}

/// Evaluates housing-fund scenarios for one validated [`CalculatorConfig`].
///
/// The engine owns its config and never changes it, so every call with the
/// same arguments returns the same result and calls can run in any order.
#[derive(Debug, Clone)]
pub struct ScenarioEngine {
    config: CalculatorConfig,
}

impl ScenarioEngine {
    /// Creates an engine after validating `config`.
    ///
    /// # Errors
    ///
    /// Returns [`CalculationError::InvalidConfig`] if any field is negative
    /// or the fund rate is above 1.
    pub fn new(config: CalculatorConfig) -> Result<Self, CalculationError> {
        config.validate()?;
        debug!(?config, "scenario engine configured");
        Ok(Self { config })
    }

    pub fn config(&self) -> &CalculatorConfig {
        &self.config
    }

    /// Annual comprehensive-income tax for `annual_taxable_income`.
    ///
    /// # Errors
    ///
    /// Returns [`CalculationError::InvalidInput`] for a negative income.
    pub fn calculate_tax(
        &self,
        annual_taxable_income: Decimal,
    ) -> Result<Decimal, CalculationError> {
        apply_brackets(&COMPREHENSIVE_BRACKETS, annual_taxable_income)
    }

    /// Tax on a year-end bonus under the separate regime.
    ///
    /// The bracket is chosen by the monthly equivalent `bonus / 12`, but its
    /// rate and quick deduction apply to the whole `bonus`.
    ///
    /// # Errors
    ///
    /// Returns [`CalculationError::InvalidInput`] for a negative bonus.
    pub fn calculate_bonus_tax_separate(
        &self,
        bonus: Decimal,
    ) -> Result<Decimal, CalculationError> {
        let bonus = ensure_non_negative("bonus", bonus)?;
        let selector = bonus / MONTHS_PER_YEAR;
        let bracket = find_bracket(&BONUS_BRACKETS, selector)?;

        trace!(%bonus, %selector, rate = %bracket.tax_rate, "bonus bracket selected");
        bracket
            .tax_for(bonus)
            .ok_or(CalculationError::Overflow { field: "bonus_tax" })
    }

    /// Evaluates every outcome for `target_base` under `bonus_tax_method`.
    ///
    /// # Errors
    ///
    /// * [`CalculationError::InvalidInput`] for a negative base.
    /// * [`CalculationError::Overflow`] when an amount does not fit in a
    ///   [`Decimal`], e.g. for an absurdly large salary or base.
    pub fn calculate_scenario(
        &self,
        target_base: Decimal,
        bonus_tax_method: BonusTaxMethod,
    ) -> Result<ScenarioResult, CalculationError> {
        let target_base = ensure_non_negative("target_base", target_base)?;
        if target_base < self.config.employer_declared_base {
            warn!(
                %target_base,
                declared = %self.config.employer_declared_base,
                "target base is below the employer's declared base"
            );
        }

        let split = self.contribution_split(target_base)?;
        let annual_taxable = checked_mul(
            "annual_taxable_income",
            self.monthly_taxable_income(split.personal)?,
            MONTHS_PER_YEAR,
        )?;
        let tax = self.annual_tax(annual_taxable, bonus_tax_method)?;

        let monthly_cash = self.monthly_cash(&split, tax.annual_tax)?;
        let annual_contribution_income = checked_mul(
            "annual_contribution_income",
            checked_add("monthly_contribution", split.personal, split.employer)?,
            MONTHS_PER_YEAR,
        )?;
        let annual_total_income = checked_add(
            "annual_total_income",
            checked_mul("annual_cash", monthly_cash, MONTHS_PER_YEAR)?,
            annual_contribution_income,
        )
        .and_then(|total| checked_add("annual_total_income", total, self.config.annual_bonus))?;

        debug!(
            base = %target_base,
            method = %bonus_tax_method,
            annual_tax = %tax.annual_tax,
            total_income = %annual_total_income,
            "scenario evaluated"
        );

        Ok(ScenarioResult {
            contribution_base: target_base,
            personal_contribution: split.personal,
            employer_contribution: split.employer,
            employer_extra_contribution: split.employer_extra,
            employee_extra_payment: split.employee_extra_payment,
            annual_tax: tax.annual_tax,
            bonus_tax: tax.bonus_tax,
            bonus_tax_method,
            monthly_cash,
            annual_contribution_income,
            annual_total_income,
            annual_taxable_income: tax.annual_taxable_income,
        })
    }

    /// Both sides contribute at the same rate on the same base. Anything the
    /// employer pays above its declared base comes out of the employee's pay.
    fn contribution_split(
        &self,
        target_base: Decimal,
    ) -> Result<ContributionSplit, CalculationError> {
        let personal = checked_mul("personal_contribution", target_base, self.config.fund_rate)?;
        let employer = checked_mul("employer_contribution", target_base, self.config.fund_rate)?;

        let employer_extra = if target_base > self.config.employer_declared_base {
            checked_sub(
                "employer_extra_contribution",
                employer,
                self.config.employer_declared_contribution(),
            )?
        } else {
            Decimal::ZERO
        };

        Ok(ContributionSplit {
            personal,
            employer,
            employer_extra,
            employee_extra_payment: employer_extra,
        })
    }

    /// Monthly taxable income, floored at zero.
    fn monthly_taxable_income(
        &self,
        personal_contribution: Decimal,
    ) -> Result<Decimal, CalculationError> {
        let c = &self.config;
        let taxable = [
            c.monthly_social_insurance,
            personal_contribution,
            MONTHLY_PERSONAL_ALLOWANCE,
            c.monthly_special_deduction,
            c.monthly_other_deductions,
        ]
        .into_iter()
        .try_fold(c.monthly_salary, |rest, deduction| {
            checked_sub("monthly_taxable_income", rest, deduction)
        })?;
        Ok(max(taxable, Decimal::ZERO))
    }

    fn annual_tax(
        &self,
        annual_taxable: Decimal,
        method: BonusTaxMethod,
    ) -> Result<TaxOutcome, CalculationError> {
        match method {
            BonusTaxMethod::Combined => {
                let with_bonus =
                    checked_add("annual_taxable_income", annual_taxable, self.config.annual_bonus)?;
                Ok(TaxOutcome {
                    annual_tax: self.calculate_tax(with_bonus)?,
                    bonus_tax: Decimal::ZERO,
                    annual_taxable_income: with_bonus,
                })
            }
            BonusTaxMethod::Separate => {
                let bonus_tax = self.calculate_bonus_tax_separate(self.config.annual_bonus)?;
                Ok(TaxOutcome {
                    annual_tax: checked_add(
                        "annual_tax",
                        self.calculate_tax(annual_taxable)?,
                        bonus_tax,
                    )?,
                    bonus_tax,
                    // The bonus is left out of the reported taxable income here.
                    annual_taxable_income: annual_taxable,
                })
            }
        }
    }

    fn monthly_cash(
        &self,
        split: &ContributionSplit,
        annual_tax: Decimal,
    ) -> Result<Decimal, CalculationError> {
        [
            self.config.monthly_social_insurance,
            split.personal,
            split.employee_extra_payment,
            annual_tax / MONTHS_PER_YEAR,
        ]
        .into_iter()
        .try_fold(self.config.monthly_salary, |rest, outflow| {
            checked_sub("monthly_cash", rest, outflow)
        })
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    use super::*;

    fn test_config() -> CalculatorConfig {
        CalculatorConfig {
            monthly_salary: dec!(22000),
            annual_bonus: dec!(60000),
            monthly_social_insurance: dec!(384.96),
            monthly_special_deduction: dec!(1500),
            monthly_other_deductions: dec!(0),
            fund_rate: dec!(0.12),
            employer_declared_base: dec!(7000),
        }
    }

    fn test_engine() -> ScenarioEngine {
        ScenarioEngine::new(test_config()).unwrap()
    }

    // =========================================================================
    // construction
    // =========================================================================

    #[test]
    fn new_rejects_invalid_config() {
        let config = CalculatorConfig {
            annual_bonus: dec!(-1),
            ..test_config()
        };

        let result = ScenarioEngine::new(config);

        assert!(matches!(
            result,
            Err(CalculationError::InvalidConfig {
                field: "annual_bonus",
                ..
            })
        ));
    }

    #[test]
    fn config_is_exposed_read_only() {
        assert_eq!(test_engine().config(), &test_config());
    }

    // =========================================================================
    // calculate_tax / calculate_bonus_tax_separate
    // =========================================================================

    #[test]
    fn calculate_tax_uses_comprehensive_table() {
        let tax = test_engine().calculate_tax(dec!(171300.48)).unwrap();

        assert_eq!(tax, dec!(17340.096));
    }

    #[test]
    fn calculate_tax_rejects_negative_income() {
        let result = test_engine().calculate_tax(dec!(-1));

        assert!(matches!(result, Err(CalculationError::InvalidInput { .. })));
    }

    #[test]
    fn bonus_selector_uses_monthly_equivalent_but_taxes_full_bonus() {
        let tax = test_engine()
            .calculate_bonus_tax_separate(dec!(36000))
            .unwrap();

        assert_eq!(tax, dec!(3390));
    }

    #[test]
    fn bonus_tax_for_default_bonus() {
        let tax = test_engine()
            .calculate_bonus_tax_separate(dec!(60000))
            .unwrap();

        assert_eq!(tax, dec!(5790));
    }

    #[test]
    fn bonus_tax_jumps_across_selector_boundary() {
        let engine = test_engine();

        let below = engine
            .calculate_bonus_tax_separate(dec!(35999.88))
            .unwrap();
        let at = engine.calculate_bonus_tax_separate(dec!(36000)).unwrap();

        assert_eq!(below, dec!(1079.9964));
        assert!(at - below > dec!(2000));
    }

    #[test]
    fn bonus_tax_in_top_bracket() {
        let tax = test_engine()
            .calculate_bonus_tax_separate(dec!(1200000))
            .unwrap();

        assert_eq!(tax, dec!(524840));
    }

    #[test]
    fn zero_bonus_has_zero_tax() {
        let tax = test_engine()
            .calculate_bonus_tax_separate(Decimal::ZERO)
            .unwrap();

        assert_eq!(tax, Decimal::ZERO);
    }

    #[test]
    fn negative_bonus_is_rejected() {
        let result = test_engine().calculate_bonus_tax_separate(dec!(-100));

        assert_eq!(
            result,
            Err(CalculationError::InvalidInput {
                field: "bonus",
                value: "-100".to_string(),
            })
        );
    }

    // =========================================================================
    // calculate_scenario
    // =========================================================================

    #[test]
    fn declared_base_has_no_extra_payment() {
        let result = test_engine()
            .calculate_scenario(dec!(7000), BonusTaxMethod::Combined)
            .unwrap();

        assert_eq!(result.personal_contribution, dec!(840));
        assert_eq!(result.employer_contribution, dec!(840));
        assert_eq!(result.employer_extra_contribution, Decimal::ZERO);
        assert_eq!(result.employee_extra_payment, Decimal::ZERO);
    }

    #[test]
    fn raised_base_makes_employee_fund_employer_extra() {
        let result = test_engine()
            .calculate_scenario(dec!(10000), BonusTaxMethod::Separate)
            .unwrap();

        assert_eq!(result.employer_contribution, dec!(1200));
        assert_eq!(result.employer_extra_contribution, dec!(360));
        assert_eq!(
            result.employee_extra_payment,
            result.employer_extra_contribution
        );
        assert!(result.employee_extra_payment > Decimal::ZERO);
    }

    #[test]
    fn base_below_declared_has_no_extra_payment() {
        let result = test_engine()
            .calculate_scenario(dec!(5000), BonusTaxMethod::Combined)
            .unwrap();

        assert_eq!(result.personal_contribution, dec!(600));
        assert_eq!(result.employee_extra_payment, Decimal::ZERO);
    }

    #[test]
    fn combined_method_at_declared_base() {
        let result = test_engine()
            .calculate_scenario(dec!(7000), BonusTaxMethod::Combined)
            .unwrap();

        assert_eq!(result.annual_taxable_income, dec!(231300.48));
        assert_eq!(result.annual_tax, dec!(29340.096));
        assert_eq!(result.bonus_tax, Decimal::ZERO);
        assert_eq!(result.monthly_cash, dec!(18330.032));
        assert_eq!(result.annual_contribution_income, dec!(20160));
        assert_eq!(result.annual_total_income, dec!(300120.384));
        assert_eq!(result.bonus_tax_method, BonusTaxMethod::Combined);
    }

    #[test]
    fn separate_method_at_declared_base() {
        let result = test_engine()
            .calculate_scenario(dec!(7000), BonusTaxMethod::Separate)
            .unwrap();

        assert_eq!(result.annual_taxable_income, dec!(171300.48));
        assert_eq!(result.bonus_tax, dec!(5790));
        assert_eq!(result.annual_tax, dec!(23130.096));
        assert_eq!(result.monthly_cash, dec!(18847.532));
        assert_eq!(result.annual_total_income, dec!(306330.384));
        assert_eq!(result.bonus_tax_method, BonusTaxMethod::Separate);
    }

    #[test]
    fn separate_method_above_declared_base() {
        let result = test_engine()
            .calculate_scenario(dec!(10000), BonusTaxMethod::Separate)
            .unwrap();

        assert_eq!(result.annual_taxable_income, dec!(166980.48));
        assert_eq!(result.annual_tax, dec!(22266.096));
        assert_eq!(result.monthly_cash, dec!(18199.532));
        assert_eq!(result.annual_contribution_income, dec!(28800));
        assert_eq!(result.annual_total_income, dec!(307194.384));
    }

    #[test]
    fn methods_evaluate_independently_on_one_engine() {
        let engine = test_engine();

        let combined = engine
            .calculate_scenario(dec!(7000), BonusTaxMethod::Combined)
            .unwrap();
        let separate = engine
            .calculate_scenario(dec!(7000), BonusTaxMethod::Separate)
            .unwrap();
        let combined_again = engine
            .calculate_scenario(dec!(7000), BonusTaxMethod::Combined)
            .unwrap();

        assert_ne!(combined.annual_total_income, separate.annual_total_income);
        assert_eq!(combined, combined_again);
        assert_eq!(engine.config(), &test_config());
    }

    #[test]
    fn taxable_income_is_floored_at_zero() {
        let engine = ScenarioEngine::new(CalculatorConfig {
            monthly_salary: dec!(6000),
            annual_bonus: dec!(0),
            ..test_config()
        })
        .unwrap();

        let result = engine
            .calculate_scenario(dec!(7000), BonusTaxMethod::Combined)
            .unwrap();

        assert_eq!(result.annual_taxable_income, Decimal::ZERO);
        assert_eq!(result.annual_tax, Decimal::ZERO);
        assert_eq!(result.monthly_cash, dec!(4775.04));
    }

    #[test]
    fn negative_target_base_is_rejected() {
        let result = test_engine().calculate_scenario(dec!(-1), BonusTaxMethod::Combined);

        assert!(matches!(
            result,
            Err(CalculationError::InvalidInput {
                field: "target_base",
                ..
            })
        ));
    }

    #[test]
    fn monthly_contribution_total_sums_both_sides() {
        let result = test_engine()
            .calculate_scenario(dec!(10000), BonusTaxMethod::Combined)
            .unwrap();

        assert_eq!(result.monthly_contribution_total(), dec!(2400));
    }

    // =========================================================================
    // overflow
    // =========================================================================

    #[test]
    fn huge_salary_reports_overflow_instead_of_panicking() {
        let engine = ScenarioEngine::new(CalculatorConfig {
            monthly_salary: Decimal::from_i128_with_scale(10_i128.pow(28), 0),
            ..test_config()
        })
        .unwrap();

        let result = engine.calculate_scenario(dec!(7000), BonusTaxMethod::Combined);

        assert_eq!(
            result,
            Err(CalculationError::Overflow {
                field: "annual_taxable_income",
            })
        );
    }

    #[test]
    fn maximum_base_reports_overflow_instead_of_panicking() {
        let result = test_engine().calculate_scenario(Decimal::MAX, BonusTaxMethod::Separate);

        assert!(matches!(result, Err(CalculationError::Overflow { .. })));
    }

    // =========================================================================
    // properties over arbitrary bonuses and bases
    // =========================================================================

    proptest! {
        #[test]
        fn bonus_bracket_is_chosen_by_monthly_equivalent(cents in 0i64..500_000_000) {
            let bonus = Decimal::new(cents, 2);
            let monthly = bonus / dec!(12);
            let bracket = BONUS_BRACKETS.iter().find(|b| b.contains(monthly)).unwrap();

            let tax = test_engine().calculate_bonus_tax_separate(bonus).unwrap();

            prop_assert_eq!(tax, bonus * bracket.tax_rate - bracket.quick_deduction);
        }

        #[test]
        fn employee_covers_employer_extra_above_declared_base(
            cents_above in 1i64..5_000_000,
            separate in any::<bool>(),
        ) {
            let base = dec!(7000) + Decimal::new(cents_above, 2);
            let method = if separate { BonusTaxMethod::Separate } else { BonusTaxMethod::Combined };

            let result = test_engine().calculate_scenario(base, method).unwrap();

            prop_assert_eq!(result.employee_extra_payment, result.employer_extra_contribution);
            prop_assert!(result.employer_extra_contribution > Decimal::ZERO);
            prop_assert_eq!(
                result.employer_extra_contribution,
                (base - dec!(7000)) * dec!(0.12)
            );
        }
    }
}
