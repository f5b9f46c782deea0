use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// One row of a progressive tax table.
///
/// The bracket covers `[min_income, max_income)`. Tax for an income inside
/// the bracket is `income * tax_rate - quick_deduction`, where the quick
/// deduction folds in the cumulative effect of every lower bracket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxBracket {
    pub min_income: Decimal,
    /// Exclusive upper bound; `None` for the open-ended top bracket.
    pub max_income: Option<Decimal>,
    pub tax_rate: Decimal,
    pub quick_deduction: Decimal,
}

impl TaxBracket {
    /// Returns true when `income` falls inside `[min_income, max_income)`.
    pub fn contains(
        &self,
        income: Decimal,
    ) -> bool {
        income >= self.min_income && self.max_income.is_none_or(|max| income < max)
    }

    /// Applies this bracket's rate and quick deduction to `amount`.
    /// Returns `None` if the result does not fit in a [`Decimal`].
    pub fn tax_for(
        &self,
        amount: Decimal,
    ) -> Option<Decimal> {
        amount
            .checked_mul(self.tax_rate)?
            .checked_sub(self.quick_deduction)
    }
}

const fn bracket(
    min_income: Decimal,
    max_income: Option<Decimal>,
    tax_rate: Decimal,
    quick_deduction: Decimal,
) -> TaxBracket {
    TaxBracket {
        min_income,
        max_income,
        tax_rate,
        quick_deduction,
    }
}

/// Annual comprehensive-income table (wages, and the bonus when combined).
pub static COMPREHENSIVE_BRACKETS: [TaxBracket; 7] = [
    bracket(dec!(0), Some(dec!(36000)), dec!(0.03), dec!(0)),
    bracket(dec!(36000), Some(dec!(144000)), dec!(0.10), dec!(2520)),
    bracket(dec!(144000), Some(dec!(300000)), dec!(0.20), dec!(16920)),
    bracket(dec!(300000), Some(dec!(420000)), dec!(0.25), dec!(31920)),
    bracket(dec!(420000), Some(dec!(660000)), dec!(0.30), dec!(52920)),
    bracket(dec!(660000), Some(dec!(960000)), dec!(0.35), dec!(85920)),
    bracket(dec!(960000), None, dec!(0.45), dec!(181920)),
];

/// Year-end bonus table for the separate regime. Bounds are monthly
/// equivalents of the bonus.
pub static BONUS_BRACKETS: [TaxBracket; 7] = [
    bracket(dec!(0), Some(dec!(3000)), dec!(0.03), dec!(0)),
    bracket(dec!(3000), Some(dec!(12000)), dec!(0.10), dec!(210)),
    bracket(dec!(12000), Some(dec!(25000)), dec!(0.20), dec!(1410)),
    bracket(dec!(25000), Some(dec!(35000)), dec!(0.25), dec!(2660)),
    bracket(dec!(35000), Some(dec!(55000)), dec!(0.30), dec!(4410)),
    bracket(dec!(55000), Some(dec!(80000)), dec!(0.35), dec!(7160)),
    bracket(dec!(80000), None, dec!(0.45), dec!(15160)),
];
