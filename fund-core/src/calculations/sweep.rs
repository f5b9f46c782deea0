//! Sweep of candidate contribution bases.
//!
//! The sweep evaluates a fixed, ordered grid of bases and keeps the one with
//! the highest annual total income. It only sees grid points: an optimum
//! that lies between two points, or past the last point that fits under the
//! range end, is not found. Use a finer step when that matters.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;
use tracing::{debug, info};

use super::CalculationError;
use super::ScenarioEngine;
use super::common::{checked_mul, ensure_non_negative};
use crate::{BonusTaxMethod, ScenarioResult};

/// Default grid spacing between candidate bases.
pub const DEFAULT_STEP: Decimal = dec!(500);

/// Default upper end of the grid as a multiple of the declared base.
pub const DEFAULT_MAX_MULTIPLE: Decimal = dec!(2.5);

/// Upper bound on the number of grid points a range may hold.
pub const MAX_CANDIDATES: usize = 100_000;

/// Inclusive, evenly spaced range of candidate bases.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BaseRange {
    start: Decimal,
    end: Decimal,
    step: Decimal,
}

impl BaseRange {
    /// Creates a range from `start` to `end` (inclusive) in `step` increments.
    ///
    /// # Errors
    ///
    /// Returns [`CalculationError::InvalidInput`] if `start` is negative,
    /// `step` is not positive, or `end` is below `start`. A `step` that would
    /// produce more than [`MAX_CANDIDATES`] grid points is rejected the same
    /// way.
    pub fn new(
        start: Decimal,
        end: Decimal,
        step: Decimal,
    ) -> Result<Self, CalculationError> {
        ensure_non_negative("start", start)?;
        if step <= Decimal::ZERO {
            return Err(CalculationError::invalid_input("step", step));
        }
        if end < start {
            return Err(CalculationError::invalid_input("end", end));
        }
        let limit = Decimal::from(MAX_CANDIDATES);
        let within_limit = (end - start)
            .checked_div(step)
            .is_some_and(|steps| steps.floor() < limit);
        if !within_limit {
            return Err(CalculationError::invalid_input("step", step));
        }
        Ok(Self { start, end, step })
    }

    /// Range from the employer's declared base up to `declared * max_multiple`.
    ///
    /// # Errors
    ///
    /// Same as [`BaseRange::new`]; a multiple below 1 makes `end < start`.
    /// [`CalculationError::Overflow`] if `declared_base * max_multiple` does
    /// not fit in a `Decimal`.
    ///
    /// # Example
    ///
    /// ```
    /// use rust_decimal_macros::dec;
    /// use fund_core::calculations::BaseRange;
    ///
    /// let range = BaseRange::from_declared_base(dec!(7000), dec!(2.5), dec!(500)).unwrap();
    ///
    /// assert_eq!(range.end(), dec!(17500));
    /// assert_eq!(range.candidates().len(), 22);
    /// ```
    pub fn from_declared_base(
        declared_base: Decimal,
        max_multiple: Decimal,
        step: Decimal,
    ) -> Result<Self, CalculationError> {
        ensure_non_negative("max_multiple", max_multiple)?;
        let end = checked_mul("end", declared_base, max_multiple)?;
        Self::new(declared_base, end, step)
    }

    pub fn start(&self) -> Decimal {
        self.start
    }

    pub fn end(&self) -> Decimal {
        self.end
    }

    pub fn step(&self) -> Decimal {
        self.step
    }

    /// All grid points `start, start + step, ...` not exceeding `end`.
    pub fn candidates(&self) -> Vec<Decimal> {
        let mut bases = Vec::new();
        let mut base = self.start;
        while base <= self.end {
            bases.push(base);
            match base.checked_add(self.step) {
                Some(next) => base = next,
                None => break,
            }
        }
        bases
    }
}

/// Every evaluated scenario plus the index of the best one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SweepOutcome {
    pub results: Vec<ScenarioResult>,
    /// Index of the first result with the highest annual total income.
    pub best_index: usize,
}

impl SweepOutcome {
    pub fn best(&self) -> &ScenarioResult {
        &self.results[self.best_index]
    }

    /// The first candidate evaluated; for a range built with
    /// [`BaseRange::from_declared_base`] this is the declared base.
    pub fn baseline(&self) -> &ScenarioResult {
        &self.results[0]
    }

    pub fn method(&self) -> BonusTaxMethod {
        self.baseline().bonus_tax_method
    }
}

/// Evaluates each base in order and picks the highest annual total income.
///
/// Ties keep the earliest base, so with an ascending grid the cheapest of
/// several equally good bases wins.
///
/// # Errors
///
/// * [`CalculationError::EmptySweep`] if `bases` is empty.
/// * Any error from [`ScenarioEngine::calculate_scenario`].
pub fn sweep(
    engine: &ScenarioEngine,
    bases: &[Decimal],
    method: BonusTaxMethod,
) -> Result<SweepOutcome, CalculationError> {
    if bases.is_empty() {
        return Err(CalculationError::EmptySweep);
    }

    let results = bases
        .iter()
        .map(|&base| engine.calculate_scenario(base, method))
        .collect::<Result<Vec<_>, _>>()?;

    let mut best_index = 0;
    for (index, result) in results.iter().enumerate().skip(1) {
        if result.annual_total_income > results[best_index].annual_total_income {
            best_index = index;
        }
    }

    debug!(candidates = results.len(), %method, "sweep complete");
    info!(
        best_base = %results[best_index].contribution_base,
        best_income = %results[best_index].annual_total_income,
        "best contribution base found"
    );

    Ok(SweepOutcome {
        results,
        best_index,
    })
}
