//! Employee profiles stored as TOML.
//!
//! A profile carries the raw answers the command-line tool asks for (the
//! social-insurance *base*, not the payment) plus the sweep grid settings.
//! Every key is optional; missing keys take the built-in defaults.
//!
//! ## Format
//!
//! ```toml
//! monthly_salary = 22000
//! annual_bonus = 60000
//! social_insurance_base = 4812
//! social_insurance_rate = 0.08
//! special_deduction = 1500
//! other_deductions = 0
//! employer_fund_base = 7000
//! fund_rate = 0.12
//! bonus_tax_method = "separate"
//!
//! [sweep]
//! step = 500
//! max_multiple = 2.5
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use fund_core::calculations::sweep::{DEFAULT_MAX_MULTIPLE, DEFAULT_STEP};
use fund_core::calculations::{BaseRange, CalculationError};
use fund_core::{BonusTaxMethod, CalculatorConfig};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// Errors that can occur while loading a profile.
#[derive(Debug, Error)]
pub enum ProfileError {
    #[error("cannot read profile '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid profile: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("profile values rejected: {0}")]
    Calculation(#[from] CalculationError),
}

/// Grid used when sweeping contribution bases.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SweepSettings {
    pub step: Decimal,
    /// Upper end of the grid as a multiple of the employer's fund base.
    pub max_multiple: Decimal,
}

impl Default for SweepSettings {
    fn default() -> Self {
        Self {
            step: DEFAULT_STEP,
            max_multiple: DEFAULT_MAX_MULTIPLE,
        }
    }
}

/// Inputs for one run of the optimizer, with explicit defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Profile {
    pub monthly_salary: Decimal,
    pub annual_bonus: Decimal,
    pub social_insurance_base: Decimal,
    /// Employee share of social insurance, applied to the base.
    pub social_insurance_rate: Decimal,
    pub special_deduction: Decimal,
    pub other_deductions: Decimal,
    pub employer_fund_base: Decimal,
    pub fund_rate: Decimal,
    pub bonus_tax_method: BonusTaxMethod,
    pub sweep: SweepSettings,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            monthly_salary: dec!(22000),
            annual_bonus: dec!(60000),
            social_insurance_base: dec!(4812),
            social_insurance_rate: dec!(0.08),
            special_deduction: dec!(1500),
            other_deductions: dec!(0),
            employer_fund_base: dec!(7000),
            fund_rate: dec!(0.12),
            bonus_tax_method: BonusTaxMethod::Combined,
            sweep: SweepSettings::default(),
        }
    }
}

impl Profile {
    /// Parses a profile from TOML text.
    pub fn from_toml_str(input: &str) -> Result<Self, ProfileError> {
        Ok(toml::from_str(input)?)
    }

    /// Reads and parses the profile at `path`.
    pub fn load(path: &Path) -> Result<Self, ProfileError> {
        let text = fs::read_to_string(path).map_err(|source| ProfileError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let profile = Self::from_toml_str(&text)?;
        debug!(path = %path.display(), "profile loaded");
        Ok(profile)
    }

    /// Monthly social-insurance payment: base × rate.
    pub fn monthly_social_insurance(&self) -> Decimal {
        self.social_insurance_base * self.social_insurance_rate
    }

    /// Builds the engine configuration. Validation happens when the config
    /// is handed to [`fund_core::ScenarioEngine::new`].
    pub fn to_config(&self) -> CalculatorConfig {
        CalculatorConfig {
            monthly_salary: self.monthly_salary,
            annual_bonus: self.annual_bonus,
            monthly_social_insurance: self.monthly_social_insurance(),
            monthly_special_deduction: self.special_deduction,
            monthly_other_deductions: self.other_deductions,
            fund_rate: self.fund_rate,
            employer_declared_base: self.employer_fund_base,
        }
    }

    /// Candidate bases from the employer's fund base up to
    /// `employer_fund_base * sweep.max_multiple`.
    pub fn base_range(&self) -> Result<BaseRange, ProfileError> {
        Ok(BaseRange::from_declared_base(
            self.employer_fund_base,
            self.sweep.max_multiple,
            self.sweep.step,
        )?)
    }
}
