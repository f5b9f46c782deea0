mod bonus_tax_method;
mod calculator_config;
mod scenario_result;
mod tax_bracket;

pub use bonus_tax_method::{BonusTaxMethod, ParseBonusTaxMethodError};
pub use calculator_config::{CalculatorConfig, MONTHLY_PERSONAL_ALLOWANCE};
pub use scenario_result::ScenarioResult;
pub use tax_bracket::{BONUS_BRACKETS, COMPREHENSIVE_BRACKETS, TaxBracket};
