use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// How the year-end bonus is taxed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BonusTaxMethod {
    /// Bonus is added to comprehensive income and taxed on the annual table.
    #[default]
    Combined,
    /// Bonus is taxed on its own using the bonus table.
    Separate,
}

/// Error returned when a string is not a known [`BonusTaxMethod`] identifier.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown bonus tax method '{0}' (expected 'combined' or 'separate')")]
pub struct ParseBonusTaxMethodError(pub String);

impl BonusTaxMethod {
    pub fn all() -> &'static [BonusTaxMethod] {
        &[BonusTaxMethod::Combined, BonusTaxMethod::Separate]
    }

    /// Stable identifier used in files and on the command line.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Combined => "combined",
            Self::Separate => "separate",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "combined" => Some(Self::Combined),
            "separate" => Some(Self::Separate),
            _ => None,
        }
    }
}

impl fmt::Display for BonusTaxMethod {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BonusTaxMethod {
    type Err = ParseBonusTaxMethodError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| ParseBonusTaxMethodError(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn parse_round_trips_identifiers() {
        for method in BonusTaxMethod::all() {
            assert_eq!(BonusTaxMethod::parse(method.as_str()), Some(*method));
        }
    }

    #[test]
    fn parse_ignores_case_and_whitespace() {
        assert_eq!(
            BonusTaxMethod::parse("  Separate "),
            Some(BonusTaxMethod::Separate)
        );
    }

    #[test]
    fn from_str_rejects_unknown_identifier() {
        let result = "split".parse::<BonusTaxMethod>();

        assert_eq!(result, Err(ParseBonusTaxMethodError("split".to_string())));
    }

    #[test]
    fn default_is_combined() {
        assert_eq!(BonusTaxMethod::default(), BonusTaxMethod::Combined);
    }
}
